// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! A simple example showing how to declare a specification table and
//! parse the command-line against it.
//!
//! Try:
//!
//! ```bash
//! $ cargo run --example simple -- -d one --output=results.txt two -v three
//! ```

use argspec::{Arguments, FlagSpec, OptionSpec, Result, Spec};

fn main() -> Result<()> {
    let specs = vec![
        Spec::from(FlagSpec::new("--debug").short("-d").help("enable debug output")),
        Spec::from(
            OptionSpec::new("--output")
                .short("-o")
                .help("file to write results to")
                .value_name("path")
                .default_value("-"),
        ),
        Spec::alias("-v", "--debug"),
    ];

    let arguments = Arguments::from_env(&specs)?;

    println!("program name: {:?}", arguments.program_name());
    println!("debug: {}", arguments.flag_is_specified("--debug"));
    println!("output: {:?}", arguments.lookup_option("--output"));

    for (i, flag) in arguments.flags.iter().enumerate() {
        println!("flag[{}]: given {:?}, resolved {:?}", i, flag.given, flag.resolved);
    }

    for (i, option) in arguments.options.iter().enumerate() {
        println!(
            "option[{}]: given {:?}, resolved {:?}, value {:?}",
            i, option.given, option.resolved, option.value
        );
    }

    for (i, value) in arguments.values.iter().enumerate() {
        println!("value[{}]: {:?}", i, value);
    }

    Ok(())
}
