// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Illustrates a minimal program rendering its usage statement and
//! version banner from the specification table.
//!
//! Try:
//!
//! ```bash
//! $ cargo run --example usage -- --help
//! $ cargo run --example usage -- --version
//! ```

use std::env;
use std::io;
use std::process;

use argspec::{
    help_flag, invoke, show_usage, show_version, version_flag, Arguments, NoResources, Result,
    Spec, UsageInfo, Version, WriteSink,
};

fn usage_info() -> UsageInfo {
    UsageInfo::new()
        .summary("argspec demonstration tools")
        .copyright("Copyright (c) 2021 James O. D. Hunt")
        .description("illustrates minimal usage rendering")
        .version(Version::new(0, 1, 0))
        .console_width(80)
        .tab_size(-2)
        .blanks_between_items()
}

fn run(arguments: &Arguments, specs: &[Spec]) -> Result<i32> {
    let mut sink = WriteSink::new(io::stdout());

    if arguments.flag_is_specified("--help") {
        show_usage(arguments, &usage_info(), specs, &NoResources, &mut sink)?;

        return Ok(0);
    }

    if arguments.flag_is_specified("--version") {
        show_version(arguments, &usage_info(), &NoResources, &mut sink)?;

        return Ok(0);
    }

    println!(
        "flags: {}, options: {}, values: {}",
        arguments.flags.len(),
        arguments.options.len(),
        arguments.values.len()
    );

    Ok(0)
}

fn main() {
    let specs = vec![Spec::section("standard flags:"), help_flag(), version_flag()];

    let argv: Vec<String> = env::args().collect();

    let code = invoke(&argv, &specs, None, |arguments| run(arguments, &specs));

    process::exit(code);
}
