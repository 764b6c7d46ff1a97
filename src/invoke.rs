// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::args::Arguments;
use crate::error::Result;
use crate::spec::Spec;
use crate::usage::basename;

/// Exit code returned by [invoke()] when the command-line is invalid.
pub const EXIT_USAGE: i32 = 1;

/// Parse the command-line and hand the result to the program's main
/// function, reporting failures uniformly.
///
/// On a parse failure, or when `main_fn` returns an error, a single
/// diagnostic line of the form
/// `"<name>: invalid command-line: <error>"` is written to stderr and
/// [EXIT_USAGE] is returned. Otherwise `main_fn`'s exit code is
/// returned.
///
/// # Parameters
///
/// - `argv` - All arguments, including the program path as the first
///   element.
/// - `specs` - The specification table.
/// - `program_name` - Name used in the diagnostic; the basename of
///   `argv[0]` when `None`.
/// - `main_fn` - The program body.
pub fn invoke<F>(argv: &[String], specs: &[Spec], program_name: Option<&str>, main_fn: F) -> i32
where
    F: FnOnce(&Arguments) -> Result<i32>,
{
    let name = diagnostic_name(argv, program_name);

    match Arguments::parse(argv, specs).and_then(|arguments| main_fn(&arguments)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: invalid command-line: {}", name, e);

            EXIT_USAGE
        }
    }
}

fn diagnostic_name(argv: &[String], program_name: Option<&str>) -> String {
    match program_name {
        Some(name) => name.into(),
        None => argv
            .first()
            .map(|path| basename(path).to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::spec::FlagSpec;

    fn sv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_invoke_passes_exit_code_through() {
        let specs = vec![Spec::from(FlagSpec::new("--debug"))];

        let code = invoke(&sv(&["prog", "--debug"]), &specs, None, |arguments| {
            assert!(arguments.flag_is_specified("--debug"));

            Ok(7)
        });

        assert_eq!(code, 7);
    }

    #[test]
    fn test_invoke_parse_failure() {
        let specs = vec![Spec::from(FlagSpec::new("--debug"))];

        let code = invoke(&sv(&["prog", "--nope"]), &specs, None, |_| {
            panic!("main function must not run on a parse failure");
        });

        assert_eq!(code, EXIT_USAGE);
    }

    #[test]
    fn test_invoke_main_failure() {
        let specs = vec![Spec::from(FlagSpec::new("--debug"))];

        let code = invoke(&sv(&["prog"]), &specs, None, |arguments| {
            arguments.require_option("--unknown")?;

            Ok(0)
        });

        assert_eq!(code, EXIT_USAGE);
    }

    #[test]
    fn test_diagnostic_name() {
        #[derive(Debug)]
        struct TestData<'a> {
            argv: Vec<&'a str>,
            program_name: Option<&'a str>,
            name: &'a str,
        }

        let tests = &[
            TestData {
                argv: vec![],
                program_name: None,
                name: "",
            },
            TestData {
                argv: vec!["test_1_0"],
                program_name: None,
                name: "test_1_0",
            },
            TestData {
                argv: vec!["/usr/bin/test_1_0"],
                program_name: None,
                name: "test_1_0",
            },
            // An explicit name wins over the invocation path.
            TestData {
                argv: vec!["/usr/bin/test_1_0"],
                program_name: Some("program-argument-name"),
                name: "program-argument-name",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(
                diagnostic_name(&sv(&d.argv), d.program_name),
                d.name,
                "{}",
                msg
            );
        }
    }

    #[test]
    fn test_diagnostic_text() {
        // The wording `invoke()` writes for a missing required option.
        let e = Error::RequiredOptionNotFound("--unknown".into());

        assert_eq!(
            format!("prog: invalid command-line: {}", e),
            "prog: invalid command-line: required option is not found: --unknown"
        );
    }
}
