// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashMap;
use std::env;

use tracing::debug;

use crate::error::{Error, Result};
use crate::spec::{lookup, Lookup, Spec};
use crate::usage::basename;

const OPT_PREFIX: char = '-';

/// Special argument that is silently consumed and used to denote the end of
/// all flags and options; all arguments that follow are considered to be
/// positional values (even if they start with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";

const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

/// A flag found on the command-line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FoundFlag {
    /// Form actually given on the command-line (possibly a short form
    /// or an alias).
    pub given: String,
    /// Long form of the specification entry it resolved to.
    pub resolved: String,
    /// Index of that entry in the specification table.
    pub index: usize,
}

/// An option, with its value, found on the command-line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FoundOption {
    /// Form actually given on the command-line.
    pub given: String,
    /// Long form of the specification entry it resolved to.
    pub resolved: String,
    /// The value, taken from `name=value` or from the following
    /// argument.
    pub value: String,
    /// Index of that entry in the specification table.
    pub index: usize,
}

/// The result of parsing a command-line against a specification table.
///
/// # Note
///
/// The collection members are public for caller convenience; the
/// lookup methods below cover the common cases.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Arguments {
    /// `argv[0]`, as invoked.
    program_path: Option<String>,
    /// Flags found, in command-line order.
    pub flags: Vec<FoundFlag>,
    /// Options found, in command-line order.
    pub options: Vec<FoundOption>,
    /// Positional values, in command-line order.
    pub values: Vec<String>,
    /// Default values from the table, by long form, consulted by
    /// [Arguments::lookup_option()].
    defaults: HashMap<String, String>,
}

impl Arguments {
    /// Parse the program's own command-line against the table.
    pub fn from_env(specs: &[Spec]) -> Result<Self> {
        let argv: Vec<String> = env::args().collect();

        Arguments::parse(&argv, specs)
    }

    /// Parse a command-line against the table.
    ///
    /// # Parameters
    ///
    /// - `argv` - All arguments, including the program path as the
    ///   first element (as `env::args()` provides them).
    /// - `specs` - The specification table.
    ///
    /// # Notes
    ///
    /// - `--name=value` and `--name value` are equivalent for options.
    /// - An option consumes the following argument as its value even
    ///   if that argument starts with a dash, as `getopt(3)` would.
    /// - A group of short flags may be bundled (`-ab` for `-a -b`)
    ///   provided every member of the group is a flag.
    /// - A lone `-` and everything after `--` are positional values.
    pub fn parse(argv: &[String], specs: &[Spec]) -> Result<Self> {
        let mut arguments = Arguments {
            program_path: argv.first().cloned(),
            ..Default::default()
        };

        let mut end_of_options = false;

        // Set while an option is waiting for the next argument to
        // become its value.
        let mut pending: Option<(String, String, usize)> = None;

        for cli_arg in argv.iter().skip(1) {
            if let Some((given, resolved, index)) = pending.take() {
                arguments.options.push(FoundOption {
                    given,
                    resolved,
                    value: cli_arg.clone(),
                    index,
                });

                continue;
            }

            if end_of_options || !cli_arg.starts_with(OPT_PREFIX) || cli_arg == "-" {
                arguments.values.push(cli_arg.clone());

                continue;
            }

            if cli_arg == END_OF_OPTIONS {
                end_of_options = true;

                continue;
            }

            if cli_arg.starts_with(LONG_OPT_PREFIX) {
                let (name, inline) = match cli_arg.find('=') {
                    Some(ix) => (&cli_arg[..ix], Some(cli_arg[ix + 1..].to_string())),
                    None => (cli_arg.as_str(), None),
                };

                match lookup(specs, name)? {
                    Lookup::Flag(index, flag) => {
                        if inline.is_some() {
                            return Err(Error::UnexpectedOptionValue(cli_arg.clone()));
                        }

                        arguments.flags.push(FoundFlag {
                            given: name.into(),
                            resolved: flag.long.clone(),
                            index,
                        });
                    }
                    Lookup::Option(index, option) => match inline {
                        Some(value) => arguments.options.push(FoundOption {
                            given: name.into(),
                            resolved: option.long.clone(),
                            value,
                            index,
                        }),
                        None => pending = Some((name.into(), option.long.clone(), index)),
                    },
                }

                continue;
            }

            // A short form: the whole token first, then as a bundle of
            // single-character flags.
            match lookup(specs, cli_arg) {
                Ok(Lookup::Flag(index, flag)) => arguments.flags.push(FoundFlag {
                    given: cli_arg.clone(),
                    resolved: flag.long.clone(),
                    index,
                }),
                Ok(Lookup::Option(index, option)) => {
                    pending = Some((cli_arg.clone(), option.long.clone(), index));
                }
                Err(Error::UnknownFlagOrOption(_)) if cli_arg.chars().count() > 2 => {
                    let mut grouped = Vec::new();

                    for c in cli_arg.chars().skip(1) {
                        let short = format!("{}{}", OPT_PREFIX, c);

                        match lookup(specs, &short) {
                            Ok(Lookup::Flag(index, flag)) => grouped.push(FoundFlag {
                                given: short,
                                resolved: flag.long.clone(),
                                index,
                            }),
                            _ => return Err(Error::UnknownFlagOrOption(cli_arg.clone())),
                        }
                    }

                    arguments.flags.append(&mut grouped);
                }
                Err(e) => return Err(e),
            }
        }

        if let Some((given, _, _)) = pending {
            return Err(Error::MissingOptionValue(given));
        }

        // Check that mandatory options were specified, and snapshot
        // the table defaults for later lookups.
        for (index, spec) in specs.iter().enumerate() {
            if let Spec::Option(option) = spec {
                let specified = arguments.options.iter().any(|o| o.index == index);

                if option.required && !specified {
                    return Err(Error::MissingRequiredOption(option.long.clone()));
                }

                if let Some(default_value) = &option.default_value {
                    arguments
                        .defaults
                        .insert(option.long.clone(), default_value.clone());
                }
            }
        }

        debug!(
            flags = arguments.flags.len(),
            options = arguments.options.len(),
            values = arguments.values.len(),
            "parsed command line"
        );

        Ok(arguments)
    }

    /// The program path, as invoked (`argv[0]`).
    pub fn program_path(&self) -> Option<&str> {
        self.program_path.as_deref()
    }

    /// The basename of the program path.
    pub fn program_name(&self) -> Option<&str> {
        self.program_path().map(basename)
    }

    /// Determine whether the named flag was specified.
    ///
    /// The name may be any form the flag resolved from or to.
    pub fn flag_is_specified(&self, name: &str) -> bool {
        self.flags
            .iter()
            .any(|f| f.resolved == name || f.given == name)
    }

    /// The value of the named option: its last occurrence on the
    /// command-line, falling back to the table's default value.
    pub fn lookup_option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|o| o.resolved == name || o.given == name)
            .map(|o| o.value.as_str())
            .or_else(|| self.defaults.get(name).map(String::as_str))
    }

    /// As [Arguments::lookup_option()], but an absent option is an
    /// error.
    pub fn require_option(&self, name: &str) -> Result<&str> {
        self.lookup_option(name)
            .ok_or_else(|| Error::RequiredOptionNotFound(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::spec::{FlagSpec, OptionSpec};

    fn sv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    fn specs() -> Vec<Spec> {
        vec![
            FlagSpec::new("--debug").short("-d").into(),
            FlagSpec::new("--quiet").short("-q").into(),
            OptionSpec::new("--output").short("-o").into(),
            Spec::alias("-v", "--debug"),
        ]
    }

    #[test]
    fn test_parse_empty() {
        let arguments = Arguments::parse(&[], &specs()).unwrap();

        assert_eq!(arguments.program_path(), None);
        assert_eq!(arguments.program_name(), None);
        assert!(arguments.flags.is_empty());
        assert!(arguments.options.is_empty());
        assert!(arguments.values.is_empty());
    }

    #[test]
    fn test_parse() {
        #[derive(Debug)]
        struct TestData<'a> {
            cli_args: Vec<&'a str>,
            result: Result<()>,
            flags: Vec<&'a str>,
            options: Vec<(&'a str, &'a str)>,
            values: Vec<&'a str>,
        }

        let tests = &[
            TestData {
                cli_args: vec!["prog"],
                result: Ok(()),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--debug"],
                result: Ok(()),
                flags: vec!["--debug"],
                options: vec![],
                values: vec![],
            },
            // Short form and alias resolve to the long form.
            TestData {
                cli_args: vec!["prog", "-d", "-v"],
                result: Ok(()),
                flags: vec!["--debug", "--debug"],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--output", "file.txt"],
                result: Ok(()),
                flags: vec![],
                options: vec![("--output", "file.txt")],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--output=file.txt"],
                result: Ok(()),
                flags: vec![],
                options: vec![("--output", "file.txt")],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "-o", "file.txt"],
                result: Ok(()),
                flags: vec![],
                options: vec![("--output", "file.txt")],
                values: vec![],
            },
            // An option value may itself start with a dash.
            TestData {
                cli_args: vec!["prog", "--output", "-d"],
                result: Ok(()),
                flags: vec![],
                options: vec![("--output", "-d")],
                values: vec![],
            },
            // Intermingling of flags, options and values.
            TestData {
                cli_args: vec!["prog", "one", "-d", "two", "--output", "f", "three"],
                result: Ok(()),
                flags: vec!["--debug"],
                options: vec![("--output", "f")],
                values: vec!["one", "two", "three"],
            },
            // A lone dash is a value.
            TestData {
                cli_args: vec!["prog", "-"],
                result: Ok(()),
                flags: vec![],
                options: vec![],
                values: vec!["-"],
            },
            // End of options.
            TestData {
                cli_args: vec!["prog", "--", "--debug", "-x"],
                result: Ok(()),
                flags: vec![],
                options: vec![],
                values: vec!["--debug", "-x"],
            },
            // Bundled short flags.
            TestData {
                cli_args: vec!["prog", "-dq"],
                result: Ok(()),
                flags: vec!["--debug", "--quiet"],
                options: vec![],
                values: vec![],
            },
            // A bundle containing a non-flag fails wholesale.
            TestData {
                cli_args: vec!["prog", "-do"],
                result: Err(Error::UnknownFlagOrOption("-do".into())),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--nope"],
                result: Err(Error::UnknownFlagOrOption("--nope".into())),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "-x"],
                result: Err(Error::UnknownFlagOrOption("-x".into())),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--debug=yes"],
                result: Err(Error::UnexpectedOptionValue("--debug=yes".into())),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
            TestData {
                cli_args: vec!["prog", "--output"],
                result: Err(Error::MissingOptionValue("--output".into())),
                flags: vec![],
                options: vec![],
                values: vec![],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = Arguments::parse(&sv(&d.cli_args), &specs());

            let msg = format!("{}, result: {:?}", msg, result);

            if d.result.is_err() {
                assert!(result.is_err(), "{}", msg);

                let expected_err = format!("{:?}", d.result.as_ref().err());
                let actual_err = format!("{:?}", result.as_ref().err());

                assert_eq!(actual_err, expected_err, "{}", msg);

                continue;
            }

            let arguments = result.unwrap();

            let flags: Vec<&str> = arguments.flags.iter().map(|f| f.resolved.as_str()).collect();
            assert_eq!(flags, d.flags, "{}", msg);

            let options: Vec<(&str, &str)> = arguments
                .options
                .iter()
                .map(|o| (o.resolved.as_str(), o.value.as_str()))
                .collect();
            assert_eq!(options, d.options, "{}", msg);

            let values: Vec<&str> = arguments.values.iter().map(String::as_str).collect();
            assert_eq!(values, d.values, "{}", msg);
        }
    }

    #[test]
    fn test_parse_records_given_forms() {
        let arguments = Arguments::parse(&sv(&["prog", "-v", "--debug"]), &specs()).unwrap();

        assert_eq!(arguments.flags.len(), 2);

        assert_eq!(arguments.flags[0].given, "-v");
        assert_eq!(arguments.flags[0].resolved, "--debug");
        assert_eq!(arguments.flags[0].index, 0);

        assert_eq!(arguments.flags[1].given, "--debug");
        assert_eq!(arguments.flags[1].resolved, "--debug");
    }

    #[test]
    fn test_parse_broken_alias() {
        let specs = vec![
            FlagSpec::new("--debug").into(),
            Spec::alias("-b", "--broken"),
        ];

        let result = Arguments::parse(&sv(&["prog", "-b"]), &specs);

        assert_eq!(
            result.unwrap_err(),
            Error::AliasTargetNotFound("--broken".into())
        );
    }

    #[test]
    fn test_parse_required_option() {
        let specs = vec![
            Spec::from(OptionSpec::new("--output").required()),
            FlagSpec::new("--debug").into(),
        ];

        let result = Arguments::parse(&sv(&["prog", "--debug"]), &specs);
        assert_eq!(
            result.unwrap_err(),
            Error::MissingRequiredOption("--output".into())
        );

        let result = Arguments::parse(&sv(&["prog", "--output", "f"]), &specs);
        assert!(result.is_ok());

        // A required option after `--` does not count.
        let result = Arguments::parse(&sv(&["prog", "--", "--output", "f"]), &specs);
        assert_eq!(
            result.unwrap_err(),
            Error::MissingRequiredOption("--output".into())
        );
    }

    #[test]
    fn test_lookup_option_and_defaults() {
        let specs = vec![
            Spec::from(OptionSpec::new("--output").short("-o").default_value("-")),
            Spec::from(OptionSpec::new("--level")),
        ];

        let arguments = Arguments::parse(&sv(&["prog"]), &specs).unwrap();

        // Not given: the default applies, where there is one.
        assert_eq!(arguments.lookup_option("--output"), Some("-"));
        assert_eq!(arguments.lookup_option("--level"), None);

        assert_eq!(
            arguments.require_option("--level").unwrap_err(),
            Error::RequiredOptionNotFound("--level".into())
        );

        // The last occurrence wins.
        let arguments =
            Arguments::parse(&sv(&["prog", "-o", "first", "--output=second"]), &specs).unwrap();

        assert_eq!(arguments.lookup_option("--output"), Some("second"));
        assert_eq!(arguments.require_option("--output"), Ok("second"));
    }

    #[test]
    fn test_flag_is_specified() {
        let arguments = Arguments::parse(&sv(&["prog", "-v"]), &specs()).unwrap();

        assert!(arguments.flag_is_specified("--debug"));
        assert!(arguments.flag_is_specified("-v"));
        assert!(!arguments.flag_is_specified("--quiet"));
    }

    #[test]
    fn test_program_name() {
        let arguments = Arguments::parse(&sv(&["/usr/bin/prog"]), &specs()).unwrap();

        assert_eq!(arguments.program_path(), Some("/usr/bin/prog"));
        assert_eq!(arguments.program_name(), Some("prog"));
    }
}
