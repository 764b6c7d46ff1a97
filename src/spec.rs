// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::error::{Error, Result};

/// Long form registered by [help_flag()].
pub const HELP_FLAG: &str = "--help";

/// Long form registered by [version_flag()].
pub const VERSION_FLAG: &str = "--version";

/// Value name shown for options that do not specify their own.
pub(crate) const DEFAULT_VALUE_NAME: &str = "value";

/// A boolean command-line switch with no associated value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlagSpec {
    /// Short form, for example `-v` (optional).
    pub short: Option<String>,
    /// Long form, for example `--verbose`.
    pub long: String,
    /// Description shown in the rendered body.
    pub help: Option<String>,
}

impl FlagSpec {
    /// Create a new flag with the specified long form.
    pub fn new(long: &str) -> Self {
        FlagSpec {
            long: long.into(),
            ..Default::default()
        }
    }

    /// Specify the short form for the flag.
    pub fn short(self, short: &str) -> Self {
        FlagSpec {
            short: Some(short.into()),
            ..self
        }
    }

    /// Specify the help text for the flag.
    pub fn help(self, help: &str) -> Self {
        FlagSpec {
            help: Some(help.into()),
            ..self
        }
    }
}

/// A command-line switch requiring an associated value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OptionSpec {
    /// Short form, for example `-o` (optional).
    pub short: Option<String>,
    /// Long form, for example `--output`.
    pub long: String,
    /// Description shown in the rendered body.
    pub help: Option<String>,
    /// Name shown for the value in the rendered body; the body
    /// renderer displays `--output=<name>`, defaulting the name
    /// to `value`.
    pub value_name: Option<String>,
    /// Value reported by lookups when the option was not specified.
    pub default_value: Option<String>,
    /// Set if the option must be specified.
    pub required: bool,
}

impl OptionSpec {
    /// Create a new option with the specified long form.
    pub fn new(long: &str) -> Self {
        OptionSpec {
            long: long.into(),
            ..Default::default()
        }
    }

    /// Specify the short form for the option.
    pub fn short(self, short: &str) -> Self {
        OptionSpec {
            short: Some(short.into()),
            ..self
        }
    }

    /// Specify the help text for the option.
    pub fn help(self, help: &str) -> Self {
        OptionSpec {
            help: Some(help.into()),
            ..self
        }
    }

    /// Specify the name shown for the option's value in usage output.
    pub fn value_name(self, value_name: &str) -> Self {
        OptionSpec {
            value_name: Some(value_name.into()),
            ..self
        }
    }

    /// Specify the value reported when the option is not given.
    pub fn default_value(self, default_value: &str) -> Self {
        OptionSpec {
            default_value: Some(default_value.into()),
            ..self
        }
    }

    /// Specify that the option must be provided on the command-line.
    pub fn required(self) -> Self {
        OptionSpec {
            required: true,
            ..self
        }
    }
}

/// An alternate form by which another entry may be invoked.
///
/// Aliases take part in parsing only; they are never displayed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AliasSpec {
    /// The form accepted on the command-line, for example `-v`.
    pub given: String,
    /// The long form of the flag or option it stands for.
    pub resolved: String,
}

/// A single entry of a specification table.
///
/// A program describes the command-line it accepts as a slice of these
/// entries; the parser and the usage renderers both read the same
/// table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Spec {
    /// A boolean switch.
    Flag(FlagSpec),
    /// A switch requiring a value.
    Option(OptionSpec),
    /// A labelled gap that starts a fresh grouping context in the
    /// rendered body.
    Section(String),
    /// An alternate invocation form for another entry.
    Alias(AliasSpec),
}

impl Spec {
    /// Create a section entry with the specified label.
    pub fn section(label: &str) -> Self {
        Spec::Section(label.into())
    }

    /// Create an alias mapping `given` to the entry whose long form is
    /// `resolved`.
    pub fn alias(given: &str, resolved: &str) -> Self {
        Spec::Alias(AliasSpec {
            given: given.into(),
            resolved: resolved.into(),
        })
    }
}

impl From<FlagSpec> for Spec {
    fn from(flag: FlagSpec) -> Self {
        Spec::Flag(flag)
    }
}

impl From<OptionSpec> for Spec {
    fn from(option: OptionSpec) -> Self {
        Spec::Option(option)
    }
}

/// The stock `--help` flag.
pub fn help_flag() -> Spec {
    FlagSpec::new(HELP_FLAG)
        .help("shows this help and terminates")
        .into()
}

/// The stock `--version` flag.
pub fn version_flag() -> Spec {
    FlagSpec::new(VERSION_FLAG)
        .help("shows version information and terminates")
        .into()
}

/// Returns the number of flag and option entries in the table.
///
/// Sections and aliases are not counted.
pub fn count_flags_and_options(specs: &[Spec]) -> (usize, usize) {
    let mut num_flags = 0;
    let mut num_options = 0;

    for spec in specs {
        match spec {
            Spec::Flag(_) => num_flags += 1,
            Spec::Option(_) => num_options += 1,
            _ => (),
        }
    }

    (num_flags, num_options)
}

/// A name resolved against a specification table.
#[derive(Debug)]
pub(crate) enum Lookup<'a> {
    /// The table index and entry of the matching flag.
    Flag(usize, &'a FlagSpec),
    /// The table index and entry of the matching option.
    Option(usize, &'a OptionSpec),
}

/// Resolve a command-line form against the table.
///
/// Long and short forms are checked first, then aliases (a single
/// hop: an alias must name the long form of a flag or option).
pub(crate) fn lookup<'a>(specs: &'a [Spec], name: &str) -> Result<Lookup<'a>> {
    if let Some(found) = lookup_direct(specs, name) {
        return Ok(found);
    }

    for spec in specs {
        if let Spec::Alias(alias) = spec {
            if alias.given == name {
                return lookup_direct(specs, &alias.resolved)
                    .ok_or_else(|| Error::AliasTargetNotFound(alias.resolved.clone()));
            }
        }
    }

    Err(Error::UnknownFlagOrOption(name.into()))
}

fn lookup_direct<'a>(specs: &'a [Spec], name: &str) -> Option<Lookup<'a>> {
    for (index, spec) in specs.iter().enumerate() {
        match spec {
            Spec::Flag(flag) if flag.long == name || flag.short.as_deref() == Some(name) => {
                return Some(Lookup::Flag(index, flag));
            }
            Spec::Option(option)
                if option.long == name || option.short.as_deref() == Some(name) =>
            {
                return Some(Lookup::Option(index, option));
            }
            _ => (),
        }
    }

    None
}
