// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// User specified a flag or option that is not in the
    /// specification table.
    #[error("unrecognised flag or option: {0:?}")]
    UnknownFlagOrOption(String),

    /// An option requires a value but none was given.
    #[error("missing value for option: {0:?}")]
    MissingOptionValue(String),

    /// A flag was given a value (`--flag=x`), but flags take none.
    #[error("flag does not take a value: {0:?}")]
    UnexpectedOptionValue(String),

    /// An option marked as required was not specified.
    #[error("required option not specified: {0:?}")]
    MissingRequiredOption(String),

    /// `Arguments::require_option()` did not find the named option
    /// and the specification table provides no default for it.
    #[error("required option is not found: {0}")]
    RequiredOptionNotFound(String),

    //------------------------------
    // Incorrect API usage errors (programmer error)
    //------------------------------
    /// An alias entry names a long form with no matching flag or
    /// option in the table.
    #[error("alias resolves to unknown entry: {0:?}")]
    AliasTargetNotFound(String),

    //------------------------------
    // Environmental errors
    //------------------------------
    /// Writing to the output sink failed.
    ///
    /// Only the error text is retained so that this type stays cheaply
    /// comparable and clonable.
    #[error("write to output sink failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
