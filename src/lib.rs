// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Declarative command-line specifications with formatted usage and
//! help rendering.
//!
//! If you want lots of extra features, you should consider the
//! excellent [`clap`](https://crates.io/crates/clap) crate instead.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Terminology](#terminology)
//! * [Usage rendering](#usage-rendering)
//! * [Summary of features and behaviour](#summary-of-features-and-behaviour)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! This crate is used in three steps: describe the command-line a
//! program accepts as a table of [Spec] entries, parse `argv` against
//! that table into an [Arguments] record, and (usually only when asked
//! to with `--help` or `--version`) render a usage statement or
//! version banner from the very same table.
//!
//! # Quickstart
//!
//! > **Note:** If you are not familiar with command-line handling,
//! > see the [terminology](#terminology) section.
//!
//! 1. Declare the specification table:
//!
//!    ```rust
//!    use argspec::{help_flag, FlagSpec, OptionSpec, Spec};
//!
//!    let specs = vec![
//!        Spec::section("standard flags:"),
//!        help_flag(),
//!        Spec::from(FlagSpec::new("--debug").short("-d").help("enable debug output")),
//!        Spec::from(
//!            OptionSpec::new("--output")
//!                .short("-o")
//!                .help("file to write results to")
//!                .value_name("path")
//!                .default_value("-"),
//!        ),
//!    ];
//!    ```
//!
//! 1. Parse the command-line:
//!
//!    ```rust
//!    # use argspec::{Arguments, FlagSpec, Spec};
//!    #
//!    # let specs = vec![Spec::from(FlagSpec::new("--debug"))];
//!    #
//!    # let argv: Vec<String> = vec!["prog".into(), "--debug".into()];
//!    let arguments = Arguments::parse(&argv, &specs)?;
//!
//!    if arguments.flag_is_specified("--debug") {
//!        // ...
//!    }
//!    # Ok::<(), argspec::Error>(())
//!    ```
//!
//! 1. Render help on request:
//!
//!    ```rust
//!    # use argspec::{
//!    #     help_flag, show_usage, Arguments, NoResources, Spec, UsageInfo, Version, WriteSink,
//!    # };
//!    #
//!    # let specs = vec![help_flag()];
//!    # let argv: Vec<String> = vec!["prog".into()];
//!    # let arguments = Arguments::parse(&argv, &specs)?;
//!    let info = UsageInfo::new()
//!        .summary("My tools")
//!        .usage("USAGE: :program: [ ... flags ... ] <file>...")
//!        .version(Version::new(1, 2, 3))
//!        .console_width(80)
//!        .tab_size(-2);
//!
//!    let mut sink = WriteSink::new(std::io::stdout());
//!    show_usage(&arguments, &info, &specs, &NoResources, &mut sink)?;
//!    # Ok::<(), argspec::Error>(())
//!    ```
//!
//! # Terminology
//!
//! - A "flag" is a boolean switch with no associated value
//!   (`--debug`).
//! - An "option" is a switch requiring an associated value
//!   (`--output file.txt` or `--output=file.txt`), optionally with a
//!   default.
//! - An "alias" is an alternate short or long textual form by which a
//!   flag or option may be invoked.
//! - A "section" is a labelled gap in the table that groups the
//!   entries following it in the rendered help.
//! - A "value" (or "positional argument") is an argument that is none
//!   of the above.
//! - The special argument `--` is reserved to mean "end of all
//!   options": everything that follows is a value, even if it starts
//!   with a dash.
//!
//! # Usage rendering
//!
//! The renderers ([show_usage], [show_header], [show_body],
//! [show_version]) write fully formatted lines to any [LineSink]:
//!
//! - Help text is word-wrapped to [UsageInfo::console_width] and
//!   indented per [UsageInfo::tab_size] (positive for tabs, negative
//!   for that many spaces per level, zero for none).
//! - The usage text may embed a tool-name token (`:program:`, spliced
//!   with the tool name, which itself defaults to the basename of
//!   `argv[0]`), and may request multi-line layout by starting with a
//!   separator character, for example
//!   `"|USAGE:|  prog <file>|  prog --stdin"`.
//! - Any header or help text of the exact form `@id@` is resolved
//!   through a [ResourceStrings] capability, or replaced by the
//!   [UNKNOWN_IDENTIFIER] sentinel when that fails; rendering itself
//!   never fails on bad input.
//!
//! # Summary of features and behaviour
//!
//! - Simple, declarative, table-driven API.
//! - Small codebase.
//! - Comprehensive set of unit tests.
//! - Short forms, bundled short flags, aliases and required options.
//! - One specification table drives both parsing and help output.
//! - Wrapped, indented, width-aware usage rendering with stable,
//!   tested line-break behaviour.
//! - An [invoke()] wrapper giving uniform one-line diagnostics for
//!   invalid command-lines.
//!
//! # Limitations
//!
//! - Widths are measured per `char`: no proportional fonts, no
//!   grapheme clusters.
//! - No localization beyond the `@id@` resource indirection.
//! - Options with optional values are not supported: an entry is
//!   either a flag (no value) or an option (value required).

mod args;
mod error;
mod invoke;
mod reflow;
mod spec;
mod usage;

pub use error::{Error, Result};

pub use args::{Arguments, FoundFlag, FoundOption};

pub use invoke::{invoke, EXIT_USAGE};

pub use reflow::{indent, indent_cells, wrap};

pub use spec::{
    count_flags_and_options, help_flag, version_flag, AliasSpec, FlagSpec, OptionSpec, Spec,
    HELP_FLAG, VERSION_FLAG,
};

pub use usage::{
    show_body, show_header, show_usage, show_version, LineSink, NoResources, ResourceStrings,
    UsageInfo, Version, WriteSink, UNKNOWN_IDENTIFIER,
};
