// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Usage, help and version rendering.
//!
//! The renderers take a specification table, a [UsageInfo] describing
//! the free-form header text and formatting configuration, and stream
//! fully wrapped and indented lines into a caller-supplied [LineSink].
//!
//! Before anything is rendered, a working copy of the [UsageInfo] is
//! normalized to a fixed point: the tool name is inferred from the
//! invocation path when unset, a default usage template is chosen from
//! the table when unset, tool-name tokens such as `:program:` are
//! spliced into the usage text, and `@id@` resource references are
//! replaced through the [ResourceStrings] capability (falling back to
//! the [UNKNOWN_IDENTIFIER] sentinel). The caller's value is never
//! modified.

use std::fmt;
use std::io::Write;

use tracing::trace;

use crate::args::Arguments;
use crate::error::Result;
use crate::reflow::{indent, indent_cells, wrap};
use crate::spec::{count_flags_and_options, Spec, DEFAULT_VALUE_NAME};

/// Sentinel substituted for a `@id@` reference that could not be
/// resolved to any text.
pub const UNKNOWN_IDENTIFIER: &str = "@unknown-identifier@";

/// Diagnostic substituted for a usage string that would grow beyond
/// [SPLICE_LIMIT] cells when splicing in the tool name.
const OVERLONG_USAGE: &str = "INVALID USAGE: TOO MANY RESULTING CHARACTERS!";

/// Ceiling on the usage text length after tool-name splicing.
const SPLICE_LIMIT: usize = 1001;

/// Ceiling on the usage text length after separator splitting.
const SPLIT_LIMIT: usize = 2000;

/// Upper bound on normalization passes; a pathological tool name that
/// itself embeds a tool-name tag would otherwise re-splice forever.
const PASS_LIMIT: usize = 64;

/// Tokens in the usage text that stand for the tool name, in match
/// priority order.
const TOOL_NAME_TAGS: [&str; 4] = [":toolName:", ":toolname:", ":program_name:", ":program:"];

/// Usage templates applied when no usage text was supplied, indexed by
/// `has_flags + 2 * has_options`.
const USAGE_TEMPLATES: [&str; 4] = [
    ":program: <arg1> [ ... <argN> ]",
    ":program: [ ... flags ... ] <arg1> [ ... <argN> ]",
    ":program: [ ... options ... ] <arg1> [ ... <argN> ]",
    ":program: [ ... flags/options ... ] <arg1> [ ... <argN> ]",
];

/// Number of normalized [UsageInfo] text fields.
const NUM_FIELDS: usize = 5;

/// A numeric program version.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Version {
    /// Major version number.
    pub major: u32,
    /// Minor version number.
    pub minor: u32,
    /// Revision number.
    pub revision: u32,
    /// Build number.
    pub build: u32,
}

impl Version {
    /// Create a new version with a zero build number.
    pub fn new(major: u32, minor: u32, revision: u32) -> Self {
        Version {
            major,
            minor,
            revision,
            build: 0,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.revision, self.build
        )
    }
}

/// Header text and formatting configuration for the renderers.
///
/// # Note
///
/// All members are public for caller convenience; the builder methods
/// are optional sugar.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UsageInfo {
    /// Name of the program; inferred from the invocation path
    /// when unset.
    pub tool_name: Option<String>,
    /// One-line summary shown first in the header.
    pub summary: Option<String>,
    /// Copyright line.
    pub copyright: Option<String>,
    /// One-line description of the program.
    pub description: Option<String>,
    /// Usage text; a template chosen from the specification table is
    /// used when unset. May contain a tool-name token (`:program:`)
    /// and may select multi-line layout by starting with a separator
    /// character.
    pub usage: Option<String>,
    /// Program version shown in the header.
    pub version: Version,
    /// Reserved formatting toggles; currently unused.
    pub flags: u32,
    /// Console width in cells: negative for unlimited, zero for no
    /// wrapping, positive to wrap at that many cells.
    pub console_width: i32,
    /// Signed indentation control: positive for that many cells per
    /// literal tab, zero for no indentation, negative for `|tab_size|`
    /// spaces per level.
    pub tab_size: i32,
    /// If set, a blank line separates successive body items.
    pub blanks_between_items: bool,
}

impl UsageInfo {
    /// Create an empty usage description.
    pub fn new() -> Self {
        UsageInfo::default()
    }

    /// Specify the tool name.
    pub fn tool_name(self, tool_name: &str) -> Self {
        UsageInfo {
            tool_name: Some(tool_name.into()),
            ..self
        }
    }

    /// Specify the summary line.
    pub fn summary(self, summary: &str) -> Self {
        UsageInfo {
            summary: Some(summary.into()),
            ..self
        }
    }

    /// Specify the copyright line.
    pub fn copyright(self, copyright: &str) -> Self {
        UsageInfo {
            copyright: Some(copyright.into()),
            ..self
        }
    }

    /// Specify the description line.
    pub fn description(self, description: &str) -> Self {
        UsageInfo {
            description: Some(description.into()),
            ..self
        }
    }

    /// Specify the usage text.
    pub fn usage(self, usage: &str) -> Self {
        UsageInfo {
            usage: Some(usage.into()),
            ..self
        }
    }

    /// Specify the program version.
    pub fn version(self, version: Version) -> Self {
        UsageInfo { version, ..self }
    }

    /// Specify the console width.
    pub fn console_width(self, console_width: i32) -> Self {
        UsageInfo {
            console_width,
            ..self
        }
    }

    /// Specify the indentation control value.
    pub fn tab_size(self, tab_size: i32) -> Self {
        UsageInfo { tab_size, ..self }
    }

    /// Separate successive body items with a blank line.
    pub fn blanks_between_items(self) -> Self {
        UsageInfo {
            blanks_between_items: true,
            ..self
        }
    }

    fn field_mut(&mut self, ix: usize) -> &mut Option<String> {
        match ix {
            0 => &mut self.tool_name,
            1 => &mut self.summary,
            2 => &mut self.copyright,
            3 => &mut self.description,
            _ => &mut self.usage,
        }
    }
}

/// Destination for rendered output lines.
///
/// Lines arrive fully wrapped and indented, without line terminators.
pub trait LineSink {
    /// Receive a single output line.
    fn line(&mut self, text: &str) -> Result<()>;

    /// Record-boundary signal, sent once at the end of each logical
    /// block (header, body, version banner).
    fn end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl LineSink for Vec<String> {
    fn line(&mut self, text: &str) -> Result<()> {
        self.push(text.into());

        Ok(())
    }
}

/// Adapter that writes each line, newline-terminated, to any [Write]
/// value, flushing on the record-boundary signal.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    /// Create a sink writing to the specified writer.
    pub fn new(writer: W) -> Self {
        WriteSink { writer }
    }
}

impl<W: Write> LineSink for WriteSink<W> {
    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;

        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.writer.flush()?;

        Ok(())
    }
}

/// Source of texts referenced by `@id@` tokens.
///
/// The original mechanism behind this is a platform string table; the
/// capability is injected so that any table (or none) can stand in.
pub trait ResourceStrings {
    /// Returns the text for the given string id, if any.
    fn load(&self, id: u32) -> Option<String>;
}

/// Resource capability for platforms without a string table; lookups
/// always fail, so `@id@` tokens resolve to [UNKNOWN_IDENTIFIER].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoResources;

impl ResourceStrings for NoResources {
    fn load(&self, _id: u32) -> Option<String> {
        None
    }
}

/// Obtains the file basename from the given path, taking into account
/// the rightmost path separator.
///
/// # Note
///
/// Forward slashes are always considered; backslashes additionally on
/// Windows builds.
pub(crate) fn basename(path: &str) -> &str {
    let mut cut = path.rfind('/');

    if cfg!(windows) {
        cut = match (cut, path.rfind('\\')) {
            (Some(s), Some(b)) => Some(s.max(b)),
            (s, b) => s.or(b),
        };
    }

    match cut {
        Some(ix) => &path[ix + 1..],
        None => path,
    }
}

/// A text field value matching the `@…@` placeholder pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FieldToken {
    /// No leading id could be parsed; the field resolves to the
    /// sentinel.
    Unparsed,
    /// A numeric resource id to offer to the [ResourceStrings]
    /// capability.
    Id(u32),
}

/// Classify a field value against the placeholder pattern: longer than
/// two chars, starting and ending with `@`. The sentinel itself never
/// matches, which is what guarantees the resolution loop terminates.
fn field_token(value: &str) -> Option<FieldToken> {
    if value == UNKNOWN_IDENTIFIER {
        return None;
    }

    if value.chars().count() <= 2 || !value.starts_with('@') || !value.ends_with('@') {
        return None;
    }

    let inner = &value[1..value.len() - 1];

    let first = inner.chars().next()?;
    if !('1'..='9').contains(&first) {
        return Some(FieldToken::Unparsed);
    }

    let digits_end = inner.find(|c: char| !c.is_ascii_digit()).unwrap_or(inner.len());

    // The id must run up to a '@' terminator (possibly the final one).
    let terminated = inner[digits_end..].chars().next().map_or(true, |c| c == '@');
    if !terminated {
        return Some(FieldToken::Unparsed);
    }

    match inner[..digits_end].parse::<u32>() {
        Ok(id) => Some(FieldToken::Id(id)),
        Err(_) => Some(FieldToken::Unparsed),
    }
}

/// Find the earliest tool-name token in the usage text, returning its
/// byte offset and length. Ties at the same offset are broken by
/// [TOOL_NAME_TAGS] order.
fn find_tool_name_tag(usage: &str) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for tag in TOOL_NAME_TAGS.iter() {
        if let Some(ix) = usage.find(tag) {
            if best.map_or(true, |(best_ix, _)| ix < best_ix) {
                best = Some((ix, tag.len()));
            }
        }
    }

    best
}

/// Splice the resolved tool name over the earliest tool-name token in
/// the usage text. Returns false when there is nothing to do.
fn splice_tool_name(info: &mut UsageInfo) -> bool {
    let name = match &info.tool_name {
        Some(name) => name.clone(),
        None => return false,
    };

    let usage = match info.usage.as_deref() {
        Some(usage) => usage,
        None => return false,
    };

    let (ix, tag_len) = match find_tool_name_tag(usage) {
        Some(tag) => tag,
        None => return false,
    };

    let required = usage.chars().count() - tag_len + name.chars().count();

    let spliced = if required > SPLICE_LIMIT {
        OVERLONG_USAGE.into()
    } else {
        format!("{}{}{}", &usage[..ix], name, &usage[ix + tag_len..])
    };

    info.usage = Some(spliced);

    true
}

/// Replace the first field holding an unresolved placeholder, if any.
fn resolve_one_field(info: &mut UsageInfo, resources: &dyn ResourceStrings) -> bool {
    for ix in 0..NUM_FIELDS {
        let replacement = match info.field_mut(ix).as_deref().and_then(field_token) {
            Some(FieldToken::Id(id)) => resources
                .load(id)
                .unwrap_or_else(|| UNKNOWN_IDENTIFIER.into()),
            Some(FieldToken::Unparsed) => UNKNOWN_IDENTIFIER.into(),
            None => continue,
        };

        trace!(field = ix, "replacing placeholder field");

        *info.field_mut(ix) = Some(replacement);

        return true;
    }

    false
}

/// Produce the normalized working copy rendered by the header and
/// version renderers.
fn normalize(
    info: &UsageInfo,
    program_path: Option<&str>,
    specs: &[Spec],
    resources: &dyn ResourceStrings,
) -> UsageInfo {
    let mut work = info.clone();

    if work.tool_name.is_none() {
        if let Some(path) = program_path {
            trace!(tool_name = basename(path), "inferred tool name");
            work.tool_name = Some(basename(path).into());
        }
    }

    if work.usage.is_none() {
        let (num_flags, num_options) = count_flags_and_options(specs);
        let index = (num_flags != 0) as usize + 2 * ((num_options != 0) as usize);

        work.usage = Some(USAGE_TEMPLATES[index].into());
    }

    // One transformation per pass, re-checked from the top, until a
    // fixed point: resource-loaded text may itself contain a tool-name
    // token or another placeholder.
    for _ in 0..PASS_LIMIT {
        if splice_tool_name(&mut work) {
            continue;
        }

        if resolve_one_field(&mut work, resources) {
            continue;
        }

        break;
    }

    work
}

/// Split a delimited usage string into physical lines.
///
/// The string is delimited when it starts with a punctuation character
/// (other than `@`), and that character occurs again with real content
/// before it. The leading separator and any trailing run of separators
/// are stripped, the remainder is split at each separator (empty
/// tokens discarded), and the tokens are re-joined with a newline plus
/// one level of indent. Anything else, including a rebuilt text that
/// would exceed [SPLIT_LIMIT] cells, is returned unmodified.
fn split_usage(usage: &str, tab_size: i32) -> String {
    let chars: Vec<char> = usage.chars().collect();

    if chars.len() < 2 {
        return usage.into();
    }

    let sep = chars[0];

    if !sep.is_ascii_punctuation() || sep == '@' {
        return usage.into();
    }

    let body = &chars[1..];

    let end = match body.iter().rposition(|c| *c != sep) {
        Some(ix) => ix + 1,
        None => return usage.into(),
    };

    let body = &body[..end];

    let embedded = body.iter().filter(|c| **c == sep).count();
    if embedded == 0 {
        return usage.into();
    }

    let prefix = indent(tab_size, 1);

    let required = body.len() + embedded * prefix.chars().count();
    if body.len() >= SPLIT_LIMIT || required >= SPLIT_LIMIT {
        return usage.into();
    }

    let mut out = String::with_capacity(required);
    let mut first = true;

    for token in body.split(|c: &char| *c == sep) {
        if token.is_empty() {
            continue;
        }

        if !first {
            out.push('\n');
            out.push_str(&prefix);
        }

        out.extend(token.iter());
        first = false;
    }

    out
}

fn emit_wrapped(text: &str, width: i32, sink: &mut dyn LineSink) -> Result<()> {
    for line in wrap(text, width, "", 0) {
        sink.line(&line)?;
    }

    Ok(())
}

fn version_line(info: &UsageInfo) -> String {
    match &info.tool_name {
        Some(name) => format!("{} version {}", name, info.version),
        None => info.version.to_string(),
    }
}

/// Render the usage header: summary, version line, copyright,
/// description, a blank line, the (possibly multi-line) usage block
/// and a trailing blank line.
///
/// Unset summary/copyright/description lines are omitted entirely; the
/// version and usage lines always render.
pub fn show_header<S: LineSink>(
    args: &Arguments,
    info: &UsageInfo,
    specs: &[Spec],
    resources: &dyn ResourceStrings,
    sink: &mut S,
) -> Result<()> {
    let work = normalize(info, args.program_path(), specs, resources);
    let width = work.console_width;

    if let Some(summary) = &work.summary {
        emit_wrapped(summary, width, sink)?;
    }

    emit_wrapped(&version_line(&work), width, sink)?;

    if let Some(copyright) = &work.copyright {
        emit_wrapped(copyright, width, sink)?;
    }

    if let Some(description) = &work.description {
        emit_wrapped(description, width, sink)?;
    }

    sink.line("")?;

    let usage = split_usage(work.usage.as_deref().unwrap_or(""), work.tab_size);
    emit_wrapped(&usage, width, sink)?;

    sink.line("")?;

    sink.end()
}

/// Resolve `@id@` references in the help texts of a working copy of
/// the table.
fn resolve_spec_help(specs: &mut [Spec], resources: &dyn ResourceStrings) {
    for _ in 0..PASS_LIMIT {
        let mut replaced = false;

        for spec in specs.iter_mut() {
            let help = match spec {
                Spec::Flag(flag) => &mut flag.help,
                Spec::Option(option) => &mut option.help,
                _ => continue,
            };

            let replacement = match help.as_deref().and_then(field_token) {
                Some(FieldToken::Id(id)) => resources
                    .load(id)
                    .unwrap_or_else(|| UNKNOWN_IDENTIFIER.into()),
                Some(FieldToken::Unparsed) => UNKNOWN_IDENTIFIER.into(),
                None => continue,
            };

            *help = Some(replacement);
            replaced = true;
            break;
        }

        if !replaced {
            break;
        }
    }
}

/// Render the usage body: a classification header (`Flags:`,
/// `Options:` or `Flags and options:`), a blank line, then every flag
/// and option in table order as an indented display line followed by
/// its reflowed help text.
///
/// A table with no flags and no options renders nothing at all.
/// Section entries emit their label and a blank line, starting a fresh
/// grouping context; alias entries are not displayed.
pub fn show_body<S: LineSink>(
    info: &UsageInfo,
    specs: &[Spec],
    resources: &dyn ResourceStrings,
    sink: &mut S,
) -> Result<()> {
    let mut specs = specs.to_vec();
    resolve_spec_help(&mut specs, resources);

    let (num_flags, num_options) = count_flags_and_options(&specs);

    if num_flags == 0 && num_options == 0 {
        return Ok(());
    }

    let header = match (num_flags != 0, num_options != 0) {
        (true, false) => "Flags:",
        (false, true) => "Options:",
        _ => "Flags and options:",
    };

    let width = info.console_width;
    let item_indent = indent(info.tab_size, 1);
    let item_cells = indent_cells(info.tab_size, 1);
    let help_indent = indent(info.tab_size, 2);
    let help_cells = indent_cells(info.tab_size, 2);

    sink.line(header)?;
    sink.line("")?;

    let mut first_item = true;

    for spec in &specs {
        let (display, help) = match spec {
            Spec::Section(label) => {
                sink.line(label)?;
                sink.line("")?;
                first_item = true;
                continue;
            }
            Spec::Alias(_) => continue,
            Spec::Flag(flag) => (flag.long.clone(), &flag.help),
            Spec::Option(option) => {
                let value_name = option
                    .value_name
                    .as_deref()
                    .unwrap_or(DEFAULT_VALUE_NAME);

                (format!("{}=<{}>", option.long, value_name), &option.help)
            }
        };

        if info.blanks_between_items && !first_item {
            sink.line("")?;
        }

        for line in wrap(&display, width, &item_indent, item_cells) {
            sink.line(&line)?;
        }

        if let Some(help) = help {
            for line in wrap(help, width, &help_indent, help_cells) {
                sink.line(&line)?;
            }
        }

        first_item = false;
    }

    sink.end()
}

/// Render the full usage statement: header then body, through the same
/// sink.
pub fn show_usage<S: LineSink>(
    args: &Arguments,
    info: &UsageInfo,
    specs: &[Spec],
    resources: &dyn ResourceStrings,
    sink: &mut S,
) -> Result<()> {
    show_header(args, info, specs, resources, sink)?;

    show_body(info, specs, resources, sink)
}

/// Render the version banner: a single `"name version
/// major.minor.revision.build"` line.
pub fn show_version<S: LineSink>(
    args: &Arguments,
    info: &UsageInfo,
    resources: &dyn ResourceStrings,
    sink: &mut S,
) -> Result<()> {
    let mut work = info.clone();

    if work.tool_name.is_none() {
        if let Some(path) = args.program_path() {
            work.tool_name = Some(basename(path).into());
        }
    }

    for _ in 0..PASS_LIMIT {
        if !resolve_one_field(&mut work, resources) {
            break;
        }
    }

    emit_wrapped(&version_line(&work), work.console_width, sink)?;

    sink.end()
}
