// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Greedy word-wrapping and indentation for usage output.
//!
//! Widths are measured in character cells: one cell per `char`, with a
//! tab counted as the configured tab size. No attempt is made to
//! handle proportional fonts or grapheme clusters.

/// Returns the indent string for the given signed tab size at the
/// specified nesting level.
///
/// - `tab_size > 0`: `level` literal tab characters.
/// - `tab_size == 0`: no indent, regardless of level.
/// - `tab_size < 0`: `level * |tab_size|` space characters.
pub fn indent(tab_size: i32, level: usize) -> String {
    if tab_size > 0 {
        "\t".repeat(level)
    } else if tab_size == 0 {
        String::new()
    } else {
        " ".repeat(level * tab_size.unsigned_abs() as usize)
    }
}

/// Returns the number of character cells the indent for the given tab
/// size and level occupies.
pub fn indent_cells(tab_size: i32, level: usize) -> usize {
    if tab_size == 0 {
        0
    } else {
        level * tab_size.unsigned_abs() as usize
    }
}

/// Word-wrap `text` so that no line exceeds `width` cells, prefixing
/// every emitted line with `indent` (whose width is `indent_cells`).
///
/// Each input line is wrapped independently; blank input lines pass
/// through unchanged. A width of zero or less disables wrapping
/// entirely. Words are never split: a single word wider than the
/// available width is placed on a line of its own.
///
/// When the indent leaves no room at all (`indent_cells >= width`) the
/// output degenerates to one word per line.
pub fn wrap(text: &str, width: i32, indent: &str, indent_cells: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }

        if width <= 0 {
            lines.push(prefixed(indent, raw.chars()));
            continue;
        }

        let avail = width as isize - indent_cells as isize;

        let chars: Vec<char> = raw.chars().collect();
        let mut start = 0;

        loop {
            let rest = chars.len() - start;

            if rest as isize <= avail {
                lines.push(prefixed(indent, chars[start..].iter().copied()));
                break;
            }

            // Break at the last space strictly inside the available
            // width; a word that cannot fit runs on to its own line.
            let window = if avail > 0 {
                (avail as usize).min(rest)
            } else {
                0
            };

            let cut = chars[start..start + window]
                .iter()
                .rposition(|c| *c == ' ')
                .or_else(|| chars[start..].iter().position(|c| *c == ' '));

            match cut {
                Some(at) => {
                    lines.push(prefixed(indent, chars[start..start + at].iter().copied()));
                    start += at + 1;

                    // Consume the rest of the separator run.
                    while start < chars.len() && chars[start] == ' ' {
                        start += 1;
                    }

                    if start == chars.len() {
                        break;
                    }
                }
                None => {
                    lines.push(prefixed(indent, chars[start..].iter().copied()));
                    break;
                }
            }
        }
    }

    lines
}

fn prefixed(indent: &str, content: impl Iterator<Item = char>) -> String {
    let mut line = String::from(indent);
    line.extend(content);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent() {
        #[derive(Debug)]
        struct TestData<'a> {
            tab_size: i32,
            level: usize,
            indent: &'a str,
            cells: usize,
        }

        let tests = &[
            TestData {
                tab_size: 0,
                level: 0,
                indent: "",
                cells: 0,
            },
            TestData {
                tab_size: 0,
                level: 3,
                indent: "",
                cells: 0,
            },
            TestData {
                tab_size: 4,
                level: 0,
                indent: "",
                cells: 0,
            },
            TestData {
                tab_size: 4,
                level: 1,
                indent: "\t",
                cells: 4,
            },
            TestData {
                tab_size: 8,
                level: 2,
                indent: "\t\t",
                cells: 16,
            },
            TestData {
                tab_size: -1,
                level: 2,
                indent: "  ",
                cells: 2,
            },
            TestData {
                tab_size: -3,
                level: 2,
                indent: "      ",
                cells: 6,
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(indent(d.tab_size, d.level), d.indent, "{}", msg);
            assert_eq!(indent_cells(d.tab_size, d.level), d.cells, "{}", msg);
        }
    }

    #[test]
    fn test_wrap() {
        #[derive(Debug)]
        struct TestData<'a> {
            text: &'a str,
            width: i32,
            indent: &'a str,
            cells: usize,
            lines: Vec<&'a str>,
        }

        let tests = &[
            TestData {
                text: "this is a flag",
                width: 80,
                indent: "",
                cells: 0,
                lines: vec!["this is a flag"],
            },
            // Negative or zero width disables wrapping.
            TestData {
                text: "this is a flag",
                width: -1,
                indent: "  ",
                cells: 2,
                lines: vec!["  this is a flag"],
            },
            TestData {
                text: "this is a flag",
                width: 0,
                indent: "  ",
                cells: 2,
                lines: vec!["  this is a flag"],
            },
            // The final chunk may fill the available width exactly.
            TestData {
                text: "this is a flag",
                width: 16,
                indent: "  ",
                cells: 2,
                lines: vec!["  this is a flag"],
            },
            TestData {
                text: "this is a flag",
                width: 12,
                indent: "  ",
                cells: 2,
                lines: vec!["  this is a", "  flag"],
            },
            TestData {
                text: "this is a flag",
                width: 80,
                indent: "\t\t",
                cells: 68,
                lines: vec!["\t\tthis is a", "\t\tflag"],
            },
            TestData {
                text: "this is a flag",
                width: 80,
                indent: "\t\t",
                cells: 72,
                lines: vec!["\t\tthis is", "\t\ta flag"],
            },
            TestData {
                text: "this is a flag",
                width: 80,
                indent: "\t\t",
                cells: 74,
                lines: vec!["\t\tthis", "\t\tis a", "\t\tflag"],
            },
            // No room at all: one word per line.
            TestData {
                text: "this is a flag",
                width: 80,
                indent: "\t\t",
                cells: 80,
                lines: vec!["\t\tthis", "\t\tis", "\t\ta", "\t\tflag"],
            },
            // A word wider than the available width gets its own line.
            TestData {
                text: "supercalifragilistic word",
                width: 10,
                indent: "",
                cells: 0,
                lines: vec!["supercalifragilistic", "word"],
            },
            // Each input line wraps independently; blank lines pass
            // through.
            TestData {
                text: "one two\n\nthree four",
                width: 9,
                indent: "",
                cells: 0,
                lines: vec!["one two", "", "three", "four"],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let lines = wrap(d.text, d.width, d.indent, d.cells);

            assert_eq!(lines, d.lines, "{}", msg);
        }
    }

    #[test]
    fn test_wrap_preserves_content() {
        let text = "the quick brown fox jumps over the lazy dog";

        for width in 1..64 {
            let lines = wrap(text, width, "", 0);

            let rejoined = lines.join(" ");
            let normalized: Vec<&str> = rejoined.split_whitespace().collect();
            let expected: Vec<&str> = text.split_whitespace().collect();

            assert_eq!(normalized, expected, "width {}", width);
        }
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "alpha beta gamma delta epsilon zeta";
        let longest_word = 7;

        for width in 1..40 {
            let lines = wrap(text, width, " ", 1);

            // A line only exceeds the width when a single word leaves
            // no choice.
            for line in &lines {
                assert!(
                    line.chars().count() <= (width as usize).max(1 + longest_word),
                    "width {}, line {:?}",
                    width,
                    line
                );
            }
        }
    }
}
