//! Go source helpers.
//!
//! Generated files must already be in canonical `gofmt` form, so the layout
//! rules the formatter would apply (string quoting, column alignment inside
//! declaration groups, doc comment shape) are reproduced here, together with
//! a structural check run on every rendered file.

use gbgen_core::ident::is_go_package_name;
use gbgen_core::{Error, Result};
use std::fmt::Write as _;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Quotes a string as a Go interpreted string literal.
///
/// Follows `strconv.Quote`: printable characters are kept, `"` and `\` are
/// escaped, and everything else uses the shortest Go escape.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::golang::quote;
///
/// assert_eq!(quote("checkout-redesign"), r#""checkout-redesign""#);
/// assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
/// assert_eq!(quote("tab\there"), r#""tab\there""#);
/// assert_eq!(quote("über"), "\"über\"");
/// ```
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c < ' ' || c == '\u{7F}' => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if is_printable(c) => out.push(c),
            c if u32::from(c) < 0x1_0000 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(out, "\\U{:08x}", u32::from(c));
            }
        }
    }
    out.push('"');
    out
}

/// Go's `strconv.IsPrint`: letters, marks, numbers, punctuation, symbols,
/// and the ASCII space.
fn is_printable(c: char) -> bool {
    use GeneralCategory as G;

    c == ' '
        || !matches!(
            get_general_category(c),
            G::SpaceSeparator
                | G::LineSeparator
                | G::ParagraphSeparator
                | G::Control
                | G::Format
                | G::PrivateUse
                | G::Unassigned
        )
}

/// Turns a free-text description into comment line bodies.
///
/// Each non-empty trimmed line becomes one entry. Carriage returns are
/// dropped because the Go scanner strips them from comments.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::golang::comment_lines;
///
/// let lines = comment_lines("  First line\r\n\n   second  \n");
/// assert_eq!(lines, vec!["First line", "second"]);
/// ```
#[must_use]
pub fn comment_lines(description: &str) -> Vec<String> {
    description
        .split('\n')
        .map(|line| line.replace('\r', ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Renders a package doc comment in the layout `gofmt` produces.
///
/// Lines starting with a tab are code; a code block is separated from a
/// preceding paragraph by an empty comment line. Empty lines become `//`.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::golang::doc_comment;
///
/// let lines = doc_comment(&["Package x does things.", "Example:", "\tx.Run()"]);
/// assert_eq!(lines, vec!["// Package x does things.", "// Example:", "//", "//\tx.Run()"]);
/// ```
#[must_use]
pub fn doc_comment<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 1);
    let mut previous_was_text = false;

    for line in lines {
        let line = line.as_ref().trim_end();
        if line.is_empty() {
            out.push("//".to_string());
            previous_was_text = false;
        } else if let Some(code) = line.strip_prefix('\t') {
            if previous_was_text {
                out.push("//".to_string());
            }
            out.push(format!("//\t{code}"));
            previous_was_text = false;
        } else {
            out.push(format!("// {line}"));
            previous_was_text = true;
        }
    }

    while out.last().is_some_and(|l| l == "//") {
        out.pop();
    }
    out
}

/// Pads identifiers so that the tokens after them line up.
///
/// `section_starts` marks entries that begin a new alignment section
/// (entries preceded by a comment line). Within a section every name is
/// padded to the widest name, measured in characters as `gofmt` does.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::golang::align_names;
///
/// let padded = align_names(&["A", "Long", "Mid"], &[false, false, true]);
/// assert_eq!(padded, vec!["A   ", "Long", "Mid"]);
/// ```
#[must_use]
pub fn align_names<S: AsRef<str>>(names: &[S], section_starts: &[bool]) -> Vec<String> {
    let mut padded = Vec::with_capacity(names.len());
    let mut start = 0;

    while start < names.len() {
        let mut end = start + 1;
        while end < names.len() && !section_starts.get(end).copied().unwrap_or(false) {
            end += 1;
        }

        let width = names[start..end]
            .iter()
            .map(|n| n.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        for name in &names[start..end] {
            let name = name.as_ref();
            let pad = width - name.chars().count();
            padded.push(format!("{name}{}", " ".repeat(pad)));
        }

        start = end;
    }

    padded
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    LineComment,
    BlockComment,
    Interpreted,
    Raw,
    Rune,
}

/// Checks that rendered text is structurally valid, canonically laid out Go.
///
/// Verified: a leading `package` clause with a valid name, balanced
/// brackets outside literals and comments, terminated literals, no NUL,
/// BOM, or carriage return, no trailing whitespace, and exactly one trailing
/// newline.
///
/// # Errors
///
/// Returns [`Error::FormatError`] describing the first problem found.
pub fn check_source(src: &str) -> Result<()> {
    if !src.ends_with('\n') || src.ends_with("\n\n") {
        return Err(format_error("file must end with exactly one newline"));
    }

    check_package_clause(src)?;

    let mut state = Scan::Code;
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut chars = src.chars().peekable();
    let mut line = 1_usize;

    while let Some(c) = chars.next() {
        match c {
            '\0' => return Err(format_error(format!("line {line}: NUL character"))),
            '\u{FEFF}' => return Err(format_error(format!("line {line}: byte order mark"))),
            '\r' => return Err(format_error(format!("line {line}: carriage return"))),
            _ => {}
        }

        if c == '\n' {
            match state {
                Scan::Interpreted | Scan::Rune => {
                    return Err(format_error(format!("line {line}: unterminated literal")));
                }
                Scan::LineComment => state = Scan::Code,
                _ => {}
            }
            line += 1;
            continue;
        }

        match state {
            Scan::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Scan::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Scan::BlockComment;
                }
                '"' => state = Scan::Interpreted,
                '`' => state = Scan::Raw,
                '\'' => state = Scan::Rune,
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, opened_at)) => {
                            return Err(format_error(format!(
                                "line {line}: {c:?} closes {open:?} opened on line {opened_at}"
                            )));
                        }
                        None => {
                            return Err(format_error(format!("line {line}: unmatched {c:?}")));
                        }
                    }
                }
                _ => {}
            },
            Scan::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Scan::Code;
                }
            }
            Scan::Interpreted | Scan::Rune => {
                let close = if state == Scan::Interpreted { '"' } else { '\'' };
                if c == '\\' {
                    chars.next();
                } else if c == close {
                    state = Scan::Code;
                }
            }
            Scan::Raw => {
                if c == '`' {
                    state = Scan::Code;
                }
            }
            Scan::LineComment => {}
        }
    }

    if !matches!(state, Scan::Code | Scan::LineComment) {
        return Err(format_error("unterminated literal or comment at end of file"));
    }
    if let Some((open, opened_at)) = stack.pop() {
        return Err(format_error(format!(
            "{open:?} opened on line {opened_at} is never closed"
        )));
    }

    if let Some((index, _)) = src
        .split('\n')
        .enumerate()
        .find(|(_, l)| l.ends_with([' ', '\t']))
    {
        return Err(format_error(format!(
            "line {}: trailing whitespace",
            index + 1
        )));
    }

    Ok(())
}

fn check_package_clause(src: &str) -> Result<()> {
    let mut in_block_comment = false;

    for raw in src.lines() {
        let line = raw.trim();
        if in_block_comment {
            if line.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if line.starts_with("/*") {
            in_block_comment = !line.contains("*/");
            continue;
        }

        return match line.strip_prefix("package ") {
            Some(name) if is_go_package_name(name.trim()) => Ok(()),
            Some(name) => Err(format_error(format!("invalid package name {name:?}"))),
            None => Err(format_error("missing package clause")),
        };
    }

    Err(format_error("missing package clause"))
}

fn format_error(message: impl Into<String>) -> Error {
    Error::FormatError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("a\u{0}b"), r#""a\x00b""#);
        assert_eq!(quote("\u{7F}"), r#""\x7f""#);
        assert_eq!(quote("\u{1B}[0m"), r#""\x1b[0m""#);
        assert_eq!(quote("bell\u{7}"), r#""bell\a""#);
        assert_eq!(quote("line\r\nnext"), r#""line\r\nnext""#);
    }

    #[test]
    fn test_quote_unicode() {
        assert_eq!(quote("日本語"), "\"日本語\"");
        assert_eq!(quote("🚀"), "\"🚀\"");
        assert_eq!(quote("a\u{A0}b"), r#""a\u00a0b""#);
        assert_eq!(quote("zero\u{200B}width"), r#""zero\u200bwidth""#);
        assert_eq!(quote("\u{FEFF}"), r#""\ufeff""#);
        assert_eq!(quote("soft\u{AD}hyphen"), r#""soft\u00adhyphen""#);
        assert_eq!(quote("\u{85}"), r#""\u0085""#);
        assert_eq!(quote("\u{F0000}"), r#""\U000f0000""#);
        assert_eq!(quote("line\u{2028}sep"), r#""line\u2028sep""#);
        assert_eq!(quote("\u{0378}"), r#""\u0378""#);
        assert_eq!(quote("नया Ⅻ"), "\"नया Ⅻ\"");
    }

    #[test]
    fn test_comment_lines_skips_blank_lines() {
        assert!(comment_lines("").is_empty());
        assert!(comment_lines(" \n\t\n").is_empty());
        assert_eq!(comment_lines("one\n\ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn test_doc_comment_layout() {
        let lines = doc_comment(&[
            "Package p contains things.",
            "",
            "Example:",
            "\timport \"p\"",
            "",
            "\t_ = p.X",
            "",
        ]);
        assert_eq!(
            lines,
            vec![
                "// Package p contains things.",
                "//",
                "// Example:",
                "//",
                "//\timport \"p\"",
                "//",
                "//\t_ = p.X",
            ]
        );
    }

    #[test]
    fn test_align_names_sections() {
        let padded = align_names(
            &["FeatureA", "FeatureLonger", "FeatureB", "FeatureC"],
            &[false, false, true, false],
        );
        assert_eq!(
            padded,
            vec!["FeatureA     ", "FeatureLonger", "FeatureB", "FeatureC"]
        );
    }

    #[test]
    fn test_align_counts_characters() {
        let padded = align_names(&["FeatureÜ", "FeatureAB"], &[false, false]);
        assert_eq!(padded, vec!["FeatureÜ ", "FeatureAB"]);
    }

    #[test]
    fn test_check_source_accepts_valid_file() {
        let src = "// Code generated. DO NOT EDIT.\n\n// Package p is a package.\npackage p\n\nconst (\n\tA = \"(\"\n\tB = `{`\n\tC = '['\n)\n";
        assert!(check_source(src).is_ok());
    }

    #[test]
    fn test_check_source_rejects_problems() {
        let cases = [
            ("package p", "newline"),
            ("package p\n\n", "newline"),
            ("const x = 1\n", "package clause"),
            ("package my-pkg\n", "package name"),
            ("package p\n\nvar x = (1\n", "never closed"),
            ("package p\n\nvar x = [1)\n", "closes"),
            ("package p\n\nvar x = \"abc\n", "unterminated"),
            ("package p \n", "trailing whitespace"),
            ("package p\n\nvar x = 1\u{0}\n", "NUL"),
            ("package p\r\n", "carriage return"),
        ];
        for (src, expected) in cases {
            let err = check_source(src).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{src:?}: expected {expected:?} in {err}"
            );
        }
    }

    #[test]
    fn test_check_source_ignores_brackets_in_comments() {
        assert!(check_source("package p\n\n// (unbalanced {\n/* ] */\n").is_ok());
    }
}
