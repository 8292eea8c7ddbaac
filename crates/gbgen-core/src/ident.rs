//! Go identifier rules.
//!
//! Used by configuration validation (package names) and by the renderer's
//! output check (synthesized names). Letters and digits follow the Go
//! language definition: Unicode categories Lu, Ll, Lt, Lm, Lo, and Nd.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Go reserved keywords; none of them may be used as an identifier.
pub const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns `true` if `word` is a Go keyword.
#[must_use]
pub fn is_go_keyword(word: &str) -> bool {
    GO_KEYWORDS.contains(&word)
}

/// Returns `true` if `c` is a Go `unicode_letter` (general category L*).
///
/// Letter numbers such as `Ⅻ` and combining marks are not letters.
#[must_use]
pub fn is_unicode_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Returns `true` if `c` is a Go `unicode_digit` (general category Nd).
#[must_use]
pub fn is_unicode_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

/// Returns `true` if `s` is a syntactically valid Go identifier.
///
/// An identifier starts with a letter or `_` and continues with letters,
/// decimal digits, or `_`. Keywords are rejected.
///
/// # Examples
///
/// ```
/// use gbgen_core::ident::is_go_identifier;
///
/// assert!(is_go_identifier("FeatureCheckoutRedesign"));
/// assert!(is_go_identifier("FeatureAB_2"));
/// assert!(!is_go_identifier("2fa"));
/// assert!(!is_go_identifier("type"));
/// assert!(!is_go_identifier(""));
/// ```
#[must_use]
pub fn is_go_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(is_unicode_letter(first) || first == '_') {
        return false;
    }
    chars.all(|c| is_unicode_letter(c) || is_unicode_digit(c) || c == '_') && !is_go_keyword(s)
}

/// Returns `true` if `s` is usable as a Go package clause name.
///
/// Besides being an identifier, the blank identifier `_` is rejected.
#[must_use]
pub fn is_go_package_name(s: &str) -> bool {
    s != "_" && is_go_identifier(s)
}
