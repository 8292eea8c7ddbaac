//! Identifier synthesis.
//!
//! Turns raw feature keys into exported Go identifiers and disambiguates
//! collisions deterministically.

use gbgen_core::ident::{is_unicode_digit, is_unicode_letter};
use gbgen_core::{FeatureMeta, NamedFeature};
use std::collections::HashMap;

/// Prefix of every synthesized identifier.
pub const NAME_PREFIX: &str = "Feature";

/// Identifier body used when a key has no alphanumeric characters.
pub const FALLBACK_NAME: &str = "Unknown";

/// PascalCases a raw feature key.
///
/// The key is split on every run of characters that are neither Unicode
/// letters nor decimal digits, empty tokens are dropped, and each token has
/// its first character upper-cased. Letter numbers (`Ⅻ`) and combining
/// marks act as separators since Go rejects them in identifiers.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::naming::to_exported_identifier;
///
/// assert_eq!(to_exported_identifier("checkout-redesign"), "CheckoutRedesign");
/// assert_eq!(to_exported_identifier("new_ui.v2"), "NewUiV2");
/// assert_eq!(to_exported_identifier("v٢"), "V٢");
/// assert_eq!(to_exported_identifier("--"), "Unknown");
/// ```
#[must_use]
pub fn to_exported_identifier(feature_id: &str) -> String {
    let mut out = String::with_capacity(feature_id.len());

    for token in feature_id
        .split(|c: char| !(is_unicode_letter(c) || is_unicode_digit(c)))
        .filter(|t| !t.is_empty())
    {
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            out.push(upper_simple(first));
            out.extend(chars);
        }
    }

    if out.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out
    }
}

/// Upper-cases a character only when the mapping is a single character,
/// so `ß` stays `ß` instead of expanding to `SS`.
fn upper_simple(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Assigns an identifier to every feature of a sorted catalog.
///
/// The candidate is `Feature` + [`to_exported_identifier`]. The first
/// occurrence of a candidate keeps it; the Nth occurrence (N >= 2) gets an
/// `_N` suffix. Counters are scoped to this call, so the same input always
/// yields the same names.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::naming::synthesize;
/// use gbgen_core::{FeatureMeta, ValueType};
///
/// let named = synthesize(&[
///     FeatureMeta::new("a-b", ValueType::Boolean),
///     FeatureMeta::new("a_b", ValueType::Boolean),
/// ]);
/// assert_eq!(named[0].name, "FeatureAB");
/// assert_eq!(named[1].name, "FeatureAB_2");
/// ```
#[must_use]
pub fn synthesize(catalog: &[FeatureMeta]) -> Vec<NamedFeature> {
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(catalog.len());

    catalog
        .iter()
        .map(|meta| {
            let candidate = format!("{NAME_PREFIX}{}", to_exported_identifier(&meta.id));
            let count = counts.entry(candidate.clone()).or_insert(0);
            *count += 1;

            let name = if *count > 1 {
                tracing::debug!(id = %meta.id, candidate = %candidate, occurrence = *count, "Disambiguating identifier");
                format!("{candidate}_{count}")
            } else {
                candidate
            };

            NamedFeature {
                name,
                meta: meta.clone(),
            }
        })
        .collect()
}
