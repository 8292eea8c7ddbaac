//! Template contexts.
//!
//! Every value a template prints is computed in Rust first: literals are
//! already quoted, names already padded, comments already split.

use serde::Serialize;

/// Context of the file header template.
#[derive(Debug, Clone, Serialize)]
pub struct PreambleContext {
    /// Version shown in the generated-code banner
    pub tool_version: String,
    /// Package doc comment, one entry per `//` line
    pub doc_lines: Vec<String>,
    /// Go package name
    pub package_name: String,
}

/// Context of the keys-only and typed file templates.
#[derive(Debug, Clone, Serialize)]
pub struct FileContext {
    /// Rendered header, ending with the package clause
    pub preamble: String,
    /// Quoted import path of the typed wrapper package
    pub types_import: String,
    /// `false` renders empty declaration groups
    pub has_features: bool,
    /// Whether to emit `FeatureList`
    pub emit_list: bool,
    /// One entry per declaration, in catalog order
    pub features: Vec<FeatureContext>,
}

/// One declaration inside a `const` or `var` group.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureContext {
    /// Synthesized identifier
    pub name: String,
    /// Raw id as a Go string literal
    pub quoted_id: String,
    /// Description comment lines, without the `// ` prefix
    pub comments: Vec<String>,
    /// Emit the deprecation marker
    pub deprecated: bool,
    /// Aligned declaration, e.g. `FeatureA FeatureKey = "a"`
    pub declaration: String,
}

impl FeatureContext {
    /// Returns `true` if any comment line precedes the declaration.
    #[must_use]
    pub fn has_comment_lines(&self) -> bool {
        self.deprecated || !self.comments.is_empty()
    }
}
