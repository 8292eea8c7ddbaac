//! Template engine for Go source generation using Handlebars.
//!
//! Provides a wrapper around Handlebars with the built-in Go templates
//! pre-registered. Templates only lay out text; quoting, alignment, and
//! comment shaping happen in Rust before rendering.
//!
//! # Examples
//!
//! ```
//! use gbgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let context = json!({
//!     "tool_version": "v1.0.0",
//!     "doc_lines": ["// Package flags is generated."],
//!     "package_name": "flags",
//! });
//! let preamble = engine.render("go/preamble", &context).unwrap();
//! assert!(preamble.ends_with("package flags\n"));
//! ```

use gbgen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Name of the file header template (banner, doc comment, package clause).
pub const PREAMBLE_TEMPLATE: &str = "go/preamble";

/// Name of the keys-only file template.
pub const KEYS_TEMPLATE: &str = "go/keys";

/// Name of the typed file template.
pub const TYPED_TEMPLATE: &str = "go/typed";

/// Template engine for code generation.
///
/// Output is never HTML-escaped, and strict mode makes a missing context
/// field a render error instead of empty output.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the Go templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_go_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_go_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        let templates = [
            (PREAMBLE_TEMPLATE, include_str!("../templates/go/preamble.go.hbs")),
            (KEYS_TEMPLATE, include_str!("../templates/go/keys.go.hbs")),
            (TYPED_TEMPLATE, include_str!("../templates/go/typed.go.hbs")),
        ];

        for (name, source) in templates {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    message: format!("Failed to register {name} template: {e}"),
                })?;
        }

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A referenced field is missing from the context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Rendering {template_name} failed: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(name: &str, declaration: &str, comments: &[&str], deprecated: bool) -> serde_json::Value {
        json!({
            "name": name,
            "quoted_id": "\"id\"",
            "comments": comments,
            "deprecated": deprecated,
            "declaration": declaration,
        })
    }

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_preamble_layout() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                PREAMBLE_TEMPLATE,
                &json!({
                    "tool_version": "v0.1.0",
                    "doc_lines": ["// Package p is generated.", "//", "//\tp.X"],
                    "package_name": "p",
                }),
            )
            .unwrap();

        assert_eq!(
            rendered.trim_end(),
            "// Code generated by gbgen v0.1.0. DO NOT EDIT.\n\n// Package p is generated.\n//\n//\tp.X\npackage p"
        );
    }

    #[test]
    fn test_keys_template_does_not_escape_quotes() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                KEYS_TEMPLATE,
                &json!({
                    "preamble": "package p",
                    "has_features": true,
                    "emit_list": false,
                    "features": [feature("FeatureA", "FeatureA FeatureKey = \"a&b\"", &["<note>"], true)],
                }),
            )
            .unwrap();

        assert_eq!(
            rendered.trim_end(),
            "package p\n\ntype FeatureKey string\n\nconst (\n\t// <note>\n\t// Deprecated: no active environments\n\tFeatureA FeatureKey = \"a&b\"\n)"
        );
    }

    #[test]
    fn test_keys_template_empty_list() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                KEYS_TEMPLATE,
                &json!({
                    "preamble": "package p",
                    "has_features": false,
                    "emit_list": true,
                    "features": [],
                }),
            )
            .unwrap();

        assert_eq!(
            rendered.trim_end(),
            "package p\n\ntype FeatureKey string\n\nconst ()\n\nvar FeatureList = []FeatureKey{}"
        );
    }

    #[test]
    fn test_typed_template_with_list() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render(
                TYPED_TEMPLATE,
                &json!({
                    "preamble": "package p",
                    "types_import": "\"example.com/types\"",
                    "has_features": true,
                    "emit_list": true,
                    "features": [
                        feature("FeatureA", "FeatureA  = types.BooleanFeature(\"a\")", &[], false),
                        feature("FeatureBB", "FeatureBB = types.JSONFeature(\"bb\")", &[], false),
                    ],
                }),
            )
            .unwrap();

        assert_eq!(
            rendered.trim_end(),
            "package p\n\nimport (\n\t\"example.com/types\"\n)\n\ntype FeatureKey string\n\nvar (\n\tFeatureA  = types.BooleanFeature(\"a\")\n\tFeatureBB = types.JSONFeature(\"bb\")\n)\n\nvar FeatureList = []FeatureKey{\n\tFeatureKey(\"id\"),\n\tFeatureKey(\"id\"),\n}"
        );
    }

    #[test]
    fn test_render_nonexistent_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("go/missing", &json!({})).unwrap_err();
        assert!(matches!(err, Error::TemplateError { .. }));
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render(KEYS_TEMPLATE, &json!({"has_features": false}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_template_is_template_error() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("go/missing", &json!({}));
        assert!(matches!(result.unwrap_err(), Error::TemplateError { .. }));
    }

    #[test]
    fn test_concurrent_template_usage() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }
}
