//! Go source rendering.
//!
//! Two modes share one preamble and comment layout:
//!
//! - keys-only: `type FeatureKey string` and a `const` group binding every
//!   synthesized name to its raw id
//! - typed: a `var` group binding every name to a wrapper from the
//!   `types` package selected by the feature's value type
//!
//! Both optionally emit an ordered `FeatureList`. Every rendered file passes
//! [`check_source`] before it is returned.

use crate::golang::{align_names, check_source, comment_lines, doc_comment, quote};
use crate::template_engine::{KEYS_TEMPLATE, PREAMBLE_TEMPLATE, TYPED_TEMPLATE, TemplateEngine};
use crate::types::{FeatureContext, FileContext, PreambleContext};
use gbgen_core::ident::is_go_identifier;
use gbgen_core::{BuildInfo, Error, NamedFeature, Result, ValueType};

/// Import path of the typed wrapper package.
pub const TYPES_IMPORT: &str = "github.com/eastnine90/gbgen/types";

/// Package name used when none is configured.
pub const DEFAULT_PACKAGE_NAME: &str = "features";

const SDK_IMPORT: &str = "github.com/growthbook/growthbook-golang";

/// Returns the `types` wrapper for a value type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueType`] for value types without a
/// wrapper.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::renderer::wrapper_for;
/// use gbgen_core::ValueType;
///
/// assert_eq!(wrapper_for("flag", &ValueType::Json).unwrap(), "JSONFeature");
/// assert!(wrapper_for("flag", &ValueType::from_raw("enum")).is_err());
/// ```
pub fn wrapper_for(feature_id: &str, value_type: &ValueType) -> Result<&'static str> {
    match value_type {
        ValueType::Boolean => Ok("BooleanFeature"),
        ValueType::String => Ok("StringFeature"),
        ValueType::Number => Ok("NumberFeature"),
        ValueType::Json => Ok("JSONFeature"),
        ValueType::Other(raw) => Err(Error::UnsupportedValueType {
            feature_id: feature_id.to_string(),
            value_type: raw.clone(),
        }),
    }
}

/// Renders named catalogs into Go source files.
///
/// # Examples
///
/// ```
/// use gbgen_codegen::Renderer;
/// use gbgen_codegen::naming::synthesize;
/// use gbgen_core::{BuildInfo, FeatureMeta, ValueType};
///
/// let renderer = Renderer::new(BuildInfo::new("v1.0.0")).unwrap();
/// let named = synthesize(&[FeatureMeta::new("dark-mode", ValueType::Boolean)]);
///
/// let src = renderer.render_keys("flags", &named, false).unwrap();
/// let src = String::from_utf8(src).unwrap();
/// assert!(src.contains("\tFeatureDarkMode FeatureKey = \"dark-mode\"\n"));
/// ```
#[derive(Debug)]
pub struct Renderer {
    engine: TemplateEngine<'static>,
    build_info: BuildInfo,
}

impl Renderer {
    /// Creates a renderer stamping `build_info` into every file banner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the built-in templates fail to
    /// register.
    pub fn new(build_info: BuildInfo) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            build_info,
        })
    }

    /// Renders the keys-only file.
    ///
    /// An empty `package_name` falls back to [`DEFAULT_PACKAGE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatError`] if the result is not valid Go (for
    /// example an invalid package name) and [`Error::TemplateError`] if
    /// rendering fails.
    pub fn render_keys(
        &self,
        package_name: &str,
        features: &[NamedFeature],
        emit_list: bool,
    ) -> Result<Vec<u8>> {
        let package_name = resolve_package_name(package_name);
        let import_path = quote(&format!("path/to/your/generated/{package_name}"));
        let doc = [
            format!("Package {package_name} contains generated GrowthBook feature keys."),
            String::new(),
            "Example:".to_string(),
            format!("\timport {import_path}"),
            String::new(),
            "\t// Use the generated keys with your GrowthBook SDK wrapper / evaluator.".to_string(),
            "\t_ = FeatureKey(\"example\")".to_string(),
        ];

        let context = FileContext {
            preamble: self.preamble(package_name, &doc)?,
            types_import: quote(TYPES_IMPORT),
            has_features: !features.is_empty(),
            emit_list,
            features: feature_contexts(features, |_, padded, quoted_id| {
                Ok(format!("{padded} FeatureKey = {quoted_id}"))
            })?,
        };

        self.finish(KEYS_TEMPLATE, &context)
    }

    /// Renders the typed file.
    ///
    /// An empty `package_name` falls back to [`DEFAULT_PACKAGE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueType`] for the first feature whose
    /// value type has no wrapper; nothing is rendered in that case. Other
    /// errors as for [`Renderer::render_keys`].
    pub fn render_typed(
        &self,
        package_name: &str,
        features: &[NamedFeature],
        emit_list: bool,
    ) -> Result<Vec<u8>> {
        let package_name = resolve_package_name(package_name);
        let import_path = quote(&format!("path/to/your/generated/{package_name}"));
        let doc = [
            format!("Package {package_name} contains generated GrowthBook typed feature helpers."),
            String::new(),
            "Example:".to_string(),
            format!("\timport {import_path}"),
            format!("\timport {}", quote(SDK_IMPORT)),
            String::new(),
            "\tres, err := FeatureExample.Evaluate(ctx, client)".to_string(),
            "\t_ = res; _ = err".to_string(),
        ];

        let context = FileContext {
            preamble: self.preamble(package_name, &doc)?,
            types_import: quote(TYPES_IMPORT),
            has_features: !features.is_empty(),
            emit_list,
            features: feature_contexts(features, |feature, padded, quoted_id| {
                let wrapper = wrapper_for(feature.id(), &feature.meta.value_type)?;
                Ok(format!("{padded} = types.{wrapper}({quoted_id})"))
            })?,
        };

        self.finish(TYPED_TEMPLATE, &context)
    }

    fn preamble(&self, package_name: &str, doc: &[String]) -> Result<String> {
        let context = PreambleContext {
            tool_version: self.build_info.version.clone(),
            doc_lines: doc_comment(doc),
            package_name: package_name.to_string(),
        };
        let rendered = self.engine.render(PREAMBLE_TEMPLATE, &context)?;
        Ok(rendered.trim_end().to_string())
    }

    fn finish(&self, template: &str, context: &FileContext) -> Result<Vec<u8>> {
        let rendered = self.engine.render(template, context)?;
        let mut src = rendered.trim_end().to_string();
        src.push('\n');

        check_source(&src)?;

        tracing::debug!(
            template,
            features = context.features.len(),
            bytes = src.len(),
            "Rendered Go source"
        );
        Ok(src.into_bytes())
    }
}

fn resolve_package_name(package_name: &str) -> &str {
    match package_name.trim() {
        "" => DEFAULT_PACKAGE_NAME,
        name => name,
    }
}

/// Builds declaration contexts with names aligned per comment-free section.
///
/// `declare` receives the feature, its padded name, and its quoted id.
fn feature_contexts<F>(features: &[NamedFeature], mut declare: F) -> Result<Vec<FeatureContext>>
where
    F: FnMut(&NamedFeature, &str, &str) -> Result<String>,
{
    let mut contexts: Vec<FeatureContext> = Vec::with_capacity(features.len());
    for feature in features {
        if !is_go_identifier(&feature.name) {
            return Err(Error::FormatError {
                message: format!(
                    "feature {:?}: {:?} is not a valid Go identifier",
                    feature.id(),
                    feature.name
                ),
            });
        }
        contexts.push(FeatureContext {
            name: feature.name.clone(),
            quoted_id: quote(feature.id()),
            comments: comment_lines(&feature.meta.description),
            deprecated: feature.meta.no_active_environments,
            declaration: String::new(),
        });
    }

    let names: Vec<&str> = contexts.iter().map(|c| c.name.as_str()).collect();
    let section_starts: Vec<bool> = contexts.iter().map(FeatureContext::has_comment_lines).collect();
    let padded = align_names(&names, &section_starts);

    for ((context, feature), padded) in contexts.iter_mut().zip(features).zip(padded) {
        context.declaration = declare(feature, &padded, &context.quoted_id)?;
    }

    Ok(contexts)
}
