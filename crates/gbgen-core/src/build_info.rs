//! Build metadata embedded in generated files and `gbgen version`.

use serde::Serialize;
use std::fmt;

/// Version information of the running tool.
///
/// Captured once at process start and passed explicitly to the code that
/// needs it; nothing in the library reads it from global state.
///
/// # Examples
///
/// ```
/// use gbgen_core::BuildInfo;
///
/// let info = BuildInfo::new("v1.2.3");
/// assert_eq!(info.version, "v1.2.3");
/// assert_eq!(info.to_string(), "gbgen v1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    /// Version string, treated as opaque
    pub version: String,
    /// Source revision, when the build recorded one
    pub commit: Option<String>,
}

impl BuildInfo {
    /// Tool name used in banners.
    pub const TOOL_NAME: &'static str = "gbgen";

    /// Creates build info with only a version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            commit: None,
        }
    }

    /// Build info of this binary.
    ///
    /// The version comes from the package version; the commit from the
    /// `GBGEN_COMMIT` variable at compile time, if it was set.
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: format!("v{}", env!("CARGO_PKG_VERSION")),
            commit: option_env!("GBGEN_COMMIT")
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.commit {
            Some(commit) => write!(f, "{} {} ({commit})", Self::TOOL_NAME, self.version),
            None => write!(f, "{} {}", Self::TOOL_NAME, self.version),
        }
    }
}
