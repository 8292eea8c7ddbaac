//! Error types for gbgen.
//!
//! A single error hierarchy is shared by every crate in the workspace so that
//! the CLI can map any failure to an exit code without downcasting.
//!
//! # Examples
//!
//! ```
//! use gbgen_core::{Error, Result};
//!
//! fn require_key(key: &str) -> Result<()> {
//!     if key.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "API key cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_key("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for gbgen.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Contacting the GrowthBook API or decoding its response failed.
    ///
    /// Covers transport failures, non-success HTTP statuses, and malformed
    /// payloads. Always aborts the whole generation run.
    #[error("GrowthBook API request failed ({operation}): {message}")]
    ApiError {
        /// API operation that failed (e.g. `list features`)
        operation: String,
        /// HTTP status, when the server answered
        status: Option<u16>,
        /// Description of the failure
        message: String,
        /// Underlying error cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The API answered without a payload that could be interpreted.
    #[error("{operation}: empty response")]
    EmptyResponse {
        /// API operation that returned nothing
        operation: String,
    },

    /// Pagination did not make forward progress.
    ///
    /// Raised when the server reports more pages but the next offset does not
    /// advance past the current one.
    #[error("pagination stalled at offset {offset} (next offset {next_offset})")]
    PaginationStalled {
        /// Offset of the page that was just fetched
        offset: u64,
        /// Offset the server (or page size) pointed to
        next_offset: u64,
    },

    /// A feature has a value type with no typed wrapper.
    #[error("feature {feature_id:?}: unsupported valueType {value_type:?}")]
    UnsupportedValueType {
        /// Id of the offending feature
        feature_id: String,
        /// Raw value type reported by the API
        value_type: String,
    },

    /// Rendered source is not valid, canonically formatted Go.
    ///
    /// This always indicates a renderer bug or input the renderer cannot
    /// express; output is never emitted in this case.
    #[error("generated source is invalid: {message}")]
    FormatError {
        /// Description of the problem, with line information when known
        message: String,
    },

    /// The operation was cancelled or timed out before completion.
    #[error("operation cancelled: {operation}")]
    Cancelled {
        /// Operation that observed the cancellation
        operation: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration cannot be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Configuration was loaded but failed validation.
    #[error("invalid configuration:{}", problems.iter().map(|p| format!("\n - {p}")).collect::<String>())]
    InvalidConfig {
        /// Every problem found, in field order
        problems: Vec<String>,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when JSON, YAML, or TOML conversion fails.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem error.
    #[error("I/O error at {path}: {source}")]
    IoError {
        /// Path involved in the failed operation
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is an API or transport error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_core::Error;
    ///
    /// let err = Error::ApiError {
    ///     operation: "list features".to_string(),
    ///     status: Some(401),
    ///     message: "unauthorized".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_api_error());
    /// ```
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::EmptyResponse { .. } | Self::PaginationStalled { .. }
        )
    }

    /// Returns `true` if this error comes from an operation being cancelled.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_core::Error;
    ///
    /// let err = Error::Cancelled {
    ///     operation: "list features".to_string(),
    /// };
    /// assert!(err.is_cancelled());
    /// assert!(!err.is_api_error());
    /// ```
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_core::Error;
    ///
    /// let err = Error::InvalidConfig {
    ///     problems: vec!["growthbook.apiKey is required".to_string()],
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidConfig { .. })
    }

    /// Returns `true` if rendering failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gbgen_core::Error;
    ///
    /// let err = Error::UnsupportedValueType {
    ///     feature_id: "banner".to_string(),
    ///     value_type: "unknown".to_string(),
    /// };
    /// assert!(err.is_render_error());
    /// ```
    #[must_use]
    pub const fn is_render_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedValueType { .. } | Self::FormatError { .. } | Self::TemplateError { .. }
        )
    }

    /// Returns the HTTP status carried by an API error, if any.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for gbgen operations.
///
/// # Examples
///
/// ```
/// use gbgen_core::{Result, Error};
///
/// fn page_size(limit: u32) -> Result<u32> {
///     if limit == 0 {
///         return Err(Error::ConfigError {
///             message: "page size must be positive".to_string(),
///         });
///     }
///     Ok(limit)
/// }
///
/// assert!(page_size(100).is_ok());
/// assert!(page_size(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
