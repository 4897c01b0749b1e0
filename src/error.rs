//! # Error Handling
//!
//! This module defines the centralized error type for `enterprise-roster`.
//! It uses the `thiserror` library to describe every failure the report
//! pipeline can run into, from transport problems talking to GitHub to
//! malformed configuration.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes. Variants carry enough
//!   context (status codes, URLs, organization names) for a warning line in
//!   the run log to be actionable on its own.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Whether an error aborts the run or only one organization is not encoded
//! here: that decision belongs to the orchestrator, which knows which stage
//! produced it.

use thiserror::Error;

/// Main error type for enterprise-roster operations
#[derive(Error, Debug)]
pub enum Error {
    /// The resolved configuration is missing a required value or holds an
    /// invalid one.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The API answered with a non-success HTTP status.
    #[error("GitHub API error for {url}: {status} - {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// The GraphQL endpoint returned an `errors` array.
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    /// A resource the pipeline depends on does not exist or is not visible
    /// to the token.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// A paginated source returned an inconsistent `pageInfo`.
    #[error("Pagination error: {message}")]
    Pagination { message: String },

    /// A timestamp could not be truncated to a calendar date.
    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    /// The requested sort column does not name a roster field.
    #[error("Unknown sort column: {column} (expected one of {expected})")]
    UnknownSortColumn { column: String, expected: String },

    /// An HTTP transport error, wrapped from `reqwest::Error`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A CSV serialization error, wrapped from `csv::Error`.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the requested resource is absent, either
    /// reported explicitly or as an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::Api { status: 404, .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
