use thiserror::Error;

/// Errors that can occur while resolving a recipe
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Failed to fetch a candidate recipe webpage
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Structured data was present but could not be interpreted
    #[error("Failed to parse recipe data: {0}")]
    Parse(String),

    /// The external text-extraction service failed or returned garbage
    #[error("Extraction service error: {0}")]
    Service(String),

    /// Every resolution stage came up empty
    #[error("All resolution stages failed to produce a recipe")]
    Exhausted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
