use crate::links::DomainRules;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Resolver configuration
///
/// Loaded from an optional `resolver.toml` plus `RESOLVER__`-prefixed
/// environment variables; every field has a default, so running with no
/// configuration at all works against a local Ollama.
#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Domain allowlist/denylist used by recipe-link detection
    #[serde(default)]
    pub domains: DomainRules,
    /// External text-extraction service settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Webpage fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            domains: DomainRules::default(),
            extraction: ExtractionConfig::default(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

/// Settings for the external text-extraction service
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Base URL of the Ollama-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_service_timeout")]
    pub timeout: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            base_url: default_base_url(),
            model: default_model(),
            timeout: default_service_timeout(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral:7b".to_string()
}

fn default_service_timeout() -> u64 {
    120
}

impl ResolverConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RESOLVER__ prefix
    /// 2. resolver.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RESOLVER__EXTRACTION__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("resolver").required(false))
            .add_source(
                Environment::with_prefix("RESOLVER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
