//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults (Wikidata Query Service)
//! 2. User config: `~/.config/taxolint/config.toml` (XDG) or platform config dir
//! 3. Project config: `.taxolint.toml`
//! 4. Environment variables: `TAXOLINT_*`, nested keys separated by `__`
//!    (e.g. `TAXOLINT_SPARQL__ENDPOINT`)
//!
//! # Example
//!
//! ```toml
//! [sparql]
//! endpoint = "https://query.wikidata.org/sparql"
//! user_agent = "taxolint/0.1 (ops@example.org)"
//! timeout_secs = 30
//!
//! [vocabulary]
//! label_language = "de"
//!
//! [analysis]
//! deadline_secs = 120
//! ```
//!
//! Every key is optional; omitted keys keep their defaults.

use std::ops::Deref;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::graph::Vocabulary;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sparql: SparqlConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// SPARQL endpoint connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparqlConfig {
    /// Endpoint URL accepting SPARQL 1.1 Protocol requests.
    pub endpoint: String,
    /// User-Agent header; public endpoints such as Wikidata require one.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Queries longer than this many bytes are sent with POST instead of GET.
    pub post_threshold: usize,
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://query.wikidata.org/sparql".to_string(),
            user_agent: concat!("taxolint/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            post_threshold: 4096,
        }
    }
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Deadline for one whole analysis call, in seconds.
    pub deadline_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { deadline_secs: 60 }
    }
}

impl AnalysisConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Self::extract(
            Self::defaults()
                // Layer 2: User config
                .merge(Toml::file(user_config))
                // Layer 3: Project config
                .merge(Toml::file(".taxolint.toml"))
                // Layer 4: Environment variables (highest priority)
                .merge(Env::prefixed("TAXOLINT_").split("__")),
        )
    }

    /// Figment holding only the built-in defaults (layer 1).
    pub fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    /// Extracts a config from an arbitrary figment.
    ///
    /// A zero `analysis.deadline_secs` is rejected: it would time out every
    /// analysis before its first query.
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        if config.analysis.deadline_secs == 0 {
            return Err(figment::Error::from(
                "analysis.deadline_secs must be greater than zero".to_string(),
            )
            .into());
        }
        Ok(config)
    }

    /// User config path: ~/.config/taxolint/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("taxolint").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("taxolint").join("config.toml"))
            .unwrap_or_default()
    }
}
