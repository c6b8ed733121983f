//! Server settings loaded via OrthoConfig and validated into a
//! [`ServerConfig`] before the listener starts.
//!
//! Every value can be supplied as a `--flag`, a `GEOSEARCH_*` environment
//! variable or a configuration file key; absent values fall back to the
//! defaults below.

use std::net::SocketAddr;
use std::num::NonZeroU32;

use geosearch::domain::{SupportedLanguages, SupportedLanguagesError};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:2322";
const DEFAULT_LANGUAGES: &str = "en,de,fr,it";

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEOSEARCH")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Languages the service answers in, in priority order. Accepts a
    /// comma-separated list.
    pub languages: Option<Vec<String>>,
    /// Upper bound applied to the `limit` parameter.
    #[ortho_config(default = 50)]
    pub max_limit: u32,
}

impl ServerSettings {
    /// Configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Validate the configured language list, falling back to the default.
    ///
    /// Entries may themselves hold comma-separated codes.
    pub fn languages(&self) -> Result<SupportedLanguages, SupportedLanguagesError> {
        match &self.languages {
            Some(entries) => SupportedLanguages::new(
                entries
                    .iter()
                    .flat_map(|entry| entry.split(','))
                    .map(str::trim)
                    .filter(|code| !code.is_empty()),
            ),
            None => DEFAULT_LANGUAGES.parse(),
        }
    }
}

/// Reasons the settings cannot start a server.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid supported languages: {0}")]
    Languages(#[from] SupportedLanguagesError),
    #[error("maximum limit must be positive")]
    ZeroMaxLimit,
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) languages: SupportedLanguages,
    pub(crate) max_limit: NonZeroU32,
}

impl TryFrom<&ServerSettings> for ServerConfig {
    type Error = ConfigError;

    fn try_from(settings: &ServerSettings) -> Result<Self, Self::Error> {
        let bind_addr = settings
            .bind_addr()
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: settings.bind_addr().to_owned(),
                source,
            })?;
        let languages = settings.languages()?;
        let max_limit = NonZeroU32::new(settings.max_limit).ok_or(ConfigError::ZeroMaxLimit)?;
        Ok(Self {
            bind_addr,
            languages,
            max_limit,
        })
    }
}
