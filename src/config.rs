//! Process configuration loaded once from the environment at startup

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use warp::http::Uri;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_CORS_ALLOWLIST: &str = "http://localhost:3000,http://localhost:5173";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Model identity and credential for the generative-model provider
///
/// Built once and shared read-only; an empty `api_key` is allowed here and
/// reported per request by the provider client.
#[derive(Clone)]
pub struct ProviderConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl ProviderConfig {
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field(
                "api_key",
                &if self.has_credential() { "<redacted>" } else { "<unset>" },
            )
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Everything the server reads from its environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub cors_allowlist: Vec<String>,
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment
    ///
    /// Variables:
    /// - `GOOGLE_API_KEY` (may be absent; requests then fail with a configuration error)
    /// - `GEMINI_MODEL` (default `gemini-1.5-flash`)
    /// - `GEMINI_BASE_URL` (default Generative Language API)
    /// - `CORS_ALLOWLIST` (comma separated origins)
    /// - `HOST`, `PORT` (listen address)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = ProviderConfig {
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: lookup("GOOGLE_API_KEY").unwrap_or_default(),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        let cors_allowlist = parse_allowlist(
            &lookup("CORS_ALLOWLIST").unwrap_or_else(|| DEFAULT_CORS_ALLOWLIST.to_string()),
        )?;

        let host_raw = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_raw
            .trim()
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                name: "HOST",
                value: host_raw.clone(),
                reason: e.to_string(),
            })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            provider,
            cors_allowlist,
            host,
            port,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Split a comma separated origin list; each entry must be `*` or `scheme://host[:port]`
fn parse_allowlist(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" || is_origin(origin) {
                Ok(origin.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::InvalidValue {
                    name: "CORS_ALLOWLIST",
                    value: origin.to_string(),
                    reason: "expected scheme://host[:port]".to_string(),
                })
            }
        })
        .collect()
}

fn is_origin(candidate: &str) -> bool {
    match candidate.parse::<Uri>() {
        Ok(uri) => {
            uri.scheme().is_some()
                && uri.authority().is_some()
                && matches!(uri.path(), "" | "/")
                && uri.query().is_none()
        }
        Err(_) => false,
    }
}
