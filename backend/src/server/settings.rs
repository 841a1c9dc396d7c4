//! Server settings loaded via OrthoConfig.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid host {host:?}: {message}")]
    InvalidHost { host: String, message: String },
    /// A CORS origin is not a `scheme://host[:port]` URL.
    #[error("invalid CORS origin {origin:?}: {message}")]
    InvalidCorsOrigin { origin: String, message: String },
}

/// Settings for the job board API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct ServerSettings {
    /// Interface to bind; defaults to loopback.
    pub host: Option<String>,
    /// Port to bind; defaults to 5000.
    pub port: Option<u16>,
    /// PostgreSQL URL. Falls back to `DATABASE_URL`.
    pub database_url: Option<String>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Comma-separated browser origins allowed to call the API. Unset or `*`
    /// allows any origin.
    pub cors_origins: Option<String>,
}

impl ServerSettings {
    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|err: std::net::AddrParseError| {
                SettingsError::InvalidHost {
                    host: raw.to_owned(),
                    message: err.to_string(),
                }
            })?,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Allowed CORS origins in their serialised `scheme://host[:port]` form.
    /// An empty list means any origin.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidCorsOrigin`] for an entry that is not
    /// an absolute URL with a host.
    pub fn cors_origins(&self) -> Result<Vec<String>, SettingsError> {
        let entries: Vec<&str> = self
            .cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.contains(&"*") {
            return Ok(Vec::new());
        }
        entries.into_iter().map(parse_origin).collect()
    }

    /// Configured database URL, or `DATABASE_URL` when unset.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }
}

fn parse_origin(raw: &str) -> Result<String, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidCorsOrigin {
        origin: raw.to_owned(),
        message,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid("origin must have a scheme and host".to_owned()));
    }
    Ok(origin.ascii_serialization())
}
