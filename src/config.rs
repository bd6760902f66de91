//! Application configuration
//!
//! Static application metadata plus runtime settings read from environment
//! variables:
//! - `LIFECYCLE_DATA`: path of the lifecycle JSON document
//! - `HOST` / `PORT`: listen address of the dashboard server

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const APP_TITLE: &str = "MaLDReTH Research Data Lifecycle";
pub const APP_DESCRIPTION: &str =
    "Visualization of the MaLDReTH Research Data Lifecycle with tool exemplars.";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_DATA_PATH: &str = "data/lifecycle_data.json";
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub description: String,
    pub version: String,
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            description: APP_DESCRIPTION.to_string(),
            version: APP_VERSION.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup("LIFECYCLE_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid HOST '{}'", raw);
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT '{}'", raw);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            data_path,
            host,
            port,
            ..defaults
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
