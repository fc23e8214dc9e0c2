//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use client::app::Bootstrap;
use client::util::dom::normalize_instance;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Backend base URL without trailing slash, e.g. `https://mfa.example.org`.
    pub backend_url: String,
    /// Release shown to the client; empty in development mode.
    pub release: String,
    pub static_dir: PathBuf,
    /// Path prefix of assets and backend routes, `""` for the root.
    pub instance: String,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Required:
    /// - `EDUMFA_BACKEND_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `EDUMFA_VERSION`: crate version when unset, empty for development mode
    /// - `STATIC_DIR`: default `static`
    /// - `INSTANCE_URL`: default empty
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let backend_url = lookup("EDUMFA_BACKEND_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing { var: "EDUMFA_BACKEND_URL" })?;
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "EDUMFA_BACKEND_URL", value: backend_url });
        }

        let release = lookup("EDUMFA_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned());
        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned()));
        let instance = normalize_instance(&lookup("INSTANCE_URL").unwrap_or_default());

        Ok(Self { port, backend_url, release, static_dir, instance })
    }

    /// Values rendered into the page shell. The language is filled in per
    /// request.
    #[must_use]
    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap {
            release: self.release.trim().to_owned(),
            instance: self.instance.clone(),
            language: String::new(),
        }
    }
}
