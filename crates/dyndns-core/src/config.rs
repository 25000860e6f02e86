//! Configuration types for the dyndns server
//!
//! This module defines all configuration structures used throughout the
//! crate. The server binary deserializes them from a TOML file.

use serde::{Deserialize, Serialize};

use crate::client::MIN_TTL;
use crate::error::{Error, Result};

/// Main dyndns configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// DNS provider configuration
    pub provider: ProviderSettings,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.provider.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(Error::config(format!(
                "log_level '{other}' is not valid. Valid levels: trace, debug, info, warn, error"
            ))),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// Port to bind the HTTP listener to
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Domains the update endpoint may touch; omit to allow any domain
    #[serde(default)]
    pub allowed_domains: Option<Vec<String>>,
}

impl ServerSettings {
    /// Validate the server settings
    pub fn validate(&self) -> Result<()> {
        if self.bind_host.is_empty() {
            return Err(Error::config("server.bind_host cannot be empty"));
        }

        if let Some(domains) = &self.allowed_domains {
            for domain in domains {
                validate_domain_name(domain)?;
            }
        }

        Ok(())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            bind_port: default_bind_port(),
            allowed_domains: None,
        }
    }
}

/// DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the provider API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Provider API key
    pub apikey: String,

    /// Provider secret API key
    pub secretapikey: String,

    /// TTL substituted when a request carries none, or one below the
    /// provider minimum of 60 seconds
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl ProviderSettings {
    /// Validate the provider settings
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::config(format!(
                "provider.endpoint must be an HTTP or HTTPS URL. Got: '{}'",
                self.endpoint
            )));
        }

        if self.apikey.is_empty() {
            return Err(Error::config("provider.apikey cannot be empty"));
        }

        if self.secretapikey.is_empty() {
            return Err(Error::config("provider.secretapikey cannot be empty"));
        }

        if self.default_ttl < MIN_TTL {
            return Err(Error::config(format!(
                "provider.default_ttl must be at least {MIN_TTL} seconds. Got: {}",
                self.default_ttl
            )));
        }

        Ok(())
    }
}

/// Validate that a string is a plausible DNS domain name
///
/// Basic validation per RFC 1035; not comprehensive, but catches the common
/// configuration mistakes.
pub fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("Domain name cannot be empty"));
    }

    // RFC 1035: 253 chars max
    if domain.len() > 253 {
        return Err(Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {domain}",
            domain.len()
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!(
                "Domain name has empty label: '{domain}'"
            )));
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{label}'",
                label.len()
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "Domain label contains invalid characters. Label: '{label}'. \
                Valid: alphanumeric and hyphen only."
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{label}'"
            )));
        }
    }

    Ok(())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

fn default_endpoint() -> String {
    "https://api.porkbun.com/api/json/v3".to_string()
}

fn default_ttl() -> u32 {
    300
}
