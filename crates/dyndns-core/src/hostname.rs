//! Hostname splitting helpers
//!
//! The provider's record APIs operate on the root domain (the last two
//! dot-separated labels); record names inside the zone are addressed by the
//! remaining leading labels. `home.example.com` splits into root
//! `example.com` and sub `home`; `example.com` itself has an empty sub part.

use crate::error::{Error, Result};

/// A hostname split into its root-domain and sub-domain parts
///
/// Invariant: rejoining `sub + "." + root` (or `root` alone when `sub` is
/// empty) reconstructs the original hostname exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParts {
    /// Registrable domain: the last two labels
    pub root: String,
    /// Leading labels before the root domain, joined by dots; empty at the apex
    pub sub: String,
}

impl HostParts {
    /// Whether the hostname is the zone apex (no sub-domain part)
    pub fn is_apex(&self) -> bool {
        self.sub.is_empty()
    }
}

/// Split a fully-qualified hostname into root and sub domain
///
/// Fails for hostnames with fewer than two labels or with empty labels
/// (leading/trailing/double dots).
pub fn split(hostname: &str) -> Result<HostParts> {
    let labels: Vec<&str> = hostname.split('.').collect();

    if labels.len() < 2 {
        return Err(Error::invalid_hostname(format!(
            "'{hostname}' must contain at least two labels"
        )));
    }

    if labels.iter().any(|label| label.is_empty()) {
        return Err(Error::invalid_hostname(format!(
            "'{hostname}' contains an empty label"
        )));
    }

    Ok(HostParts {
        root: labels[labels.len() - 2..].join("."),
        sub: labels[..labels.len() - 2].join("."),
    })
}
