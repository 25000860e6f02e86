//! # dyndns-core
//!
//! Core library for the dyndns update server.
//!
//! The only decision logic in the system lives here: splitting a hostname
//! into root and sub domain, deciding whether a DNS update is actually
//! needed, matching provider records, and classifying provider errors.
//! The HTTP layer in `dyndnsd` is a thin collaborator that calls
//! [`DnsClient::reconcile`] once per address family and renders the result
//! as plain text.
//!
//! ## Modules
//!
//! - **client**: provider API client and the reconciliation routine
//! - **hostname**: root/sub domain splitting
//! - **records**: record types and the provider's tagged wire envelopes
//! - **config**: configuration structures with validation
//! - **error**: error taxonomy
//!
//! ## Design
//!
//! Each reconciliation is a single logical operation: one retrieve call,
//! then zero or more sequential edit calls. The provider is the sole source
//! of truth; nothing is cached across calls and no retries are attempted.

pub mod client;
pub mod config;
pub mod error;
pub mod hostname;
pub mod records;

// Re-export core types for convenience
pub use client::{ApiCredentials, DnsClient, MIN_TTL, ReconcileOutcome};
pub use config::{Config, ProviderSettings, ServerSettings};
pub use error::{Error, Result};
pub use records::{DnsRecord, RecordType};
