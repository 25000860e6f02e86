//! # dyndnsd
//!
//! HTTP layer of the dyndns update server. Thin plumbing only: the single
//! update endpoint validates its parameters, calls
//! [`dyndns_core::DnsClient::reconcile`] once per supplied address family,
//! and renders the aggregated result as plain text. All reconciliation
//! logic lives in `dyndns-core`.

pub mod http;
