//! HTTP update endpoint
//!
//! One route, `GET /dyndns`, taking `domain`, `ipv4`, `ipv6` and `ttl`
//! query parameters. Each supplied address family triggers one independent
//! reconciliation; the per-family outcomes are aggregated into a plain-text
//! body, one line per family. Any failed family turns the overall status
//! into 400 — errors are rendered, never propagated, so one bad request
//! cannot take down the server.

use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use serde::Deserialize;
use tracing::{error, info, warn};

use dyndns_core::{DnsClient, RecordType, ReconcileOutcome};

/// Shared state for the update endpoint
#[derive(Clone)]
pub struct AppState {
    /// Provider client; read-only, shared across requests
    client: Arc<DnsClient>,
    /// Domains the endpoint may update; `None` allows any domain
    allowed_domains: Option<HashSet<String>>,
}

impl AppState {
    /// Create the endpoint state
    pub fn new(client: DnsClient, allowed_domains: Option<Vec<String>>) -> Self {
        Self {
            client: Arc::new(client),
            allowed_domains: allowed_domains.map(|domains| domains.into_iter().collect()),
        }
    }

    /// Simple set-membership check against the allow-list
    fn is_allowed(&self, domain: &str) -> bool {
        self.allowed_domains
            .as_ref()
            .is_none_or(|allowed| allowed.contains(domain))
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new().route("/dyndns", get(update)).with_state(state)
}

/// Query parameters accepted by the update endpoint
///
/// Addresses are parsed as typed values, so a malformed address is rejected
/// before any provider call is made.
#[derive(Debug, Deserialize)]
struct UpdateParams {
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    ipv4: Option<Ipv4Addr>,
    #[serde(default)]
    ipv6: Option<Ipv6Addr>,
    #[serde(default)]
    ttl: Option<u32>,
}

/// Handle one update request
async fn update(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> (StatusCode, String) {
    let Some(domain) = params.domain else {
        return (
            StatusCode::BAD_REQUEST,
            "Update target domain missing.\n".to_string(),
        );
    };

    if !state.is_allowed(&domain) {
        warn!("rejected update for {domain}: not on the allow-list");
        return (
            StatusCode::FORBIDDEN,
            "Requested domain is not on the allow-list.\n".to_string(),
        );
    }

    if params.ipv4.is_none() && params.ipv6.is_none() {
        error!("update request for {domain} carried neither a v4 nor a v6 address");
        return (
            StatusCode::BAD_REQUEST,
            "Neither a v4 nor a v6 address given.\n".to_string(),
        );
    }

    let mut status = StatusCode::OK;
    let mut lines = Vec::new();

    if let Some(ipv4) = params.ipv4 {
        match apply(&state, &domain, RecordType::A, &ipv4.to_string(), params.ttl).await {
            Ok(line) => lines.push(line),
            Err(line) => {
                lines.push(line);
                status = StatusCode::BAD_REQUEST;
            }
        }
    }

    if let Some(ipv6) = params.ipv6 {
        match apply(&state, &domain, RecordType::Aaaa, &ipv6.to_string(), params.ttl).await {
            Ok(line) => lines.push(line),
            Err(line) => {
                lines.push(line);
                status = StatusCode::BAD_REQUEST;
            }
        }
    }

    (status, lines.join("\n") + "\n")
}

/// Reconcile one address family and render the result as a status line
async fn apply(
    state: &AppState,
    domain: &str,
    record_type: RecordType,
    content: &str,
    ttl: Option<u32>,
) -> Result<String, String> {
    match state.client.reconcile(domain, &record_type, content, ttl).await {
        Ok(outcome) => {
            let line = describe(&record_type, domain, content, &outcome);
            info!("{line}");
            Ok(line)
        }
        Err(e) => {
            error!("failed to update {record_type} record for {domain} to {content}: {e}");
            Err(format!("Failed to update {record_type} record: {e}"))
        }
    }
}

/// Human-readable status line for one reconciliation outcome
fn describe(
    record_type: &RecordType,
    domain: &str,
    content: &str,
    outcome: &ReconcileOutcome,
) -> String {
    match outcome {
        ReconcileOutcome::Unchanged => {
            format!("{record_type} record for {domain} already points at {content}")
        }
        ReconcileOutcome::Updated { records } => {
            format!("Updated {records} {record_type} record(s) for {domain} to {content}")
        }
        ReconcileOutcome::NoMatchingRecord => {
            format!("No {record_type} record for {domain}; nothing to update")
        }
    }
}
