//! Provider API client and the record reconciliation routine
//!
//! [`DnsClient`] translates a desired (hostname, record type, address, ttl)
//! into the minimal sequence of provider API calls: one retrieve, then zero
//! or more edits, issued sequentially and never in parallel. Every call
//! fetches the zone fresh; the provider is the sole source of truth and no
//! state is kept between calls, so concurrent reconciliations only share the
//! read-only client.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::hostname;
use crate::records::{DnsRecord, EditResponse, RecordType, RetrieveResponse};

/// Minimum TTL the provider accepts, in seconds
///
/// Requests below this (or with no TTL at all) fall back to the configured
/// default so the provider does not reject the edit.
pub const MIN_TTL: u32 = 60;

/// HTTP timeout for provider API requests
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials attached to every outbound call
///
/// Immutable for the lifetime of the client. The Debug implementation
/// redacts both values so credentials never reach the logs.
#[derive(Clone, Serialize)]
pub struct ApiCredentials {
    /// Provider API key
    pub apikey: String,
    /// Provider secret API key
    pub secretapikey: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("apikey", &"<REDACTED>")
            .field("secretapikey", &"<REDACTED>")
            .finish()
    }
}

/// Outcome of one reconciliation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A record with the desired (name, type, content) already exists;
    /// no edit call was issued
    Unchanged,
    /// Every record matching (name, type) was edited to the desired content
    Updated {
        /// Number of records edited
        records: usize,
    },
    /// No record matches (name, type); nothing was edited and nothing was
    /// created
    NoMatchingRecord,
}

/// Stateless-per-call client for the provider's record CRUD API
///
/// Endpoint, credentials and default TTL are injected at construction and
/// never change, so concurrent calls cannot observe a mid-flight
/// configuration change. The client holds no record state; each
/// [`DnsClient::reconcile`] call sees live provider data.
#[derive(Debug)]
pub struct DnsClient {
    /// Base URL of the provider API, without trailing slash
    endpoint: String,

    /// Credentials included in every request body
    credentials: ApiCredentials,

    /// TTL substituted for absent or too-low requested TTLs
    default_ttl: u32,

    /// HTTP client for API requests
    http: reqwest::Client,
}

/// Body of an edit call
///
/// The record is keyed by the provider-assigned id in the URL; `name` is the
/// sub-domain part only (empty at the zone apex).
#[derive(Debug, Serialize)]
struct EditRequest<'a> {
    apikey: &'a str,
    secretapikey: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    content: &'a str,
    ttl: u32,
}

impl DnsClient {
    /// Create a new provider client from validated settings
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        settings.validate()?;

        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            credentials: ApiCredentials {
                apikey: settings.apikey.clone(),
                secretapikey: settings.secretapikey.clone(),
            },
            default_ttl: settings.default_ttl,
            http,
        })
    }

    /// Reconcile one record against the provider's current state
    ///
    /// Fetches the root domain's record set, short-circuits when a record
    /// already carries the desired content, and otherwise issues exactly one
    /// edit call per record matching (hostname, type). Zero matches is a
    /// successful no-op: this system only updates existing records.
    pub async fn reconcile(
        &self,
        hostname: &str,
        record_type: &RecordType,
        content: &str,
        ttl: Option<u32>,
    ) -> Result<ReconcileOutcome> {
        let ttl = self.clamp_ttl(ttl);
        let parts = hostname::split(hostname)?;

        let records = self.retrieve_records(&parts.root).await?;

        if records
            .iter()
            .any(|r| r.name == hostname && r.record_type == *record_type && r.content == content)
        {
            debug!("{record_type} record for {hostname} already points at {content}");
            return Ok(ReconcileOutcome::Unchanged);
        }

        // The provider does not enforce uniqueness of (name, type); edit
        // every match so the zone converges as a whole.
        let matches: Vec<&DnsRecord> = records
            .iter()
            .filter(|r| r.name == hostname && r.record_type == *record_type)
            .collect();

        if matches.is_empty() {
            debug!("no {record_type} record for {hostname}; nothing to edit");
            return Ok(ReconcileOutcome::NoMatchingRecord);
        }

        for record in &matches {
            let request = EditRequest {
                apikey: &self.credentials.apikey,
                secretapikey: &self.credentials.secretapikey,
                name: &parts.sub,
                record_type: record_type.as_str(),
                content,
                ttl,
            };
            self.edit_record(&parts.root, &record.id, &request).await?;
            info!(
                "updated {record_type} record {} for {hostname} to {content} (ttl {ttl})",
                record.id
            );
        }

        Ok(ReconcileOutcome::Updated {
            records: matches.len(),
        })
    }

    /// Fetch the full record set of a root domain
    ///
    /// An ERROR envelope here means the zone itself is unusable (wrong
    /// domain name, or the domain not enabled for API access) and maps to
    /// [`Error::ZoneNotRetrievable`]; callers decide how hard to fail.
    pub async fn retrieve_records(&self, root_domain: &str) -> Result<Vec<DnsRecord>> {
        let url = format!("{}/dns/retrieve/{root_domain}", self.endpoint);
        let (status, body) = self.post_json(&url, &self.credentials).await?;

        if !status.is_success() {
            return Err(Error::api(status.as_u16(), body));
        }

        let envelope: RetrieveResponse =
            serde_json::from_str(&body).map_err(|_| Error::api(status.as_u16(), body.clone()))?;

        match envelope {
            RetrieveResponse::Success { records } => {
                debug!("retrieved {} record(s) for {root_domain}", records.len());
                Ok(records)
            }
            RetrieveResponse::Error { message, .. } => Err(Error::zone_not_retrievable(
                root_domain,
                message.unwrap_or_else(|| "provider returned ERROR".to_string()),
            )),
        }
    }

    /// Edit one record, keyed by its provider-assigned id
    async fn edit_record(
        &self,
        root_domain: &str,
        record_id: &str,
        request: &EditRequest<'_>,
    ) -> Result<()> {
        let url = format!("{}/dns/edit/{root_domain}/{record_id}", self.endpoint);
        let (status, body) = self.post_json(&url, request).await?;

        if !status.is_success() {
            return Err(Error::api(status.as_u16(), body));
        }

        let envelope: EditResponse =
            serde_json::from_str(&body).map_err(|_| Error::api(status.as_u16(), body.clone()))?;

        match envelope {
            EditResponse::Success { .. } => Ok(()),
            EditResponse::Error { code, message } => Err(Error::api(
                code.unwrap_or_else(|| status.as_u16()),
                message.unwrap_or_else(|| "provider returned ERROR".to_string()),
            )),
        }
    }

    /// Issue one POST and return the raw status and body
    async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(reqwest::StatusCode, String)> {
        debug!("POST {url}");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read response from {url}: {e}")))?;

        debug!("response status {status}");
        Ok((status, body))
    }

    /// Clamp a requested TTL against the provider minimum
    fn clamp_ttl(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(ttl) if ttl >= MIN_TTL => ttl,
            _ => self.default_ttl,
        }
    }
}
