//! Shared fixtures for the reconciliation contract tests

use dyndns_core::config::ProviderSettings;
use dyndns_core::DnsClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Build a client pointed at a mock provider server
pub fn client_for(server: &MockServer) -> DnsClient {
    DnsClient::new(&ProviderSettings {
        endpoint: server.uri(),
        apikey: "pk_test".to_string(),
        secretapikey: "sk_test".to_string(),
        default_ttl: 300,
    })
    .expect("client construction succeeds")
}

/// One provider record as it appears in a retrieve response
pub fn record(id: &str, name: &str, record_type: &str, content: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": record_type,
        "content": content,
        "ttl": 600,
        "notes": ""
    })
}

/// A SUCCESS retrieve envelope
pub fn retrieve_success(records: Vec<Value>) -> Value {
    json!({ "status": "SUCCESS", "records": records })
}

/// A SUCCESS edit envelope
pub fn edit_success() -> Value {
    json!({ "status": "SUCCESS" })
}
