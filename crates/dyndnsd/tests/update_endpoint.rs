//! End-to-end tests for the update endpoint against a mocked provider API
//!
//! The server is bound to an ephemeral port and driven over real HTTP; the
//! provider side is a wiremock server. Verified here:
//! - parameter validation (missing domain, missing addresses)
//! - allow-list membership
//! - one reconciliation per supplied address family, aggregated into one
//!   plain-text response
//! - per-family failures turn the response into a 400 without losing the
//!   other family's status line

use dyndns_core::DnsClient;
use dyndns_core::config::ProviderSettings;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dyndnsd::http::{AppState, router};

/// Spawn the update server against a mock provider, returning its base URL
async fn spawn_app(provider: &MockServer, allowed_domains: Option<Vec<String>>) -> String {
    let client = DnsClient::new(&ProviderSettings {
        endpoint: provider.uri(),
        apikey: "pk_test".to_string(),
        secretapikey: "sk_test".to_string(),
        default_ttl: 300,
    })
    .expect("client construction succeeds");

    let app = router(AppState::new(client, allowed_domains));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind succeeds");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    format!("http://{addr}")
}

fn record(id: &str, name: &str, record_type: &str, content: &str) -> Value {
    json!({ "id": id, "name": name, "type": record_type, "content": content, "ttl": 600 })
}

#[tokio::test]
async fn missing_domain_is_rejected() {
    let provider = MockServer::start().await;
    let base = spawn_app(&provider, None).await;

    let response = reqwest::get(format!("{base}/dyndns")).await.unwrap();

    assert_eq!(response.status(), 400);
    assert!(response.text().await.unwrap().contains("domain missing"));
}

#[tokio::test]
async fn domain_off_the_allow_list_is_rejected() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("^/dns/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&provider)
        .await;

    let base = spawn_app(&provider, Some(vec!["home.example.com".to_string()])).await;

    let response = reqwest::get(format!(
        "{base}/dyndns?domain=other.example.com&ipv4=1.2.3.4"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 403);
    assert!(response.text().await.unwrap().contains("allow-list"));
}

#[tokio::test]
async fn request_without_addresses_is_rejected() {
    let provider = MockServer::start().await;
    let base = spawn_app(&provider, None).await;

    let response = reqwest::get(format!("{base}/dyndns?domain=home.example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Neither a v4 nor a v6 address")
    );
}

#[tokio::test]
async fn malformed_address_is_rejected() {
    let provider = MockServer::start().await;
    let base = spawn_app(&provider, None).await;

    let response = reqwest::get(format!(
        "{base}/dyndns?domain=home.example.com&ipv4=not-an-address"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn both_families_update_in_one_request() {
    let provider = MockServer::start().await;

    // One retrieve per address family: reconciliations are independent.
    Mock::given(method("POST"))
        .and(path("/dns/retrieve/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "records": [
                record("1001", "home.example.com", "A", "9.9.9.9"),
                record("2001", "home.example.com", "AAAA", "fe80::1"),
            ]
        })))
        .expect(2)
        .mount(&provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/dns/edit/example.com/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCESS" })))
        .expect(1)
        .mount(&provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/dns/edit/example.com/2001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCESS" })))
        .expect(1)
        .mount(&provider)
        .await;

    let base = spawn_app(&provider, Some(vec!["home.example.com".to_string()])).await;

    let response = reqwest::get(format!(
        "{base}/dyndns?domain=home.example.com&ipv4=1.2.3.4&ipv6=2001:db8::1&ttl=120"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("A record(s) for home.example.com to 1.2.3.4"));
    assert!(lines[1].contains("AAAA record(s) for home.example.com to 2001:db8::1"));
}

#[tokio::test]
async fn partial_failure_yields_400_with_both_status_lines() {
    let provider = MockServer::start().await;

    // The A record already matches; the AAAA edit is rejected.
    Mock::given(method("POST"))
        .and(path("/dns/retrieve/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "records": [
                record("1001", "home.example.com", "A", "1.2.3.4"),
                record("2001", "home.example.com", "AAAA", "fe80::1"),
            ]
        })))
        .expect(2)
        .mount(&provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/dns/edit/example.com/2001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "code": 500,
            "message": "Edit error."
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let base = spawn_app(&provider, None).await;

    let response = reqwest::get(format!(
        "{base}/dyndns?domain=home.example.com&ipv4=1.2.3.4&ipv6=2001:db8::1"
    ))
    .await
    .unwrap();

    assert_eq!(response.status(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("A record for home.example.com already points at 1.2.3.4"));
    assert!(body.contains("Failed to update AAAA record"));
    assert!(body.contains("500"));
}

#[tokio::test]
async fn zone_precondition_failure_is_a_client_error_not_a_crash() {
    let provider = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dns/retrieve/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "Domain is not opted in to API access."
        })))
        .mount(&provider)
        .await;

    let base = spawn_app(&provider, None).await;

    let response = reqwest::get(format!("{base}/dyndns?domain=home.example.com&ipv4=1.2.3.4"))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("not retrievable")
    );

    // The server keeps serving subsequent requests.
    let followup = reqwest::get(format!("{base}/dyndns")).await.unwrap();
    assert_eq!(followup.status(), 400);
}
