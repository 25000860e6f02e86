//! Provider record and wire types
//!
//! The provider's JSON envelopes carry a top-level `status` field whose value
//! decides which other fields are present. They are decoded as tagged enums
//! rather than probed field-by-field, so success and error shapes are
//! distinguished at parse time.

use serde::{Deserialize, Serialize};

/// DNS record type
///
/// Only A and AAAA are ever produced by this system; everything else is
/// carried through deserialization untouched so that unrelated records in a
/// zone do not break a retrieve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// A record (IPv4)
    A,
    /// AAAA record (IPv6)
    Aaaa,
    /// Any other record type, passed through verbatim
    Other(String),
}

impl RecordType {
    /// Wire form of the record type ("A", "AAAA", ...)
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Other(other) => other,
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            _ => RecordType::Other(value),
        }
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider-stored DNS record, as returned by the retrieve call
///
/// A read-only snapshot; the provider owns the record and identifies it by
/// an opaque id.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned opaque record id
    pub id: String,
    /// Full hostname as stored by the provider
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Address (or other record payload) as a string
    pub content: String,
    /// Time-to-live in seconds, when the provider reports one
    #[serde(default)]
    pub ttl: Option<u32>,
}

/// Envelope for `POST {endpoint}/dns/retrieve/{rootDomain}`
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum RetrieveResponse {
    /// The zone was retrieved
    Success {
        /// All records of the root domain
        #[serde(default)]
        records: Vec<DnsRecord>,
    },
    /// The zone is unusable (wrong name, or not API-enabled)
    Error {
        /// Provider error code, when given
        #[serde(default)]
        code: Option<u16>,
        /// Provider error text, when given
        #[serde(default)]
        message: Option<String>,
    },
}

/// Envelope for `POST {endpoint}/dns/edit/{rootDomain}/{recordId}`
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum EditResponse {
    /// The record was edited
    Success {
        /// Informational message, when given
        #[serde(default)]
        message: Option<String>,
    },
    /// The edit was rejected
    Error {
        /// Provider error code, when given
        #[serde(default)]
        code: Option<u16>,
        /// Provider error text, when given
        #[serde(default)]
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_round_trips_through_strings() {
        assert_eq!(RecordType::from("A".to_string()), RecordType::A);
        assert_eq!(RecordType::from("AAAA".to_string()), RecordType::Aaaa);
        assert_eq!(
            RecordType::from("CNAME".to_string()),
            RecordType::Other("CNAME".to_string())
        );
        assert_eq!(String::from(RecordType::Aaaa), "AAAA");
        assert_eq!(RecordType::Other("TXT".to_string()).to_string(), "TXT");
    }

    #[test]
    fn deserializes_retrieve_success() {
        let body = r#"{
            "status": "SUCCESS",
            "records": [
                {"id": "1001", "name": "home.example.com", "type": "A",
                 "content": "1.2.3.4", "ttl": 600, "notes": ""}
            ]
        }"#;

        let response: RetrieveResponse = serde_json::from_str(body).unwrap();
        let RetrieveResponse::Success { records } = response else {
            panic!("expected SUCCESS envelope");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1001");
        assert_eq!(records[0].record_type, RecordType::A);
        assert_eq!(records[0].ttl, Some(600));
    }

    #[test]
    fn deserializes_retrieve_error() {
        let body = r#"{"status": "ERROR", "message": "Invalid domain."}"#;

        let response: RetrieveResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response,
            RetrieveResponse::Error { code: None, message: Some(m) } if m == "Invalid domain."
        ));
    }

    #[test]
    fn deserializes_edit_error_with_code() {
        let body = r#"{"status": "ERROR", "code": 500, "message": "x"}"#;

        let response: EditResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response,
            EditResponse::Error { code: Some(500), message: Some(m) } if m == "x"
        ));
    }

    #[test]
    fn unrelated_record_types_are_carried_through() {
        let body = r#"{
            "status": "SUCCESS",
            "records": [
                {"id": "1", "name": "example.com", "type": "MX", "content": "mail.example.com"}
            ]
        }"#;

        let response: RetrieveResponse = serde_json::from_str(body).unwrap();
        let RetrieveResponse::Success { records } = response else {
            panic!("expected SUCCESS envelope");
        };
        assert_eq!(records[0].record_type, RecordType::Other("MX".to_string()));
        assert_eq!(records[0].ttl, None);
    }

    #[test]
    fn rejects_envelope_without_status() {
        let body = r#"{"records": []}"#;
        assert!(serde_json::from_str::<RetrieveResponse>(body).is_err());
    }
}
