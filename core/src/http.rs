//! HTTP exchange types shared by the fetcher and its transports.
//!
//! # Design
//! Requests and responses are plain data. A transport receives an
//! `HttpRequest`, performs the GET, and hands back an `HttpResponse` whose
//! body is a `Payload`. Whether the body arrived as raw text or was already
//! decoded by the transport is the adapter's concern: `Payload::into_json`
//! collapses both cases into a single `serde_json::Value`, so the fetcher
//! never branches on the payload's shape.

use serde_json::Value;
use url::Url;

/// A GET request described as plain data.
///
/// Carries no body. `headers` holds extra request headers, and the fetcher
/// always leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Parse `url` into a bare GET request.
    pub fn get(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            headers: Vec::new(),
        })
    }
}

/// Body of a response as delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw body text that still needs JSON decoding.
    Text(String),

    /// Raw body bytes, not necessarily UTF-8, that still need JSON decoding.
    Bytes(Vec<u8>),

    /// A body the transport already decoded.
    Json(Value),
}

impl Payload {
    /// Produce the JSON value this payload represents.
    ///
    /// Text and bytes are decoded exactly once. An already structured value is returned
    /// as is, so strings inside it that look like JSON stay strings.
    pub fn into_json(self) -> Result<Value, serde_json::Error> {
        match self {
            Payload::Text(text) => serde_json::from_str(&text),
            Payload::Bytes(bytes) => serde_json::from_slice(&bytes),
            Payload::Json(value) => Ok(value),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

/// A response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
}

impl HttpResponse {
    /// Response with no headers, mostly useful for fakes.
    pub fn new(status: u16, payload: impl Into<Payload>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            payload: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_request_has_no_extra_headers() {
        let req = HttpRequest::get("http://localhost:3000/json").unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:3000/json");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn get_request_rejects_relative_url() {
        assert!(HttpRequest::get("/json").is_err());
    }

    #[test]
    fn text_payload_is_decoded() {
        let value = Payload::Text(r#"{"a":1}"#.to_string()).into_json().unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn text_payload_decodes_primitives() {
        assert_eq!(Payload::Text("true".into()).into_json().unwrap(), json!(true));
        assert_eq!(Payload::Text("[1,2]".into()).into_json().unwrap(), json!([1, 2]));
        assert_eq!(Payload::Text("null".into()).into_json().unwrap(), Value::Null);
    }

    #[test]
    fn json_payload_is_not_decoded_again() {
        let inner = r#"{"nested":true}"#;
        let value = Payload::Json(json!({"raw": inner})).into_json().unwrap();
        assert_eq!(value["raw"], Value::String(inner.to_string()));
    }

    #[test]
    fn bytes_payload_is_decoded() {
        let value = Payload::Bytes(br#"{"a":[1,2]}"#.to_vec()).into_json().unwrap();
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn non_utf8_bytes_payload_fails_to_decode() {
        assert!(Payload::Bytes(vec![0xff, 0xfe]).into_json().is_err());
    }

    #[test]
    fn invalid_text_payload_fails() {
        assert!(Payload::Text("not json".into()).into_json().is_err());
    }
}
