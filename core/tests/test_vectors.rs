//! Verify fetch outcomes against JSON test vectors stored in `test-vectors/`.
//!
//! Each case describes the response a transport hands back and the outcome
//! the fetcher must report. The whole path runs: request building, the
//! transport call, status check and decoding.

use std::future::Future;

use json_fetch::{
    FetchError, HttpRequest, HttpResponse, JsonFetcher, Payload, Transport, TransportError,
};
use serde_json::Value;

/// Replies with the response described by one vector case.
struct VectorTransport {
    response: HttpResponse,
}

impl Transport for VectorTransport {
    fn perform_get(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        assert!(request.headers.is_empty(), "fetcher must not add headers");
        let response = self.response.clone();
        async move { Ok(response) }
    }
}

fn simulated_response(sim: &Value) -> HttpResponse {
    let status = sim["status"].as_u64().unwrap() as u16;
    let payload = match (sim.get("text"), sim.get("json"), sim.get("bytes")) {
        (Some(text), None, None) => Payload::Text(text.as_str().unwrap().to_string()),
        (None, Some(json), None) => Payload::Json(json.clone()),
        (None, None, Some(bytes)) => Payload::Bytes(
            bytes
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b.as_u64().unwrap() as u8)
                .collect(),
        ),
        other => panic!("case needs exactly one of text/json/bytes, got {other:?}"),
    };
    HttpResponse::new(status, payload)
}

fn check(name: &str, outcome: Result<Value, FetchError>, expected: &Value) {
    if let Some(value) = expected.get("value") {
        assert_eq!(outcome.unwrap(), *value, "{name}: value");
    } else if let Some(status) = expected.get("status") {
        let err = outcome.unwrap_err();
        assert_eq!(err.status(), Some(status.as_u64().unwrap() as u16), "{name}: status");
    } else {
        match expected["error"].as_str().unwrap() {
            "decode" => assert!(
                matches!(outcome, Err(FetchError::Decode(_))),
                "{name}: expected decode error, got {outcome:?}"
            ),
            other => panic!("unknown expected error: {other}"),
        }
    }
}

#[tokio::test]
async fn fetch_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let cases = vectors["cases"].as_array().unwrap();
    assert!(!cases.is_empty());

    for case in cases {
        let name = case["name"].as_str().unwrap();
        let transport = VectorTransport {
            response: simulated_response(&case["response"]),
        };
        let fetcher = JsonFetcher::new(transport);

        let (tx, rx) = tokio::sync::oneshot::channel();
        fetcher.fetch_json("http://localhost:3000/doc", move |outcome| {
            let _ = tx.send(outcome);
        });
        let outcome = rx.await.unwrap();

        check(name, outcome, &case["expected"]);
    }
}
