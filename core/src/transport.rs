//! The network capability the fetcher depends on.
//!
//! # Design
//! `Transport` is the only place I/O happens. The fetcher receives one as an
//! explicit dependency, so tests can swap in fakes that answer immediately,
//! fail, or never answer at all. `UreqTransport` is the production adapter.

use std::future::Future;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::TransportError;
use crate::fetcher::SUCCESS_STATUS;
use crate::http::{HttpRequest, HttpResponse, Payload};

/// Extra time `UreqTransport::from_config` allows past the fetcher's limit.
pub const AGENT_GRACE: Duration = Duration::from_secs(1);

/// Performs a single GET exchange.
///
/// Any status code is a successful exchange; interpreting it is the
/// fetcher's job. `Err` means no response was received at all.
pub trait Transport: Send + Sync + 'static {
    fn perform_get(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Blocking `ureq` agent driven from Tokio's blocking pool.
///
/// Status codes are returned as data rather than errors, and the body is
/// handed over as `Payload::Bytes` for the fetcher to decode. When the body
/// of a non-200 response cannot be read, the response still comes back with
/// an empty body so its status is not lost.
///
/// A Tokio runtime waits for running blocking tasks when it shuts down, so an
/// agent without a limit can hold shutdown hostage to a stalled server. Give
/// it one through `from_config` whenever the fetcher has one.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Match the fetcher's limit, if any. The agent gives up `AGENT_GRACE`
    /// after the fetcher does, so a stall surfaces as `FetchError::Timeout`
    /// and the blocking thread is still released.
    pub fn from_config(config: &FetchConfig) -> Self {
        Self::build(config.timeout.map(|limit| limit + AGENT_GRACE))
    }

    fn build(limit: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(limit)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn perform_get(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || execute(&agent, request))
                .await
                .map_err(|e| TransportError::new(format!("request task failed: {e}")))?
        }
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut call = agent.get(request.url.as_str());
    for (name, value) in &request.headers {
        call = call.header(name.as_str(), value.as_str());
    }
    let mut response = call
        .call()
        .map_err(|e| TransportError::new(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    let body = match response.body_mut().read_to_vec() {
        Ok(body) => body,
        Err(e) if status != SUCCESS_STATUS => {
            log::debug!("discarding unreadable body of HTTP {status}: {e}");
            Vec::new()
        }
        Err(e) => return Err(TransportError::new(format!("reading body: {e}"))),
    };

    Ok(HttpResponse {
        status,
        headers,
        payload: Payload::Bytes(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Bind and drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let request = HttpRequest::get(&format!("http://127.0.0.1:{port}/json")).unwrap();

        let err = UreqTransport::new().perform_get(request).await.unwrap_err();
        assert!(!err.message().is_empty());
    }
}
