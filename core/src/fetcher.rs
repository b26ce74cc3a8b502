//! GET a URL, decode the JSON body, report once.
//!
//! # Design
//! `JsonFetcher` owns an injected `Transport` behind an `Arc` plus a
//! `FetchConfig`, and carries no per-request state. `get_json` is the
//! awaitable exchange; `fetch_json` spawns it on the current Tokio runtime
//! and hands the outcome to a caller-supplied `FnOnce`, which the type
//! system guarantees runs at most once and the spawned task runs exactly
//! once per completed exchange.
//!
//! Success is status 200 and nothing else. Any other code, including other
//! 2xx codes, is reported as `FetchError::Status` without looking at the
//! body.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// The only status treated as success.
pub const SUCCESS_STATUS: u16 = 200;

/// Fetches JSON documents through a `Transport`.
#[derive(Debug)]
pub struct JsonFetcher<T> {
    transport: Arc<T>,
    config: FetchConfig,
}

impl<T> Clone for JsonFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
        }
    }
}

impl<T: Transport> JsonFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, FetchConfig::default())
    }

    pub fn with_config(transport: T, config: FetchConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Start fetching `url` and return immediately.
    ///
    /// `callback` receives the decoded value or the error once the exchange
    /// finishes; it never runs before this function returns. Must be called
    /// from within a Tokio runtime. Without a configured timeout, a transport
    /// that never completes means `callback` never runs.
    pub fn fetch_json<F>(&self, url: impl Into<String>, callback: F)
    where
        F: FnOnce(Result<Value, FetchError>) + Send + 'static,
    {
        let fetcher = self.clone();
        let url = url.into();
        tokio::spawn(async move {
            let outcome = fetcher.get_json(&url).await;
            callback(outcome);
        });
    }

    /// Perform the exchange and return its outcome.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let request = HttpRequest::get(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        debug!("GET {}", request.url);

        let exchange = self.transport.perform_get(request);
        let response = match self.config.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(response) => response,
                Err(_) => {
                    warn!("GET {url} timed out after {limit:?}");
                    return Err(FetchError::Timeout(limit));
                }
            },
            None => exchange.await,
        }
        .inspect_err(|e| warn!("GET {url} failed: {e}"))?;

        debug!("GET {url} -> {}", response.status);
        parse_response(response)
    }
}

/// Interpret a completed exchange.
pub fn parse_response(response: HttpResponse) -> Result<Value, FetchError> {
    if response.status != SUCCESS_STATUS {
        return Err(FetchError::Status {
            status: response.status,
        });
    }
    Ok(response.payload.into_json()?)
}
