//! Asynchronous JSON-over-HTTP fetcher.
//!
//! # Overview
//! `JsonFetcher` issues one GET per call through an injected `Transport`,
//! decodes the body as JSON, and reports the outcome exactly once, either to
//! a callback (`fetch_json`) or to an awaiting caller (`get_json`).
//!
//! # Design
//! - Only status 200 counts as success; every other code becomes
//!   `FetchError::Status` carrying just the code.
//! - The transport decides whether a body arrives as text or as an already
//!   decoded value (`Payload`); the fetcher decodes through one call and
//!   never inspects which case it got.
//! - Malformed JSON, network failures and timeouts are all delivered through
//!   the same channel as status errors.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod transport;

pub use config::FetchConfig;
pub use error::{ConfigError, FetchError, TransportError};
pub use fetcher::{parse_response, JsonFetcher, SUCCESS_STATUS};
pub use http::{HttpRequest, HttpResponse, Payload};
pub use transport::{Transport, UreqTransport};
