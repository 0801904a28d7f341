//! # Transport
//!
//! The boundary between the typed client and the network. A [`Transport`] takes an endpoint
//! name and a JSON request body and returns the JSON response body, envelope included. It knows
//! nothing about the records being exchanged.
//!
//! [`http::HttpTransport`] is the production implementation. Tests and embedders can provide
//! their own, e.g. an in-memory fake.
pub mod http;

use crate::BoxError;
use serde_json::Value;
use std::future::Future;

/// An opaque failure of the underlying transport (connection, TLS, timeout, malformed body...).
#[derive(Debug, thiserror::Error)]
#[error("Transport error: '{0}'")]
pub struct TransportError(#[source] pub BoxError);

impl TransportError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }
}

/// Sends one API request and returns the raw response body.
pub trait Transport {
    fn send(
        &self,
        method: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}
