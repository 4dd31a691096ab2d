//! Transport seam for the fetch/decode pipeline.
//!
//! # Design
//! The pipeline never talks to the network directly. It hands an
//! `HttpRequest` to a `Transport` and gets back something implementing
//! `RawResponse`. `ReqwestTransport` is the stock implementation; hosts that
//! perform the I/O themselves can answer with the plain-data `HttpResponse`.
//!
//! Request and response values use owned types (`String`, `Vec`) so they
//! can be built, logged and asserted on without lifetime concerns.

use std::fmt;
use std::future::{self, Future};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RequestConfig::into_request` after the base and per-call
/// configurations have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub target: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

/// Executes requests on behalf of the pipeline.
///
/// An `Err` from `send` means no response was obtained at all (DNS failure,
/// refused connection, malformed target, timeout). Responses with a failing
/// status are *not* errors at this level.
pub trait Transport: Send + Sync {
    /// The response type produced by this transport.
    type Response: RawResponse;

    /// The error raised when no response could be obtained.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes a single request. Implementations must not retry.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// A response obtained from a `Transport`, before its body has been read.
pub trait RawResponse: Send {
    /// The error raised when the body cannot be read or is not JSON.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Numeric HTTP status code.
    fn status(&self) -> u16;

    /// Reason phrase for the status, empty when unknown.
    fn status_text(&self) -> String;

    /// Whether the status is in the 2xx range.
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Consumes the response and parses its body as JSON.
    fn json(self) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Whether a `json` error means the read was cut short by the request
    /// deadline, rather than the body being absent or not JSON.
    fn is_interrupted(_error: &Self::Error) -> bool {
        false
    }
}

impl<T: Transport> Transport for &T {
    type Response = T::Response;
    type Error = T::Error;

    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    type Response = T::Response;
    type Error = T::Error;

    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        (**self).send(request)
    }
}

/// An HTTP response described as plain data.
///
/// Useful when the caller executes the round-trip itself and only wants the
/// status classification and schema decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse for HttpResponse {
    type Error = serde_json::Error;

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> String {
        self.status_text.clone()
    }

    fn json(self) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        future::ready(serde_json::from_str(&self.body))
    }
}
