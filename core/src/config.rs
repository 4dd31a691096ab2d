//! Call configuration and base/per-call merging.
//!
//! # Design
//! A verb entry point captures a base `RequestConfig` once; every call may
//! supply its own `RequestConfig` which is merged over the base. Scalar
//! options take the per-call value when present. Headers are merged by
//! name, case-insensitively: a per-call header replaces every base header
//! with the same name, and the remaining base headers act as defaults.

use std::time::Duration;

use serde::Serialize;

use crate::http::{HttpMethod, HttpRequest};

/// Header value sent by the POST, PUT and PATCH entry points.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Options for one request. Every field is optional so that a value can act
/// both as a base and as an override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    pub method: Option<HttpMethod>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Deadline for obtaining the response and reading its body.
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Appends a header. Use `merge` semantics if you need replacement.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `payload` as the request body.
    pub fn json_body<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(payload)?);
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the first value of header `name`, ignoring case.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Merges `overrides` on top of `self`, `overrides` winning on conflict.
    pub fn merge(&self, overrides: &RequestConfig) -> RequestConfig {
        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .filter(|(name, _)| overrides.header_value(name).is_none())
            .cloned()
            .collect();
        headers.extend(overrides.headers.iter().cloned());

        RequestConfig {
            method: overrides.method.or(self.method),
            headers,
            body: overrides.body.clone().or_else(|| self.body.clone()),
            timeout: overrides.timeout.or(self.timeout),
        }
    }

    /// Resolves this configuration into a request for `target`, defaulting
    /// the method to GET.
    pub fn into_request(self, target: &str) -> HttpRequest {
        HttpRequest {
            target: target.to_string(),
            method: self.method.unwrap_or(HttpMethod::Get),
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
        }
    }
}

/// Base configuration of the POST, PUT and PATCH entry points.
pub(crate) fn json_base(method: HttpMethod) -> RequestConfig {
    RequestConfig::new()
        .method(method)
        .header("Content-Type", JSON_CONTENT_TYPE)
}
