//! The fetch → parse → classify → decode pipeline.
//!
//! # Design
//! `FetchDecode` pairs a transport with an immutable base configuration.
//! Each call merges its own configuration over the base, then runs four
//! stages in order, returning at the first failure:
//!
//! 1. issue the request (no response → `Fetch` error),
//! 2. read the body as JSON, substituting `null` if that fails (a read
//!    cut short by the deadline is a `Fetch` error instead),
//! 3. check the status (not 2xx → `Http` error),
//! 4. decode with the schema (rejected → `Decode` error).
//!
//! Nothing is shared between calls except the base configuration, so one
//! `FetchDecode` can serve any number of concurrent calls.

use serde_json::Value;

use crate::config::RequestConfig;
use crate::error::{FetchDecodeError, Outcome};
use crate::http::{HttpRequest, RawResponse, Transport};
use crate::schema::{render_errors, Schema};

/// A reusable pipeline: transport plus base configuration.
#[derive(Debug, Clone)]
pub struct FetchDecode<Tr> {
    transport: Tr,
    base: RequestConfig,
}

/// Builds a pipeline whose calls start from `base`.
pub fn init_fetch_and_decode<Tr: Transport>(transport: Tr, base: RequestConfig) -> FetchDecode<Tr> {
    FetchDecode::new(transport, base)
}

impl<Tr: Transport> FetchDecode<Tr> {
    pub fn new(transport: Tr, base: RequestConfig) -> Self {
        Self { transport, base }
    }

    pub fn base_config(&self) -> &RequestConfig {
        &self.base
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Binds a schema, yielding a callable endpoint for its output type.
    pub fn with_schema<S: Schema>(&self, schema: S) -> TypedFetch<'_, Tr, S> {
        TypedFetch {
            pipeline: self,
            schema,
        }
    }

    /// Runs the full pipeline once against `target`.
    ///
    /// Always resolves; every failure comes back as a `FetchDecodeError`.
    pub async fn fetch_and_decode<S: Schema>(
        &self,
        schema: &S,
        target: &str,
        config: Option<RequestConfig>,
    ) -> Outcome<S::Output> {
        let config = match config {
            Some(overrides) => self.base.merge(&overrides),
            None => self.base.clone(),
        };
        let request = config.into_request(target);
        tracing::debug!(method = %request.method, url = target, "issuing request");

        let response = issue_request(&self.transport, request).await?;
        let (response, json) = materialize_body(response).await?;
        let json = classify_status(&response, json)?;
        decode_body(schema, json)
    }
}

/// A pipeline bound to one schema.
#[derive(Debug)]
pub struct TypedFetch<'a, Tr, S> {
    pipeline: &'a FetchDecode<Tr>,
    schema: S,
}

impl<Tr: Transport, S: Schema> TypedFetch<'_, Tr, S> {
    pub async fn fetch(&self, target: &str, config: Option<RequestConfig>) -> Outcome<S::Output> {
        self.pipeline
            .fetch_and_decode(&self.schema, target, config)
            .await
    }
}

async fn issue_request<Tr: Transport>(
    transport: &Tr,
    request: HttpRequest,
) -> Outcome<Tr::Response> {
    transport.send(request).await.map_err(|err| {
        tracing::debug!(error = %err, "request failed without a response");
        FetchDecodeError::Fetch {
            message: err.to_string(),
        }
    })
}

/// Reads the body as JSON. A missing or non-JSON body becomes `null` so the
/// status check still runs; a read cut short by the deadline is a `Fetch`
/// error.
async fn materialize_body<R: RawResponse>(response: R) -> Outcome<(Response, Value)> {
    let head = Response {
        ok: response.ok(),
        status: response.status(),
        status_text: response.status_text(),
    };
    let json = match response.json().await {
        Ok(json) => json,
        Err(err) if R::is_interrupted(&err) => {
            tracing::debug!(status = head.status, error = %err, "body read interrupted");
            return Err(FetchDecodeError::Fetch {
                message: err.to_string(),
            });
        }
        Err(err) => {
            tracing::trace!(status = head.status, error = %err, "body is not JSON, using null");
            Value::Null
        }
    };
    Ok((head, json))
}

/// Status line of a response whose body has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Response {
    ok: bool,
    status: u16,
    status_text: String,
}

fn classify_status(response: &Response, json: Value) -> Outcome<Value> {
    tracing::debug!(status = response.status, ok = response.ok, "response received");
    if response.ok {
        return Ok(json);
    }
    let message = match json {
        Value::Null => response.status_text.clone(),
        Value::String(text) if text.is_empty() => response.status_text.clone(),
        Value::String(text) => text,
        other => other.to_string(),
    };
    Err(FetchDecodeError::Http {
        status: response.status,
        message,
    })
}

fn decode_body<S: Schema>(schema: &S, json: Value) -> Outcome<S::Output> {
    schema.decode(json).map_err(|errors| {
        let message = render_errors(&errors);
        tracing::debug!(failures = errors.len(), "body rejected by schema");
        FetchDecodeError::Decode { message }
    })
}
