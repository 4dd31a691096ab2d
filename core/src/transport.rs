//! `reqwest`-backed implementation of the transport seam.

use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, RawResponse, Transport};

/// Transport that executes requests with a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, TLS roots, default headers...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self::with_client(client)
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    type Response = ReqwestResponse;
    type Error = reqwest::Error;

    async fn send(&self, request: HttpRequest) -> Result<Self::Response, Self::Error> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.target.as_str());
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let request = builder.build()?;
        let inner = self.client.execute(request).await?;
        Ok(ReqwestResponse { inner })
    }
}

/// Failure to turn a response body into JSON.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("failed to read response body: {0}")]
    Read(#[from] reqwest::Error),
    #[error("response body is not JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Response returned by `ReqwestTransport`.
#[derive(Debug)]
pub struct ReqwestResponse {
    inner: reqwest::Response,
}

impl RawResponse for ReqwestResponse {
    type Error = BodyError;

    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    fn status_text(&self) -> String {
        self.inner
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    fn ok(&self) -> bool {
        self.inner.status().is_success()
    }

    async fn json(self) -> Result<serde_json::Value, Self::Error> {
        let bytes = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn is_interrupted(error: &Self::Error) -> bool {
        matches!(error, BodyError::Read(err) if err.is_timeout())
    }
}
