// src/transport.rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// A fetched HTTP response, reduced to what the pipeline cares about.
///
/// Status is kept rather than folded into an error because the crawl and
/// fetch stages apply different policies to a non-success status.
pub struct Response {
    pub status: StatusCode,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// The single seam between the pipeline and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response>;
}

/// `reqwest`-backed transport used by the binary.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response> {
        let url = Url::parse(url).with_context(|| format!("parsing URL {}", url))?;
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body from {}", url))?;
        Ok(Response { status, body })
    }
}
