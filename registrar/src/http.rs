//! The HTTP substitution seam. Every outbound call goes through
//! [`HttpEngine`]; production uses reqwest, tests use a recording stub.

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpEngine: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse>;
    /// POST with an empty body (the faucet takes its input in the query).
    async fn post_empty(&self, url: &str) -> Result<HttpResponse>;
}

pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|err| Error::Transport(err.to_string()))?;
        Ok(Self { client })
    }

    async fn read(&self, response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpEngine for ReqwestEngine {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        self.read(response).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        self.read(response).await
    }

    async fn post_empty(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("")
            .send()
            .await
            .map_err(|err| Error::Transport(err.to_string()))?;
        self.read(response).await
    }
}
