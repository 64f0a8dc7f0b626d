//! HTTP client wrapper for the remote gateway

use reqwest::{Client, Method, Url};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Timeout")]
    Timeout,
    #[error("Body read failed: {message}")]
    BodyRead { message: String },
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }

    /// Issue a request with an optional bearer token and no body.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req = self
            .client
            .request(method, url)
            .header("User-Agent", &self.user_agent);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::finish(req).await
    }

    /// Issue a request carrying a JSON body.
    pub async fn request_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        token: Option<&str>,
        body: &B,
    ) -> Result<HttpResponse, HttpError> {
        let mut req = self
            .client
            .request(method, url)
            .header("User-Agent", &self.user_agent)
            .json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Self::finish(req).await
    }

    async fn finish(req: reqwest::RequestBuilder) -> Result<HttpResponse, HttpError> {
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::RequestFailed {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| HttpError::BodyRead {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new("bricklist/0.1", Duration::from_secs(30))
    }
}
