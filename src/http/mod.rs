//! HTTP client for the SymphonyX backend
//!
//! A single shared [`reqwest::Client`] with the request timeout from
//! configuration. Every request reads the current active token from the
//! session store at send time and injects it as the `Authorization`
//! header, so in-flight and future requests always carry the latest
//! token.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::state::SessionStore;
use crate::utils::errors::{ApiError, Result};

/// The vendor API wraps most payloads in a `{ "data": … }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Shared HTTP client bound to a session store
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("symphonyx-client/0.1")
            .build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    fn url(&self, path_and_query: &str) -> Result<Url> {
        Ok(self.base_url.join(path_and_query)?)
    }

    /// Issue a GET request and return the raw response
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        debug!(url = %url, "GET request");
        let request = self.client.get(url);
        self.send(request).await
    }

    /// Issue a POST request with a JSON body and return the raw response
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.url(path)?;
        debug!(url = %url, "POST request");
        let request = self.client.post(url).json(body);
        self.send(request).await
    }

    /// POST a multipart form and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!(url = %url, "POST multipart request");
        let request = self.client.post(url).multipart(form);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// GET a JSON-decoded payload
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.post(path, body).await?;
        Self::decode(response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        let request = match self.session.active_token().await {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::ServiceUnavailable
            } else {
                ApiError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()).into())
    }
}

/// Read a token from the `Authorization` response header
///
/// The backend hands out tokens either via this header or in the body's
/// `token` field; callers fall back to the body when the header is
/// absent.
pub fn header_token(response: &Response) -> Option<String> {
    response
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
