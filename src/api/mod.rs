//! Remote Resource Clients.
//!
//! Each client maps one logical operation to exactly one HTTP request and
//! returns the decoded entity on 2xx or a [`RemoteError`] otherwise. No
//! retries, no caching: the stores own all state.

pub mod auth;
pub mod customers;
pub mod leads;

pub use auth::AuthClient;
pub use customers::CustomerClient;
pub use leads::LeadClient;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::RemoteError;
use crate::traits::{Headers, HttpClient, Response};

/// Shared request plumbing for the resource clients.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` with URL-encoded query pairs appended.
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Turn a non-2xx response into a [`RemoteError::Status`].
    fn check(path: &str, response: Response) -> Result<Response, RemoteError> {
        if response.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .ok()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("{} failed", path));
        Err(RemoteError::Status {
            status: response.status,
            message,
        })
    }

    /// GET `path` and return the raw response (for header access).
    ///
    /// Only the path is logged; query strings may carry credentials.
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, RemoteError> {
        let url = self.url(path, params);
        debug!(method = "GET", path, "Sending request");
        let response = self.http.get(&url, &Self::json_headers()).await?;
        debug!(method = "GET", path, status = response.status, "Received response");
        Self::check(path, response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let response = self.get(path, params).await?;
        Ok(response.json()?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.url(path, &[]);
        let body = Self::encode(body)?;
        debug!(method = "POST", path, "Sending request");
        let response = self.http.post(&url, &body, &Self::json_headers()).await?;
        debug!(method = "POST", path, status = response.status, "Received response");
        Ok(Self::check(path, response)?.json()?)
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.url(path, &[]);
        let body = Self::encode(body)?;
        debug!(method = "PATCH", path, "Sending request");
        let response = self.http.patch(&url, &body, &Self::json_headers()).await?;
        debug!(method = "PATCH", path, status = response.status, "Received response");
        Ok(Self::check(path, response)?.json()?)
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, RemoteError> {
        serde_json::to_string(body).map_err(|e| RemoteError::Encode {
            message: e.to_string(),
        })
    }

    pub async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        let url = self.url(path, &[]);
        debug!(method = "DELETE", path, "Sending request");
        let response = self.http.delete(&url, &Self::json_headers()).await?;
        debug!(method = "DELETE", path, status = response.status, "Received response");
        Self::check(path, response).map(|_| ())
    }
}

/// A payload with client-side timestamps merged in.
#[derive(Debug, Serialize)]
pub(crate) struct Stamped<'a, T: Serialize> {
    #[serde(flatten)]
    pub data: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a, T: Serialize> Stamped<'a, T> {
    /// Creation body: both timestamps set to now.
    pub fn created(data: &'a T) -> Self {
        let now = Utc::now();
        Self {
            data,
            created_at: Some(now),
            updated_at: now,
        }
    }

    /// Update body: only `updated_at`.
    pub fn updated(data: &'a T) -> Self {
        Self {
            data,
            created_at: None,
            updated_at: Utc::now(),
        }
    }
}
