//! Thin result wrapper around [`reqwest`].
//!
//! Every call returns an [`ApiResult`]: typed data on 2xx (with `None`
//! standing in for empty bodies), a structured [`ApiError`] otherwise.
//! Non-2xx statuses and connection failures are both converted to values
//! here -- nothing transport-shaped crosses this boundary. No retries,
//! caching, or timeouts; a call is a single request under the caller's
//! control.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::errors::{resolve_api_error, ApiError, ErrorDictionary};

/// How a successful response body is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Json,
    Text,
    None,
}

/// Discriminated call outcome. `Ok(None)` is a successful response with no
/// decodable body (204, [`ParseMode::None`], or a non-JSON body in JSON
/// mode).
pub type ApiResult<T> = Result<Option<T>, ApiError>;

/// A 2xx response never carries data when this returns true: 204 bodies
/// are empty by definition, and [`ParseMode::None`] discards the body
/// regardless of status.
fn skips_body(status: u16, mode: ParseMode) -> bool {
    status == 204 || mode == ParseMode::None
}

/// HTTP client bound to one backend base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    dictionary: ErrorDictionary,
}

impl ApiClient {
    /// Create a client for a backend, e.g. `https://dorm.example.com/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across API surfaces).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            dictionary: ErrorDictionary::default(),
        }
    }

    /// Replace the error dictionary used for every call from this client.
    pub fn with_dictionary(mut self, dictionary: ErrorDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- typed convenience calls ----

    /// `GET` a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request_json(Method::GET, path, None, None).await
    }

    /// `POST` a JSON body and decode a JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::decode(0, &err))?;
        self.request_json(Method::POST, path, Some(body), None).await
    }

    /// `PATCH` a JSON body and decode a JSON response.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::decode(0, &err))?;
        self.request_json(Method::PATCH, path, Some(body), None).await
    }

    /// `DELETE` a resource, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    // ---- parse-mode entry points ----

    /// Issue a request and decode the response as JSON.
    ///
    /// 204 responses and non-JSON bodies yield `Ok(None)`; a body that is
    /// JSON but does not fit `T` becomes a `DECODE_ERROR` [`ApiError`].
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        overrides: Option<&ErrorDictionary>,
    ) -> ApiResult<T> {
        let response = self.execute(method, path, body, overrides).await?;
        let status = response.status().as_u16();

        if skips_body(status, ParseMode::Json) || !has_json_body(&response) {
            return Ok(None);
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| ApiError::decode(status, &err))
    }

    /// Issue a request and return the raw response text.
    pub async fn request_text(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        overrides: Option<&ErrorDictionary>,
    ) -> ApiResult<String> {
        let response = self.execute(method, path, body, overrides).await?;
        let status = response.status().as_u16();

        if skips_body(status, ParseMode::Text) {
            return Ok(None);
        }

        response
            .text()
            .await
            .map(Some)
            .map_err(|err| ApiError::decode(status, &err))
    }

    /// Issue a request, discarding any response body.
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        overrides: Option<&ErrorDictionary>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, body, overrides).await?;
        Ok(())
    }

    // ---- transport ----

    /// Send one request and normalize failures.
    ///
    /// Connection-level errors become [`ApiError::network`]; non-2xx
    /// responses are resolved through the error dictionary (the per-call
    /// override when given, else the client-wide one). Only 2xx responses
    /// come back as `Ok`.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        overrides: Option<&ErrorDictionary>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, url = %url, "Request failed before a response arrived");
                return Err(ApiError::network(&err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, url = %url, "Unreadable error response body");
                Default::default()
            });
            let dictionary = overrides.unwrap_or(&self.dictionary);
            return Err(resolve_api_error(status.as_u16(), &body, dictionary));
        }

        Ok(response)
    }
}

fn has_json_body(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
