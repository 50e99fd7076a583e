//! HTTP transport behind the client
//!
//! [`GeoguessrClient`](crate::GeoguessrClient) only needs two verbs, so the wire is
//! hidden behind [`Transport`]. [`HttpTransport`] is the `reqwest` implementation;
//! the session headers it sends are installed once, when its `reqwest::Client` is
//! built.

use crate::error::GeoError;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroize;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the server labelled the body as JSON
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("json"))
    }

    /// Fail with [`GeoError::InvalidStatus`] unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self, GeoError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GeoError::InvalidStatus {
                status: self.status,
            })
        }
    }

    pub fn json(&self) -> Result<Value, GeoError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    async fn read(response: reqwest::Response) -> Result<Self, GeoError> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        Ok(Self {
            status,
            content_type,
            body,
        })
    }
}

/// The two requests the client issues
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<HttpResponse, GeoError>;

    async fn post(&self, url: Url, body: &Value) -> Result<HttpResponse, GeoError>;
}

/// [`Transport`] over a `reqwest::Client`
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wrap a client that already carries the session headers
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, GeoError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        HttpResponse::read(response).await
    }

    async fn post(&self, url: Url, body: &Value) -> Result<HttpResponse, GeoError> {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        HttpResponse::read(response).await
    }
}

/// Default headers of every request: JSON content type and the `_ncfa` cookie
///
/// The cookie header is marked sensitive and the temporary string it was built
/// from is zeroized.
pub(crate) fn session_headers(ncfa: &str) -> Result<HeaderMap, GeoError> {
    let mut cookie_string = format!("_ncfa={ncfa}");
    let header_value = HeaderValue::from_str(&cookie_string);
    cookie_string.zeroize();

    let mut cookie = header_value
        .map_err(|_| GeoError::ClientInit("Invalid _ncfa cookie format".to_string()))?;
    cookie.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(COOKIE, cookie);
    Ok(headers)
}
