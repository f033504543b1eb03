//! HTTP transport abstraction shared by the OpenStack and ScaleIO clients.
//!
//! Both clients speak plain request/response HTTP, so they depend on the
//! [`HttpTransport`] trait rather than on `reqwest` directly. Tests drive the
//! clients through `test_support::ScriptedTransport`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Timeout applied to every request issued by [`ReqwestTransport`].
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP verbs used by the clients.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// Basic authentication credentials attached to a request.
#[derive(Clone, Eq, PartialEq)]
pub struct BasicAuth {
    /// User name half of the credential.
    pub username: String,
    /// Password half; `None` sends the user name alone.
    pub password: Option<String>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Outbound HTTP request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL, already escaped.
    pub url: String,
    /// Extra headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Optional basic authentication.
    pub basic_auth: Option<BasicAuth>,
    /// Optional JSON body.
    pub json: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Starts a `GET` request for `url`.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Starts a `POST` request for `url` carrying a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        let mut request = Self::new(Method::Post, url);
        request.json = Some(body);
        request
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            json: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets basic authentication credentials.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password,
        });
        self
    }
}

/// Response returned by a transport.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Response headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Builds a response with no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header, returning the updated response.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Errors raised while exchanging HTTP messages.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// Raised when the HTTP client cannot be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Message returned by the HTTP library.
        message: String,
    },
    /// Raised when a request cannot be sent or no response arrives.
    #[error("request to {url} failed: {message}")]
    Request {
        /// URL of the failed request.
        url: String,
        /// Message returned by the HTTP library.
        message: String,
    },
    /// Raised when the response body cannot be read.
    #[error("failed to read response body from {url}: {message}")]
    Body {
        /// URL of the request.
        url: String,
        /// Message returned by the HTTP library.
        message: String,
    },
}

/// Future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// Minimal interface for sending HTTP requests.
pub trait HttpTransport {
    /// Sends `request` and returns the full response.
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        (**self).send(request)
    }
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport that verifies TLS certificates.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] when the TLS backend fails to
    /// initialise.
    pub fn new() -> Result<Self, TransportError> {
        Self::build(false)
    }

    /// Builds a transport that accepts any TLS certificate.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] when the TLS backend fails to
    /// initialise.
    pub fn insecure() -> Result<Self, TransportError> {
        Self::build(true)
    }

    fn build(accept_invalid_certs: bool) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|err| TransportError::Client {
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };
            if let Some(auth) = &request.basic_auth {
                builder = builder.basic_auth(&auth.username, auth.password.as_deref());
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.json {
                builder = builder.json(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| TransportError::Request {
                    url: request.url.clone(),
                    message: err.to_string(),
                })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|text| (name.as_str().to_owned(), text.to_owned()))
                })
                .collect();
            let body = response.text().await.map_err(|err| TransportError::Body {
                url: request.url.clone(),
                message: err.to_string(),
            })?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}
