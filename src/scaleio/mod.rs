//! Minimal client for the ScaleIO REST gateway.
//!
//! Only one operation is needed: resolving a volume name to its ScaleIO ID.
//! The gateway authenticates every call with HTTP basic auth where the
//! password half is a session token obtained from `/api/login`. The client
//! starts without a token, logs in when the gateway answers 401 or 403, and
//! retries the rejected request exactly once.

mod error;

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info};

use crate::config::ScaleIoSettings;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::{MappedName, StorageVolumeId};

pub use error::ScaleIoError;

const LOGIN_PATH: &str = "/api/login";
const VOLUME_BY_NAME_PATH: &str = "/api/types/Volume/instances/getByName::";

/// Characters left unescaped in a path segment: ASCII alphanumerics and
/// `_ . - ~`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Percent-encodes a volume name twice for the `getByName::` endpoint.
///
/// The `getByName::` endpoint expects the name escaped twice; base64 output
/// must keep `+`, `/` and `=` intact through both decoding passes.
#[must_use]
pub fn encode_name(name: &MappedName) -> String {
    let once = utf8_percent_encode(name.as_str(), PATH_SEGMENT).to_string();
    utf8_percent_encode(&once, PATH_SEGMENT).to_string()
}

const fn is_auth_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// Extracts a string value from a gateway body.
///
/// The gateway returns JSON strings (`"abc"`); bare text is accepted too.
fn parse_string_body(body: &str) -> Option<String> {
    let value = serde_json::from_str::<String>(body)
        .unwrap_or_else(|_| body.trim().to_owned());
    if value.is_empty() { None } else { Some(value) }
}

/// Session token cached by a [`ScaleIoClient`].
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Returns the cached token, if a login has happened.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns `true` once a token has been cached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn replace(&mut self, token: String) {
        self.token = Some(token);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// ScaleIO gateway client owning its transport and session.
pub struct ScaleIoClient<T> {
    transport: T,
    base_url: String,
    username: String,
    password: String,
    session: Session,
}

impl<T: HttpTransport> ScaleIoClient<T> {
    /// Creates a client for the gateway described by `settings`.
    #[must_use]
    pub fn new(settings: &ScaleIoSettings, transport: T) -> Self {
        Self {
            transport,
            base_url: base_url(&settings.gateway, settings.port),
            username: settings.username.clone(),
            password: settings.password.clone(),
            session: Session::default(),
        }
    }

    /// Returns the current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Looks up the ScaleIO volume ID for `name`.
    ///
    /// Returns `Ok(None)` when the gateway answers but has no such volume.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleIoError`] when the gateway is unreachable, login fails,
    /// the refreshed token is rejected, or a 200 body is unusable.
    pub async fn resolve_volume_id(
        &mut self,
        name: &MappedName,
    ) -> Result<Option<StorageVolumeId>, ScaleIoError> {
        let path = format!("{VOLUME_BY_NAME_PATH}{}", encode_name(name));
        let response = self.get(&path).await?;

        match response.status {
            200 => parse_string_body(&response.body)
                .map(|id| Some(StorageVolumeId::new(id)))
                .ok_or_else(|| ScaleIoError::MalformedBody {
                    endpoint: String::from("getByName"),
                    body: response.body,
                }),
            status if is_auth_failure(status) => Err(ScaleIoError::Unauthorized { status }),
            status => {
                debug!(%name, status, "no ScaleIO volume for name");
                Ok(None)
            }
        }
    }

    async fn get(&mut self, path: &str) -> Result<HttpResponse, ScaleIoError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.send_with_session(&url).await?;
        if !is_auth_failure(response.status) {
            return Ok(response);
        }

        debug!(status = response.status, "gateway rejected session, logging in");
        self.login().await?;
        self.send_with_session(&url).await
    }

    async fn send_with_session(&self, url: &str) -> Result<HttpResponse, ScaleIoError> {
        let request = HttpRequest::get(url).basic_auth(
            self.username.as_str(),
            self.session.token().map(str::to_owned),
        );
        Ok(self.transport.send(request).await?)
    }

    async fn login(&mut self) -> Result<(), ScaleIoError> {
        let url = format!("{}{LOGIN_PATH}", self.base_url);
        let request =
            HttpRequest::get(url).basic_auth(self.username.as_str(), Some(self.password.clone()));
        let response = self.transport.send(request).await?;
        if response.status != 200 {
            return Err(ScaleIoError::Login {
                status: response.status,
            });
        }

        let token =
            parse_string_body(&response.body).ok_or_else(|| ScaleIoError::MalformedBody {
                endpoint: String::from("login"),
                body: response.body,
            })?;
        self.session.replace(token);
        info!(gateway = %self.base_url, "logged in to ScaleIO gateway");
        Ok(())
    }
}

fn base_url(gateway: &str, port: u16) -> String {
    let host = gateway.trim().trim_end_matches('/');
    if host.contains(':') && !host.starts_with('[') {
        format!("https://[{host}]:{port}")
    } else {
        format!("https://{host}:{port}")
    }
}
