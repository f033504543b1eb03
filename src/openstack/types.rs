//! Wire types for the Keystone v3 and Cinder APIs.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::OpenStackSettings;

/// Builds the Keystone v3 password authentication request body.
pub(super) fn password_auth_body(settings: &OpenStackSettings) -> Value {
    json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": settings.username,
                        "domain": { "name": settings.user_domain },
                        "password": settings.password
                    }
                }
            },
            "scope": {
                "project": {
                    "name": settings.tenant,
                    "domain": { "name": settings.project_domain }
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) token: TokenBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenBody {
    #[serde(default)]
    pub(super) catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CatalogEntry {
    #[serde(rename = "type")]
    pub(super) service_type: String,
    #[serde(default)]
    pub(super) endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Endpoint {
    pub(super) interface: String,
    #[serde(default)]
    pub(super) region: Option<String>,
    #[serde(default)]
    pub(super) region_id: Option<String>,
    pub(super) url: String,
}

impl Endpoint {
    pub(super) fn in_region(&self, region: Option<&str>) -> bool {
        region.is_none_or(|wanted| {
            self.region.as_deref() == Some(wanted) || self.region_id.as_deref() == Some(wanted)
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct VolumeList {
    pub(super) volumes: Vec<RawVolume>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawVolume {
    pub(super) id: String,
    #[serde(default)]
    pub(super) attachments: Option<Vec<Value>>,
}

/// Error envelope used by Keystone and Cinder (`{"error": {"message": ...}}`
/// or `{"badRequest": {"message": ...}}`).
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value.as_object().and_then(|object| {
                object
                    .values()
                    .find_map(|inner| inner.get("message").and_then(Value::as_str))
                    .map(str::to_owned)
            })
        })
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}
