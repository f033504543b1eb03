//! OpenStack inventory client: Keystone v3 login and Cinder volume listing.

mod error;
mod types;

use tracing::{debug, info};

use crate::config::OpenStackSettings;
use crate::transport::{HttpRequest, HttpTransport};
use crate::types::VolumeIdentifier;

pub use error::OpenStackError;
use types::{CatalogEntry, TokenResponse, VolumeList, error_message, password_auth_body};

/// Service types that expose the block storage API, in order of preference.
const VOLUME_SERVICE_TYPES: [&str; 3] = ["block-storage", "volumev3", "volumev2"];
const PUBLIC_INTERFACE: &str = "public";
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A volume reported by the block storage service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CloudVolume {
    /// Volume identifier assigned by Cinder.
    pub id: VolumeIdentifier,
    /// Number of attachment records reported for the volume.
    pub attachment_count: usize,
}

impl CloudVolume {
    /// Creates a volume entry.
    #[must_use]
    pub fn new(id: impl Into<VolumeIdentifier>, attachment_count: usize) -> Self {
        Self {
            id: id.into(),
            attachment_count,
        }
    }

    /// Returns `true` when Cinder reports at least one attachment.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attachment_count > 0
    }
}

/// Authenticated client for the block storage API.
pub struct OpenStackClient<T> {
    transport: T,
    token: String,
    volume_endpoint: String,
}

impl<T: HttpTransport> OpenStackClient<T> {
    /// Authenticates against Keystone and locates the block storage endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`OpenStackError`] when Keystone is unreachable, rejects the
    /// credentials, omits the token, or the catalog lacks a public block
    /// storage endpoint.
    pub async fn connect(
        settings: &OpenStackSettings,
        transport: T,
    ) -> Result<Self, OpenStackError> {
        let url = format!("{}/auth/tokens", identity_url(&settings.auth_url));
        let request = HttpRequest::post_json(url, password_auth_body(settings));
        let response = transport.send(request).await?;
        if !response.is_success() {
            return Err(OpenStackError::Authentication {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        let token = response
            .header(SUBJECT_TOKEN_HEADER)
            .map(str::to_owned)
            .ok_or(OpenStackError::MissingToken)?;
        let body: TokenResponse = response.json().map_err(|err| OpenStackError::Parse {
            resource: String::from("token"),
            message: err.to_string(),
        })?;
        let volume_endpoint =
            select_volume_endpoint(&body.token.catalog, settings.region.as_deref())?;
        info!(endpoint = %volume_endpoint, tenant = %settings.tenant, "authenticated with OpenStack");

        Ok(Self {
            transport,
            token,
            volume_endpoint,
        })
    }

    /// Returns the block storage endpoint chosen from the catalog.
    #[must_use]
    pub fn volume_endpoint(&self) -> &str {
        &self.volume_endpoint
    }

    /// Lists volumes with details, across all tenants when requested.
    ///
    /// # Errors
    ///
    /// Returns [`OpenStackError`] when Cinder is unreachable, refuses the
    /// request, or returns an unexpected payload.
    pub async fn list_volumes(&self, all_tenants: bool) -> Result<Vec<CloudVolume>, OpenStackError> {
        let mut url = format!("{}/volumes/detail", self.volume_endpoint);
        if all_tenants {
            url.push_str("?all_tenants=True");
        }
        let request = HttpRequest::get(url).header(AUTH_TOKEN_HEADER, self.token.as_str());
        let response = self.transport.send(request).await?;
        if response.status != 200 {
            return Err(OpenStackError::Listing {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        let list: VolumeList = response.json().map_err(|err| OpenStackError::Parse {
            resource: String::from("volumes"),
            message: err.to_string(),
        })?;
        let volumes = list
            .volumes
            .into_iter()
            .map(|raw| CloudVolume::new(raw.id, raw.attachments.map_or(0, |items| items.len())))
            .collect::<Vec<_>>();
        debug!(count = volumes.len(), all_tenants, "listed OpenStack volumes");
        Ok(volumes)
    }
}

/// Version suffixes replaced by `/v3` when normalising an auth URL.
const LEGACY_IDENTITY_VERSIONS: [&str; 2] = ["/v2.0", "/v2"];

/// Normalises an auth URL to the Keystone v3 root.
///
/// A trailing `/v2.0` or `/v2` segment is replaced by `/v3`.
fn identity_url(auth_url: &str) -> String {
    let trimmed = auth_url.trim().trim_end_matches('/');
    if trimmed.ends_with("/v3") {
        return trimmed.to_owned();
    }
    let root = LEGACY_IDENTITY_VERSIONS
        .iter()
        .find_map(|version| trimmed.strip_suffix(version))
        .unwrap_or(trimmed);
    format!("{root}/v3")
}

fn select_volume_endpoint(
    catalog: &[CatalogEntry],
    region: Option<&str>,
) -> Result<String, OpenStackError> {
    VOLUME_SERVICE_TYPES
        .iter()
        .find_map(|service_type| {
            catalog
                .iter()
                .filter(|entry| entry.service_type == *service_type)
                .flat_map(|entry| entry.endpoints.iter())
                .find(|endpoint| endpoint.interface == PUBLIC_INTERFACE && endpoint.in_region(region))
        })
        .map(|endpoint| endpoint.url.trim_end_matches('/').to_owned())
        .ok_or_else(|| OpenStackError::EndpointNotFound {
            region_hint: region.map_or_else(String::new, |name| format!(" for region {name}")),
        })
}

#[cfg(test)]
mod tests;
