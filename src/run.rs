//! Orchestrates a listing run.
//!
//! The run authenticates against OpenStack, fetches the volume inventory,
//! then resolves every volume against the ScaleIO gateway and writes the
//! correlation table. Only setup failures abort the run.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{
    ConfigError, OpenStackOverrides, OpenStackSettings, ScaleIoOverrides, ScaleIoSettings,
    resolve_settings,
};
use crate::openstack::{OpenStackClient, OpenStackError};
use crate::report::{ListSummary, TableLayout, VolumeLister};
use crate::scaleio::ScaleIoClient;
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

/// Errors that abort a listing run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Raised when configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Raised when an HTTP client cannot be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Raised when the OpenStack inventory cannot be fetched.
    #[error(transparent)]
    OpenStack(#[from] OpenStackError),
    /// Raised when the table cannot be written.
    #[error("failed to write volume table: {0}")]
    Output(#[from] io::Error),
}

/// Everything a listing run needs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListRequest {
    /// OpenStack connection settings.
    pub openstack: OpenStackSettings,
    /// ScaleIO gateway settings.
    pub scaleio: ScaleIoSettings,
    /// Include volumes from every tenant.
    pub all_tenants: bool,
    /// Table shape to render.
    pub layout: TableLayout,
}

impl ListRequest {
    /// Loads configuration, applies command-line overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] when configuration is incomplete.
    pub fn resolve(
        openstack: OpenStackOverrides,
        scaleio: ScaleIoOverrides,
        all_tenants: bool,
        layout: TableLayout,
    ) -> Result<Self, RunError> {
        let (openstack_settings, scaleio_settings) = resolve_settings(openstack, scaleio)?;
        Ok(Self {
            openstack: openstack_settings,
            scaleio: scaleio_settings,
            all_tenants,
            layout,
        })
    }
}

/// Runs a listing against live endpoints, writing the table to `out`.
///
/// # Errors
///
/// Returns [`RunError`] when a transport cannot be built, OpenStack fails,
/// or `out` cannot be written.
pub async fn list_volumes<W: Write>(
    request: &ListRequest,
    out: &mut W,
) -> Result<ListSummary, RunError> {
    let openstack_transport = ReqwestTransport::new()?;
    let scaleio_transport = if request.scaleio.insecure {
        warn!(
            gateway = %request.scaleio.gateway,
            "TLS certificate verification disabled for the ScaleIO gateway"
        );
        ReqwestTransport::insecure()?
    } else {
        ReqwestTransport::new()?
    };
    list_volumes_with(request, openstack_transport, scaleio_transport, out).await
}

/// Runs a listing over the supplied transports.
///
/// # Errors
///
/// Returns [`RunError`] when OpenStack fails or `out` cannot be written.
pub async fn list_volumes_with<O, S, W>(
    request: &ListRequest,
    openstack_transport: O,
    scaleio_transport: S,
    out: &mut W,
) -> Result<ListSummary, RunError>
where
    O: HttpTransport,
    S: HttpTransport,
    W: Write,
{
    let openstack = OpenStackClient::connect(&request.openstack, openstack_transport).await?;
    let volumes = openstack.list_volumes(request.all_tenants).await?;
    info!(count = volumes.len(), "fetched OpenStack volume inventory");

    let scaleio = ScaleIoClient::new(&request.scaleio, scaleio_transport);
    let mut lister = VolumeLister::new(scaleio, request.layout);
    let summary = lister.list(&volumes, out).await?;

    if summary.failed > 0 {
        warn!(
            failed = summary.failed,
            inventory = summary.inventory,
            "some ScaleIO lookups failed; their volumes are missing from the table"
        );
    }
    info!(
        matched = summary.matched,
        unmatched = summary.unmatched,
        "volume listing complete"
    );
    Ok(summary)
}
