//! Command-line interface definitions for the `list-sio-volumes` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// List OpenStack volumes and their corresponding ScaleIO volumes.
#[derive(Debug, Parser)]
#[command(
    name = "list-sio-volumes",
    version,
    about = "List OpenStack volumes and corresponding ScaleIO volumes"
)]
pub(crate) struct Cli {
    /// OpenStack authorization URL.
    #[arg(long = "os_auth_url", value_name = "URL")]
    pub(crate) os_auth_url: Option<String>,
    /// OpenStack tenant name.
    #[arg(long = "os_tenant", value_name = "TENANT")]
    pub(crate) os_tenant: Option<String>,
    /// OpenStack user.
    #[arg(long = "os_user", value_name = "USER")]
    pub(crate) os_user: Option<String>,
    /// OpenStack password.
    #[arg(long = "os_pass", value_name = "PASSWORD")]
    pub(crate) os_pass: Option<String>,
    /// Keystone domain of the OpenStack user (defaults to `Default`).
    #[arg(long = "os_user_domain", value_name = "DOMAIN")]
    pub(crate) os_user_domain: Option<String>,
    /// Keystone domain of the OpenStack tenant (defaults to `Default`).
    #[arg(long = "os_project_domain", value_name = "DOMAIN")]
    pub(crate) os_project_domain: Option<String>,
    /// Region used to select the block storage endpoint.
    #[arg(long = "os_region", value_name = "REGION")]
    pub(crate) os_region: Option<String>,
    /// Show volumes from all tenants.
    #[arg(long = "os_all_tenants")]
    pub(crate) os_all_tenants: bool,
    /// ScaleIO gateway host.
    #[arg(long = "sio_gateway", value_name = "HOST")]
    pub(crate) sio_gateway: Option<String>,
    /// ScaleIO gateway port (defaults to 443).
    #[arg(long = "sio_port", value_name = "PORT")]
    pub(crate) sio_port: Option<String>,
    /// ScaleIO user.
    #[arg(long = "sio_user", value_name = "USER")]
    pub(crate) sio_user: Option<String>,
    /// ScaleIO password.
    #[arg(long = "sio_pass", value_name = "PASSWORD")]
    pub(crate) sio_pass: Option<String>,
    /// Skip TLS certificate verification for the ScaleIO gateway.
    #[arg(long = "sio_insecure")]
    pub(crate) sio_insecure: bool,
}
