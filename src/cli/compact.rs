//! Command-line interface for the `list-sio-volumes-compact` binary.
//!
//! The compact listing always spans every tenant, so it carries no
//! `--os_all_tenants`, domain or region flags.

use clap::Parser;

/// List OpenStack volumes and their ScaleIO volume names across all tenants.
#[derive(Debug, Parser)]
#[command(
    name = "list-sio-volumes-compact",
    version,
    about = "List OpenStack volumes and corresponding ScaleIO volumes"
)]
pub(crate) struct CompactCli {
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
