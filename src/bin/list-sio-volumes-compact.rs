//! Compact listing of OpenStack volumes with a ScaleIO counterpart.
//!
//! Always scans every tenant and prints the OpenStack volume, the ScaleIO
//! volume name and the attachment status.

use std::io::{self, Write as _};
use std::process;

use clap::Parser;
use list_sio_volumes::config::{OpenStackOverrides, ScaleIoOverrides};
use list_sio_volumes::logging;
use list_sio_volumes::report::TableLayout;
use list_sio_volumes::run::{ListRequest, list_volumes};

#[path = "../cli/compact.rs"]
mod compact;

use compact::CompactCli;

impl CompactCli {
    fn into_overrides(self) -> (OpenStackOverrides, ScaleIoOverrides) {
        let openstack = OpenStackOverrides {
            auth_url: self.os_auth_url,
            tenant: self.os_tenant,
            user: self.os_user,
            pass: self.os_pass,
            ..OpenStackOverrides::default()
        };
        let scaleio = ScaleIoOverrides {
            gateway: self.sio_gateway,
            port: self.sio_port,
            user: self.sio_user,
            pass: self.sio_pass,
            insecure: self.sio_insecure,
        };
        (openstack, scaleio)
    }
}

#[tokio::main]
async fn main() {
    let cli = CompactCli::parse();
    logging::init();
    let (openstack, scaleio) = cli.into_overrides();

    let result = match ListRequest::resolve(openstack, scaleio, true, TableLayout::Compact) {
        Ok(request) => list_volumes(&request, &mut io::stdout().lock()).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        writeln!(io::stderr(), "{err}").ok();
        process::exit(1);
    }
}
