//! Binary entry point for `list-sio-volumes`.
//!
//! Prints every OpenStack volume that has a ScaleIO counterpart together
//! with its ScaleIO name, ScaleIO ID and attachment status.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;

use list_sio_volumes::config::{OpenStackOverrides, ScaleIoOverrides};
use list_sio_volumes::report::TableLayout;
use list_sio_volumes::run::{ListRequest, RunError, list_volumes};
use list_sio_volumes::logging;

mod cli;

use cli::Cli;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Run(#[from] RunError),
}

impl Cli {
    fn into_parts(self) -> (OpenStackOverrides, ScaleIoOverrides, bool) {
        let openstack = OpenStackOverrides {
            auth_url: self.os_auth_url,
            tenant: self.os_tenant,
            user: self.os_user,
            pass: self.os_pass,
            user_domain: self.os_user_domain,
            project_domain: self.os_project_domain,
            region: self.os_region,
        };
        let scaleio = ScaleIoOverrides {
            gateway: self.sio_gateway,
            port: self.sio_port,
            user: self.sio_user,
            pass: self.sio_pass,
            insecure: self.sio_insecure,
        };
        (openstack, scaleio, self.os_all_tenants)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let (openstack, scaleio, all_tenants) = cli.into_parts();
    let request = ListRequest::resolve(openstack, scaleio, all_tenants, TableLayout::Detailed)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    list_volumes(&request, &mut out).await?;
    Ok(())
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
