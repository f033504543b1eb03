//! Build script rendering man pages for both listing binaries.
//!
//! Pages land in `OUT_DIR` as `<binary>.1` for the packaging pipeline.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

#[path = "src/cli/compact.rs"]
mod compact;

const CLI_SOURCES: [&str; 2] = ["src/cli/mod.rs", "src/cli/compact.rs"];

fn render_page(command: Command, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let page = out_dir.join(format!("{}.1", command.get_name()));
    let mut buffer = Vec::new();
    Man::new(command).render(&mut buffer)?;
    fs::write(page, buffer)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    for source in CLI_SOURCES {
        writeln!(stdout, "cargo:rerun-if-changed={source}")?;
    }

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR was not set"))?;

    for command in [cli::Cli::command(), compact::CompactCli::command()] {
        render_page(command, &out_dir)?;
    }

    Ok(())
}
