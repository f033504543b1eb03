//! Correlates OpenStack volumes with ScaleIO volumes and renders the table.
//!
//! Volumes are resolved one at a time in inventory order. Only volumes with a
//! ScaleIO counterpart produce a row; lookups that fail are logged and
//! counted, and the walk continues with the next volume.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::mapper::map_volume_name;
use crate::openstack::CloudVolume;
use crate::scaleio::ScaleIoClient;
use crate::transport::HttpTransport;
use crate::types::{MappedName, StorageVolumeId, VolumeIdentifier};

const VOLUME_WIDTH: usize = 40;
const NAME_WIDTH: usize = 30;
const ID_WIDTH: usize = 20;
const ATTACHED_WIDTH: usize = 10;

/// Table shapes produced by the two binaries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableLayout {
    /// OpenStack volume, ScaleIO name, ScaleIO ID, attached flag.
    Detailed,
    /// OpenStack volume, ScaleIO name, attached flag.
    Compact,
}

impl TableLayout {
    /// Renders the header line (without a trailing newline).
    #[must_use]
    pub fn header(self) -> String {
        match self {
            Self::Detailed => format!(
                "{:<VOLUME_WIDTH$}{:<NAME_WIDTH$}{:<ID_WIDTH$}{:<ATTACHED_WIDTH$}",
                "OpenStack Volume", "ScaleIO Name", "ScaleIO ID", "Attached"
            ),
            Self::Compact => format!(
                "{:<VOLUME_WIDTH$}{:<NAME_WIDTH$}{:<ATTACHED_WIDTH$}",
                "OpenStack Volume", "ScaleIO Volume", "Attached"
            ),
        }
    }

    /// Renders one row (without a trailing newline).
    #[must_use]
    pub fn row(self, row: &ReportRow) -> String {
        let attached = if row.attached { "True" } else { "False" };
        match self {
            Self::Detailed => format!(
                "{:<VOLUME_WIDTH$}{:<NAME_WIDTH$}{:<ID_WIDTH$}{:<ATTACHED_WIDTH$}",
                row.volume, row.name, row.storage_id, attached
            ),
            Self::Compact => format!(
                "{:<VOLUME_WIDTH$}{:<NAME_WIDTH$}{:<ATTACHED_WIDTH$}",
                row.volume, row.name, attached
            ),
        }
    }
}

/// One matched volume.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportRow {
    /// OpenStack volume identifier.
    pub volume: VolumeIdentifier,
    /// Derived ScaleIO volume name.
    pub name: MappedName,
    /// ScaleIO volume ID.
    pub storage_id: StorageVolumeId,
    /// Whether OpenStack reports any attachment.
    pub attached: bool,
}

/// Counts gathered while listing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ListSummary {
    /// Volumes returned by OpenStack.
    pub inventory: usize,
    /// Volumes with a ScaleIO counterpart (rows written).
    pub matched: usize,
    /// Volumes the gateway does not know.
    pub unmatched: usize,
    /// Volumes whose lookup failed.
    pub failed: usize,
}

/// Walks an inventory and writes the correlation table.
pub struct VolumeLister<T> {
    scaleio: ScaleIoClient<T>,
    layout: TableLayout,
}

impl<T: HttpTransport> VolumeLister<T> {
    /// Creates a lister over a ScaleIO client.
    #[must_use]
    pub const fn new(scaleio: ScaleIoClient<T>, layout: TableLayout) -> Self {
        Self { scaleio, layout }
    }

    /// Writes the header and one row per matched volume to `out`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when writing to `out` fails. Lookup failures are
    /// not errors; they are logged and counted in the summary.
    pub async fn list<W: Write>(
        &mut self,
        volumes: &[CloudVolume],
        out: &mut W,
    ) -> io::Result<ListSummary> {
        let mut summary = ListSummary {
            inventory: volumes.len(),
            ..ListSummary::default()
        };
        writeln!(out, "{}", self.layout.header())?;

        for volume in volumes {
            let name = map_volume_name(&volume.id);
            match self.scaleio.resolve_volume_id(&name).await {
                Ok(Some(storage_id)) => {
                    let row = ReportRow {
                        volume: volume.id.clone(),
                        name,
                        storage_id,
                        attached: volume.is_attached(),
                    };
                    writeln!(out, "{}", self.layout.row(&row))?;
                    out.flush()?;
                    summary.matched += 1;
                }
                Ok(None) => {
                    debug!(volume = %volume.id, %name, "no corresponding ScaleIO volume");
                    summary.unmatched += 1;
                }
                Err(err) => {
                    warn!(volume = %volume.id, %name, error = %err, "ScaleIO lookup failed");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
