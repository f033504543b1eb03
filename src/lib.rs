//! Core library for correlating OpenStack volumes with ScaleIO volumes.
//!
//! The crate exposes the identifier mapping used by the ScaleIO Cinder
//! driver, a minimal ScaleIO gateway client with lazy login, an OpenStack
//! inventory client, and the table renderer shared by the
//! `list-sio-volumes` binaries.

pub mod config;
pub mod logging;
pub mod mapper;
pub mod openstack;
pub mod report;
pub mod run;
pub mod scaleio;
pub mod test_support;
pub mod transport;
pub mod types;

pub use config::{
    ConfigError, OpenStackConfig, OpenStackOverrides, OpenStackSettings, ScaleIoConfig,
    ScaleIoOverrides, ScaleIoSettings,
};
pub use mapper::map_volume_name;
pub use openstack::{CloudVolume, OpenStackClient, OpenStackError};
pub use report::{ListSummary, ReportRow, TableLayout, VolumeLister};
pub use run::{ListRequest, RunError, list_volumes, list_volumes_with};
pub use scaleio::{ScaleIoClient, ScaleIoError, Session, encode_name};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError,
};
pub use types::{MappedName, StorageVolumeId, VolumeIdentifier};
