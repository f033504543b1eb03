//! Configuration loading via `ortho-config`.
//!
//! Defaults, configuration files and environment variables are merged by
//! `ortho-config`; command-line flags parsed by the binaries are layered on
//! top as overrides before validation.

use std::ffi::OsString;
use std::fmt;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const PROGRAM_NAME: &str = "list-sio-volumes";

/// Keystone domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "Default";

/// Gateway port used when none is configured.
pub const DEFAULT_SIO_PORT: &str = "443";

/// OpenStack connection settings from environment variables and
/// configuration files.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "OS")]
pub struct OpenStackConfig {
    /// Keystone authentication URL.
    pub auth_url: Option<String>,
    /// Project (tenant) name used to scope the token.
    pub tenant: Option<String>,
    /// OpenStack user name.
    pub user: Option<String>,
    /// OpenStack password.
    pub pass: Option<String>,
    /// Domain of the user. Defaults to `Default`.
    #[ortho_config(default = DEFAULT_DOMAIN.to_owned())]
    pub user_domain: String,
    /// Domain of the project. Defaults to `Default`.
    #[ortho_config(default = DEFAULT_DOMAIN.to_owned())]
    pub project_domain: String,
    /// Optional region used to pick the block storage endpoint.
    pub region: Option<String>,
}

/// ScaleIO gateway settings from environment variables and configuration
/// files.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "SIO")]
pub struct ScaleIoConfig {
    /// Gateway host name or address.
    pub gateway: Option<String>,
    /// Gateway HTTPS port. Defaults to `443`.
    #[ortho_config(default = DEFAULT_SIO_PORT.to_owned())]
    pub port: String,
    /// Gateway user name.
    pub user: Option<String>,
    /// Gateway password.
    pub pass: Option<String>,
    /// Skip TLS certificate verification for the gateway.
    #[ortho_config(default = false)]
    pub insecure: bool,
}

/// OpenStack values supplied on the command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OpenStackOverrides {
    /// `--os_auth_url`
    pub auth_url: Option<String>,
    /// `--os_tenant`
    pub tenant: Option<String>,
    /// `--os_user`
    pub user: Option<String>,
    /// `--os_pass`
    pub pass: Option<String>,
    /// `--os_user_domain`
    pub user_domain: Option<String>,
    /// `--os_project_domain`
    pub project_domain: Option<String>,
    /// `--os_region`
    pub region: Option<String>,
}

/// ScaleIO values supplied on the command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScaleIoOverrides {
    /// `--sio_gateway`
    pub gateway: Option<String>,
    /// `--sio_port`
    pub port: Option<String>,
    /// `--sio_user`
    pub user: Option<String>,
    /// `--sio_pass`
    pub pass: Option<String>,
    /// `--sio_insecure`
    pub insecure: bool,
}

/// Validated OpenStack connection settings.
#[derive(Clone, Eq, PartialEq)]
pub struct OpenStackSettings {
    /// Keystone authentication URL.
    pub auth_url: String,
    /// Project (tenant) name.
    pub tenant: String,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Domain of the user.
    pub user_domain: String,
    /// Domain of the project.
    pub project_domain: String,
    /// Optional endpoint region.
    pub region: Option<String>,
}

impl fmt::Debug for OpenStackSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenStackSettings")
            .field("auth_url", &self.auth_url)
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("user_domain", &self.user_domain)
            .field("project_domain", &self.project_domain)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Validated ScaleIO gateway settings.
#[derive(Clone, Eq, PartialEq)]
pub struct ScaleIoSettings {
    /// Gateway host name or address.
    pub gateway: String,
    /// Gateway HTTPS port.
    pub port: u16,
    /// Gateway user name.
    pub username: String,
    /// Gateway password.
    pub password: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

impl fmt::Debug for ScaleIoSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleIoSettings")
            .field("gateway", &self.gateway)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("insecure", &self.insecure)
            .finish_non_exhaustive()
    }
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    flag: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, flag: &'static str) -> Self {
        Self {
            description,
            env_var,
            flag,
        }
    }
}

fn require_field(value: Option<String>, metadata: &FieldMetadata) -> Result<String, ConfigError> {
    match value.map(|text| text.trim().to_owned()) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ConfigError::MissingField(format!(
            "missing {}: pass {} or set {}",
            metadata.description, metadata.flag, metadata.env_var
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidField(format!(
            "invalid ScaleIO gateway port {value:?}: pass --sio_port or set SIO_PORT to a value between 1 and 65535"
        ))),
    }
}

fn load_error(err: impl fmt::Display) -> ConfigError {
    ConfigError::Parse(err.to_string())
}

impl OpenStackConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(load_error)
    }

    /// Layers command-line overrides over the loaded values.
    #[must_use]
    pub fn with_overrides(self, overrides: OpenStackOverrides) -> Self {
        Self {
            auth_url: overrides.auth_url.or(self.auth_url),
            tenant: overrides.tenant.or(self.tenant),
            user: overrides.user.or(self.user),
            pass: overrides.pass.or(self.pass),
            user_domain: overrides.user_domain.unwrap_or(self.user_domain),
            project_domain: overrides.project_domain.unwrap_or(self.project_domain),
            region: overrides.region.or(self.region),
        }
    }

    /// Validates required fields and produces connection settings. Error
    /// messages name both the flag and the environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn into_settings(self) -> Result<OpenStackSettings, ConfigError> {
        let auth_url = require_field(
            self.auth_url,
            &FieldMetadata::new("OpenStack auth URL", "OS_AUTH_URL", "--os_auth_url"),
        )?;
        let tenant = require_field(
            self.tenant,
            &FieldMetadata::new("OpenStack tenant", "OS_TENANT", "--os_tenant"),
        )?;
        let username = require_field(
            self.user,
            &FieldMetadata::new("OpenStack user", "OS_USER", "--os_user"),
        )?;
        let password = require_field(
            self.pass,
            &FieldMetadata::new("OpenStack password", "OS_PASS", "--os_pass"),
        )?;
        let user_domain = non_blank(Some(self.user_domain))
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_owned());
        let project_domain = non_blank(Some(self.project_domain))
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_owned());

        Ok(OpenStackSettings {
            auth_url,
            tenant,
            username,
            password,
            user_domain,
            project_domain,
            region: non_blank(self.region),
        })
    }
}

impl ScaleIoConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(load_error)
    }

    /// Layers command-line overrides over the loaded values.
    #[must_use]
    pub fn with_overrides(self, overrides: ScaleIoOverrides) -> Self {
        Self {
            gateway: overrides.gateway.or(self.gateway),
            port: overrides.port.unwrap_or(self.port),
            user: overrides.user.or(self.user),
            pass: overrides.pass.or(self.pass),
            insecure: overrides.insecure || self.insecure,
        }
    }

    /// Validates required fields and produces gateway settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty
    /// and [`ConfigError::InvalidField`] when the port is not a valid TCP
    /// port.
    pub fn into_settings(self) -> Result<ScaleIoSettings, ConfigError> {
        let gateway = require_field(
            self.gateway,
            &FieldMetadata::new("ScaleIO gateway", "SIO_GATEWAY", "--sio_gateway"),
        )?;
        let port = parse_port(&self.port)?;
        let username = require_field(
            self.user,
            &FieldMetadata::new("ScaleIO user", "SIO_USER", "--sio_user"),
        )?;
        let password = require_field(
            self.pass,
            &FieldMetadata::new("ScaleIO password", "SIO_PASS", "--sio_pass"),
        )?;

        Ok(ScaleIoSettings {
            gateway,
            port,
            username,
            password,
            insecure: self.insecure,
        })
    }
}

/// Loads, merges and validates both configuration sections.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading fails or validation rejects a value.
pub fn resolve_settings(
    openstack: OpenStackOverrides,
    scaleio: ScaleIoOverrides,
) -> Result<(OpenStackSettings, ScaleIoSettings), ConfigError> {
    let openstack_settings = OpenStackConfig::load_without_cli_args()?
        .with_overrides(openstack)
        .into_settings()?;
    let scaleio_settings = ScaleIoConfig::load_without_cli_args()?
        .with_overrides(scaleio)
        .into_settings()?;
    Ok((openstack_settings, scaleio_settings))
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration value cannot be used.
    #[error("invalid configuration value: {0}")]
    InvalidField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}
