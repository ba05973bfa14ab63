/*!
 * Service Configuration
 * Environment-driven settings resolved once at startup
 */

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::{CrossDevicePolicy, FileEngine};
use crate::security::SandboxRoot;
use crate::vfs::{FsError, FsResult};

pub const ENV_ROOT: &str = "FILESERVICE_ROOT";
pub const ENV_BIND_ADDR: &str = "FILESERVICE_BIND_ADDR";
pub const ENV_TRACE_JSON: &str = "FILESERVICE_TRACE_JSON";
pub const ENV_CROSS_DEVICE_MOVE: &str = "FILESERVICE_CROSS_DEVICE_MOVE";

pub const DEFAULT_ROOT: &str = "/tmp/file-service-root";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for one service process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Sandbox root, absolute and lexically normalized
    pub root: PathBuf,
    pub bind_addr: SocketAddr,
    pub trace_json: bool,
    pub cross_device: CrossDevicePolicy,
}

impl ServiceConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; missing or empty keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let root = match get(ENV_ROOT) {
            Some(raw) => absolute_root(&raw)?,
            None => PathBuf::from(DEFAULT_ROOT),
        };

        let bind_addr = get(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_BIND_ADDR,
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let trace_json = match get(ENV_TRACE_JSON) {
            Some(raw) => parse_bool(ENV_TRACE_JSON, &raw)?,
            None => false,
        };

        let cross_device = match get(ENV_CROSS_DEVICE_MOVE) {
            Some(raw) => raw
                .parse::<CrossDevicePolicy>()
                .map_err(|reason| ConfigError::InvalidValue {
                    key: ENV_CROSS_DEVICE_MOVE,
                    value: raw.clone(),
                    reason,
                })?,
            None => CrossDevicePolicy::default(),
        };

        Ok(Self {
            root,
            bind_addr,
            trace_json,
            cross_device,
        })
    }

    /// Create the root directory if missing and validate it
    pub fn prepare_root(&self) -> FsResult<SandboxRoot> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            FsError::io_failure(e, format!("create sandbox root {}", self.root.display()))
        })?;
        SandboxRoot::new(&self.root)
    }

    /// Engine over the prepared root with the configured policies
    pub fn build_engine(&self) -> FsResult<FileEngine> {
        let root = self.prepare_root()?;
        Ok(FileEngine::builder(root)
            .with_cross_device_policy(self.cross_device)
            .build())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            trace_json: false,
            cross_device: CrossDevicePolicy::default(),
        }
    }
}

/// Make a configured root absolute against the working directory, then clean it
fn absolute_root(raw: &str) -> Result<PathBuf, ConfigError> {
    let path = Path::new(raw.trim());
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_ROOT,
                value: raw.to_string(),
                reason: format!("cannot resolve relative root: {}", e),
            })?
            .join(path)
    };
    Ok(PathBuf::from(path_clean::clean(absolute)))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
