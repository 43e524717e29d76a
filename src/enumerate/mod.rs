//! Unit file enumeration
//!
//! Enumerators produce the set of unit files a listing runs over:
//! - [`SystemdEnumerator`] asks the running systemd over D-Bus (`ListUnitFiles`)
//! - [`DirectoryEnumerator`] scans the unit search paths directly, for hosts
//!   without a reachable bus

mod dbus;
mod directory;

pub use dbus::{Systemd1ManagerProxy, SystemdEnumerator};
pub use directory::{DirectoryEnumerator, UNIT_SUFFIXES};

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use serde::Serialize;

/// A unit file reported by an enumerator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitFile {
    pub path: PathBuf,
    /// Enable state as reported by the enumerator (enabled, static, linked, ...)
    pub status: String,
}

impl UnitFile {
    pub fn new(path: impl Into<PathBuf>, status: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: status.into(),
        }
    }

    /// File name of the unit (e.g. "docker.service")
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

impl fmt::Display for UnitFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path: {}\tStatus: {}", self.path.display(), self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnumerateError {
    #[error("D-Bus error: {0}")]
    Bus(#[from] zbus::Error),

    #[error("Failed to read unit directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of unit files for a listing
pub trait UnitEnumerator {
    fn list_unit_files(
        &self,
    ) -> impl Future<Output = Result<Vec<UnitFile>, EnumerateError>> + Send;
}
