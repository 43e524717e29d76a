//! Aggregate result of a collection run

use std::path::PathBuf;

use serde::Serialize;

use crate::annotations::{Annotations, LoadError};
use crate::enumerate::UnitFile;

/// Why a unit file is missing from a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipKind {
    /// Readable, but no header candidate decoded
    Unannotated,
    /// The file could not be read
    Unreadable,
    TimedOut,
    Cancelled,
}

impl SkipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipKind::Unannotated => "unannotated",
            SkipKind::Unreadable => "unreadable",
            SkipKind::TimedOut => "timed-out",
            SkipKind::Cancelled => "cancelled",
        }
    }
}

/// A unit file that was enumerated but left out of the listing
#[derive(Debug, Clone, Serialize)]
pub struct SkippedUnit {
    pub path: PathBuf,
    pub status: String,
    pub kind: SkipKind,
    pub reason: String,
}

impl SkippedUnit {
    pub(crate) fn new(file: UnitFile, error: &LoadError) -> Self {
        let kind = match error {
            LoadError::NoValidHeader { .. } => SkipKind::Unannotated,
            LoadError::Io { .. } => SkipKind::Unreadable,
            LoadError::TimedOut { .. } => SkipKind::TimedOut,
            LoadError::Cancelled { .. } => SkipKind::Cancelled,
        };
        Self {
            path: file.path,
            status: file.status,
            kind,
            reason: error.to_string(),
        }
    }
}

/// Annotations of every unit file that carried a valid header.
///
/// `units` is in completion order; call [`UnitListing::sort`] for stable output.
#[derive(Debug, Clone, Default)]
pub struct UnitListing {
    pub units: Vec<Annotations>,
    pub skipped: Vec<SkippedUnit>,
}

impl UnitListing {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Sort units by part-of, component, hostname, version, then managed-by
    pub fn sort(&mut self) {
        self.units.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Number of skipped files of the given kind
    pub fn skipped_count(&self, kind: SkipKind) -> usize {
        self.skipped.iter().filter(|s| s.kind == kind).count()
    }

    /// Skipped files that failed for a reason other than missing annotations
    pub fn failures(&self) -> impl Iterator<Item = &SkippedUnit> {
        self.skipped
            .iter()
            .filter(|s| s.kind != SkipKind::Unannotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotations(part_of: &str, component: &str) -> Annotations {
        Annotations {
            part_of: part_of.into(),
            component: component.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_is_stable_key_order() {
        let mut listing = UnitListing {
            units: vec![
                annotations("web", "proxy"),
                annotations("db", "replica"),
                annotations("db", "primary"),
            ],
            skipped: Vec::new(),
        };
        listing.sort();
        let order: Vec<_> = listing
            .units
            .iter()
            .map(|a| format!("{}/{}", a.part_of, a.component))
            .collect();
        assert_eq!(order, vec!["db/primary", "db/replica", "web/proxy"]);
    }

    #[test]
    fn test_skip_kinds() {
        let file = UnitFile::new("/etc/systemd/system/a.service", "enabled");
        let io = LoadError::Io {
            path: file.path.clone(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let none = LoadError::NoValidHeader {
            path: file.path.clone(),
        };

        let listing = UnitListing {
            units: Vec::new(),
            skipped: vec![
                SkippedUnit::new(file.clone(), &io),
                SkippedUnit::new(file, &none),
            ],
        };

        assert_eq!(listing.skipped_count(SkipKind::Unreadable), 1);
        assert_eq!(listing.skipped_count(SkipKind::Unannotated), 1);
        assert_eq!(listing.failures().count(), 1);
        assert_eq!(listing.skipped[0].status, "enabled");
        assert_eq!(SkipKind::TimedOut.as_str(), "timed-out");
    }
}
