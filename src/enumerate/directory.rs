//! Unit search path scanning

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{EnumerateError, UnitEnumerator, UnitFile};

/// File suffixes systemd treats as unit files
pub const UNIT_SUFFIXES: &[&str] = &[
    "service", "socket", "target", "timer", "mount", "automount", "swap", "path", "slice",
    "scope", "device",
];

/// Enumerates unit files by listing unit directories on disk.
///
/// Directories are searched in order and the first file with a given name
/// wins, like systemd's unit search path. The scan cannot see enable state,
/// so every entry reports `linked` for symlinks and `file` otherwise.
#[derive(Debug, Clone)]
pub struct DirectoryEnumerator {
    dirs: Vec<PathBuf>,
}

impl DirectoryEnumerator {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// System unit search paths
    pub fn system() -> Self {
        Self::new(vec![
            PathBuf::from("/etc/systemd/system"),
            PathBuf::from("/run/systemd/system"),
            PathBuf::from("/usr/lib/systemd/system"),
        ])
    }

    /// Per-user unit search paths
    pub fn user() -> Self {
        let mut paths = Vec::new();
        if let Some(config) = dirs::config_dir() {
            paths.push(config.join("systemd/user"));
        }
        paths.push(PathBuf::from("/etc/systemd/user"));
        paths.push(PathBuf::from("/usr/lib/systemd/user"));
        Self::new(paths)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    async fn scan_dir(dir: &Path, out: &mut Vec<UnitFile>) -> Result<(), EnumerateError> {
        let read_dir_error = |source| EnumerateError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Unit directory {} does not exist, skipping", dir.display());
                return Ok(());
            }
            Err(e) => return Err(read_dir_error(e)),
        };

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let path = entry.path();
            if !is_unit_file_name(&path) {
                continue;
            }

            let file_type = match entry.file_type().await {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            let status = if file_type.is_symlink() {
                "linked"
            } else if file_type.is_file() {
                "file"
            } else {
                continue;
            };
            out.push(UnitFile::new(path, status));
        }

        Ok(())
    }
}

impl UnitEnumerator for DirectoryEnumerator {
    async fn list_unit_files(&self) -> Result<Vec<UnitFile>, EnumerateError> {
        let mut found = Vec::new();
        for dir in &self.dirs {
            Self::scan_dir(dir, &mut found).await?;
        }

        let mut seen: HashSet<OsString> = HashSet::new();
        let mut files: Vec<UnitFile> = found
            .into_iter()
            .filter(|f| match f.path.file_name() {
                Some(name) if !seen.insert(name.to_os_string()) => {
                    log::debug!("{} is shadowed by an earlier search path", f.path.display());
                    false
                }
                _ => true,
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        log::debug!(
            "Found {} unit files in {} directories",
            files.len(),
            self.dirs.len()
        );
        Ok(files)
    }
}

fn is_unit_file_name(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| UNIT_SUFFIXES.contains(&ext))
}
