//! Load annotations from unit files on disk

use std::path::{Path, PathBuf};

use super::{decode, extract_candidates, Annotations};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid annotations header in {}", path.display())]
    NoValidHeader { path: PathBuf },

    #[error("Timed out reading {}", path.display())]
    TimedOut { path: PathBuf },

    #[error("Cancelled before reading {}", path.display())]
    Cancelled { path: PathBuf },
}

impl LoadError {
    /// Path of the unit file that failed to load
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::NoValidHeader { path }
            | Self::TimedOut { path }
            | Self::Cancelled { path } => path,
        }
    }

    /// True when the file was read but carries no annotations
    pub fn is_unannotated(&self) -> bool {
        matches!(self, Self::NoValidHeader { .. })
    }
}

/// Decode the annotations header of raw unit file contents.
///
/// Candidates are tried in document order and the first one that decodes
/// wins, so other tools' comment blocks may precede the annotations.
pub fn parse_unit_header(data: &[u8]) -> Option<Annotations> {
    extract_candidates(data)
        .iter()
        .enumerate()
        .find_map(|(index, candidate)| match decode(candidate) {
            Ok(annotations) => Some(annotations),
            Err(e) => {
                log::trace!("Header candidate {} rejected: {}", index, e);
                None
            }
        })
}

/// Read a unit file and decode its annotations header
pub async fn load_annotated_unit(path: &Path) -> Result<Annotations, LoadError> {
    let data = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_unit_header(&data).ok_or_else(|| LoadError::NoValidHeader {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_with_unit_body() {
        let data = b"#annotations:\n#  part-of: demo\n#  component: proxy\n[Unit]\nDescription=x\n";
        let annotations = parse_unit_header(data).unwrap();
        assert_eq!(
            annotations,
            Annotations {
                part_of: "demo".into(),
                component: "proxy".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_no_header() {
        assert!(parse_unit_header(b"[Unit]\nDescription=x\n").is_none());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_unit_header(b"").is_none());
    }

    #[test]
    fn test_first_valid_candidate_wins() {
        let data = b"\
# Copyright 2024 Example Corp
#---
# annotations:
#   part-of: [broken
#---
# annotations:
#   part-of: third
#---
# annotations:
#   part-of: fourth
[Unit]
";
        assert_eq!(parse_unit_header(data).unwrap().part_of, "third");
    }

    #[test]
    fn test_foreign_block_skipped() {
        let data = b"\
# generated-by: some-tool
# checksum: abc123
#---
# annotations:
#   component: db
";
        assert_eq!(parse_unit_header(data).unwrap().component, "db");
    }

    #[test]
    fn test_all_candidates_invalid() {
        let data = b"# just a comment\n#---\n# another: {\n[Unit]\n";
        assert!(parse_unit_header(data).is_none());
    }

    #[test]
    fn test_only_separators() {
        assert!(parse_unit_header(b"#---\n#---\n").is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let path = Path::new("/nonexistent/dnotations-test/missing.service");
        let err = load_annotated_unit(path).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.path(), path);
        assert!(!err.is_unannotated());
    }
}
