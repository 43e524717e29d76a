//! Unit file annotations
//!
//! Annotations live in a YAML block embedded in the leading comment lines of
//! a unit file:
//!
//! ```text
//! # annotations:
//! #   part-of: my-project
//! #   component: proxy
//! #   managed-by: someuser
//! #   version: 1.0.0
//! #   hostname: myservice.example.com
//! [Unit]
//! Description=A proxy server.
//! ```

mod decode;
mod header;
mod loader;

pub use decode::{decode, DecodeError};
pub use header::{extract_candidates, CandidateDocument, COMMENT_MARKER, DOCUMENT_SEPARATOR};
pub use loader::{load_annotated_unit, parse_unit_header, LoadError};

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Metadata attached to a unit file. An empty string means the field was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(rename = "part-of", deserialize_with = "empty_if_null")]
    pub part_of: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub component: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub version: String,
    #[serde(rename = "managed-by", deserialize_with = "empty_if_null")]
    pub managed_by: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub hostname: String,
}

impl Annotations {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.part_of.is_empty()
            && self.component.is_empty()
            && self.version.is_empty()
            && self.managed_by.is_empty()
            && self.hostname.is_empty()
    }

    /// Key used to give listings a stable order
    pub fn sort_key(&self) -> (&str, &str, &str, &str, &str) {
        (
            &self.part_of,
            &self.component,
            &self.hostname,
            &self.version,
            &self.managed_by,
        )
    }
}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Part of:    {}", self.part_of)?;
        writeln!(f, "Component:  {}", self.component)?;
        writeln!(f, "Version:    {}", self.version)?;
        writeln!(f, "Managed by: {}", self.managed_by)?;
        write!(f, "Hostname:   {}", self.hostname)
    }
}

/// `version:` with no value is YAML null; treat it like a missing key
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
