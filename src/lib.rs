//! dnotations - metadata annotations for systemd units
//!
//! Unit files carry a YAML block in their leading comment lines describing
//! what they belong to:
//!
//! ```text
//! # annotations:
//! #   part-of: my-project
//! #   component: proxy
//! #   hostname: myservice.example.com
//! [Unit]
//! Description=A proxy server.
//! ```
//!
//! This crate finds unit files, decodes those headers and collects them into
//! one listing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Enumerator (D-Bus ListUnitFiles / unit dirs)    │
//! ├──────────────────────────────────────────────────┤
//! │  Collector: one task per unit file, fan-in       │
//! ├──────────────────────────────────────────────────┤
//! │  Loader: header extraction → YAML decoding       │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod annotations;
pub mod collector;
pub mod enumerate;
pub mod output;

pub use annotations::{load_annotated_unit, parse_unit_header, Annotations, LoadError};
pub use collector::{Collector, CollectorConfig, CollectorError, UnitListing};
pub use enumerate::{DirectoryEnumerator, SystemdEnumerator, UnitEnumerator, UnitFile};
