//! Listing output formats

use serde::Serialize;

use crate::annotations::Annotations;
use crate::collector::{SkippedUnit, UnitListing};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Serialize)]
struct JsonListing<'a> {
    units: &'a [Annotations],
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a [SkippedUnit]>,
}

/// Render as `{"units":[...]}`, optionally with the skipped files
pub fn to_json(listing: &UnitListing, show_skipped: bool) -> serde_json::Result<String> {
    serde_json::to_string(&JsonListing {
        units: &listing.units,
        skipped: show_skipped.then_some(listing.skipped.as_slice()),
    })
}

pub fn to_table(listing: &UnitListing, show_skipped: bool) -> String {
    let mut out = String::new();

    if listing.is_empty() {
        out.push_str("No annotated units\n");
    } else {
        out.push_str(&format!(
            "{:<20} {:<16} {:<12} {:<16} {}\n",
            "PART-OF", "COMPONENT", "VERSION", "MANAGED-BY", "HOSTNAME"
        ));
        for unit in &listing.units {
            out.push_str(&format!(
                "{:<20} {:<16} {:<12} {:<16} {}\n",
                or_dash(&unit.part_of),
                or_dash(&unit.component),
                or_dash(&unit.version),
                or_dash(&unit.managed_by),
                or_dash(&unit.hostname)
            ));
        }
    }

    if show_skipped && !listing.skipped.is_empty() {
        out.push('\n');
        out.push_str(&format!("{:<12} {:<10} {}\n", "SKIPPED", "STATUS", "PATH"));
        for skipped in &listing.skipped {
            out.push_str(&format!(
                "{:<12} {:<10} {}\n",
                skipped.kind.as_str(),
                skipped.status,
                skipped.path.display()
            ));
        }
    }

    out
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
