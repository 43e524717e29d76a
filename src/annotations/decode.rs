//! Candidate document decoding

use serde::Deserialize;

use super::{Annotations, CandidateDocument};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Candidate document is empty")]
    Empty,

    #[error("Document has no 'annotations' mapping")]
    MissingAnnotations,

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level shape of a header document; other keys are ignored
#[derive(Debug, Deserialize)]
struct UnitHeader {
    annotations: Option<Annotations>,
}

/// Decode one candidate document into annotations.
///
/// A document that is valid YAML but has no `annotations` key is rejected, so
/// foreign comment blocks never decode into an all-empty record.
pub fn decode(candidate: &CandidateDocument) -> Result<Annotations, DecodeError> {
    if candidate.is_empty() {
        return Err(DecodeError::Empty);
    }

    let header: Option<UnitHeader> = serde_yaml::from_str(&candidate.text())?;
    header
        .and_then(|h| h.annotations)
        .ok_or(DecodeError::MissingAnnotations)
}
