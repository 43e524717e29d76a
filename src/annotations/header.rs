//! Comment header extraction
//!
//! Isolates the leading run of `#` lines of a unit file and splits it into
//! candidate documents on `#---` separator lines.

/// Character that starts a header line
pub const COMMENT_MARKER: char = '#';

/// Stripped line content that starts a new candidate document
pub const DOCUMENT_SEPARATOR: &str = "---";

/// One block of header text considered for decoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateDocument {
    lines: Vec<String>,
}

impl CandidateDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Document text with lines joined by newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateDocument {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split the comment header of `data` into candidate documents.
///
/// The header is the run of non-empty lines starting with `#` at the very top
/// of the file. Scanning stops at the first blank or non-comment line, so a
/// file whose first line is blank has no header at all.
pub fn extract_candidates(data: &[u8]) -> Vec<CandidateDocument> {
    let content = String::from_utf8_lossy(data);
    let header = content
        .lines()
        .take_while(|line| line.starts_with(COMMENT_MARKER));

    let mut documents = Vec::new();
    let mut current: Option<CandidateDocument> = None;

    for line in header {
        let stripped = line.trim_start_matches(COMMENT_MARKER);
        let document = current.get_or_insert_with(CandidateDocument::default);

        if stripped == DOCUMENT_SEPARATOR {
            documents.push(std::mem::take(document));
            continue;
        }
        document.lines.push(stripped.to_string());
    }

    documents.extend(current);
    documents
}
