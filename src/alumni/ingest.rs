//! Bulk ingestion of email lists.
//!
//! An upload is either a plain-text file (one candidate per line) or a CSV
//! file (first field of each row). A candidate survives if it merely
//! contains `@esprit.tn`; the generator decides whether it is well formed.

use serde::Serialize;

use crate::alumni::profile::{ProfileGenerator, ProfileOutcome};
use crate::error::IngestError;

/// Substring a candidate must contain to be handed to the generator.
pub const DOMAIN_MARKER: &str = "@esprit.tn";

/// Accepted upload formats, chosen by filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Text,
    Csv,
}

impl UploadKind {
    /// Classify an upload by its filename. The suffix test is case-sensitive.
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        if filename.is_empty() {
            return Err(IngestError::NoFileSelected);
        }
        if filename.ends_with(".csv") {
            Ok(Self::Csv)
        } else if filename.ends_with(".txt") {
            Ok(Self::Text)
        } else {
            Err(IngestError::UnsupportedType {
                filename: filename.to_string(),
            })
        }
    }
}

/// Characters that end a line in a text upload. A `\r\n` pair yields an
/// empty piece between the two, which the marker filter drops.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Pull candidate emails out of an upload, in file order.
pub fn extract_candidates(kind: UploadKind, content: &[u8]) -> Result<Vec<String>, IngestError> {
    let text = String::from_utf8(content.to_vec())?;

    let raw: Vec<String> = match kind {
        UploadKind::Text => text.split(LINE_BREAKS).map(str::to_string).collect(),
        UploadKind::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_reader(text.as_bytes());
            let mut firsts = Vec::new();
            for row in reader.records() {
                if let Some(first) = row?.get(0) {
                    firsts.push(first.to_string());
                }
            }
            firsts
        }
    };

    Ok(raw
        .into_iter()
        .filter(|line| line.contains(DOMAIN_MARKER))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Outcome of a bulk upload: one entry per candidate, successes and failures alike.
#[derive(Debug, Clone, Serialize)]
pub struct BulkIngestReport {
    pub message: String,
    pub results: Vec<ProfileOutcome>,
}

impl BulkIngestReport {
    fn new(results: Vec<ProfileOutcome>) -> Self {
        Self {
            message: format!("Processed {} alumni profiles", results.len()),
            results,
        }
    }

    pub fn generated_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_generated()).count()
    }
}

/// Extract candidates from an upload and run each through the generator.
pub fn ingest(
    generator: &ProfileGenerator,
    kind: UploadKind,
    content: &[u8],
) -> Result<BulkIngestReport, IngestError> {
    let candidates = extract_candidates(kind, content)?;

    let results: Vec<ProfileOutcome> = candidates
        .iter()
        .map(|email| generator.generate(email))
        .collect();
    let report = BulkIngestReport::new(results);

    tracing::info!(
        kind = ?kind,
        candidates = report.results.len(),
        generated = report.generated_count(),
        "Bulk upload processed"
    );
    Ok(report)
}
