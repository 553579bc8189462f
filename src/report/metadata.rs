//! Metadata report — document properties plus the integrity check.

use serde::Serialize;

use crate::analysis::DocumentMetadata;

/// Millisecond tolerance below which created/modified count as identical.
const IDENTICAL_STAMP_MS: i64 = 1000;

/// Drift between document metadata and filesystem mtime worth flagging.
const FS_DRIFT_MS: i64 = 24 * 60 * 60 * 1000;

/// Author names that show up in templates and forged documents alike.
const GENERIC_AUTHORS: &[&str] = &["john doe", "user"];

/// Outcome of the metadata integrity check. Issues are hard
/// inconsistencies; warnings are worth a look.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataIntegrity {
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl MetadataIntegrity {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }
}

/// Run the integrity rules over the reported metadata.
pub fn check_integrity(metadata: &DocumentMetadata) -> MetadataIntegrity {
    let mut report = MetadataIntegrity::default();

    if let Some(author) = &metadata.author {
        if GENERIC_AUTHORS.contains(&author.to_lowercase().as_str()) {
            report.warnings.push("Generic author name detected".to_string());
        }
    }

    // Date consistency checks apply only when the document reports both
    if let (Some(created), Some(modified)) = (metadata.created_date, metadata.modified_date) {
        if created > modified {
            report
                .issues
                .push("Creation date is after modification date".to_string());
        }

        if (created - modified).num_milliseconds().abs() < IDENTICAL_STAMP_MS {
            report
                .warnings
                .push("Creation and modification dates are identical".to_string());
        }

        if (modified - metadata.last_modified).num_milliseconds().abs() > FS_DRIFT_MS {
            report.warnings.push(
                "File system modification date differs significantly from document metadata"
                    .to_string(),
            );
        }
    }

    if metadata.author.is_none() {
        report
            .warnings
            .push("No author information available".to_string());
    }
    if metadata.created_date.is_none() {
        report
            .warnings
            .push("No creation date in metadata".to_string());
    }

    report
}

/// Metadata card view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataReport {
    pub filename: String,
    pub size: u64,
    pub size_display: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub last_modified: String,
    pub author: Option<String>,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
    pub page_count: Option<u32>,
    pub integrity: MetadataIntegrity,
    pub clean: bool,
}

/// Build the metadata card from the analysis metadata.
pub fn metadata_report(metadata: &DocumentMetadata) -> MetadataReport {
    let integrity = check_integrity(metadata);
    let clean = integrity.is_clean();
    MetadataReport {
        filename: metadata.filename.clone(),
        size: metadata.size,
        size_display: format_file_size(metadata.size),
        mime_type: metadata.mime_type.clone(),
        last_modified: metadata.last_modified.to_rfc3339(),
        author: metadata.author.clone(),
        created_date: metadata.created_date.map(|d| d.to_rfc3339()),
        modified_date: metadata.modified_date.map(|d| d.to_rfc3339()),
        page_count: metadata.page_count,
        integrity,
        clean,
    }
}

/// Human-readable file size: B / KB / MB / GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}
