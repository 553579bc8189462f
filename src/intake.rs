//! File intake — validation and staging of a single uploaded document.
//!
//! One file per submission. Type is detected from magic bytes with an
//! extension fallback (magic bytes don't lie — extensions can be wrong),
//! checked against the supported set, and capped at 50 MiB. Image files
//! additionally get a base64 data-URI preview for the dashboard.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Maximum accepted file size: 50 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// MIME types the analysis pipeline understands.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "image/png",
    "image/jpeg",
    "text/plain",
];

/// Errors rejecting an upload before analysis can start.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size_mb:.1}MB exceeds {max_mb}MB limit")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    #[error("Only one file may be submitted at a time")]
    MultipleFiles,

    #[error("No file provided")]
    NoFile,

    #[error("Malformed upload: {0}")]
    Malformed(String),
}

/// An accepted document, held in memory for the active session.
///
/// Replaced wholesale when the user selects a new file; the content and any
/// preview are released with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
    /// Base64 data URI, present for image uploads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip)]
    pub content: Arc<[u8]>,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.contains("pdf")
    }
}

/// Validate and accept a single uploaded file.
///
/// `last_modified` comes from the browser's file metadata when provided;
/// the upload time is used otherwise.
pub fn accept_upload(
    filename: &str,
    bytes: Vec<u8>,
    last_modified: Option<DateTime<Utc>>,
) -> Result<UploadedFile, IntakeError> {
    let size = bytes.len() as u64;
    if size > MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge {
            size_mb: size as f64 / (1024.0 * 1024.0),
            max_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
        });
    }

    let mime_type = detect_mime(&bytes, filename);
    if !is_allowed(&mime_type) {
        return Err(IntakeError::UnsupportedFormat(mime_type));
    }

    let name = sanitize_filename(filename);
    let preview = if mime_type.starts_with("image/") {
        Some(format!("data:{};base64,{}", mime_type, BASE64.encode(&bytes)))
    } else {
        None
    };

    Ok(UploadedFile {
        id: Uuid::new_v4(),
        name,
        size,
        mime_type,
        last_modified: last_modified.unwrap_or_else(Utc::now),
        preview,
        content: Arc::from(bytes),
    })
}

/// Is this MIME type in the supported set?
pub fn is_allowed(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

/// Detect MIME type from magic bytes, falling back to the file extension.
pub fn detect_mime(bytes: &[u8], filename: &str) -> String {
    // PDF: %PDF
    if bytes.starts_with(b"%PDF") {
        return "application/pdf".into();
    }
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg".into();
    }
    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return "image/png".into();
    }
    // Legacy Word: OLE compound document D0 CF 11 E0
    if bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
        return "application/msword".into();
    }
    // DOCX is a zip container; trust the extension to tell it apart from
    // an arbitrary archive.
    if bytes.starts_with(b"PK\x03\x04") {
        if filename.to_lowercase().ends_with(".docx") {
            return "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                .into();
        }
        return "application/zip".into();
    }

    if let Some(guessed) = mime_guess::from_path(filename).first_raw() {
        return guessed.to_string();
    }

    if is_likely_text(bytes) {
        return "text/plain".into();
    }

    "application/octet-stream".into()
}

/// Check if content is likely plain text (valid UTF-8, mostly printable).
fn is_likely_text(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(4096)];
    if sample.is_empty() {
        return false;
    }
    let text = match std::str::from_utf8(sample) {
        Ok(t) => t,
        Err(_) => return false,
    };
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    printable as f64 / text.chars().count().max(1) as f64 > 0.80
}

/// Sanitize a filename — strip path components and special characters.
pub fn sanitize_filename(original: &str) -> String {
    let sanitized: String = original
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = sanitized.replace("..", "");

    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.trim().is_empty() {
        "document".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
    }

    #[test]
    fn detect_pdf_from_magic_bytes() {
        assert_eq!(detect_mime(b"%PDF-1.4 content", "scan.pdf"), "application/pdf");
    }

    #[test]
    fn detect_jpeg_from_magic_bytes() {
        assert_eq!(
            detect_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00], "photo.jpg"),
            "image/jpeg"
        );
    }

    #[test]
    fn detect_png_from_magic_bytes() {
        assert_eq!(detect_mime(&png_bytes(), "shot.png"), "image/png");
    }

    #[test]
    fn detect_legacy_word_from_ole_header() {
        assert_eq!(
            detect_mime(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1], "letter.doc"),
            "application/msword"
        );
    }

    #[test]
    fn detect_docx_requires_extension() {
        let zip = b"PK\x03\x04rest-of-archive".to_vec();
        assert_eq!(
            detect_mime(&zip, "report.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(detect_mime(&zip, "archive.zip"), "application/zip");
    }

    #[test]
    fn wrong_extension_overridden_by_magic_bytes() {
        // JPEG content with a .pdf extension
        assert_eq!(
            detect_mime(&[0xFF, 0xD8, 0xFF, 0xE0], "misleading.pdf"),
            "image/jpeg"
        );
    }

    #[test]
    fn detect_text_file() {
        let mime = detect_mime(b"Quarterly report. Revenue up 4%.", "notes.txt");
        assert_eq!(mime, "text/plain");
    }

    #[test]
    fn extensionless_text_detected_by_content() {
        assert_eq!(detect_mime(b"plain readable content here", "README"), "text/plain");
    }

    #[test]
    fn binary_without_extension_is_octet_stream() {
        assert_eq!(
            detect_mime(&[0x4D, 0x5A, 0x90, 0x00, 0x03], "payload"),
            "application/octet-stream"
        );
    }

    #[test]
    fn accept_valid_pdf() {
        let file = accept_upload("contract.pdf", b"%PDF-1.7 body".to_vec(), None).unwrap();
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.name, "contract.pdf");
        assert_eq!(file.size, 13);
        assert!(file.preview.is_none());
        assert!(file.is_pdf());
        assert!(!file.is_image());
    }

    #[test]
    fn accept_image_produces_data_uri_preview() {
        let file = accept_upload("shot.png", png_bytes(), None).unwrap();
        assert!(file.is_image());
        let preview = file.preview.expect("image preview");
        assert!(preview.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn reject_unsupported_format() {
        let err = accept_upload("tool.exe", vec![0x4D, 0x5A, 0x90, 0x00], None).unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat(_)));
    }

    #[test]
    fn reject_oversized_file() {
        let mut bytes = b"%PDF-1.4 ".to_vec();
        bytes.resize((MAX_UPLOAD_BYTES + 1) as usize, b' ');
        let err = accept_upload("huge.pdf", bytes, None).unwrap_err();
        match err {
            IntakeError::FileTooLarge { max_mb, .. } => assert_eq!(max_mb, 50),
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn oversize_check_runs_before_type_check() {
        let mut bytes = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
        bytes[0] = 0x4D;
        let err = accept_upload("huge.bin", bytes, None).unwrap_err();
        assert!(matches!(err, IntakeError::FileTooLarge { .. }));
    }

    #[test]
    fn allowed_set_matches_supported_formats() {
        assert!(is_allowed("application/pdf"));
        assert!(is_allowed("image/jpeg"));
        assert!(is_allowed("text/plain"));
        assert!(!is_allowed("application/zip"));
        assert!(!is_allowed("application/octet-stream"));
        assert!(!is_allowed("image/tiff"));
    }

    #[test]
    fn sanitize_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("normal_file.pdf"), "normal_file.pdf");
        assert_eq!(sanitize_filename(""), "document");
        assert_eq!(sanitize_filename("file\0name.pdf"), "filename.pdf");
    }

    #[test]
    fn sanitize_preserves_normal_names() {
        assert_eq!(sanitize_filename("prescription_2024.pdf"), "prescription_2024.pdf");
        assert_eq!(sanitize_filename("lab results (1).jpg"), "lab results (1).jpg");
    }

    #[test]
    fn last_modified_passed_through() {
        let stamp = "2026-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let file = accept_upload("notes.txt", b"some text".to_vec(), Some(stamp)).unwrap();
        assert_eq!(file.last_modified, stamp);
    }

    #[test]
    fn serialized_file_uses_wire_names_and_skips_content() {
        let file = accept_upload("shot.png", png_bytes(), None).unwrap();
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "image/png");
        assert!(json["lastModified"].is_string());
        assert!(json.get("content").is_none());
    }
}
