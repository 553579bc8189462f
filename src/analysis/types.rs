//! Analysis result model — the shape shared by the heuristic analyzer, the
//! remote backend response, and the report builders.
//!
//! Wire format is camelCase; the signature sub-object travels as
//! `signatureCheck` (the backend's name) with `signatureAnalysis` accepted
//! as an alias.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Composite analysis result. Sub-records are independently optional —
/// not every file type produces every section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_analysis: Option<TextAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_analysis: Option<ImageAnalysis>,
    #[serde(
        default,
        rename = "signatureCheck",
        alias = "signatureAnalysis",
        skip_serializing_if = "Option::is_none"
    )]
    pub signature_analysis: Option<SignatureAnalysis>,
}

impl AnalysisResult {
    /// Enforce the model invariants, clamping out-of-range values.
    ///
    /// Applied to every result regardless of origin, so report builders
    /// never see a tampered count above the image count, a suspicious-word
    /// count above the word count, or a confidence outside 0–100.
    pub fn normalized(mut self) -> Self {
        if let Some(text) = &mut self.text_analysis {
            text.confidence = text.confidence.clamp(0.0, 100.0);
            text.suspicious_words = text.suspicious_words.min(text.total_words);
        }
        if let Some(image) = &mut self.image_analysis {
            image.confidence = image.confidence.clamp(0.0, 100.0);
            image.tampered_images = image.tampered_images.min(image.images_found);
        }
        self
    }

    /// MIME type recorded in the metadata section, if any.
    pub fn mime_type(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.mime_type.as_str())
    }
}

/// Document metadata as reported by the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

/// Text-authenticity findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub total_words: u64,
    pub suspicious_words: u64,
    /// Authenticity confidence, 0–100.
    pub confidence: f32,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Image-tampering findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub images_found: u32,
    pub tampered_images: u32,
    /// Authenticity confidence, 0–100.
    pub confidence: f32,
    #[serde(default)]
    pub suspicious_regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_details: Option<Vec<ImageDetail>>,
}

/// Per-image detail the backend may include for PDFs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetail {
    pub page: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: u64,
}

/// Digital-signature findings. `is_valid` is meaningful only when
/// `has_digital_signature` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureAnalysis {
    pub has_digital_signature: bool,
    pub is_valid: bool,
    pub signer_name: String,
    #[serde(default)]
    pub signed_date: String,
    pub certificate: String,
}
