//! Report builders — pure mappings from analysis results to the view
//! models the dashboard renders. No state, no mutation.

pub mod classify;
pub mod image;
pub mod metadata;
pub mod signature;
pub mod text;

pub use classify::*;
pub use image::{image_report, ImageReport};
pub use metadata::{check_integrity, format_file_size, metadata_report, MetadataIntegrity, MetadataReport};
pub use signature::{signature_report, SignatureReport, TrustIndicators};
pub use text::{text_report, TextReport};

use serde::Serialize;

use crate::analysis::AnalysisResult;

/// The assembled dashboard report. Sections follow their source
/// sub-records; the signature card is shown only for PDFs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureReport>,
}

/// Build the full report from one analysis result.
pub fn build_report(result: &AnalysisResult) -> AnalysisReport {
    let is_pdf = result
        .mime_type()
        .is_some_and(|mime| mime.contains("pdf"));

    AnalysisReport {
        metadata: result.metadata.as_ref().map(metadata_report),
        text: result.text_analysis.as_ref().map(text_report),
        image: result.image_analysis.as_ref().map(image_report),
        signature: result
            .signature_analysis
            .as_ref()
            .filter(|_| is_pdf)
            .map(signature_report),
    }
}
