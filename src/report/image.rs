//! Image-tampering report.

use serde::Serialize;

use super::classify::{confidence_band, ConfidenceBand};
use crate::analysis::{ImageAnalysis, ImageDetail};

/// Image card view model. When no images were found the card renders an
/// empty placeholder, so most fields collapse.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub has_images: bool,
    pub images_found: u32,
    pub tampered_images: u32,
    pub confidence: u8,
    pub band: Option<ConfidenceBand>,
    pub summary: String,
    pub low_confidence_note: Option<&'static str>,
    pub suspicious_regions: Vec<String>,
    pub image_details: Vec<ImageDetail>,
}

/// Build the image card from the image findings.
pub fn image_report(image: &ImageAnalysis) -> ImageReport {
    if image.images_found == 0 {
        return ImageReport {
            has_images: false,
            images_found: 0,
            tampered_images: 0,
            confidence: 0,
            band: None,
            summary: "No images detected in this document for analysis.".to_string(),
            low_confidence_note: None,
            suspicious_regions: vec![],
            image_details: vec![],
        };
    }

    let plural = if image.images_found > 1 { "s" } else { "" };
    let summary = if image.tampered_images == 0 {
        format!(
            "All {} image{} appear authentic with no signs of digital manipulation. Image \
             forensics analysis shows consistent compression artifacts and metadata.",
            image.images_found, plural
        )
    } else {
        format!(
            "{} out of {} image{} show signs of potential tampering. Anomalies detected in \
             pixel patterns, compression artifacts, and metadata consistency.",
            image.tampered_images, image.images_found, plural
        )
    };

    let band = confidence_band(image.confidence);

    ImageReport {
        has_images: true,
        images_found: image.images_found,
        tampered_images: image.tampered_images,
        confidence: image.confidence.round() as u8,
        band: Some(band),
        summary,
        low_confidence_note: (band == ConfidenceBand::Bad)
            .then_some("Low confidence score indicates possible image manipulation"),
        suspicious_regions: image.suspicious_regions.clone(),
        image_details: image.image_details.clone().unwrap_or_default(),
    }
}
