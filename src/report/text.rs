//! Text-authenticity report.

use serde::Serialize;

use super::classify::{confidence_band, text_confidence_message, ConfidenceBand};
use crate::analysis::TextAnalysis;

/// Text card view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextReport {
    pub confidence: u8,
    pub band: ConfidenceBand,
    pub message: &'static str,
    pub total_words: u64,
    pub suspicious_words: u64,
    pub summary: String,
    pub flags: Vec<String>,
    pub recommendations: Vec<&'static str>,
}

/// Build the text card from the text findings.
pub fn text_report(text: &TextAnalysis) -> TextReport {
    let band = confidence_band(text.confidence);

    let summary = if text.suspicious_words == 0 {
        "No suspicious text modifications detected. The document appears to maintain its \
         original text integrity."
            .to_string()
    } else {
        format!(
            "{} potentially suspicious element{} detected out of {} total words analyzed.",
            text.suspicious_words,
            if text.suspicious_words > 1 { "s" } else { "" },
            text.total_words
        )
    };

    let mut recommendations = Vec::new();
    if text.confidence < 90.0 {
        if text.confidence < 70.0 {
            recommendations.push("Manual review strongly recommended due to high suspicion level");
        }
        if text.suspicious_words > 0 {
            recommendations.push("Verify document against original source if available");
        }
        if !text.flags.is_empty() {
            recommendations.push("Check document formatting and encoding for inconsistencies");
        }
    }

    TextReport {
        confidence: text.confidence.round() as u8,
        band,
        message: text_confidence_message(band),
        total_words: text.total_words,
        suspicious_words: text.suspicious_words,
        summary,
        flags: text.flags.clone(),
        recommendations,
    }
}
