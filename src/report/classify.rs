//! Shared classification rules used by every report section.
//!
//! The original dashboard duplicated these per card; keeping them in one
//! place means the text and image reports can never drift apart on banding,
//! and the signature card and its trust indicators agree on certificate
//! wording.

use serde::{Deserialize, Serialize};

use crate::analysis::SignatureAnalysis;

/// Confidence thresholds shared by text and image banding.
pub mod thresholds {
    /// At or above: findings look authentic.
    pub const GOOD: f32 = 90.0;

    /// At or above (but below GOOD): worth a manual look.
    pub const CAUTION: f32 = 70.0;
}

/// Traffic-light band for a 0–100 confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Good,
    Caution,
    Bad,
}

impl ConfidenceBand {
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Caution => "yellow",
            Self::Bad => "red",
        }
    }
}

/// Band a confidence score: ≥90 good, 70–89 caution, below 70 bad.
pub fn confidence_band(confidence: f32) -> ConfidenceBand {
    if confidence >= thresholds::GOOD {
        ConfidenceBand::Good
    } else if confidence >= thresholds::CAUTION {
        ConfidenceBand::Caution
    } else {
        ConfidenceBand::Bad
    }
}

/// Reader-facing interpretation of a text confidence score.
pub fn text_confidence_message(band: ConfidenceBand) -> &'static str {
    match band {
        ConfidenceBand::Good => "Text appears authentic with minimal suspicious indicators",
        ConfidenceBand::Caution => "Some inconsistencies detected, manual review recommended",
        ConfidenceBand::Bad => "High probability of text manipulation detected",
    }
}

/// Three-way signature verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    NoSignature,
    Valid,
    Invalid,
}

impl SignatureStatus {
    pub fn badge(self) -> &'static str {
        match self {
            Self::NoSignature => "No Signature",
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::NoSignature => "No Digital Signature",
            Self::Valid => "Valid Digital Signature",
            Self::Invalid => "Invalid Digital Signature",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::NoSignature => "This document does not contain a digital signature.",
            Self::Valid => {
                "The digital signature is valid and the document has not been tampered with since signing."
            }
            Self::Invalid => {
                "The digital signature is invalid. The document may have been modified after signing or the signature is corrupted."
            }
        }
    }
}

/// Classify a signature finding. `is_valid` is only consulted when a
/// signature is present.
pub fn signature_status(signature: &SignatureAnalysis) -> SignatureStatus {
    if !signature.has_digital_signature {
        SignatureStatus::NoSignature
    } else if signature.is_valid {
        SignatureStatus::Valid
    } else {
        SignatureStatus::Invalid
    }
}

/// Certificate standing, matched by substring in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStanding {
    Expired,
    Revoked,
    Valid,
    NotApplicable,
    NeedsReview,
}

impl CertificateStanding {
    pub fn message(self) -> &'static str {
        match self {
            Self::Expired => {
                "The certificate used to sign this document has expired. While the signature may have been valid at signing time, current validation fails."
            }
            Self::Revoked => {
                "The certificate has been revoked by the issuing authority. This signature should not be trusted."
            }
            Self::Valid => "Certificate is valid and trusted by the certification authority.",
            Self::NotApplicable => "Certificate validation is not applicable for this file type.",
            Self::NeedsReview => {
                "Certificate status requires manual verification with the issuing authority."
            }
        }
    }
}

/// Classify a free-text certificate status string.
pub fn certificate_standing(certificate: &str) -> CertificateStanding {
    let cert = certificate.to_lowercase();
    if cert.contains("expired") {
        CertificateStanding::Expired
    } else if cert.contains("revoked") {
        CertificateStanding::Revoked
    } else if cert.contains("valid") {
        CertificateStanding::Valid
    } else if cert.contains("not applicable") {
        CertificateStanding::NotApplicable
    } else {
        CertificateStanding::NeedsReview
    }
}
