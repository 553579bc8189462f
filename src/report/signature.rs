//! Digital-signature report.

use serde::Serialize;

use super::classify::{certificate_standing, signature_status, CertificateStanding, SignatureStatus};
use crate::analysis::SignatureAnalysis;

/// Trust indicators summarized at the bottom of the signature card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustIndicators {
    pub integrity_verified: bool,
    pub certificate_valid: bool,
    pub signer_identified: bool,
}

/// Signature card view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureReport {
    pub status: SignatureStatus,
    pub badge: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub signer_name: String,
    pub signed_date: Option<String>,
    pub certificate: String,
    pub certificate_standing: CertificateStanding,
    pub certificate_message: &'static str,
    pub trust: Option<TrustIndicators>,
}

/// Build the signature card from the signature findings.
pub fn signature_report(signature: &SignatureAnalysis) -> SignatureReport {
    let status = signature_status(signature);
    let standing = certificate_standing(&signature.certificate);

    let trust = signature.has_digital_signature.then(|| TrustIndicators {
        integrity_verified: signature.is_valid,
        certificate_valid: signature.certificate.to_lowercase().contains("valid"),
        signer_identified: !signature.signer_name.is_empty()
            && signature.signer_name != "No signature found",
    });

    SignatureReport {
        status,
        badge: status.badge(),
        title: status.title(),
        description: status.description(),
        signer_name: signature.signer_name.clone(),
        signed_date: (!signature.signed_date.is_empty()).then(|| signature.signed_date.clone()),
        certificate: signature.certificate.clone(),
        certificate_standing: standing,
        certificate_message: standing.message(),
        trust,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(has: bool, valid: bool, signer: &str, cert: &str) -> SignatureAnalysis {
        SignatureAnalysis {
            has_digital_signature: has,
            is_valid: valid,
            signer_name: signer.into(),
            signed_date: String::new(),
            certificate: cert.into(),
        }
    }

    #[test]
    fn unsigned_pdf_report() {
        let report = signature_report(&signature(false, false, "No signature found", "No signature present"));
        assert_eq!(report.status, SignatureStatus::NoSignature);
        assert_eq!(report.badge, "No Signature");
        assert_eq!(report.certificate_standing, CertificateStanding::NeedsReview);
        assert!(report.trust.is_none());
        assert!(report.signed_date.is_none());
    }

    #[test]
    fn valid_signature_report() {
        let mut input = signature(true, true, "Jane Signer", "Valid");
        input.signed_date = "2026-01-15T09:00:00Z".into();
        let report = signature_report(&input);
        assert_eq!(report.status, SignatureStatus::Valid);
        assert_eq!(report.certificate_standing, CertificateStanding::Valid);
        let trust = report.trust.unwrap();
        assert!(trust.integrity_verified);
        assert!(trust.certificate_valid);
        assert!(trust.signer_identified);
        assert_eq!(report.signed_date.as_deref(), Some("2026-01-15T09:00:00Z"));
    }

    #[test]
    fn invalid_signature_report() {
        let report = signature_report(&signature(true, false, "Jane Signer", "Revoked"));
        assert_eq!(report.status, SignatureStatus::Invalid);
        assert_eq!(report.certificate_standing, CertificateStanding::Revoked);
        let trust = report.trust.unwrap();
        assert!(!trust.integrity_verified);
        assert!(!trust.certificate_valid);
        assert!(trust.signer_identified);
    }

    #[test]
    fn unknown_signer_is_not_identified() {
        let report = signature_report(&signature(true, false, "No signature found", "Expired"));
        assert!(!report.trust.unwrap().signer_identified);
    }

    #[test]
    fn certificate_validity_is_a_substring_check() {
        // Mirrors the dashboard rule: any certificate text containing
        // "valid" lights the indicator, including "Invalid"
        let report = signature_report(&signature(true, false, "Jane", "Invalid"));
        assert!(report.trust.unwrap().certificate_valid);
    }
}
