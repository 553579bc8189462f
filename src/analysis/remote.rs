//! Remote analysis client — multipart submission to the forgery-analysis
//! backend.
//!
//! The backend contract: `POST {base}/api/analyze` with the document under
//! multipart field `file`; 2xx with a JSON `AnalysisResult` body, non-2xx
//! with an optional JSON `{"detail": "..."}` explanation.

use std::time::Duration;

use serde::Deserialize;

use super::types::AnalysisResult;
use super::{AnalysisError, DocumentAnalyzer};
use crate::config;
use crate::intake::UploadedFile;

pub struct RemoteClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Error body the backend sends on non-2xx responses.
#[derive(Deserialize)]
struct BackendErrorBody {
    detail: Option<String>,
}

impl RemoteClient {
    /// Client for the given backend base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Internal(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Client from resolved application configuration.
    pub fn from_config(config: &config::AppConfig) -> Result<Self, AnalysisError> {
        Self::new(&config.backend_url, config::ANALYZE_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one document and parse the backend's verdict.
    pub async fn submit(&self, file: &UploadedFile) -> Result<AnalysisResult, AnalysisError> {
        let url = format!("{}{}", self.base_url, config::ANALYZE_PATH);

        let part = reqwest::multipart::Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AnalysisError::Internal(format!("Invalid MIME type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<BackendErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: AnalysisResult = response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.normalized())
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::Timeout(self.timeout.as_secs())
        } else if err.is_connect() || err.is_request() {
            AnalysisError::Connection(self.base_url.clone())
        } else {
            AnalysisError::Internal(err.to_string())
        }
    }
}

impl DocumentAnalyzer for RemoteClient {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResult, AnalysisError> {
        self.submit(file).await
    }
}
