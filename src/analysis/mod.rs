//! Document analysis — the analyzer contract, its two implementations
//! (remote backend client and local heuristic fallback), and the run
//! orchestration that drives the session state machine.

pub mod heuristic;
pub mod orchestrator;
pub mod remote;
pub mod types;

pub use heuristic::HeuristicAnalyzer;
pub use orchestrator::{start_analysis, RunOptions, PROGRESS_SCRIPT};
pub use remote::RemoteClient;
pub use types::*;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::intake::UploadedFile;

/// Errors from an analysis run. Each maps to a stable kind the dashboard
/// can branch on.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot connect to analysis backend at {0}")]
    Connection(String),

    #[error("Analysis request timed out after {0}s")]
    Timeout(u64),

    #[error("Analysis backend returned error (status {status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Malformed analysis response: {0}")]
    ResponseParsing(String),

    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Server { .. } => ErrorKind::Server,
            Self::ResponseParsing(_) => ErrorKind::ResponseParsing,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Stable error category for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Connection,
    Timeout,
    Server,
    ResponseParsing,
    Internal,
}

/// A failed run, as stored on the session and shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AnalysisError> for Failure {
    fn from(err: &AnalysisError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// The analyzer contract: one document in, one complete result out.
///
/// Implementations must not assume repeated calls with the same file give
/// identical output — the heuristic analyzer is randomized unless seeded.
pub trait DocumentAnalyzer {
    fn analyze(
        &self,
        file: &UploadedFile,
    ) -> impl Future<Output = Result<AnalysisResult, AnalysisError>> + Send;
}

/// Runtime-selected analyzer: remote backend by default, heuristic in
/// offline mode.
pub enum Analyzer {
    Remote(RemoteClient),
    Heuristic(HeuristicAnalyzer),
}

impl Analyzer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remote(_) => "remote",
            Self::Heuristic(_) => "heuristic",
        }
    }
}

impl DocumentAnalyzer for Analyzer {
    async fn analyze(&self, file: &UploadedFile) -> Result<AnalysisResult, AnalysisError> {
        match self {
            Self::Remote(client) => client.analyze(file).await,
            Self::Heuristic(analyzer) => analyzer.analyze(file).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_one_to_one() {
        assert_eq!(
            AnalysisError::Connection("http://localhost:8000".into()).kind(),
            ErrorKind::Connection
        );
        assert_eq!(AnalysisError::Timeout(30).kind(), ErrorKind::Timeout);
        assert_eq!(
            AnalysisError::Server { status: 500, detail: "boom".into() }.kind(),
            ErrorKind::Server
        );
        assert_eq!(
            AnalysisError::ResponseParsing("bad json".into()).kind(),
            ErrorKind::ResponseParsing
        );
        assert_eq!(AnalysisError::Internal("oops".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ErrorKind::Connection).unwrap(), "\"connection\"");
        assert_eq!(
            serde_json::to_string(&ErrorKind::ResponseParsing).unwrap(),
            "\"response_parsing\""
        );
    }

    #[test]
    fn connection_error_names_the_backend() {
        let err = AnalysisError::Connection("http://localhost:8000".into());
        assert!(err.to_string().contains("http://localhost:8000"));
    }

    #[test]
    fn failure_carries_kind_and_message() {
        let err = AnalysisError::Server { status: 422, detail: "unreadable file".into() };
        let failure = Failure::from(&err);
        assert_eq!(failure.kind, ErrorKind::Server);
        assert!(failure.message.contains("422"));
        assert!(failure.message.contains("unreadable file"));
    }
}
