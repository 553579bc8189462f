//! Analysis run orchestration — spawns the scripted progress ticker and the
//! analyzer future, and applies their outcomes to the session.
//!
//! The progress sequence is cosmetic: it advances on its own timer for user
//! feedback and is not synchronized with the real request. Completion
//! reconciles by forcing progress to 100. Both the ticker and the completion
//! are tagged with the run's generation; anything stale is dropped.

use std::sync::Arc;
use std::time::Duration;

use super::{AnalysisError, DocumentAnalyzer, Failure};
use crate::session::{SessionError, SessionState};

/// One step of the scripted progress sequence.
#[derive(Debug, Clone, Copy)]
pub struct ProgressStep {
    pub percent: u8,
    pub label: &'static str,
    pub delay: Duration,
}

/// The fixed progress script shown during every run.
pub const PROGRESS_SCRIPT: &[ProgressStep] = &[
    ProgressStep { percent: 10, label: "Initializing analysis...", delay: Duration::from_millis(300) },
    ProgressStep { percent: 25, label: "Uploading file to server...", delay: Duration::from_millis(500) },
    ProgressStep { percent: 40, label: "Extracting document metadata...", delay: Duration::from_millis(700) },
    ProgressStep { percent: 60, label: "Analyzing text content...", delay: Duration::from_millis(600) },
    ProgressStep { percent: 75, label: "Checking images and signatures...", delay: Duration::from_millis(500) },
    ProgressStep { percent: 90, label: "Generating analysis report...", delay: Duration::from_millis(400) },
    ProgressStep { percent: 100, label: "Analysis complete!", delay: Duration::from_millis(200) },
];

/// Per-run tuning. Defaults match production behavior.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Upper bound on the whole analysis, local or remote.
    pub timeout: Duration,
    /// How long the busy indicator lingers after completion.
    pub settle_delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: crate::config::ANALYZE_TIMEOUT,
            settle_delay: Duration::from_secs(1),
        }
    }
}

/// Start an analysis run for the currently selected file.
///
/// Valid only from the Ready phase. Returns the run's generation tag.
/// There is no cancellation: a later `select_file` bumps the generation and
/// the abandoned run's outcome is discarded on arrival.
pub fn start_analysis<A>(
    session: &Arc<SessionState>,
    analyzer: &Arc<A>,
    options: RunOptions,
) -> Result<u64, SessionError>
where
    A: DocumentAnalyzer + Send + Sync + 'static,
{
    let (generation, file) = session.begin_analysis()?;
    tracing::info!(file = %file.name, generation, "Analysis started");

    let ticker_session = Arc::clone(session);
    tokio::spawn(async move {
        for step in PROGRESS_SCRIPT {
            tokio::time::sleep(step.delay).await;
            if !ticker_session.set_progress_if_current(generation, step.percent, step.label) {
                break;
            }
        }
    });

    let run_session = Arc::clone(session);
    let analyzer = Arc::clone(analyzer);
    tokio::spawn(async move {
        let outcome = match tokio::time::timeout(options.timeout, analyzer.analyze(&file)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AnalysisError::Timeout(options.timeout.as_secs())),
        };

        let applied = match outcome {
            Ok(result) => {
                let applied = run_session.complete_if_current(generation, result);
                if applied {
                    tracing::info!(file = %file.name, generation, "Analysis complete");
                }
                applied
            }
            Err(err) => {
                tracing::warn!(file = %file.name, generation, error = %err, "Analysis failed");
                run_session.fail_if_current(generation, Failure::from(&err))
            }
        };

        if !applied {
            tracing::debug!(generation, "Analysis outcome discarded as stale");
            return;
        }

        tokio::time::sleep(options.settle_delay).await;
        run_session.settle_if_current(generation);
    });

    Ok(generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::analysis::types::AnalysisResult;
    use crate::analysis::{DocumentAnalyzer, ErrorKind};
    use crate::intake::UploadedFile;
    use crate::session::Phase;

    /// Test analyzer with a scripted delay and outcome.
    struct ScriptedAnalyzer {
        delay: Duration,
        fail_with_connection_to: Option<String>,
    }

    impl ScriptedAnalyzer {
        fn ok_after(delay: Duration) -> Self {
            Self { delay, fail_with_connection_to: None }
        }

        fn failing(base_url: &str) -> Self {
            Self {
                delay: Duration::ZERO,
                fail_with_connection_to: Some(base_url.to_string()),
            }
        }
    }

    impl DocumentAnalyzer for ScriptedAnalyzer {
        async fn analyze(
            &self,
            _file: &UploadedFile,
        ) -> Result<AnalysisResult, crate::analysis::AnalysisError> {
            tokio::time::sleep(self.delay).await;
            match &self.fail_with_connection_to {
                Some(base) => Err(crate::analysis::AnalysisError::Connection(base.clone())),
                None => Ok(AnalysisResult::default()),
            }
        }
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            size: 2 * 1024 * 1024,
            mime_type: "application/pdf".to_string(),
            last_modified: Utc::now(),
            preview: None,
            content: Arc::from(vec![0u8; 16]),
        }
    }

    fn options() -> RunOptions {
        RunOptions {
            timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(1),
        }
    }

    /// Advance the paused clock: in paused mode the runtime auto-advances
    /// through every pending timer while the test itself sleeps, then the
    /// yields let woken tasks finish their state updates.
    async fn run_clock(duration: Duration) {
        tokio::time::sleep(duration).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn progress_script_matches_contract() {
        assert_eq!(PROGRESS_SCRIPT.len(), 7);
        assert_eq!(PROGRESS_SCRIPT.first().unwrap().percent, 10);
        assert_eq!(PROGRESS_SCRIPT.last().unwrap().percent, 100);
        assert_eq!(PROGRESS_SCRIPT.last().unwrap().label, "Analysis complete!");
        assert!(PROGRESS_SCRIPT.windows(2).all(|w| w[0].percent < w[1].percent));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_run_reaches_results_then_settles() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("contract.pdf")).unwrap();
        let analyzer = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_millis(50)));

        start_analysis(&session, &analyzer, options()).unwrap();
        assert_eq!(session.snapshot().phase, Phase::Analyzing);

        run_clock(Duration::from_millis(60)).await;
        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Results);
        assert_eq!(snap.progress, 100);
        assert_eq!(snap.step, "Analysis complete!");
        assert!(snap.running, "still settling");

        run_clock(Duration::from_millis(1100)).await;
        assert!(!session.snapshot().running);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_reaches_failed_with_connection_kind() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("contract.pdf")).unwrap();
        let analyzer = Arc::new(ScriptedAnalyzer::failing("http://localhost:8000"));

        start_analysis(&session, &analyzer, options()).unwrap();
        run_clock(Duration::from_millis(10)).await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Failed);
        assert_eq!(snap.progress, 0);
        assert!(snap.step.is_empty());
        let error = snap.error.unwrap();
        assert_eq!(error.kind, ErrorKind::Connection);
        assert!(error.message.contains("http://localhost:8000"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_times_out_into_failed() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("contract.pdf")).unwrap();
        let analyzer = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_secs(120)));
        let options = RunOptions {
            timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(1),
        };

        start_analysis(&session, &analyzer, options).unwrap();
        run_clock(Duration::from_secs(31)).await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Failed);
        assert_eq!(snap.error.unwrap().kind, ErrorKind::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_ticker_advances_while_analyzing() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("contract.pdf")).unwrap();
        let analyzer = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_secs(10)));

        start_analysis(&session, &analyzer, options()).unwrap();

        run_clock(Duration::from_millis(350)).await;
        let snap = session.snapshot();
        assert_eq!(snap.progress, 10);
        assert_eq!(snap.step, "Initializing analysis...");

        run_clock(Duration::from_millis(550)).await;
        assert_eq!(session.snapshot().progress, 25);

        // The script is cosmetic: it can hit 100 while the request is still
        // in flight
        run_clock(Duration::from_secs(4)).await;
        let snap = session.snapshot();
        assert_eq!(snap.progress, 100);
        assert_eq!(snap.phase, Phase::Analyzing);
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_a_new_file_discards_the_stale_outcome() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("first.pdf")).unwrap();
        let analyzer = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_millis(500)));

        start_analysis(&session, &analyzer, options()).unwrap();
        run_clock(Duration::from_millis(100)).await;

        // User picks a different file while the request is in flight
        session.select_file(file("second.pdf")).unwrap();

        run_clock(Duration::from_secs(5)).await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Ready, "stale completion must not apply");
        assert_eq!(snap.file.unwrap().name, "second.pdf");
        assert!(snap.result.is_none());
        assert_eq!(snap.progress, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn new_run_after_stale_select_completes_normally() {
        let session = Arc::new(SessionState::new());
        session.select_file(file("first.pdf")).unwrap();
        let slow = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_secs(5)));
        start_analysis(&session, &slow, options()).unwrap();

        session.select_file(file("second.pdf")).unwrap();
        let fast = Arc::new(ScriptedAnalyzer::ok_after(Duration::from_millis(10)));
        start_analysis(&session, &fast, options()).unwrap();

        run_clock(Duration::from_secs(6)).await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, Phase::Results);
        assert_eq!(snap.file.unwrap().name, "second.pdf");
    }

    #[tokio::test]
    async fn start_requires_ready_phase() {
        let session = Arc::new(SessionState::new());
        let analyzer = Arc::new(ScriptedAnalyzer::ok_after(Duration::ZERO));
        assert_eq!(
            start_analysis(&session, &analyzer, options()).unwrap_err(),
            SessionError::NoFile
        );

        session.select_file(file("a.pdf")).unwrap();
        start_analysis(&session, &analyzer, options()).unwrap();
        assert!(matches!(
            start_analysis(&session, &analyzer, options()).unwrap_err(),
            SessionError::NotReady(Phase::Analyzing)
        ));
    }
}
