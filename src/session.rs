//! Analysis session state — the single state machine behind the dashboard.
//!
//! Phases: Idle → Ready (file selected) → Analyzing → Results | Failed.
//! Selecting a new file from any phase returns to Ready and clears prior
//! output. Every analysis run is tagged with a generation number; selecting
//! a file bumps it, so completions from an abandoned run are discarded
//! instead of clobbering the new session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, Failure};
use crate::intake::UploadedFile;

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Ready,
    Analyzing,
    Results,
    Failed,
}

/// Errors from session transitions.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("Internal lock error")]
    LockPoisoned,

    #[error("No file selected — upload a document first")]
    NoFile,

    #[error("Analysis cannot start from the {0:?} phase")]
    NotReady(Phase),
}

#[derive(Debug, Default)]
struct Inner {
    phase: Phase,
    file: Option<UploadedFile>,
    result: Option<AnalysisResult>,
    error: Option<Failure>,
    running: bool,
    progress: u8,
    step: String,
}

/// Shared session state. Wrapped in `Arc` at startup; handlers and the
/// orchestrator's spawned tasks hold clones.
pub struct SessionState {
    inner: RwLock<Inner>,
    generation: AtomicU64,
}

/// Point-in-time copy of the session for rendering.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub running: bool,
    pub progress: u8,
    pub step: String,
    pub file: Option<UploadedFile>,
    pub result: Option<AnalysisResult>,
    pub error: Option<Failure>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current run generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Select a file: any phase → Ready. Clears prior result, error, and
    /// progress, and bumps the generation so an in-flight run goes stale.
    /// Returns the new generation and the replaced file, whose content and
    /// preview are released with it.
    pub fn select_file(
        &self,
        file: UploadedFile,
    ) -> Result<(u64, Option<UploadedFile>), SessionError> {
        let mut inner = self.inner.write().map_err(|_| SessionError::LockPoisoned)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let replaced = inner.file.replace(file);
        inner.phase = Phase::Ready;
        inner.result = None;
        inner.error = None;
        inner.running = false;
        inner.progress = 0;
        inner.step.clear();

        Ok((generation, replaced))
    }

    /// Ready → Analyzing. Returns the generation tag for this run and the
    /// file to analyze.
    pub fn begin_analysis(&self) -> Result<(u64, UploadedFile), SessionError> {
        let mut inner = self.inner.write().map_err(|_| SessionError::LockPoisoned)?;
        match inner.phase {
            Phase::Ready => {}
            Phase::Idle => return Err(SessionError::NoFile),
            other => return Err(SessionError::NotReady(other)),
        }
        let file = inner.file.clone().ok_or(SessionError::NoFile)?;

        inner.phase = Phase::Analyzing;
        inner.running = true;
        inner.progress = 0;
        inner.step.clear();
        inner.result = None;
        inner.error = None;

        Ok((self.generation(), file))
    }

    /// Cosmetic progress tick. Applied only while the tagged run is still
    /// the active one and the session is Analyzing.
    pub fn set_progress_if_current(&self, generation: u64, percent: u8, step: &str) -> bool {
        self.with_current(generation, |inner| {
            if inner.phase != Phase::Analyzing {
                return false;
            }
            inner.progress = percent.min(100);
            inner.step = step.to_string();
            true
        })
    }

    /// Analyzing → Results, if the tagged run is still current. Forces
    /// progress to 100 regardless of where the ticker got to.
    pub fn complete_if_current(&self, generation: u64, result: AnalysisResult) -> bool {
        self.with_current(generation, |inner| {
            if inner.phase != Phase::Analyzing {
                return false;
            }
            inner.phase = Phase::Results;
            inner.result = Some(result);
            inner.error = None;
            inner.progress = 100;
            inner.step = "Analysis complete!".to_string();
            true
        })
    }

    /// Analyzing → Failed, if the tagged run is still current.
    pub fn fail_if_current(&self, generation: u64, failure: Failure) -> bool {
        self.with_current(generation, |inner| {
            if inner.phase != Phase::Analyzing {
                return false;
            }
            inner.phase = Phase::Failed;
            inner.error = Some(failure);
            inner.result = None;
            inner.progress = 0;
            inner.step.clear();
            true
        })
    }

    /// Clear the busy indicator after the settle delay.
    pub fn settle_if_current(&self, generation: u64) -> bool {
        self.with_current(generation, |inner| {
            inner.running = false;
            true
        })
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.inner
            .read()
            .map(|inner| Snapshot {
                phase: inner.phase,
                running: inner.running,
                progress: inner.progress,
                step: inner.step.clone(),
                file: inner.file.clone(),
                result: inner.result.clone(),
                error: inner.error.clone(),
            })
            .unwrap_or_default()
    }

    // Generation is checked under the write lock: `select_file` bumps it
    // while holding that lock, so a stale run can never slip in between
    // the check and the mutation.
    fn with_current<F>(&self, generation: u64, apply: F) -> bool
    where
        F: FnOnce(&mut Inner) -> bool,
    {
        let Ok(mut inner) = self.inner.write() else {
            return false;
        };
        if generation != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(
                generation,
                current = self.generation.load(Ordering::SeqCst),
                "Stale run event discarded"
            );
            return false;
        }
        apply(&mut inner)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
