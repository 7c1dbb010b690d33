use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use super::domain::{CaseId, CaseStatus, Decision, DecisionOutcome, SessionStats};
use super::repository::{CaseRecord, CaseRepository, RepositoryError};
use crate::workflows::evaluation::{
    EvaluationConfig, EvaluationError, EvaluationResult, MatchEvaluator, RequirementMode,
};
use crate::workflows::library::{CaseDocument, LibraryError, TraitLibrary};

/// Service composing the trait library, case repository, and evaluator.
pub struct ReviewSession<R> {
    library: Arc<TraitLibrary>,
    repository: Arc<R>,
    evaluator: MatchEvaluator,
    /// Held from fetch through write-back so record transitions never interleave.
    stats: Mutex<SessionStats>,
}

static CASE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_case_id() -> CaseId {
    let id = CASE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CaseId(format!("case-{id:06}"))
}

impl<R> ReviewSession<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(library: Arc<TraitLibrary>, repository: Arc<R>, config: EvaluationConfig) -> Self {
        Self {
            library,
            repository,
            evaluator: MatchEvaluator::new(config),
            stats: Mutex::new(SessionStats::default()),
        }
    }

    pub fn mode(&self) -> RequirementMode {
        self.evaluator.mode()
    }

    /// Bind a case against the library and queue it for review.
    pub fn submit(&self, document: CaseDocument) -> Result<CaseRecord, SessionError> {
        let case = self.library.bind_case(&document)?;
        let record = CaseRecord {
            case_id: next_case_id(),
            case,
            status: CaseStatus::Pending,
            evaluation: None,
            decision: None,
            outcome: None,
            submitted_at: Utc::now(),
            decided_at: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Evaluate a queued case and persist the result on its record.
    pub fn evaluate(&self, case_id: &CaseId) -> Result<EvaluationResult, SessionError> {
        let _guard = self.stats.lock().expect("session stats mutex poisoned");
        let mut record = self.fetch_existing(case_id)?;
        let result = self.run_evaluation(&record)?;

        record.evaluation = Some(result.clone());
        if record.decision.is_none() {
            record.status = CaseStatus::Evaluated;
        }
        self.repository.update(record)?;

        Ok(result)
    }

    /// Record the player's call, evaluating first when no result is stored yet.
    pub fn decide(
        &self,
        case_id: &CaseId,
        decision: Decision,
    ) -> Result<DecisionOutcome, SessionError> {
        let mut stats = self.stats.lock().expect("session stats mutex poisoned");
        let mut record = self.fetch_existing(case_id)?;
        if record.decision.is_some() {
            return Err(SessionError::AlreadyDecided(case_id.clone()));
        }

        let result = match record.evaluation.take() {
            Some(result) => result,
            None => self.run_evaluation(&record)?,
        };
        let outcome = DecisionOutcome::classify(decision, result.is_match);

        record.evaluation = Some(result);
        record.decision = Some(decision);
        record.outcome = Some(outcome);
        record.status = CaseStatus::Decided;
        record.decided_at = Some(Utc::now());
        self.repository.update(record)?;
        stats.record(outcome);

        info!(
            case_id = %case_id,
            decision = decision.label(),
            outcome = outcome.label(),
            "decision recorded"
        );

        Ok(outcome)
    }

    /// Fetch a case and its current status for API responses.
    pub fn get(&self, case_id: &CaseId) -> Result<CaseRecord, SessionError> {
        self.fetch_existing(case_id)
    }

    pub fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, SessionError> {
        Ok(self.repository.pending(limit)?)
    }

    pub fn stats(&self) -> SessionStats {
        *self.stats.lock().expect("session stats mutex poisoned")
    }

    fn fetch_existing(&self, case_id: &CaseId) -> Result<CaseRecord, SessionError> {
        let record = self
            .repository
            .fetch(case_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn run_evaluation(&self, record: &CaseRecord) -> Result<EvaluationResult, SessionError> {
        Ok(self
            .evaluator
            .evaluate(&record.case.profile, &record.case.criteria)?)
    }
}

/// Error raised by the review session service.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("case {0} already has a decision")]
    AlreadyDecided(CaseId),
}
