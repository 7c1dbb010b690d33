use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{CaseId, CaseStatus, Decision, DecisionOutcome};
use crate::workflows::evaluation::EvaluationResult;
use crate::workflows::library::BoundCase;

/// Repository record holding the bound case, its evaluation, and the player's decision.
#[derive(Debug, Clone)]
pub struct CaseRecord {
    pub case_id: CaseId,
    pub case: BoundCase,
    pub status: CaseStatus,
    pub evaluation: Option<EvaluationResult>,
    pub decision: Option<Decision>,
    pub outcome: Option<DecisionOutcome>,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl CaseRecord {
    pub fn verdict_summary(&self) -> String {
        match &self.evaluation {
            Some(result) if result.is_match => format!("match (score {:.1})", result.score),
            Some(result) => result.failure_summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> CaseStatusView {
        CaseStatusView {
            case_id: self.case_id.clone(),
            candidate: self.case.profile.display_name.clone(),
            status: self.status.label(),
            verdict: self.verdict_summary(),
            score: self
                .evaluation
                .as_ref()
                .filter(|result| result.is_match)
                .map(|result| result.score),
            decision: self.decision,
            outcome: self.outcome,
        }
    }
}

/// Storage abstraction so the session service can be exercised in isolation.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a case for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStatusView {
    pub case_id: CaseId,
    pub candidate: String,
    pub status: &'static str,
    pub verdict: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DecisionOutcome>,
}
