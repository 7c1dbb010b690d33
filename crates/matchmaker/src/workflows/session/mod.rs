//! Review sessions: queue cases, evaluate them, and score the player's accept/reject
//! calls against the engine's verdict.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CaseId, CaseStatus, Decision, DecisionOutcome, SessionStats};
pub use repository::{CaseRecord, CaseRepository, CaseStatusView, RepositoryError};
pub use router::session_router;
pub use service::{ReviewSession, SessionError};
