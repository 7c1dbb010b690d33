use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for cases queued for review.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The player's call on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Reject => "reject",
        }
    }
}

/// Confusion-matrix classification of a decision against the engine verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl DecisionOutcome {
    pub const fn classify(decision: Decision, is_match: bool) -> Self {
        match (decision, is_match) {
            (Decision::Accept, true) => Self::TruePositive,
            (Decision::Accept, false) => Self::FalsePositive,
            (Decision::Reject, false) => Self::TrueNegative,
            (Decision::Reject, true) => Self::FalseNegative,
        }
    }

    pub const fn decision(self) -> Decision {
        match self {
            Self::TruePositive | Self::FalsePositive => Decision::Accept,
            Self::TrueNegative | Self::FalseNegative => Decision::Reject,
        }
    }

    pub const fn is_correct(self) -> bool {
        matches!(self, Self::TruePositive | Self::TrueNegative)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TruePositive => "true_positive",
            Self::FalsePositive => "false_positive",
            Self::TrueNegative => "true_negative",
            Self::FalseNegative => "false_negative",
        }
    }
}

/// Running tallies for one review session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub accepted: u32,
    pub rejected: u32,
    pub true_positives: u32,
    pub false_positives: u32,
    pub true_negatives: u32,
    pub false_negatives: u32,
}

impl SessionStats {
    pub fn record(&mut self, outcome: DecisionOutcome) {
        match outcome.decision() {
            Decision::Accept => self.accepted += 1,
            Decision::Reject => self.rejected += 1,
        }

        match outcome {
            DecisionOutcome::TruePositive => self.true_positives += 1,
            DecisionOutcome::FalsePositive => self.false_positives += 1,
            DecisionOutcome::TrueNegative => self.true_negatives += 1,
            DecisionOutcome::FalseNegative => self.false_negatives += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.accepted + self.rejected
    }

    pub fn correct(&self) -> u32 {
        self.true_positives + self.true_negatives
    }

    /// Share of correct calls, 0.0 before any decision is made.
    pub fn accuracy(&self) -> f32 {
        match self.total() {
            0 => 0.0,
            total => self.correct() as f32 / total as f32,
        }
    }
}

/// Lifecycle of a case in the review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Evaluated,
    Decided,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Evaluated => "evaluated",
            CaseStatus::Decided => "decided",
        }
    }
}
