use serde::{Deserialize, Serialize};

use super::config::RequirementMode;
use super::domain::Gender;

/// Why a candidate was turned away. Every variant is a hard failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    HasDealbreaker {
        trait_label: String,
    },
    GenderMismatch {
        gender: Gender,
    },
    RequiredCheckFailed {
        met: u32,
        total: u32,
        mode: RequirementMode,
    },
    TooManyRedFlags {
        found: u32,
        allowed: u32,
    },
    NotEnoughGreenFlags {
        found: u32,
        required: u32,
    },
}

impl FailureReason {
    pub fn summary(&self) -> String {
        match self {
            FailureReason::HasDealbreaker { trait_label } => {
                format!("Has dealbreaker trait: {trait_label}")
            }
            FailureReason::GenderMismatch { gender } => {
                format!("Gender mismatch: {gender} is not an accepted gender")
            }
            FailureReason::RequiredCheckFailed { met, total, mode } => format!(
                "Did not meet required trait threshold ({met}/{total} met, {mode})"
            ),
            FailureReason::TooManyRedFlags { found, allowed } => {
                format!("Too many red flags ({found} found, at most {allowed} allowed)")
            }
            FailureReason::NotEnoughGreenFlags { found, required } => {
                format!("Not enough green flags ({found} found, at least {required} required)")
            }
        }
    }
}

pub(crate) fn required_threshold_passes(
    mode: RequirementMode,
    met: u32,
    failed: u32,
    min_required_met: u32,
) -> bool {
    let total = met + failed;
    if total == 0 {
        return true;
    }

    match mode {
        RequirementMode::ExplicitThreshold => {
            if min_required_met == 0 {
                failed == 0
            } else {
                met >= min_required_met
            }
        }
        RequirementMode::ImplicitSoftening => total == 1 || met >= 1,
        RequirementMode::ScoringOnly => true,
    }
}
