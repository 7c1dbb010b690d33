//! Candidate evaluation: decides whether a bound candidate profile matches a client's
//! criteria and, when it does, how well.
//!
//! Evaluation is a pure function of `(profile, criteria, mode)`. Stages run in a fixed
//! order and the hard checks (gender, dealbreakers, required threshold, flag tolerance)
//! return as soon as one fails.

pub mod catalog;
mod config;
pub mod domain;
mod policy;
mod rules;
mod scoring;

#[cfg(test)]
mod tests;

pub use catalog::{
    Interest, InterestGroup, Lifestyle, LifestyleGroup, Personality, PersonalityGroup,
    TraitCategory, TraitId, TraitKind, TraitRecord, TraitSet,
};
pub use config::{EvaluationConfig, RequirementMode, UnknownRequirementMode};
pub use domain::{
    CandidateProfile, Gender, MatchCriteria, Post, PostKind, RequirementLevel, ScoringWeights,
    TraitRequirement,
};
pub use policy::FailureReason;
pub use scoring::{category_score, ScoreBreakdown};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator with a requirement mode bound at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEvaluator {
    config: EvaluationConfig,
}

impl MatchEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> RequirementMode {
        self.config.requirement_mode
    }

    pub fn evaluate(
        &self,
        profile: &CandidateProfile,
        criteria: &MatchCriteria,
    ) -> Result<EvaluationResult, EvaluationError> {
        evaluate(profile, criteria, self.config.requirement_mode)
    }
}

/// Outcome of one evaluation. `score` is only meaningful when `is_match` is true.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub is_match: bool,
    pub score: f32,
    pub failure: Option<FailureReason>,
    pub dealbreaker_trait: Option<String>,
    pub red_flag_count: u32,
    pub green_flag_count: u32,
    pub met_requirements: Vec<String>,
    pub failed_requirements: Vec<String>,
    pub preferred_met: Vec<String>,
    pub avoid_matched: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl EvaluationResult {
    fn rejected(failure: FailureReason) -> Self {
        let dealbreaker_trait = match &failure {
            FailureReason::HasDealbreaker { trait_label } => Some(trait_label.clone()),
            _ => None,
        };

        Self {
            is_match: false,
            failure: Some(failure),
            dealbreaker_trait,
            ..Self::default()
        }
    }

    /// Human readable reason for a rejection, or "no reason" for a match.
    pub fn failure_summary(&self) -> String {
        match &self.failure {
            Some(reason) => reason.summary(),
            None => "no reason".to_string(),
        }
    }
}

/// Criteria that cannot be evaluated at all. Distinct from a candidate failing to match.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("age band is inverted (min {min_age} > max {max_age})")]
    InvertedAgeBand { min_age: u32, max_age: u32 },
    #[error("{category} weight must be a finite, non-negative number (found {value})")]
    InvalidWeight { category: TraitCategory, value: f32 },
}

fn validate_criteria(criteria: &MatchCriteria) -> Result<(), EvaluationError> {
    if criteria.min_age > criteria.max_age {
        return Err(EvaluationError::InvertedAgeBand {
            min_age: criteria.min_age,
            max_age: criteria.max_age,
        });
    }

    let weights = [
        (TraitCategory::Personality, criteria.weights.personality),
        (TraitCategory::Interest, criteria.weights.interests),
        (TraitCategory::Lifestyle, criteria.weights.lifestyle),
    ];
    for (category, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(EvaluationError::InvalidWeight { category, value });
        }
    }

    Ok(())
}

/// Runs the full evaluation pipeline for one candidate against one set of criteria.
pub fn evaluate(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
    mode: RequirementMode,
) -> Result<EvaluationResult, EvaluationError> {
    validate_criteria(criteria)?;
    let candidate = profile.display_name.as_str();

    if !rules::gender_accepted(profile, criteria) {
        debug!(candidate, stage = "gender", "candidate rejected");
        return Ok(EvaluationResult::rejected(FailureReason::GenderMismatch {
            gender: profile.gender,
        }));
    }

    let years_outside_range =
        rules::years_outside_range(profile.age, criteria.min_age, criteria.max_age);

    if let Some(trait_label) = rules::find_dealbreaker(profile, criteria) {
        debug!(candidate, stage = "dealbreaker", %trait_label, "candidate rejected");
        return Ok(EvaluationResult::rejected(FailureReason::HasDealbreaker {
            trait_label,
        }));
    }

    let buckets = rules::bucket_requirements(profile, criteria);
    let mut result = EvaluationResult {
        met_requirements: buckets.required_met.clone(),
        failed_requirements: buckets.required_failed.clone(),
        preferred_met: buckets.preferred_met.clone(),
        avoid_matched: buckets.avoid_matched.clone(),
        ..EvaluationResult::default()
    };

    let met = buckets.required_met.len() as u32;
    let failed = buckets.required_failed.len() as u32;
    if !policy::required_threshold_passes(mode, met, failed, criteria.min_required_met) {
        debug!(candidate, stage = "required", met, failed, %mode, "candidate rejected");
        result.failure = Some(FailureReason::RequiredCheckFailed {
            met,
            total: buckets.required_total(),
            mode,
        });
        return Ok(result);
    }

    let flags = rules::count_flags(&profile.guaranteed_posts);
    result.red_flag_count = flags.red;
    result.green_flag_count = flags.green;

    if flags.red > criteria.max_red_flags {
        debug!(candidate, stage = "red_flags", red = flags.red, "candidate rejected");
        result.failure = Some(FailureReason::TooManyRedFlags {
            found: flags.red,
            allowed: criteria.max_red_flags,
        });
        return Ok(result);
    }

    if flags.green < criteria.min_green_flags {
        debug!(candidate, stage = "green_flags", green = flags.green, "candidate rejected");
        result.failure = Some(FailureReason::NotEnoughGreenFlags {
            found: flags.green,
            required: criteria.min_green_flags,
        });
        return Ok(result);
    }

    let breakdown =
        scoring::score_candidate(profile, criteria, mode, &buckets, years_outside_range);
    debug!(candidate, score = breakdown.final_score, %mode, "candidate matched");

    result.is_match = true;
    result.score = breakdown.final_score;
    result.breakdown = breakdown;
    Ok(result)
}
