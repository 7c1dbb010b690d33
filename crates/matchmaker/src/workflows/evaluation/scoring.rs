use serde::{Deserialize, Serialize};

use super::catalog::{Interest, Lifestyle, Personality, TraitKind, TraitSet};
use super::config::RequirementMode;
use super::domain::{CandidateProfile, MatchCriteria, RequirementLevel, TraitRequirement};
use super::rules::RequirementBuckets;

pub const BASE_SCORE: f32 = 50.0;
/// Category score used when a category carries no signal either way.
pub const NEUTRAL_CATEGORY_SCORE: f32 = 50.0;
pub const WEIGHTED_SUM_FACTOR: f32 = 0.5;
pub const PREFERRED_BONUS: f32 = 5.0;
pub const AVOID_PENALTY: f32 = 10.0;
pub const REQUIRED_MET_BONUS: f32 = 15.0;
pub const REQUIRED_FAILED_PENALTY: f32 = 10.0;
pub const AGE_PENALTY_PER_YEAR: f32 = 3.0;

pub const MIN_SCORE: f32 = 0.0;
pub const MAX_SCORE: f32 = 100.0;

/// Every term that went into a final score. Penalties are stored as positive magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub personality_score: f32,
    pub interest_score: f32,
    pub lifestyle_score: f32,
    pub personality_weight: f32,
    pub interest_weight: f32,
    pub lifestyle_weight: f32,
    pub weighted_sum: f32,
    pub base_score: f32,
    pub preferred_bonus: f32,
    pub avoid_penalty: f32,
    pub required_bonus: f32,
    pub required_penalty: f32,
    pub age_penalty: f32,
    pub final_score: f32,
}

/// Share of relevant requirements the candidate satisfies within one category, 0–100.
///
/// Avoid-level requirements and requirements listing nothing for this category are not
/// relevant. With no relevant requirement, or no candidate traits in the category, the
/// neutral midpoint is returned.
pub fn category_score<K: TraitKind>(
    candidate: &TraitSet<K>,
    requirements: &[TraitRequirement],
) -> f32 {
    if candidate.is_empty() {
        return NEUTRAL_CATEGORY_SCORE;
    }

    let (relevant, met) = requirements
        .iter()
        .filter(|requirement| requirement.level != RequirementLevel::Avoid)
        .map(K::acceptable)
        .filter(|acceptable| !acceptable.is_empty())
        .fold((0u32, 0u32), |(relevant, met), acceptable| {
            let hit = u32::from(candidate.intersects(acceptable));
            (relevant + 1, met + hit)
        });

    if relevant == 0 {
        return NEUTRAL_CATEGORY_SCORE;
    }

    met as f32 / relevant as f32 * 100.0
}

fn weighted_category<K: TraitKind>(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
) -> (f32, f32) {
    let score = category_score(K::of_profile(profile), &criteria.requirements);
    (score, K::weight(&criteria.weights))
}

pub(crate) fn score_candidate(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
    mode: RequirementMode,
    buckets: &RequirementBuckets,
    years_outside_range: u32,
) -> ScoreBreakdown {
    let (personality_score, personality_weight) =
        weighted_category::<Personality>(profile, criteria);
    let (interest_score, interest_weight) = weighted_category::<Interest>(profile, criteria);
    let (lifestyle_score, lifestyle_weight) = weighted_category::<Lifestyle>(profile, criteria);

    let weighted_sum = personality_score * personality_weight
        + interest_score * interest_weight
        + lifestyle_score * lifestyle_weight;

    let preferred_bonus = PREFERRED_BONUS * buckets.preferred_met.len() as f32;
    let avoid_penalty = AVOID_PENALTY * buckets.avoid_matched.len() as f32;
    let (required_bonus, required_penalty) = if mode == RequirementMode::ScoringOnly {
        (
            REQUIRED_MET_BONUS * buckets.required_met.len() as f32,
            REQUIRED_FAILED_PENALTY * buckets.required_failed.len() as f32,
        )
    } else {
        (0.0, 0.0)
    };
    let age_penalty = AGE_PENALTY_PER_YEAR * years_outside_range as f32;

    let raw = BASE_SCORE + weighted_sum * WEIGHTED_SUM_FACTOR + preferred_bonus - avoid_penalty
        + required_bonus
        - required_penalty
        - age_penalty;

    ScoreBreakdown {
        personality_score,
        interest_score,
        lifestyle_score,
        personality_weight,
        interest_weight,
        lifestyle_weight,
        weighted_sum,
        base_score: BASE_SCORE,
        preferred_bonus,
        avoid_penalty,
        required_bonus,
        required_penalty,
        age_penalty,
        final_score: raw.clamp(MIN_SCORE, MAX_SCORE),
    }
}
