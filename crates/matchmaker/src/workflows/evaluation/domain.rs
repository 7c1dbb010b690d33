use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{Interest, Lifestyle, Personality, TraitRecord, TraitSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Photo,
    #[default]
    Text,
    Video,
    Story,
    Shared,
    Poll,
}

/// A feed entry owned by a candidate. Only a profile's guaranteed posts feed the flag checks.
#[derive(Debug, Clone, Default)]
pub struct Post {
    pub kind: PostKind,
    pub content: String,
    pub is_red_flag: bool,
    pub is_green_flag: bool,
    pub personality: TraitSet<Personality>,
    pub interests: TraitSet<Interest>,
    pub lifestyle: TraitSet<Lifestyle>,
}

impl Post {
    pub fn new(kind: PostKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn red_flag(mut self) -> Self {
        self.is_red_flag = true;
        self
    }

    pub fn green_flag(mut self) -> Self {
        self.is_green_flag = true;
        self
    }
}

/// Fully bound candidate: every trait reference points at a catalog record.
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub display_name: String,
    pub gender: Gender,
    pub age: u32,
    pub personality: TraitSet<Personality>,
    pub interests: TraitSet<Interest>,
    pub lifestyle: TraitSet<Lifestyle>,
    pub guaranteed_posts: Vec<Post>,
}

impl CandidateProfile {
    pub fn new(display_name: impl Into<String>, gender: Gender, age: u32) -> Self {
        Self {
            display_name: display_name.into(),
            gender,
            age,
            personality: TraitSet::new(),
            interests: TraitSet::new(),
            lifestyle: TraitSet::new(),
            guaranteed_posts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Required,
    Preferred,
    Avoid,
}

impl RequirementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Preferred => "Preferred",
            Self::Avoid => "Avoid",
        }
    }
}

/// One entry in a client's wish list. Satisfied when the candidate holds any single trait
/// from any of the three acceptable lists.
#[derive(Debug, Clone)]
pub struct TraitRequirement {
    pub level: RequirementLevel,
    pub personality: TraitSet<Personality>,
    pub interests: TraitSet<Interest>,
    pub lifestyle: TraitSet<Lifestyle>,
    /// Narrative hint shown to the player; never read by scoring.
    pub hint: Option<String>,
}

impl TraitRequirement {
    pub fn new(level: RequirementLevel) -> Self {
        Self {
            level,
            personality: TraitSet::new(),
            interests: TraitSet::new(),
            lifestyle: TraitSet::new(),
            hint: None,
        }
    }

    pub fn with_personality(mut self, record: Arc<TraitRecord<Personality>>) -> Self {
        self.personality.insert(record);
        self
    }

    pub fn with_interest(mut self, record: Arc<TraitRecord<Interest>>) -> Self {
        self.interests.insert(record);
        self
    }

    pub fn with_lifestyle(mut self, record: Arc<TraitRecord<Lifestyle>>) -> Self {
        self.lifestyle.insert(record);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_satisfied_by(&self, profile: &CandidateProfile) -> bool {
        profile.personality.intersects(&self.personality)
            || profile.interests.intersects(&self.interests)
            || profile.lifestyle.intersects(&self.lifestyle)
    }

    /// Text recorded in the diagnostic lists: the hint, or the acceptable trait labels.
    pub fn description(&self) -> String {
        if let Some(hint) = self.hint.as_deref().filter(|hint| !hint.trim().is_empty()) {
            return hint.to_string();
        }

        let labels: Vec<&str> = self
            .personality
            .labels()
            .chain(self.interests.labels())
            .chain(self.lifestyle.labels())
            .collect();

        if labels.is_empty() {
            format!("{} requirement with no acceptable traits", self.level.label())
        } else {
            format!("any of: {}", labels.join(", "))
        }
    }
}

/// Relative weight of each category's overlap score. Expected to sum to roughly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub personality: f32,
    pub interests: f32,
    pub lifestyle: f32,
}

impl ScoringWeights {
    pub const fn new(personality: f32, interests: f32, lifestyle: f32) -> Self {
        Self {
            personality,
            interests,
            lifestyle,
        }
    }

    pub const fn balanced() -> Self {
        Self::new(0.4, 0.35, 0.25)
    }
}

pub const DEFAULT_MIN_AGE: u32 = 18;
pub const DEFAULT_MAX_AGE: u32 = 99;
pub const DEFAULT_MAX_RED_FLAGS: u32 = 3;

/// A client's stated requirements. Empty collections mean "no constraint".
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    pub acceptable_genders: BTreeSet<Gender>,
    pub min_age: u32,
    pub max_age: u32,
    pub requirements: Vec<TraitRequirement>,
    pub dealbreaker_personality: TraitSet<Personality>,
    pub dealbreaker_interests: TraitSet<Interest>,
    pub dealbreaker_lifestyle: TraitSet<Lifestyle>,
    pub max_red_flags: u32,
    pub min_green_flags: u32,
    /// Zero means every Required requirement must pass.
    pub min_required_met: u32,
    pub weights: ScoringWeights,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            acceptable_genders: BTreeSet::new(),
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            requirements: Vec::new(),
            dealbreaker_personality: TraitSet::new(),
            dealbreaker_interests: TraitSet::new(),
            dealbreaker_lifestyle: TraitSet::new(),
            max_red_flags: DEFAULT_MAX_RED_FLAGS,
            min_green_flags: 0,
            min_required_met: 0,
            weights: ScoringWeights::default(),
        }
    }
}

impl MatchCriteria {
    pub fn accepts_gender(&self, gender: Gender) -> bool {
        self.acceptable_genders.is_empty() || self.acceptable_genders.contains(&gender)
    }

    pub fn with_requirement(mut self, requirement: TraitRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}
