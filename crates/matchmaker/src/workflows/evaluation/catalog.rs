use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::domain::{CandidateProfile, MatchCriteria, ScoringWeights, TraitRequirement};

/// Lowest match weight a catalog entry may carry.
pub const MIN_TRAIT_WEIGHT: u8 = 1;
/// Highest match weight a catalog entry may carry.
pub const MAX_TRAIT_WEIGHT: u8 = 10;

/// Stable identity of a catalog entry within its trait kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitId(pub u32);

impl fmt::Display for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three trait collections every profile, requirement, and dealbreaker list is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Personality,
    Interest,
    Lifestyle,
}

impl TraitCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Interest => "interest",
            Self::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Personality {}
    impl Sealed for super::Interest {}
    impl Sealed for super::Lifestyle {}
}

/// Closed set of trait kinds. Each kind knows which collection it selects from the
/// profile, a requirement, the dealbreaker lists, and the scoring weights, so category
/// dispatch is resolved at compile time.
pub trait TraitKind:
    sealed::Sealed + fmt::Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static
{
    /// Sub-grouping shown alongside the label (e.g. "outdoors" for interests).
    type Group: fmt::Debug
        + Clone
        + Copy
        + PartialEq
        + Eq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    const CATEGORY: TraitCategory;

    fn of_profile(profile: &CandidateProfile) -> &TraitSet<Self>;
    fn acceptable(requirement: &TraitRequirement) -> &TraitSet<Self>;
    fn dealbreakers(criteria: &MatchCriteria) -> &TraitSet<Self>;
    fn weight(weights: &ScoringWeights) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Personality;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifestyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityGroup {
    Social,
    Emotional,
    Intellectual,
    Temperament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestGroup {
    Sports,
    Arts,
    Music,
    Outdoors,
    Food,
    Technology,
    Travel,
    Gaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleGroup {
    Health,
    Habits,
    Schedule,
    Family,
    Living,
}

impl TraitKind for Personality {
    type Group = PersonalityGroup;
    const CATEGORY: TraitCategory = TraitCategory::Personality;

    fn of_profile(profile: &CandidateProfile) -> &TraitSet<Self> {
        &profile.personality
    }

    fn acceptable(requirement: &TraitRequirement) -> &TraitSet<Self> {
        &requirement.personality
    }

    fn dealbreakers(criteria: &MatchCriteria) -> &TraitSet<Self> {
        &criteria.dealbreaker_personality
    }

    fn weight(weights: &ScoringWeights) -> f32 {
        weights.personality
    }
}

impl TraitKind for Interest {
    type Group = InterestGroup;
    const CATEGORY: TraitCategory = TraitCategory::Interest;

    fn of_profile(profile: &CandidateProfile) -> &TraitSet<Self> {
        &profile.interests
    }

    fn acceptable(requirement: &TraitRequirement) -> &TraitSet<Self> {
        &requirement.interests
    }

    fn dealbreakers(criteria: &MatchCriteria) -> &TraitSet<Self> {
        &criteria.dealbreaker_interests
    }

    fn weight(weights: &ScoringWeights) -> f32 {
        weights.interests
    }
}

impl TraitKind for Lifestyle {
    type Group = LifestyleGroup;
    const CATEGORY: TraitCategory = TraitCategory::Lifestyle;

    fn of_profile(profile: &CandidateProfile) -> &TraitSet<Self> {
        &profile.lifestyle
    }

    fn acceptable(requirement: &TraitRequirement) -> &TraitSet<Self> {
        &requirement.lifestyle
    }

    fn dealbreakers(criteria: &MatchCriteria) -> &TraitSet<Self> {
        &criteria.dealbreaker_lifestyle
    }

    fn weight(weights: &ScoringWeights) -> f32 {
        weights.lifestyle
    }
}

/// Immutable catalog entry. Records are shared through `Arc` and compare by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TraitRecord<K: TraitKind> {
    pub id: TraitId,
    pub label: String,
    pub group: K::Group,
    pub weight: u8,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: TraitKind> TraitRecord<K> {
    pub fn new(id: TraitId, label: impl Into<String>, group: K::Group, weight: u8) -> Self {
        Self {
            id,
            label: label.into(),
            group,
            weight,
            kind: PhantomData,
        }
    }

    pub fn category(&self) -> TraitCategory {
        K::CATEGORY
    }

    pub fn has_valid_weight(&self) -> bool {
        (MIN_TRAIT_WEIGHT..=MAX_TRAIT_WEIGHT).contains(&self.weight)
    }
}

impl<K: TraitKind> PartialEq for TraitRecord<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: TraitKind> Eq for TraitRecord<K> {}

/// Unordered-for-containment collection of trait references. Iteration keeps insertion
/// order so scans that report "the first hit" are reproducible.
#[derive(Debug, Clone)]
pub struct TraitSet<K: TraitKind> {
    traits: Vec<Arc<TraitRecord<K>>>,
}

impl<K: TraitKind> Default for TraitSet<K> {
    fn default() -> Self {
        Self { traits: Vec::new() }
    }
}

impl<K: TraitKind> TraitSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reference, returning `false` when a record with the same id is already present.
    pub fn insert(&mut self, record: Arc<TraitRecord<K>>) -> bool {
        if self.contains(record.id) {
            return false;
        }
        self.traits.push(record);
        true
    }

    pub fn contains(&self, id: TraitId) -> bool {
        self.traits.iter().any(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TraitRecord<K>>> + '_ {
        self.traits.iter()
    }

    /// True when at least one record is held by both sets.
    pub fn intersects(&self, other: &TraitSet<K>) -> bool {
        self.first_shared_with(other).is_some()
    }

    /// First record of `self`, in insertion order, that `other` also holds.
    pub fn first_shared_with(&self, other: &TraitSet<K>) -> Option<&Arc<TraitRecord<K>>> {
        self.traits.iter().find(|record| other.contains(record.id))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.traits.iter().map(|record| record.label.as_str())
    }
}

impl<K: TraitKind> FromIterator<Arc<TraitRecord<K>>> for TraitSet<K> {
    fn from_iter<I: IntoIterator<Item = Arc<TraitRecord<K>>>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a, K: TraitKind> IntoIterator for &'a TraitSet<K> {
    type Item = &'a Arc<TraitRecord<K>>;
    type IntoIter = std::slice::Iter<'a, Arc<TraitRecord<K>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.traits.iter()
    }
}
