use std::sync::Arc;

use crate::workflows::evaluation::catalog::{
    Interest, InterestGroup, Lifestyle, LifestyleGroup, Personality, PersonalityGroup, TraitId,
    TraitRecord,
};
use crate::workflows::evaluation::domain::{
    CandidateProfile, Gender, MatchCriteria, Post, PostKind, RequirementLevel, ScoringWeights,
    TraitRequirement,
};

pub(super) fn kind() -> Arc<TraitRecord<Personality>> {
    Arc::new(TraitRecord::new(TraitId(1), "Kind", PersonalityGroup::Social, 8))
}

pub(super) fn curious() -> Arc<TraitRecord<Personality>> {
    Arc::new(TraitRecord::new(
        TraitId(2),
        "Curious",
        PersonalityGroup::Intellectual,
        6,
    ))
}

pub(super) fn arrogant() -> Arc<TraitRecord<Personality>> {
    Arc::new(TraitRecord::new(
        TraitId(3),
        "Arrogant",
        PersonalityGroup::Temperament,
        9,
    ))
}

pub(super) fn hiking() -> Arc<TraitRecord<Interest>> {
    Arc::new(TraitRecord::new(TraitId(1), "Hiking", InterestGroup::Outdoors, 6))
}

pub(super) fn cooking() -> Arc<TraitRecord<Interest>> {
    Arc::new(TraitRecord::new(TraitId(2), "Cooking", InterestGroup::Food, 5))
}

pub(super) fn esports() -> Arc<TraitRecord<Interest>> {
    Arc::new(TraitRecord::new(TraitId(3), "Esports", InterestGroup::Gaming, 4))
}

pub(super) fn early_riser() -> Arc<TraitRecord<Lifestyle>> {
    Arc::new(TraitRecord::new(
        TraitId(1),
        "Early riser",
        LifestyleGroup::Schedule,
        5,
    ))
}

pub(super) fn smoker() -> Arc<TraitRecord<Lifestyle>> {
    Arc::new(TraitRecord::new(TraitId(2), "Smoker", LifestyleGroup::Habits, 10))
}

/// Female, 27, kind and curious, likes hiking and cooking, early riser, one green post.
pub(super) fn candidate() -> CandidateProfile {
    let mut profile = CandidateProfile::new("Robin", Gender::Female, 27);
    profile.personality.insert(kind());
    profile.personality.insert(curious());
    profile.interests.insert(hiking());
    profile.interests.insert(cooking());
    profile.lifestyle.insert(early_riser());
    profile
        .guaranteed_posts
        .push(Post::new(PostKind::Photo, "Summit selfie").green_flag());
    profile
}

pub(super) fn open_criteria() -> MatchCriteria {
    MatchCriteria {
        min_age: 20,
        max_age: 35,
        ..MatchCriteria::default()
    }
}

pub(super) fn weighted_criteria() -> MatchCriteria {
    MatchCriteria {
        weights: ScoringWeights::balanced(),
        ..open_criteria()
    }
}

pub(super) fn required(hint: &str) -> TraitRequirement {
    TraitRequirement::new(RequirementLevel::Required).with_hint(hint)
}

pub(super) fn preferred(hint: &str) -> TraitRequirement {
    TraitRequirement::new(RequirementLevel::Preferred).with_hint(hint)
}

pub(super) fn avoid(hint: &str) -> TraitRequirement {
    TraitRequirement::new(RequirementLevel::Avoid).with_hint(hint)
}

pub(super) fn red_post() -> Post {
    Post::new(PostKind::Text, "Still not over my ex").red_flag()
}
