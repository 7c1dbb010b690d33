use super::catalog::{Interest, Lifestyle, Personality, TraitKind};
use super::domain::{CandidateProfile, MatchCriteria, Post, RequirementLevel};

/// Requirement outcomes sorted by level, each entry holding the requirement's description.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RequirementBuckets {
    pub required_met: Vec<String>,
    pub required_failed: Vec<String>,
    pub preferred_met: Vec<String>,
    pub avoid_matched: Vec<String>,
}

impl RequirementBuckets {
    pub fn required_total(&self) -> u32 {
        (self.required_met.len() + self.required_failed.len()) as u32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FlagCounts {
    pub red: u32,
    pub green: u32,
}

pub(crate) fn gender_accepted(profile: &CandidateProfile, criteria: &MatchCriteria) -> bool {
    criteria.accepts_gender(profile.gender)
}

pub(crate) fn years_outside_range(age: u32, min_age: u32, max_age: u32) -> u32 {
    if age < min_age {
        min_age - age
    } else if age > max_age {
        age - max_age
    } else {
        0
    }
}

/// Label of the first dealbreaker the candidate holds, scanning personality, then
/// interests, then lifestyle, and within a category following the candidate's own order.
pub(crate) fn find_dealbreaker(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
) -> Option<String> {
    dealbreaker_in::<Personality>(profile, criteria)
        .or_else(|| dealbreaker_in::<Interest>(profile, criteria))
        .or_else(|| dealbreaker_in::<Lifestyle>(profile, criteria))
}

fn dealbreaker_in<K: TraitKind>(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
) -> Option<String> {
    K::of_profile(profile)
        .first_shared_with(K::dealbreakers(criteria))
        .map(|record| record.label.clone())
}

pub(crate) fn bucket_requirements(
    profile: &CandidateProfile,
    criteria: &MatchCriteria,
) -> RequirementBuckets {
    let mut buckets = RequirementBuckets::default();

    for requirement in &criteria.requirements {
        let satisfied = requirement.is_satisfied_by(profile);
        match (requirement.level, satisfied) {
            (RequirementLevel::Required, true) => {
                buckets.required_met.push(requirement.description())
            }
            (RequirementLevel::Required, false) => {
                buckets.required_failed.push(requirement.description())
            }
            (RequirementLevel::Preferred, true) => {
                buckets.preferred_met.push(requirement.description())
            }
            (RequirementLevel::Avoid, true) => {
                buckets.avoid_matched.push(requirement.description())
            }
            (RequirementLevel::Preferred, false) | (RequirementLevel::Avoid, false) => {}
        }
    }

    buckets
}

pub(crate) fn count_flags(posts: &[Post]) -> FlagCounts {
    posts.iter().fold(FlagCounts::default(), |mut counts, post| {
        if post.is_red_flag {
            counts.red += 1;
        }
        if post.is_green_flag {
            counts.green += 1;
        }
        counts
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_outside_range_is_zero_inside_band() {
        assert_eq!(years_outside_range(25, 20, 30), 0);
        assert_eq!(years_outside_range(20, 20, 30), 0);
        assert_eq!(years_outside_range(30, 20, 30), 0);
    }

    #[test]
    fn years_outside_range_counts_both_directions() {
        assert_eq!(years_outside_range(17, 20, 30), 3);
        assert_eq!(years_outside_range(40, 20, 30), 10);
    }

    #[test]
    fn flag_counts_include_posts_marked_both_ways() {
        let posts = vec![
            Post::default().red_flag(),
            Post::default().red_flag().green_flag(),
            Post::default(),
            Post::default().green_flag(),
        ];
        assert_eq!(count_flags(&posts), FlagCounts { red: 2, green: 2 });
    }
}
