//! Trait catalog loading and binding of name-based case files to catalog records.

mod documents;

pub use documents::{
    CaseDocument, CriteriaDocument, LibraryDocument, PostDocument, ProfileDocument,
    RequirementDocument, TraitNames,
};

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::workflows::evaluation::{
    CandidateProfile, Interest, Lifestyle, MatchCriteria, Personality, Post, TraitCategory,
    TraitId, TraitKind, TraitRecord, TraitRequirement, TraitSet,
};

pub(crate) const DEMO_LIBRARY: &str = include_str!("../../../data/demo_library.json");
pub(crate) const DEMO_CASE: &str = include_str!("../../../data/demo_case.json");

/// Errors raised while loading a catalog or binding a case against it.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {category} trait name '{name}'")]
    DuplicateName {
        category: TraitCategory,
        name: String,
    },
    #[error("duplicate {category} trait id {id}")]
    DuplicateId {
        category: TraitCategory,
        id: TraitId,
    },
    #[error("{category} trait '{name}' has weight {weight}, expected 1-10")]
    WeightOutOfRange {
        category: TraitCategory,
        name: String,
        weight: u8,
    },
    #[error("unknown {category} trait '{name}'")]
    UnknownTrait {
        category: TraitCategory,
        name: String,
    },
}

type BoundTraits = (TraitSet<Personality>, TraitSet<Interest>, TraitSet<Lifestyle>);

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone)]
struct TraitIndex<K: TraitKind> {
    by_name: BTreeMap<String, Arc<TraitRecord<K>>>,
    ids: BTreeSet<TraitId>,
}

impl<K: TraitKind> Default for TraitIndex<K> {
    fn default() -> Self {
        Self {
            by_name: BTreeMap::new(),
            ids: BTreeSet::new(),
        }
    }
}

impl<K: TraitKind> TraitIndex<K> {
    fn build(records: Vec<TraitRecord<K>>) -> Result<Self, LibraryError> {
        let mut index = Self::default();
        for record in records {
            index.insert(record)?;
        }
        Ok(index)
    }

    fn insert(&mut self, record: TraitRecord<K>) -> Result<(), LibraryError> {
        if !record.has_valid_weight() {
            return Err(LibraryError::WeightOutOfRange {
                category: K::CATEGORY,
                name: record.label,
                weight: record.weight,
            });
        }

        let key = lookup_key(&record.label);
        if self.by_name.contains_key(&key) {
            return Err(LibraryError::DuplicateName {
                category: K::CATEGORY,
                name: record.label,
            });
        }
        if !self.ids.insert(record.id) {
            return Err(LibraryError::DuplicateId {
                category: K::CATEGORY,
                id: record.id,
            });
        }

        self.by_name.insert(key, Arc::new(record));
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Arc<TraitRecord<K>>> {
        self.by_name.get(&lookup_key(name)).cloned()
    }

    fn resolve(&self, names: &[String]) -> Result<TraitSet<K>, LibraryError> {
        names
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| LibraryError::UnknownTrait {
                    category: K::CATEGORY,
                    name: name.clone(),
                })
            })
            .collect()
    }
}

/// Immutable catalog of trait records, shared by every bound profile and criteria.
#[derive(Debug, Clone, Default)]
pub struct TraitLibrary {
    personality: TraitIndex<Personality>,
    interests: TraitIndex<Interest>,
    lifestyle: TraitIndex<Lifestyle>,
}

/// Catalog-bound inputs ready for evaluation.
#[derive(Debug, Clone)]
pub struct BoundCase {
    pub profile: CandidateProfile,
    pub criteria: MatchCriteria,
}

impl TraitLibrary {
    pub fn from_document(document: LibraryDocument) -> Result<Self, LibraryError> {
        let library = Self {
            personality: TraitIndex::build(document.personality)?,
            interests: TraitIndex::build(document.interests)?,
            lifestyle: TraitIndex::build(document.lifestyle)?,
        };
        debug!(traits = library.len(), "trait library loaded");
        Ok(library)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LibraryError> {
        let document: LibraryDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Catalog bundled with the crate for demos and smoke tests.
    pub fn demo() -> Result<Self, LibraryError> {
        Self::from_reader(DEMO_LIBRARY.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.personality.by_name.len()
            + self.interests.by_name.len()
            + self.lifestyle.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn personality(&self, name: &str) -> Option<Arc<TraitRecord<Personality>>> {
        self.personality.get(name)
    }

    pub fn interest(&self, name: &str) -> Option<Arc<TraitRecord<Interest>>> {
        self.interests.get(name)
    }

    pub fn lifestyle(&self, name: &str) -> Option<Arc<TraitRecord<Lifestyle>>> {
        self.lifestyle.get(name)
    }

    fn bind_names(&self, names: &TraitNames) -> Result<BoundTraits, LibraryError> {
        Ok((
            self.personality.resolve(&names.personality)?,
            self.interests.resolve(&names.interests)?,
            self.lifestyle.resolve(&names.lifestyle)?,
        ))
    }

    fn bind_post(&self, document: &PostDocument) -> Result<Post, LibraryError> {
        let (personality, interests, lifestyle) = self.bind_names(&document.traits)?;
        Ok(Post {
            kind: document.kind,
            content: document.content.clone(),
            is_red_flag: document.red_flag,
            is_green_flag: document.green_flag,
            personality,
            interests,
            lifestyle,
        })
    }

    pub fn bind_profile(
        &self,
        document: &ProfileDocument,
    ) -> Result<CandidateProfile, LibraryError> {
        let (personality, interests, lifestyle) = self.bind_names(&document.traits)?;
        let guaranteed_posts = document
            .posts
            .iter()
            .map(|post| self.bind_post(post))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CandidateProfile {
            display_name: document.name.clone(),
            gender: document.gender,
            age: document.age,
            personality,
            interests,
            lifestyle,
            guaranteed_posts,
        })
    }

    fn bind_requirement(
        &self,
        document: &RequirementDocument,
    ) -> Result<TraitRequirement, LibraryError> {
        let (personality, interests, lifestyle) = self.bind_names(&document.acceptable)?;
        Ok(TraitRequirement {
            level: document.level,
            personality,
            interests,
            lifestyle,
            hint: document.hint.clone(),
        })
    }

    pub fn bind_criteria(
        &self,
        document: &CriteriaDocument,
    ) -> Result<MatchCriteria, LibraryError> {
        let requirements = document
            .requirements
            .iter()
            .map(|requirement| self.bind_requirement(requirement))
            .collect::<Result<Vec<_>, _>>()?;
        let (dealbreaker_personality, dealbreaker_interests, dealbreaker_lifestyle) =
            self.bind_names(&document.dealbreakers)?;

        Ok(MatchCriteria {
            acceptable_genders: document.acceptable_genders.iter().copied().collect(),
            min_age: document.min_age,
            max_age: document.max_age,
            requirements,
            dealbreaker_personality,
            dealbreaker_interests,
            dealbreaker_lifestyle,
            max_red_flags: document.max_red_flags,
            min_green_flags: document.min_green_flags,
            min_required_met: document.min_required_met,
            weights: document.weights,
        })
    }

    pub fn bind_case(&self, document: &CaseDocument) -> Result<BoundCase, LibraryError> {
        Ok(BoundCase {
            profile: self.bind_profile(&document.candidate)?,
            criteria: self.bind_criteria(&document.criteria)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::evaluation::{Gender, InterestGroup, RequirementLevel};

    #[test]
    fn demo_library_loads() {
        let library = TraitLibrary::demo().expect("demo library parses");
        assert_eq!(library.len(), 26);
        let hiking = library.interest("hiking").expect("case-insensitive lookup");
        assert_eq!(hiking.label, "Hiking");
        assert_eq!(hiking.group, InterestGroup::Outdoors);
        assert!(library.lifestyle("Hiking").is_none());
    }

    #[test]
    fn rejects_duplicate_names_within_a_kind() {
        let json = r#"{ "interests": [
            { "id": 1, "label": "Chess", "group": "gaming", "weight": 3 },
            { "id": 2, "label": "chess", "group": "gaming", "weight": 3 }
        ] }"#;

        match TraitLibrary::from_reader(json.as_bytes()) {
            Err(LibraryError::DuplicateName { category, name }) => {
                assert_eq!(category, TraitCategory::Interest);
                assert_eq!(name, "chess");
            }
            other => panic!("expected duplicate name, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_ids_within_a_kind() {
        let json = r#"{ "lifestyle": [
            { "id": 4, "label": "Vegan", "group": "health", "weight": 6 },
            { "id": 4, "label": "Runner", "group": "health", "weight": 6 }
        ] }"#;

        assert!(matches!(
            TraitLibrary::from_reader(json.as_bytes()),
            Err(LibraryError::DuplicateId { id: TraitId(4), .. })
        ));
    }

    #[test]
    fn same_id_may_repeat_across_kinds() {
        let json = r#"{
            "personality": [{ "id": 1, "label": "Calm", "group": "temperament", "weight": 4 }],
            "lifestyle": [{ "id": 1, "label": "Vegan", "group": "health", "weight": 6 }]
        }"#;

        let library = TraitLibrary::from_reader(json.as_bytes()).expect("ids are per kind");
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn rejects_weights_outside_range() {
        let json = r#"{ "personality": [
            { "id": 1, "label": "Stoic", "group": "temperament", "weight": 0 }
        ] }"#;

        assert!(matches!(
            TraitLibrary::from_reader(json.as_bytes()),
            Err(LibraryError::WeightOutOfRange { weight: 0, .. })
        ));
    }

    #[test]
    fn binds_demo_case() {
        let library = TraitLibrary::demo().expect("demo library parses");
        let case = CaseDocument::demo().expect("demo case parses");

        let bound = library.bind_case(&case).expect("demo case binds");

        assert_eq!(bound.profile.display_name, "Jordan");
        assert_eq!(bound.profile.gender, Gender::Male);
        assert_eq!(bound.profile.interests.len(), 3);
        assert_eq!(bound.profile.guaranteed_posts.len(), 3);
        assert!(bound.profile.guaranteed_posts[2].is_red_flag);
        assert_eq!(bound.profile.guaranteed_posts[0].interests.len(), 1);
        assert_eq!(bound.criteria.requirements.len(), 5);
        assert_eq!(bound.criteria.requirements[3].level, RequirementLevel::Avoid);
        assert_eq!(bound.criteria.dealbreaker_lifestyle.len(), 1);
        assert!(bound.criteria.acceptable_genders.contains(&Gender::NonBinary));
    }

    #[test]
    fn unknown_names_fail_binding() {
        let library = TraitLibrary::demo().expect("demo library parses");
        let mut case = CaseDocument::demo().expect("demo case parses");
        case.candidate.traits.lifestyle.push("Skydiver".to_string());

        match library.bind_case(&case) {
            Err(LibraryError::UnknownTrait { category, name }) => {
                assert_eq!(category, TraitCategory::Lifestyle);
                assert_eq!(name, "Skydiver");
            }
            other => panic!("expected unknown trait, got {other:?}"),
        }
    }

    #[test]
    fn criteria_defaults_apply_when_omitted() {
        let json = r#"{
            "candidate": { "name": "Sam", "gender": "non_binary", "age": 30 },
            "criteria": {}
        }"#;

        let case = CaseDocument::from_reader(json.as_bytes()).expect("case parses");
        let bound = TraitLibrary::default()
            .bind_case(&case)
            .expect("empty case binds");

        assert!(bound.criteria.acceptable_genders.is_empty());
        assert_eq!(bound.criteria.min_age, 18);
        assert_eq!(bound.criteria.max_age, 99);
        assert!(bound.criteria.requirements.is_empty());
        assert!(bound.profile.personality.is_empty());
    }
}
