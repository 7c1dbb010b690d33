use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::LibraryError;
use crate::workflows::evaluation::domain::{
    Gender, PostKind, RequirementLevel, ScoringWeights, DEFAULT_MAX_AGE, DEFAULT_MAX_RED_FLAGS,
    DEFAULT_MIN_AGE,
};
use crate::workflows::evaluation::{Interest, Lifestyle, Personality, TraitRecord};

/// Serialized trait catalog, one list per trait kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryDocument {
    #[serde(default)]
    pub personality: Vec<TraitRecord<Personality>>,
    #[serde(default)]
    pub interests: Vec<TraitRecord<Interest>>,
    #[serde(default)]
    pub lifestyle: Vec<TraitRecord<Lifestyle>>,
}

/// Trait names grouped by kind, as written in case files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitNames {
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

impl TraitNames {
    pub fn is_empty(&self) -> bool {
        self.personality.is_empty() && self.interests.is_empty() && self.lifestyle.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(default)]
    pub kind: PostKind,
    pub content: String,
    #[serde(default)]
    pub red_flag: bool,
    #[serde(default)]
    pub green_flag: bool,
    #[serde(flatten)]
    pub traits: TraitNames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    #[serde(flatten)]
    pub traits: TraitNames,
    #[serde(default)]
    pub posts: Vec<PostDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDocument {
    pub level: RequirementLevel,
    #[serde(flatten)]
    pub acceptable: TraitNames,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaDocument {
    #[serde(default)]
    pub acceptable_genders: Vec<Gender>,
    #[serde(default = "default_min_age")]
    pub min_age: u32,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    #[serde(default)]
    pub requirements: Vec<RequirementDocument>,
    #[serde(default)]
    pub dealbreakers: TraitNames,
    #[serde(default = "default_max_red_flags")]
    pub max_red_flags: u32,
    #[serde(default)]
    pub min_green_flags: u32,
    #[serde(default)]
    pub min_required_met: u32,
    #[serde(default)]
    pub weights: ScoringWeights,
}

fn default_min_age() -> u32 {
    DEFAULT_MIN_AGE
}

fn default_max_age() -> u32 {
    DEFAULT_MAX_AGE
}

fn default_max_red_flags() -> u32 {
    DEFAULT_MAX_RED_FLAGS
}

/// A candidate and the client criteria they are judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDocument {
    pub candidate: ProfileDocument,
    pub criteria: CriteriaDocument,
}

impl CaseDocument {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LibraryError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn demo() -> Result<Self, LibraryError> {
        Ok(serde_json::from_str(super::DEMO_CASE)?)
    }
}
