use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How Required-level requirements translate into rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementMode {
    /// `min_required_met` decides; zero means every Required requirement must pass.
    #[default]
    ExplicitThreshold,
    /// A lone Required requirement acts like Preferred; two or more need at least one hit.
    ImplicitSoftening,
    /// Required requirements never reject, they only move the score.
    ScoringOnly,
}

impl RequirementMode {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ExplicitThreshold,
            Self::ImplicitSoftening,
            Self::ScoringOnly,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExplicitThreshold => "explicit_threshold",
            Self::ImplicitSoftening => "implicit_softening",
            Self::ScoringOnly => "scoring_only",
        }
    }

    /// Maps the older on/off "implicit required" toggle onto the two modes it covered.
    pub const fn from_legacy_flag(implicit_required: bool) -> Self {
        if implicit_required {
            Self::ImplicitSoftening
        } else {
            Self::ExplicitThreshold
        }
    }
}

impl fmt::Display for RequirementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown requirement mode '{0}' (expected explicit_threshold, implicit_softening or scoring_only)")]
pub struct UnknownRequirementMode(pub String);

impl FromStr for RequirementMode {
    type Err = UnknownRequirementMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "explicit_threshold" | "explicit" | "threshold" => Ok(Self::ExplicitThreshold),
            "implicit_softening" | "implicit" | "softening" => Ok(Self::ImplicitSoftening),
            "scoring_only" | "scoring" => Ok(Self::ScoringOnly),
            _ => Err(UnknownRequirementMode(value.to_string())),
        }
    }
}

/// Settings bound into a `MatchEvaluator` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub requirement_mode: RequirementMode,
}

impl EvaluationConfig {
    pub const fn new(requirement_mode: RequirementMode) -> Self {
        Self { requirement_mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_aliases() {
        for mode in RequirementMode::ordered() {
            assert_eq!(mode.label().parse::<RequirementMode>(), Ok(mode));
        }
        assert_eq!(
            "Scoring-Only".parse::<RequirementMode>(),
            Ok(RequirementMode::ScoringOnly)
        );
        assert_eq!(
            " implicit ".parse::<RequirementMode>(),
            Ok(RequirementMode::ImplicitSoftening)
        );
    }

    #[test]
    fn rejects_unknown_modes() {
        let err = "lenient".parse::<RequirementMode>().unwrap_err();
        assert!(err.to_string().contains("lenient"));
    }

    #[test]
    fn legacy_flag_maps_to_two_modes() {
        assert_eq!(
            RequirementMode::from_legacy_flag(true),
            RequirementMode::ImplicitSoftening
        );
        assert_eq!(
            RequirementMode::from_legacy_flag(false),
            RequirementMode::ExplicitThreshold
        );
    }

    #[test]
    fn defaults_to_explicit_threshold() {
        assert_eq!(
            EvaluationConfig::default().requirement_mode,
            RequirementMode::ExplicitThreshold
        );
    }
}
