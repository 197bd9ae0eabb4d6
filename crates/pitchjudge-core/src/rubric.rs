//! The fixed six-criterion scoring rubric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fixed evaluation dimensions.
///
/// Order here is the canonical tie-break priority order used by the
/// orchestrator's leaderboard sort and by the calibrator's
/// anti-uniform-10 rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RubricKey {
    ProblemUnderstanding,
    InnovationUniqueness,
    TechnicalFeasibility,
    ImplementationApproach,
    TeamReadiness,
    PotentialImpact,
}

impl RubricKey {
    pub const ALL: [RubricKey; 6] = [
        RubricKey::ProblemUnderstanding,
        RubricKey::InnovationUniqueness,
        RubricKey::TechnicalFeasibility,
        RubricKey::ImplementationApproach,
        RubricKey::TeamReadiness,
        RubricKey::PotentialImpact,
    ];

    /// Priority order for the anti-uniform-10 calibration rule and for the
    /// leaderboard tie-break tuple.
    pub const PRIORITY: [RubricKey; 6] = [
        RubricKey::InnovationUniqueness,
        RubricKey::TechnicalFeasibility,
        RubricKey::PotentialImpact,
        RubricKey::ProblemUnderstanding,
        RubricKey::ImplementationApproach,
        RubricKey::TeamReadiness,
    ];

    /// Weight out of 100; the six weights sum to 100.
    pub const fn weight(self) -> u32 {
        match self {
            RubricKey::ProblemUnderstanding => 15,
            RubricKey::InnovationUniqueness => 20,
            RubricKey::TechnicalFeasibility => 20,
            RubricKey::ImplementationApproach => 15,
            RubricKey::TeamReadiness => 15,
            RubricKey::PotentialImpact => 15,
        }
    }

    /// Reverse of [`Self::label`]; matched case-insensitively since model
    /// output capitalization is not guaranteed.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        RubricKey::ALL
            .into_iter()
            .find(|k| k.label().to_ascii_lowercase() == normalized)
    }

    pub const fn label(self) -> &'static str {
        match self {
            RubricKey::ProblemUnderstanding => "Problem Understanding",
            RubricKey::InnovationUniqueness => "Innovation & Uniqueness",
            RubricKey::TechnicalFeasibility => "Technical Feasibility",
            RubricKey::ImplementationApproach => "Implementation Approach",
            RubricKey::TeamReadiness => "Team Readiness",
            RubricKey::PotentialImpact => "Potential Impact",
        }
    }
}

impl fmt::Display for RubricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_100() {
        let total: u32 = RubricKey::ALL.iter().map(|k| k.weight()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn from_label_roundtrips_case_insensitively() {
        for k in RubricKey::ALL {
            assert_eq!(RubricKey::from_label(&k.label().to_uppercase()), Some(k));
        }
        assert_eq!(RubricKey::from_label("not a key"), None);
    }

    #[test]
    fn priority_is_a_permutation_of_all() {
        let mut all = RubricKey::ALL.to_vec();
        let mut pri = RubricKey::PRIORITY.to_vec();
        all.sort_by_key(|k| k.label());
        pri.sort_by_key(|k| k.label());
        assert_eq!(all, pri);
    }
}
