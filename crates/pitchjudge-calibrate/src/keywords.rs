//! Keyword sets driving the heuristic baseline (spec §4.4). See DESIGN.md's
//! "Calibration keyword sets" entry: the original function body was not
//! recoverable from the retrieved source pack, so these are authored from
//! the terms spec.md itself names in §4.4 and scenario S2.

use pitchjudge_core::rubric::RubricKey;

/// Fixed technical-term vocabulary used for `technical_density`.
pub const TECHNICAL_TERMS: &[&str] = &[
    "architecture", "api", "dataset", "latency", "algorithm", "model",
    "pipeline", "infrastructure", "database", "backend", "frontend",
    "microservice", "container", "kubernetes", "docker", "throughput",
    "scalability", "inference", "training", "embedding", "vector",
    "protocol", "encryption", "authentication", "concurrency", "cache",
];

/// Per-rubric-key keywords: if any appears in the deck text, the baseline
/// for that key gets +1.
pub fn keywords_for(key: RubricKey) -> &'static [&'static str] {
    match key {
        RubricKey::ProblemUnderstanding => &["problem", "pain point", "user need", "market gap"],
        RubricKey::InnovationUniqueness => {
            &["novel", "unique", "patent", "state-of-the-art", "sota", "first"]
        }
        RubricKey::TechnicalFeasibility => {
            &["architecture", "api", "dataset", "latency", "prototype", "benchmark"]
        }
        RubricKey::ImplementationApproach => {
            &["roadmap", "milestone", "sprint", "implementation", "deployment"]
        }
        RubricKey::TeamReadiness => &["team", "founder", "experience", "background", "advisor"],
        RubricKey::PotentialImpact => &["impact", "market", "revenue", "users", "scale", "adoption"],
    }
}

/// "Extra evidence" set (spec §4.4 fusion rule 3).
pub const EXTRA_EVIDENCE: &[&str] = &[
    "baseline", "privacy", "security", "gdpr", "hipaa", "cost", "budget",
    "infra", "cloud", "risk", "mitigation",
];

/// Innovation-specific bonus set (spec §4.4, same as [`RubricKey::InnovationUniqueness`]'s
/// own keyword set, kept as a named constant since the fusion step references
/// it independently of the baseline loop).
pub const INNOVATION_BONUS: &[&str] = &["novel", "unique", "patent", "state-of-the-art", "sota", "first"];
