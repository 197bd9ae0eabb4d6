//! Sorts evaluated contexts into the final leaderboard order (spec §8,
//! invariant 12): descending weighted total, then the fixed rubric
//! tie-break tuple, then deterministic jitter, then name ascending.
//! Contexts with an `evaluation_error` sort last (spec S4).

use pitchjudge_core::model::LeaderboardEntry;
use pitchjudge_core::rubric::RubricKey;

use crate::tie_break::stable_jitter;

/// Wraps an `f64` so larger values sort first via `Ord`/`total_cmp`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DescF64(f64);

impl Eq for DescF64 {}

impl PartialOrd for DescF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DescF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.total_cmp(&self.0)
    }
}

/// `(errored_last, -weighted_total, -priority_scores, -jitter, name_asc)`.
type SortKey = (bool, DescF64, Vec<std::cmp::Reverse<i32>>, DescF64, String);

fn sort_key(entry: &LeaderboardEntry) -> SortKey {
    let errored = entry.evaluation_error.is_some();
    let weighted = entry.weighted_total.unwrap_or(0.0);
    let priority_scores: Vec<std::cmp::Reverse<i32>> = RubricKey::PRIORITY
        .iter()
        .map(|k| std::cmp::Reverse(entry.scores.get(*k).unwrap_or(0)))
        .collect();
    let jitter = stable_jitter(&entry.team_name);
    let name = entry.team_name.to_ascii_lowercase();

    (errored, DescF64(weighted), priority_scores, DescF64(jitter), name)
}

/// Sorts `entries` in place into final leaderboard order.
pub fn sort(entries: &mut [LeaderboardEntry]) {
    entries.sort_by_key(sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchjudge_core::model::ScoreVector;
    use std::path::PathBuf;

    fn entry(name: &str, weighted: Option<f64>, error: Option<&str>) -> LeaderboardEntry {
        LeaderboardEntry {
            team_name: name.to_string(),
            file_path: PathBuf::from(format!("{name}.pdf")),
            weighted_total: weighted,
            scores: ScoreVector::new(),
            evaluation_error: error.map(str::to_string),
        }
    }

    #[test]
    fn scenario_s3_identical_scores_break_ties_by_name_ascending() {
        let mut entries = vec![entry("Zeta", Some(70.0), None), entry("Alpha", Some(70.0), None)];
        sort(&mut entries);
        assert_eq!(entries[0].team_name, "Alpha");
        assert_eq!(entries[1].team_name, "Zeta");
    }

    #[test]
    fn scenario_s4_errored_entries_sort_last() {
        let mut entries = vec![
            entry("Errored", None, Some("scoring failed")),
            entry("Fine", Some(40.0), None),
        ];
        sort(&mut entries);
        assert_eq!(entries[0].team_name, "Fine");
        assert_eq!(entries[1].team_name, "Errored");
    }

    #[test]
    fn higher_weighted_total_sorts_first() {
        let mut entries = vec![entry("Low", Some(20.0), None), entry("High", Some(90.0), None)];
        sort(&mut entries);
        assert_eq!(entries[0].team_name, "High");
    }
}
