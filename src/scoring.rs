use crate::models::{Conflicts, Scores, Workload};

/// Comment terms that raise the risk score when present. Matching is a raw
/// case-insensitive substring test, so a term inside a longer word counts.
pub const FLAGGED_TERMS: [&str; 9] = [
    "burnout",
    "exhaustion",
    "anxiety",
    "panic",
    "depression",
    "harassment",
    "insomnia",
    "overload",
    "pressure",
];

/// Map the five indicators and the free-text comment to wellbeing scores.
///
/// Stress and motivation are weighted linear blends of the indicators,
/// clamped to [0, 100]. Risk blends the two (60/40) and gains a capped +10
/// when the comment trips the flagged-term scan.
pub fn compute_scores(
    mood: i64,
    workload: Workload,
    sleep_hours: i64,
    focus: i64,
    conflicts: Conflicts,
    comment: &str,
) -> Scores {
    let w = workload.severity_weight();
    let c = conflicts.severity_weight();

    let stress = clamp(w * 12 + (6 - mood) * 10 + (8 - sleep_hours) * 6 + c * 6 + (6 - focus) * 8);
    let motivation = clamp(mood * 14 + focus * 10 + sleep_hours * 6 - w * 8 - c * 6);

    let mut risk = clamp((stress as f64 * 0.6 + (100 - motivation) as f64 * 0.4).round() as i64);
    let keyword_flag = contains_flagged_term(comment);
    if keyword_flag {
        risk = (risk + 10).min(100);
    }

    Scores {
        stress,
        motivation,
        risk,
        keyword_flag,
    }
}

pub fn contains_flagged_term(comment: &str) -> bool {
    let text = comment.to_lowercase();
    FLAGGED_TERMS.iter().any(|term| text.contains(term))
}

fn clamp(value: i64) -> i64 {
    value.clamp(0, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_week_scores_as_expected() {
        let scores = compute_scores(5, Workload::Low, 8, 5, Conflicts::None, "");
        assert_eq!(scores.stress, 36);
        assert_eq!(scores.motivation, 100);
        assert_eq!(scores.risk, 22);
        assert!(!scores.keyword_flag);
    }

    #[test]
    fn scores_stay_within_bounds_at_the_extremes() {
        let worst = compute_scores(1, Workload::High, 0, 1, Conflicts::Severe, "");
        assert_eq!(worst.stress, 100);
        assert_eq!(worst.motivation, 0);
        assert_eq!(worst.risk, 100);

        let best = compute_scores(5, Workload::Low, 10, 5, Conflicts::None, "");
        assert!((0..=100).contains(&best.stress));
        assert!((0..=100).contains(&best.motivation));
        assert!((0..=100).contains(&best.risk));
    }

    #[test]
    fn flagged_term_adds_exactly_ten_to_risk() {
        let base = compute_scores(3, Workload::Medium, 6, 3, Conflicts::Mild, "steady week");
        let flagged = compute_scores(3, Workload::Medium, 6, 3, Conflicts::Mild, "feeling overload");
        assert!(!base.keyword_flag);
        assert!(flagged.keyword_flag);
        assert_eq!(flagged.risk, base.risk + 10);
        assert_eq!(flagged.stress, base.stress);
        assert_eq!(flagged.motivation, base.motivation);
    }

    #[test]
    fn flagged_risk_is_capped_at_one_hundred() {
        let scores = compute_scores(1, Workload::High, 0, 1, Conflicts::Severe, "total burnout");
        assert!(scores.keyword_flag);
        assert_eq!(scores.risk, 100);
    }

    #[test]
    fn term_scan_is_case_insensitive_and_matches_substrings() {
        assert!(contains_flagged_term("BURNOUT looming"));
        assert!(contains_flagged_term("feeling pressured lately"));
        assert!(!contains_flagged_term("all good this week"));
        assert!(!contains_flagged_term(""));
    }
}
