use serde::Serialize;

use crate::models::Scores;

/// Assistance is advisory only; every plan carries this note.
pub const DISCLAIMER: &str =
    "Final decision rests with a human manager; this assistant only informs it.";

const HIGH_MANAGER_ACTIONS: [&str; 4] = [
    "Schedule a one-on-one within 48 hours (active listening, no judgement).",
    "Temporarily reduce the workload and re-prioritize tasks.",
    "Clarify expectations, deadlines, and blocking points.",
    "Offer support (mentoring, pairing, a planned break).",
];
const HIGH_KEYWORD_ACTION: &str =
    "Sensitive keywords detected in the comment: reinforce human follow-up and offer adapted support.";
const HIGH_PEER_ACTIONS: [&str; 3] = [
    "Set one or two priorities at most for the next period.",
    "Block out a break and a slot without interruptions.",
    "Ask for help on a specific task (pairing, review, support).",
];

const MODERATE_MANAGER_ACTIONS: [&str; 3] = [
    "Run a quick ten-minute check-in this week.",
    "Adjust the organization: task split, planning, micro-deadlines.",
    "Encourage communication about obstacles.",
];
const MODERATE_PEER_ACTIONS: [&str; 2] = [
    "List current blockers and propose a solution or a need.",
    "Set up a short daily follow-up routine (five minutes a day).",
];

const LOW_MANAGER_ACTIONS: [&str; 2] = [
    "Keep the current setup and recognize the effort.",
    "Preserve the balance: steady workload, regular feedback.",
];
const LOW_PEER_ACTIONS: [&str; 1] =
    ["Keep up the good practices (organization, breaks, communication)."];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_risk(risk: i64) -> Self {
        if risk >= 70 {
            RiskBand::High
        } else if risk >= 40 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }

    fn manager_actions(&self) -> &'static [&'static str] {
        match self {
            RiskBand::Low => &LOW_MANAGER_ACTIONS,
            RiskBand::Moderate => &MODERATE_MANAGER_ACTIONS,
            RiskBand::High => &HIGH_MANAGER_ACTIONS,
        }
    }

    fn peer_actions(&self) -> &'static [&'static str] {
        match self {
            RiskBand::Low => &LOW_PEER_ACTIONS,
            RiskBand::Moderate => &MODERATE_PEER_ACTIONS,
            RiskBand::High => &HIGH_PEER_ACTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPlan {
    pub band: RiskBand,
    pub summary: String,
    pub manager_actions: Vec<&'static str>,
    pub peer_actions: Vec<&'static str>,
    pub disclaimer: &'static str,
}

/// Turn computed scores into an action plan. The band depends on the risk
/// score alone; stress and motivation already fed into it upstream.
pub fn generate_recommendations(scores: &Scores) -> RecommendationPlan {
    let band = RiskBand::from_risk(scores.risk);

    let mut manager_actions: Vec<&'static str> = band.manager_actions().to_vec();
    if band == RiskBand::High && scores.keyword_flag {
        manager_actions.push(HIGH_KEYWORD_ACTION);
    }

    RecommendationPlan {
        band,
        summary: format!("Risk level: {} (score {}/100).", band.label(), scores.risk),
        manager_actions,
        peer_actions: band.peer_actions().to_vec(),
        disclaimer: DISCLAIMER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(risk: i64, keyword_flag: bool) -> Scores {
        Scores {
            stress: 50,
            motivation: 50,
            risk,
            keyword_flag,
        }
    }

    #[test]
    fn band_thresholds_are_inclusive() {
        assert_eq!(RiskBand::from_risk(70), RiskBand::High);
        assert_eq!(RiskBand::from_risk(69), RiskBand::Moderate);
        assert_eq!(RiskBand::from_risk(40), RiskBand::Moderate);
        assert_eq!(RiskBand::from_risk(39), RiskBand::Low);
    }

    #[test]
    fn summary_interpolates_band_and_score() {
        let plan = generate_recommendations(&scores(82, false));
        assert_eq!(plan.summary, "Risk level: High (score 82/100).");
        assert_eq!(plan.disclaimer, DISCLAIMER);
    }

    #[test]
    fn keyword_flag_appends_one_manager_action_on_high_band() {
        let plain = generate_recommendations(&scores(75, false));
        let flagged = generate_recommendations(&scores(75, true));
        assert_eq!(flagged.manager_actions.len(), plain.manager_actions.len() + 1);
        assert_eq!(flagged.manager_actions.last(), Some(&HIGH_KEYWORD_ACTION));
        assert_eq!(flagged.peer_actions, plain.peer_actions);
    }

    #[test]
    fn keyword_flag_is_ignored_outside_the_high_band() {
        let plan = generate_recommendations(&scores(45, true));
        assert_eq!(plan.band, RiskBand::Moderate);
        assert_eq!(plan.manager_actions, MODERATE_MANAGER_ACTIONS.to_vec());
    }

    #[test]
    fn each_band_has_ordered_action_lists() {
        let low = generate_recommendations(&scores(10, false));
        assert_eq!(low.manager_actions, LOW_MANAGER_ACTIONS.to_vec());
        assert_eq!(low.peer_actions, LOW_PEER_ACTIONS.to_vec());

        let moderate = generate_recommendations(&scores(55, false));
        assert_eq!(moderate.peer_actions, MODERATE_PEER_ACTIONS.to_vec());
    }
}
