use serde::Serialize;

/// Ready-to-use comment phrases, grouped the way the check-in form offers
/// them, so free-text entry stays quick and guided.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuggestionGroup {
    pub category: &'static str,
    pub phrases: &'static [&'static str],
}

pub const SUGGESTION_GROUPS: [SuggestionGroup; 4] = [
    SuggestionGroup {
        category: "Workload & deadlines",
        phrases: &[
            "I feel under pressure because of this week's deadlines.",
            "I have too many tasks in parallel and cannot prioritize.",
            "I am blocked on one part and need help.",
        ],
    },
    SuggestionGroup {
        category: "Energy & sleep",
        phrases: &[
            "I am sleeping badly at the moment and running out of energy.",
            "I am tired and struggle to stay focused.",
            "I need a steadier rhythm to be effective.",
        ],
    },
    SuggestionGroup {
        category: "Motivation",
        phrases: &[
            "I have felt less motivated for a few days.",
            "I am motivated but need clearer goals.",
            "I feel good and am progressing on my priorities.",
        ],
    },
    SuggestionGroup {
        category: "Team & communication",
        phrases: &[
            "There are mild tensions in the team and they weigh on me.",
            "I would rather clarify who does what.",
            "I feel well supported by the team right now.",
        ],
    },
];
