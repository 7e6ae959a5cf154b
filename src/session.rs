use chrono::NaiveDateTime;

use crate::advice::{self, RecommendationPlan};
use crate::error::DashboardError;
use crate::models::{CheckInInput, CheckInRecord, Scores};
use crate::scoring;

/// Append-only log of the check-ins scored in this session. Owned by the
/// caller: created empty when the session starts, dropped when it ends,
/// never written back to the collected store.
#[derive(Debug, Default)]
pub struct SessionLog {
    records: Vec<CheckInRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, redacting the comment at write time when anonymized
    /// so the literal text is never retained.
    pub fn append(&mut self, mut record: CheckInRecord, anonymize: bool) -> &CheckInRecord {
        if anonymize {
            record.comment.clear();
        }
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[CheckInRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Assemble an immutable record from validated input and computed scores.
pub fn build_record(
    input: &CheckInInput,
    scores: &Scores,
    submitted_at: NaiveDateTime,
) -> CheckInRecord {
    CheckInRecord {
        timestamp: Some(submitted_at),
        organization: input.organization.clone(),
        role: input.role.label().to_string(),
        mood: Some(input.mood),
        workload: input.workload.label().to_string(),
        sleep_hours: Some(input.sleep_hours),
        focus: Some(input.focus),
        conflicts: input.conflicts.label().to_string(),
        stress: Some(scores.stress),
        motivation: Some(scores.motivation),
        risk: Some(scores.risk),
        keyword_flag: Some(scores.keyword_flag),
        comment: input.comment.clone(),
    }
}

/// Validate, score, log, and plan one check-in submission.
pub fn submit(
    log: &mut SessionLog,
    input: CheckInInput,
    anonymize: bool,
    submitted_at: NaiveDateTime,
) -> Result<(CheckInRecord, RecommendationPlan), DashboardError> {
    input.validate()?;

    let scores = scoring::compute_scores(
        input.mood,
        input.workload,
        input.sleep_hours,
        input.focus,
        input.conflicts,
        &input.comment,
    );
    let plan = advice::generate_recommendations(&scores);
    let record = build_record(&input, &scores, submitted_at);
    let stored = log.append(record, anonymize).clone();

    Ok((stored, plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conflicts, Role, Workload};
    use chrono::NaiveDate;

    fn input(comment: &str) -> CheckInInput {
        CheckInInput {
            organization: "Platform team".to_string(),
            role: Role::Collaborator,
            mood: 2,
            workload: Workload::High,
            sleep_hours: 5,
            focus: 2,
            conflicts: Conflicts::Mild,
            comment: comment.to_string(),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn submit_builds_a_fully_populated_record() {
        let mut log = SessionLog::new();
        let (record, plan) = submit(&mut log, input("rough sprint"), false, noon()).unwrap();

        assert_eq!(record.role, "Collaborator");
        assert_eq!(record.workload, "High");
        assert_eq!(record.conflicts, "Mild");
        assert_eq!(record.comment, "rough sprint");
        assert_eq!(record.timestamp, Some(noon()));
        assert_eq!(record.risk.map(crate::advice::RiskBand::from_risk), Some(plan.band));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn anonymized_append_never_retains_the_comment() {
        let mut log = SessionLog::new();
        let (record, _) = submit(&mut log, input("feeling burnout"), true, noon()).unwrap();

        assert_eq!(record.comment, "");
        assert_eq!(log.records()[0].comment, "");
        // Redaction does not blunt the keyword scan, which ran on the
        // original text before the write.
        assert_eq!(record.keyword_flag, Some(true));
    }

    #[test]
    fn out_of_range_input_is_rejected_before_scoring() {
        let mut log = SessionLog::new();
        let mut bad = input("");
        bad.mood = 9;

        let err = submit(&mut log, bad, false, noon()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn log_preserves_submission_order() {
        let mut log = SessionLog::new();
        for comment in ["first", "second", "third"] {
            submit(&mut log, input(comment), false, noon()).unwrap();
        }

        let comments: Vec<&str> = log.records().iter().map(|r| r.comment.as_str()).collect();
        assert_eq!(comments, ["first", "second", "third"]);
    }
}
