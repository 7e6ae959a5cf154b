use std::fmt::Write;

use crate::advice::RiskBand;
use crate::filter;
use crate::models::{CheckInRecord, FilterCriteria};

fn band_cell(record: &CheckInRecord) -> &str {
    record
        .risk
        .map(|risk| RiskBand::from_risk(risk).label())
        .unwrap_or("")
}

/// Human-readable description of the active filters for the report header.
pub fn scope_label(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();

    if !criteria.organizations.is_empty() {
        let mut organizations: Vec<&str> =
            criteria.organizations.iter().map(String::as_str).collect();
        organizations.sort_unstable();
        parts.push(organizations.join(", "));
    }
    if !criteria.roles.is_empty() {
        let mut roles: Vec<&str> = criteria.roles.iter().map(String::as_str).collect();
        roles.sort_unstable();
        parts.push(roles.join(", "));
    }
    if let Some((from, to)) = criteria.date_range {
        parts.push(format!("{from} to {to}"));
    }

    if parts.is_empty() {
        "all check-ins".to_string()
    } else {
        parts.join("; ")
    }
}

pub fn build_report(criteria: &FilterCriteria, records: &[CheckInRecord]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Wellbeing Check-In Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} check-ins)",
        scope_label(criteria),
        records.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Team Averages");
    if records.is_empty() {
        let _ = writeln!(output, "No check-ins match this scope.");
    } else {
        mean_line(&mut output, "Mood (1-5)", filter::mean(records, |r| r.mood));
        mean_line(
            &mut output,
            "Sleep (hours)",
            filter::mean(records, |r| r.sleep_hours),
        );
        mean_line(&mut output, "Focus (1-5)", filter::mean(records, |r| r.focus));
        mean_line(&mut output, "Risk (0-100)", filter::mean(records, |r| r.risk));
    }

    count_section(&mut output, "Workload Mix", records, |r| &r.workload);
    count_section(&mut output, "Reported Conflicts", records, |r| &r.conflicts);
    count_section(&mut output, "Risk Bands", records, band_cell);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Comments");
    let comments = filter::most_recent(records, |r| &r.comment, 10);
    if comments.is_empty() {
        let _ = writeln!(output, "No check-ins match this scope.");
    } else {
        for (index, comment) in comments.iter().enumerate() {
            let shown = if comment.is_empty() { "-" } else { comment };
            let _ = writeln!(output, "{}. {}", index + 1, shown);
        }
    }

    output
}

fn mean_line(output: &mut String, label: &str, value: Option<f64>) {
    match value {
        Some(value) => {
            let _ = writeln!(output, "- {label}: {value:.2}");
        }
        None => {
            let _ = writeln!(output, "- {label}: no data");
        }
    }
}

fn count_section(
    output: &mut String,
    title: &str,
    records: &[CheckInRecord],
    field: fn(&CheckInRecord) -> &str,
) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    let counts = filter::value_counts(records, field);
    if counts.is_empty() {
        let _ = writeln!(output, "No check-ins match this scope.");
        return;
    }
    for (label, count) in counts {
        let _ = writeln!(output, "- {label}: {count}");
    }
}
