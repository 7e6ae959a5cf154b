use std::collections::HashMap;

use crate::models::{CheckInRecord, FilterCriteria};

/// Label used by `value_counts` for blank cells, so missing data shows up
/// as an explicit bucket instead of vanishing.
pub const BLANK_LABEL: &str = "(blank)";

/// Keep the records matching every active criterion, in their original
/// relative order.
pub fn apply_filters(records: &[CheckInRecord], criteria: &FilterCriteria) -> Vec<CheckInRecord> {
    records
        .iter()
        .filter(|record| matches(criteria, record))
        .cloned()
        .collect()
}

fn matches(criteria: &FilterCriteria, record: &CheckInRecord) -> bool {
    if !criteria.organizations.is_empty() && !criteria.organizations.contains(&record.organization)
    {
        return false;
    }
    if !criteria.roles.is_empty() && !criteria.roles.contains(&record.role) {
        return false;
    }
    if let Some((from, to)) = criteria.date_range {
        // A record without a usable timestamp cannot be placed in the
        // window, so an active date filter drops it.
        match record.timestamp {
            Some(timestamp) => {
                let date = timestamp.date();
                if date < from || date > to {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Mean of one numeric field across the records; `None` when no record has
/// a value for it.
pub fn mean(records: &[CheckInRecord], field: fn(&CheckInRecord) -> Option<i64>) -> Option<f64> {
    let values: Vec<i64> = records.iter().filter_map(field).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

/// Distinct values of one text field with their counts, most frequent
/// first, blanks counted under an explicit label.
pub fn value_counts(
    records: &[CheckInRecord],
    field: fn(&CheckInRecord) -> &str,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let raw = field(record).trim();
        let label = if raw.is_empty() { BLANK_LABEL } else { raw };
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// The field values of the `n` most recent records, newest first. Records
/// without a timestamp sort last; blank stands in for missing text.
pub fn most_recent(
    records: &[CheckInRecord],
    field: fn(&CheckInRecord) -> &str,
    n: usize,
) -> Vec<String> {
    let mut ordered: Vec<&CheckInRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    ordered
        .into_iter()
        .take(n)
        .map(|record| field(record).trim().to_string())
        .collect()
}
