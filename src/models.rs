use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Who is submitting the check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Role {
    Collaborator,
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Collaborator => "Collaborator",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Workload {
    Low,
    Medium,
    High,
}

impl Workload {
    pub fn label(&self) -> &'static str {
        match self {
            Workload::Low => "Low",
            Workload::Medium => "Medium",
            Workload::High => "High",
        }
    }

    pub fn severity_weight(&self) -> i64 {
        match self {
            Workload::Low => 1,
            Workload::Medium => 3,
            Workload::High => 5,
        }
    }
}

/// Reported tensions or conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Conflicts {
    None,
    Mild,
    Severe,
}

impl Conflicts {
    pub fn label(&self) -> &'static str {
        match self {
            Conflicts::None => "None",
            Conflicts::Mild => "Mild",
            Conflicts::Severe => "Severe",
        }
    }

    pub fn severity_weight(&self) -> i64 {
        match self {
            Conflicts::None => 1,
            Conflicts::Mild => 3,
            Conflicts::Severe => 5,
        }
    }
}

/// Raw check-in form input, before scoring. The closed enums live here so a
/// record built from a submission can only carry the canonical labels.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInInput {
    pub organization: String,
    pub role: Role,
    pub mood: i64,
    pub workload: Workload,
    pub sleep_hours: i64,
    pub focus: i64,
    pub conflicts: Conflicts,
    #[serde(default)]
    pub comment: String,
}

impl CheckInInput {
    /// Range validation happens at the boundary, before any scoring runs.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if !(1..=5).contains(&self.mood) {
            return Err(DashboardError::InvalidInput(format!(
                "mood must be between 1 and 5, got {}",
                self.mood
            )));
        }
        if !(0..=10).contains(&self.sleep_hours) {
            return Err(DashboardError::InvalidInput(format!(
                "sleep_hours must be between 0 and 10, got {}",
                self.sleep_hours
            )));
        }
        if !(1..=5).contains(&self.focus) {
            return Err(DashboardError::InvalidInput(format!(
                "focus must be between 1 and 5, got {}",
                self.focus
            )));
        }
        Ok(())
    }
}

/// Computed wellbeing scores, all in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub stress: i64,
    pub motivation: i64,
    pub risk: i64,
    pub keyword_flag: bool,
}

/// One collected check-in row.
///
/// Rows read back from the store can miss any column or hold unparseable
/// cells, so everything coercible is optional and categorical cells stay
/// raw strings with "" as the blank sentinel. Rows built by the write path
/// always have every field populated with canonical labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckInRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub organization: String,
    pub role: String,
    pub mood: Option<i64>,
    pub workload: String,
    pub sleep_hours: Option<i64>,
    pub focus: Option<i64>,
    pub conflicts: String,
    pub stress: Option<i64>,
    pub motivation: Option<i64>,
    pub risk: Option<i64>,
    pub keyword_flag: Option<bool>,
    pub comment: String,
}

/// Review-side query. Empty sets and a missing range mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub organizations: HashSet<String>,
    pub roles: HashSet<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}
