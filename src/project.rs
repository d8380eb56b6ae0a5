use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project resources are allocated to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    /// Short unique code shown in grids (e.g. "ACMWEB").
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Ongoing projects have no planned end.
    #[serde(default)]
    pub is_ongoing: bool,
    /// Archived projects are hidden from listings and dashboards.
    #[serde(default)]
    pub is_archived: bool,
}

impl Project {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            is_ongoing: false,
            is_archived: false,
        }
    }
}
