use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of absence a leave record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Leave,
    Sick,
    Holiday,
    Training,
}

impl Default for LeaveType {
    fn default() -> Self {
        LeaveType::Leave
    }
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Leave => "leave",
            LeaveType::Sick => "sick",
            LeaveType::Holiday => "holiday",
            LeaveType::Training => "training",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "leave" => Some(LeaveType::Leave),
            "sick" => Some(LeaveType::Sick),
            "holiday" => Some(LeaveType::Holiday),
            "training" => Some(LeaveType::Training),
            _ => None,
        }
    }

    pub fn variants() -> [&'static str; 4] {
        ["leave", "sick", "holiday", "training"]
    }
}

/// A contiguous inclusive date range during which a resource is unavailable.
///
/// Bounds are calendar days: a leave starting and ending on the same day is
/// active on exactly that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLeave {
    pub id: String,
    pub resource_id: String,
    #[serde(default)]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResourceLeave {
    pub fn new(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            resource_id: resource_id.into(),
            leave_type: LeaveType::Leave,
            start_date,
            end_date,
            notes: None,
        }
    }

    /// Whether `date` falls within the leave, both bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.contains(date)
    }

    /// Whether the leave starts strictly after `date`.
    pub fn is_upcoming_on(&self, date: NaiveDate) -> bool {
        self.start_date > date
    }

    /// Whether the leave intersects the inclusive range `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}
