use crate::allocation::Allocation;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Which hour column of an allocation an aggregate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursField {
    Planned,
    Actual,
}

impl HoursField {
    fn of(self, allocation: &Allocation) -> f64 {
        match self {
            HoursField::Planned => allocation.planned_hours,
            HoursField::Actual => allocation.actual_hours,
        }
    }
}

/// Round to one decimal place, half-up on the scaled value.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sum one hour field across a collection, rounded to one decimal place.
pub fn sum_hours(allocations: &[Allocation], field: HoursField) -> f64 {
    let total: f64 = allocations.iter().map(|alloc| field.of(alloc)).sum();
    round_to_tenth(total)
}

/// Planned/actual totals for one group of allocation rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HourTotals {
    pub planned: f64,
    pub actual: f64,
}

impl HourTotals {
    fn accumulate(&mut self, allocation: &Allocation) {
        self.planned += allocation.planned_hours;
        self.actual += allocation.actual_hours;
    }

    fn rounded(self) -> Self {
        Self {
            planned: round_to_tenth(self.planned),
            actual: round_to_tenth(self.actual),
        }
    }
}

/// Per-project hour totals. Rounding happens after summation, per group
/// independently.
pub fn group_by_project(allocations: &[Allocation]) -> HashMap<String, HourTotals> {
    let mut groups: HashMap<String, HourTotals> = HashMap::new();
    for allocation in allocations {
        groups
            .entry(allocation.project_id.clone())
            .or_default()
            .accumulate(allocation);
    }
    groups
        .into_iter()
        .map(|(project_id, totals)| (project_id, totals.rounded()))
        .collect()
}

/// Per-week hour totals, keyed by week number.
pub fn group_by_week(allocations: &[Allocation]) -> BTreeMap<u32, HourTotals> {
    let mut groups: BTreeMap<u32, HourTotals> = BTreeMap::new();
    for allocation in allocations {
        groups
            .entry(allocation.week)
            .or_default()
            .accumulate(allocation);
    }
    groups
        .into_iter()
        .map(|(week, totals)| (week, totals.rounded()))
        .collect()
}
