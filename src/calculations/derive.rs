use crate::allocation::Allocation;
use crate::leave::ResourceLeave;
use crate::project::Project;
use crate::resource::Resource;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Hours in a full-time week of the capacity model.
pub const HOURS_PER_WEEK: f64 = 40.0;
/// Weeks per month of the capacity model. Fixed: the model never counts
/// actual weeks-in-month or business days.
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Derived availability state of a resource, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Available,
    Working,
    OnLeave,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Available => "available",
            ResourceStatus::Working => "working",
            ResourceStatus::OnLeave => "on_leave",
        }
    }
}

/// One project a resource is actively planned on, with summed hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHours {
    pub id: String,
    pub code: String,
    pub name: String,
    pub planned_hours: f64,
}

fn counts_for_resource(
    allocation: &Allocation,
    resource: &Resource,
    today: NaiveDate,
) -> bool {
    allocation.includes_resource(&resource.id)
        && allocation.is_for_period(today.year(), today.month())
}

/// Classify a resource as on_leave / working / available.
///
/// Leave wins over everything; `working` requires a current-month
/// allocation containing the resource with planned hours above zero.
/// Allocations for other periods are ignored even when non-zero.
pub fn resolve_status(
    resource: &Resource,
    allocations: &[Allocation],
    leaves: &[ResourceLeave],
    today: NaiveDate,
) -> ResourceStatus {
    let on_leave = leaves
        .iter()
        .any(|leave| leave.resource_id == resource.id && leave.is_active_on(today));
    if on_leave {
        return ResourceStatus::OnLeave;
    }

    let has_allocations = allocations.iter().any(|allocation| {
        counts_for_resource(allocation, resource, today) && allocation.planned_hours > 0.0
    });

    if has_allocations {
        ResourceStatus::Working
    } else {
        ResourceStatus::Available
    }
}

/// Assumed monthly working-hours ceiling: availability% x 40 hours x 4 weeks.
pub fn monthly_capacity(resource: &Resource) -> f64 {
    (resource.availability as f64 / 100.0) * HOURS_PER_WEEK * WEEKS_PER_MONTH
}

/// Percentage of monthly capacity consumed by current-month planned hours.
///
/// Unclamped: over-allocation legitimately yields values above 100 and the
/// caller decides how to flag it. Zero or negative availability yields 0
/// rather than a division error.
pub fn workload_percent(resource: &Resource, allocations: &[Allocation], today: NaiveDate) -> i64 {
    let total_planned: f64 = allocations
        .iter()
        .filter(|allocation| counts_for_resource(allocation, resource, today))
        .map(|allocation| allocation.planned_hours)
        .sum();

    let capacity = monthly_capacity(resource);
    if capacity <= 0.0 {
        return 0;
    }

    ((total_planned / capacity) * 100.0).round() as i64
}

/// Distinct projects the resource is planned on this month, with per-project
/// planned-hour sums.
///
/// Sums are raw, not rounded: display paths round separately. Allocations
/// whose project id is missing from the catalog are silently skipped.
pub fn current_projects(
    resource: &Resource,
    allocations: &[Allocation],
    projects: &[Project],
    today: NaiveDate,
) -> Vec<ProjectHours> {
    let mut results: Vec<ProjectHours> = Vec::new();

    for allocation in allocations.iter().filter(|allocation| {
        counts_for_resource(allocation, resource, today) && allocation.planned_hours > 0.0
    }) {
        let Some(project) = projects.iter().find(|p| p.id == allocation.project_id) else {
            continue;
        };
        if let Some(entry) = results.iter_mut().find(|entry| entry.id == project.id) {
            entry.planned_hours += allocation.planned_hours;
        } else {
            results.push(ProjectHours {
                id: project.id.clone(),
                code: project.code.clone(),
                name: project.name.clone(),
                planned_hours: allocation.planned_hours,
            });
        }
    }

    results
}

/// The leave covering `today`, if any.
pub fn current_leave(
    resource: &Resource,
    leaves: &[ResourceLeave],
    today: NaiveDate,
) -> Option<ResourceLeave> {
    leaves
        .iter()
        .find(|leave| leave.resource_id == resource.id && leave.is_active_on(today))
        .cloned()
}

/// Leaves starting strictly after `today`, ascending by start date.
pub fn upcoming_leaves(
    resource: &Resource,
    leaves: &[ResourceLeave],
    today: NaiveDate,
) -> Vec<ResourceLeave> {
    let mut upcoming: Vec<ResourceLeave> = leaves
        .iter()
        .filter(|leave| leave.resource_id == resource.id && leave.is_upcoming_on(today))
        .cloned()
        .collect();
    upcoming.sort_by_key(|leave| leave.start_date);
    upcoming
}
