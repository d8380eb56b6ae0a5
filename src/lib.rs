pub mod allocation;
pub mod calculations;
pub mod codes;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod leave;
pub mod persistence;
pub mod project;
pub mod resource;
pub mod tracker;
pub(crate) mod validation;

pub use allocation::Allocation;
pub use calculations::aggregate::{
    HourTotals, HoursField, group_by_project, group_by_week, round_to_tenth, sum_hours,
};
pub use calculations::derive::{
    ProjectHours, ResourceStatus, current_leave, current_projects, monthly_capacity,
    resolve_status, upcoming_leaves, workload_percent,
};
pub use leave::{LeaveType, ResourceLeave};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteTrackerStore;
pub use persistence::{
    PersistenceError, TrackerStore, load_allocations_from_csv, load_tracker_from_json,
    save_allocations_to_csv, save_tracker_to_json,
};
pub use project::Project;
pub use resource::{Resource, Role};
pub use tracker::{Tracker, TrackerError};
