use crate::allocation::Allocation;
use crate::calculations::aggregate::{self, HoursField};
use crate::calculations::derive::{self, ProjectHours, ResourceStatus};
use crate::codes;
use crate::leave::ResourceLeave;
use crate::project::Project;
use crate::resource::{Resource, Role};
use crate::validation::{self, ValidationError};
use chrono::{Datelike, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug)]
pub enum TrackerError {
    DataFrame(PolarsError),
    Invalid(String),
    Conflict(String),
    NotFound(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::DataFrame(err) => write!(f, "dataframe error: {err}"),
            TrackerError::Invalid(message) => write!(f, "{message}"),
            TrackerError::Conflict(message) => write!(f, "{message}"),
            TrackerError::NotFound(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for TrackerError {}

impl From<PolarsError> for TrackerError {
    fn from(value: PolarsError) -> Self {
        TrackerError::DataFrame(value)
    }
}

impl From<ValidationError> for TrackerError {
    fn from(value: ValidationError) -> Self {
        TrackerError::Invalid(value.to_string())
    }
}

/// A resource with its derived fields attached, as returned by the
/// resource read-paths.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSummary {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub status: ResourceStatus,
    pub workload_percent: i64,
    pub current_projects: Vec<ProjectHours>,
    pub current_leave: Option<ResourceLeave>,
    pub upcoming_leaves: Vec<ResourceLeave>,
}

/// One resource row of a project's allocation rollup.
#[derive(Debug, Clone, Serialize)]
pub struct AllocatedResource {
    pub id: String,
    pub code: String,
    pub name: String,
    pub role: String,
    pub status: ResourceStatus,
    pub planned_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub allocated_resources: Vec<AllocatedResource>,
    pub resource_count: usize,
    pub total_planned_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_resources: usize,
    pub total_allocations: usize,
    pub monthly_utilization: f64,
    pub total_planned_hours: f64,
    pub total_actual_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekBreakdown {
    pub week: u32,
    pub planned: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectBreakdown {
    pub project_id: String,
    pub code: String,
    pub name: String,
    pub planned: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDashboard {
    pub year: i32,
    pub month: u32,
    pub weekly_breakdown: Vec<WeekBreakdown>,
    pub project_breakdown: Vec<ProjectBreakdown>,
    pub total_planned: f64,
    pub total_actual: f64,
}

/// The tracker aggregate: catalogs of roles/resources/projects/leaves and
/// the allocation grid, held as a DataFrame and materialized to
/// `Allocation` records on the read paths.
#[derive(Debug)]
pub struct Tracker {
    roles: Vec<Role>,
    resources: Vec<Resource>,
    projects: Vec<Project>,
    leaves: Vec<ResourceLeave>,
    allocations_df: DataFrame,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub(crate) fn from_parts(
        roles: Vec<Role>,
        resources: Vec<Resource>,
        projects: Vec<Project>,
        leaves: Vec<ResourceLeave>,
    ) -> Self {
        let schema = Self::default_schema();
        Self {
            roles,
            resources,
            projects,
            leaves,
            allocations_df: DataFrame::empty_with_schema(&schema),
        }
    }

    fn default_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("id".into(), DataType::String),
            Field::new("project_id".into(), DataType::String),
            Field::new("role_id".into(), DataType::String),
            Field::new(
                "resource_ids".into(),
                DataType::List(Box::new(DataType::String)),
            ),
            Field::new("year".into(), DataType::Int32),
            Field::new("month".into(), DataType::Int32),
            Field::new("week".into(), DataType::Int32),
            Field::new("planned_hours".into(), DataType::Float64),
            Field::new("actual_hours".into(), DataType::Float64),
            Field::new("notes".into(), DataType::String),
        ])
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.allocations_df
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn leaves(&self) -> &[ResourceLeave] {
        &self.leaves
    }

    // ---- role catalog ----

    pub fn upsert_role(&mut self, role: Role) -> Result<(), TrackerError> {
        if role.id.trim().is_empty() || role.name.trim().is_empty() {
            return Err(TrackerError::Invalid(
                "role requires a non-empty id and name".into(),
            ));
        }
        if let Some(existing) = self.roles.iter_mut().find(|r| r.id == role.id) {
            *existing = role;
        } else {
            self.roles.push(role);
        }
        Ok(())
    }

    pub fn find_role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    /// Roles referenced by a resource or an allocation row cannot be removed.
    pub fn remove_role(&mut self, role_id: &str) -> Result<bool, TrackerError> {
        let Some(pos) = self.roles.iter().position(|r| r.id == role_id) else {
            return Ok(false);
        };
        if self.resources.iter().any(|r| r.role_id == role_id) {
            return Err(TrackerError::Conflict(format!(
                "role {role_id} is referenced by a resource"
            )));
        }
        let in_use = self
            .allocations()?
            .iter()
            .any(|allocation| allocation.role_id == role_id);
        if in_use {
            return Err(TrackerError::Conflict(format!(
                "role {role_id} is referenced by an allocation"
            )));
        }
        self.roles.remove(pos);
        Ok(true)
    }

    // ---- resource catalog ----

    pub fn add_resource(&mut self, resource: Resource) -> Result<(), TrackerError> {
        validation::validate_resource(&resource)?;
        if self.find_role(&resource.role_id).is_none() {
            return Err(TrackerError::Invalid(format!(
                "unknown role {}",
                resource.role_id
            )));
        }
        if self.resources.iter().any(|r| r.id == resource.id) {
            return Err(TrackerError::Conflict(format!(
                "resource {} already exists",
                resource.id
            )));
        }
        if self.resources.iter().any(|r| r.code == resource.code) {
            return Err(TrackerError::Conflict(format!(
                "resource code {} already exists",
                resource.code
            )));
        }
        self.resources.push(resource);
        Ok(())
    }

    pub fn update_resource(&mut self, resource: Resource) -> Result<(), TrackerError> {
        validation::validate_resource(&resource)?;
        if self.find_role(&resource.role_id).is_none() {
            return Err(TrackerError::Invalid(format!(
                "unknown role {}",
                resource.role_id
            )));
        }
        if self
            .resources
            .iter()
            .any(|r| r.code == resource.code && r.id != resource.id)
        {
            return Err(TrackerError::Conflict(format!(
                "resource code {} already exists",
                resource.code
            )));
        }
        let Some(existing) = self.resources.iter_mut().find(|r| r.id == resource.id) else {
            return Err(TrackerError::NotFound(format!(
                "resource {} not found",
                resource.id
            )));
        };
        *existing = resource;
        Ok(())
    }

    pub fn find_resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == resource_id)
    }

    pub fn find_resource_by_code(&self, code: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.code == code)
    }

    /// Removes the resource, its leaves, and its membership in every
    /// allocation row. Rows themselves stay (they may carry other members
    /// and recorded hours).
    pub fn remove_resource(&mut self, resource_id: &str) -> Result<bool, TrackerError> {
        let Some(pos) = self.resources.iter().position(|r| r.id == resource_id) else {
            return Ok(false);
        };
        let snapshot = self.allocations()?;
        self.resources.remove(pos);
        self.leaves.retain(|leave| leave.resource_id != resource_id);

        self.allocations_df = DataFrame::empty_with_schema(&Self::default_schema());
        for mut allocation in snapshot {
            allocation.resource_ids.retain(|id| id != resource_id);
            let row = allocation.to_dataframe_row()?;
            self.allocations_df = self.allocations_df.vstack(&row)?;
        }
        Ok(true)
    }

    // ---- project catalog ----

    pub fn add_project(&mut self, project: Project) -> Result<(), TrackerError> {
        if project.id.trim().is_empty()
            || project.code.trim().is_empty()
            || project.name.trim().is_empty()
        {
            return Err(TrackerError::Invalid(
                "project requires a non-empty id, code and name".into(),
            ));
        }
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(TrackerError::Conflict(format!(
                "project {} already exists",
                project.id
            )));
        }
        if self.projects.iter().any(|p| p.code == project.code) {
            return Err(TrackerError::Conflict(format!(
                "project code {} already exists",
                project.code
            )));
        }
        self.projects.push(project);
        Ok(())
    }

    pub fn update_project(&mut self, project: Project) -> Result<(), TrackerError> {
        if self
            .projects
            .iter()
            .any(|p| p.code == project.code && p.id != project.id)
        {
            return Err(TrackerError::Conflict(format!(
                "project code {} already exists",
                project.code
            )));
        }
        let Some(existing) = self.projects.iter_mut().find(|p| p.id == project.id) else {
            return Err(TrackerError::NotFound(format!(
                "project {} not found",
                project.id
            )));
        };
        *existing = project;
        Ok(())
    }

    pub fn find_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub fn find_project_by_code(&self, code: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.code == code)
    }

    /// Removes the project and cascades its allocation rows.
    pub fn remove_project(&mut self, project_id: &str) -> Result<bool, TrackerError> {
        let Some(pos) = self.projects.iter().position(|p| p.id == project_id) else {
            return Ok(false);
        };
        let snapshot = self.allocations()?;
        self.projects.remove(pos);

        self.allocations_df = DataFrame::empty_with_schema(&Self::default_schema());
        for allocation in snapshot {
            if allocation.project_id == project_id {
                continue;
            }
            let row = allocation.to_dataframe_row()?;
            self.allocations_df = self.allocations_df.vstack(&row)?;
        }
        Ok(true)
    }

    // ---- leave records ----

    pub fn add_leave(&mut self, leave: ResourceLeave) -> Result<(), TrackerError> {
        validation::validate_leave(&leave)?;
        if self.find_resource(&leave.resource_id).is_none() {
            return Err(TrackerError::Invalid(format!(
                "unknown resource {}",
                leave.resource_id
            )));
        }
        if self.leaves.iter().any(|l| l.id == leave.id) {
            return Err(TrackerError::Conflict(format!(
                "leave {} already exists",
                leave.id
            )));
        }
        self.leaves.push(leave);
        Ok(())
    }

    pub fn update_leave(&mut self, leave: ResourceLeave) -> Result<(), TrackerError> {
        validation::validate_leave(&leave)?;
        let Some(existing) = self.leaves.iter_mut().find(|l| l.id == leave.id) else {
            return Err(TrackerError::NotFound(format!(
                "leave {} not found",
                leave.id
            )));
        };
        *existing = leave;
        Ok(())
    }

    pub fn find_leave(&self, leave_id: &str) -> Option<&ResourceLeave> {
        self.leaves.iter().find(|l| l.id == leave_id)
    }

    pub fn remove_leave(&mut self, leave_id: &str) -> bool {
        let before = self.leaves.len();
        self.leaves.retain(|l| l.id != leave_id);
        self.leaves.len() != before
    }

    /// Leaves for one resource, ascending by start date.
    pub fn leaves_for_resource(&self, resource_id: &str) -> Vec<ResourceLeave> {
        let mut result: Vec<ResourceLeave> = self
            .leaves
            .iter()
            .filter(|l| l.resource_id == resource_id)
            .cloned()
            .collect();
        result.sort_by_key(|l| l.start_date);
        result
    }

    // ---- allocation grid ----

    /// Materialize every allocation row.
    pub fn allocations(&self) -> Result<Vec<Allocation>, PolarsError> {
        let df = &self.allocations_df;
        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            rows.push(Allocation::from_dataframe_row(df, idx)?);
        }
        Ok(rows)
    }

    pub fn allocations_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<Allocation>, PolarsError> {
        Ok(self
            .allocations()?
            .into_iter()
            .filter(|allocation| allocation.is_for_period(year, month))
            .collect())
    }

    pub fn find_allocation(&self, allocation_id: &str) -> Result<Option<Allocation>, PolarsError> {
        if self.allocations_df.height() == 0 {
            return Ok(None);
        }
        let ids = self.allocations_df.column("id")?.str()?;
        for (idx, id_opt) in ids.into_iter().enumerate() {
            if id_opt == Some(allocation_id) {
                let allocation = Allocation::from_dataframe_row(&self.allocations_df, idx)?;
                return Ok(Some(allocation));
            }
        }
        Ok(None)
    }

    /// The row occupying a (project, role, year, month, week) slot, if any.
    pub fn find_slot(
        &self,
        project_id: &str,
        role_id: &str,
        year: i32,
        month: u32,
        week: u32,
    ) -> Result<Option<Allocation>, PolarsError> {
        Ok(self.allocations()?.into_iter().find(|allocation| {
            allocation.project_id == project_id
                && allocation.role_id == role_id
                && allocation.year == year
                && allocation.month == month
                && allocation.week == week
        }))
    }

    /// Deterministic row id for a slot; rows created internally use it.
    fn slot_id(project_id: &str, role_id: &str, year: i32, month: u32, week: u32) -> String {
        format!("{project_id}-{role_id}-{year}{month:02}w{week}")
    }

    fn check_references(&self, allocation: &Allocation) -> Result<(), TrackerError> {
        if self.find_project(&allocation.project_id).is_none() {
            return Err(TrackerError::Invalid(format!(
                "unknown project {}",
                allocation.project_id
            )));
        }
        if self.find_role(&allocation.role_id).is_none() {
            return Err(TrackerError::Invalid(format!(
                "unknown role {}",
                allocation.role_id
            )));
        }
        for resource_id in &allocation.resource_ids {
            if self.find_resource(resource_id).is_none() {
                return Err(TrackerError::Invalid(format!(
                    "unknown resource {resource_id}"
                )));
            }
        }
        Ok(())
    }

    pub fn upsert_allocation_record(&mut self, mut allocation: Allocation) -> Result<Allocation, TrackerError> {
        if allocation.id.trim().is_empty() {
            allocation.id = Self::slot_id(
                &allocation.project_id,
                &allocation.role_id,
                allocation.year,
                allocation.month,
                allocation.week,
            );
        }
        validation::validate_allocation(&allocation)?;
        self.check_references(&allocation)?;

        if let Some(slot) = self.find_slot(
            &allocation.project_id,
            &allocation.role_id,
            allocation.year,
            allocation.month,
            allocation.week,
        )? {
            if slot.id != allocation.id {
                return Err(TrackerError::Conflict(format!(
                    "allocation already exists for project {} role {} at {}-{} week {}",
                    allocation.project_id,
                    allocation.role_id,
                    allocation.year,
                    allocation.month,
                    allocation.week
                )));
            }
        }

        let id_exists = self.find_allocation(&allocation.id)?.is_some();
        if id_exists {
            self.update_string_column("project_id", &allocation.id, &allocation.project_id)?;
            self.update_string_column("role_id", &allocation.id, &allocation.role_id)?;
            self.update_list_str_column(
                "resource_ids",
                &allocation.id,
                allocation.resource_ids.clone(),
            )?;
            self.update_i32_column("year", &allocation.id, allocation.year)?;
            self.update_i32_column("month", &allocation.id, allocation.month as i32)?;
            self.update_i32_column("week", &allocation.id, allocation.week as i32)?;
            self.update_float_column("planned_hours", &allocation.id, allocation.planned_hours)?;
            self.update_float_column("actual_hours", &allocation.id, allocation.actual_hours)?;
            self.update_opt_string_column("notes", &allocation.id, allocation.notes.as_deref())?;
            return Ok(allocation);
        }

        let row = allocation.to_dataframe_row().map_err(TrackerError::from)?;
        self.allocations_df = self
            .allocations_df
            .vstack(&row)
            .map_err(TrackerError::from)?;
        Ok(allocation)
    }

    /// Create or update the slot's row, touching only the supplied hours.
    pub fn record_hours(
        &mut self,
        project_id: &str,
        role_id: &str,
        year: i32,
        month: u32,
        week: u32,
        planned: Option<f64>,
        actual: Option<f64>,
    ) -> Result<Allocation, TrackerError> {
        let mut allocation = match self.find_slot(project_id, role_id, year, month, week)? {
            Some(existing) => existing,
            None => Allocation::new(
                Self::slot_id(project_id, role_id, year, month, week),
                project_id,
                role_id,
                year,
                month,
                week,
            ),
        };
        if let Some(planned) = planned {
            allocation.planned_hours = planned;
        }
        if let Some(actual) = actual {
            allocation.actual_hours = actual;
        }
        self.upsert_allocation_record(allocation)
    }

    pub fn set_planned_hours(&mut self, allocation_id: &str, hours: f64) -> Result<(), TrackerError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(TrackerError::Invalid(format!("invalid planned_hours {hours}")));
        }
        self.require_allocation(allocation_id)?;
        self.update_float_column("planned_hours", allocation_id, hours)?;
        Ok(())
    }

    pub fn set_actual_hours(&mut self, allocation_id: &str, hours: f64) -> Result<(), TrackerError> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(TrackerError::Invalid(format!("invalid actual_hours {hours}")));
        }
        self.require_allocation(allocation_id)?;
        self.update_float_column("actual_hours", allocation_id, hours)?;
        Ok(())
    }

    pub fn set_allocation_notes(
        &mut self,
        allocation_id: &str,
        notes: Option<&str>,
    ) -> Result<(), TrackerError> {
        self.require_allocation(allocation_id)?;
        self.update_opt_string_column("notes", allocation_id, notes)?;
        Ok(())
    }

    fn require_allocation(&self, allocation_id: &str) -> Result<(), TrackerError> {
        if self.find_allocation(allocation_id)?.is_none() {
            return Err(TrackerError::NotFound(format!(
                "allocation {allocation_id} not found"
            )));
        }
        Ok(())
    }

    pub fn delete_allocation(&mut self, allocation_id: &str) -> Result<bool, PolarsError> {
        if self.allocations_df.height() == 0 {
            return Ok(false);
        }
        let snapshot = self.allocations()?;
        if !snapshot.iter().any(|a| a.id == allocation_id) {
            return Ok(false);
        }
        self.allocations_df = DataFrame::empty_with_schema(&Self::default_schema());
        for allocation in snapshot {
            if allocation.id == allocation_id {
                continue;
            }
            let row = allocation.to_dataframe_row()?;
            self.allocations_df = self.allocations_df.vstack(&row)?;
        }
        Ok(true)
    }

    /// Put a resource on a project for every week of a month: add it to
    /// each existing (project, role) slot or seed zero-hour rows. The role
    /// defaults to the resource's own.
    pub fn assign_resource(
        &mut self,
        project_id: &str,
        resource_id: &str,
        year: i32,
        month: u32,
        role_id: Option<&str>,
    ) -> Result<Vec<Allocation>, TrackerError> {
        let resource = self
            .find_resource(resource_id)
            .ok_or_else(|| TrackerError::NotFound(format!("resource {resource_id} not found")))?;
        let role_id = role_id.unwrap_or(resource.role_id.as_str()).to_string();
        if self.find_project(project_id).is_none() {
            return Err(TrackerError::NotFound(format!(
                "project {project_id} not found"
            )));
        }

        let mut touched = Vec::with_capacity(5);
        for week in 1..=5u32 {
            let mut allocation = match self.find_slot(project_id, &role_id, year, month, week)? {
                Some(existing) => existing,
                None => Allocation::new(
                    Self::slot_id(project_id, &role_id, year, month, week),
                    project_id,
                    &role_id,
                    year,
                    month,
                    week,
                ),
            };
            if !allocation.includes_resource(resource_id) {
                allocation.resource_ids.push(resource_id.to_string());
            }
            touched.push(self.upsert_allocation_record(allocation)?);
        }
        Ok(touched)
    }

    // ---- derived read paths ----

    fn summarize_resource(
        &self,
        resource: &Resource,
        allocations: &[Allocation],
        today: NaiveDate,
    ) -> ResourceSummary {
        ResourceSummary {
            resource: resource.clone(),
            role: self.find_role(&resource.role_id).cloned(),
            status: derive::resolve_status(resource, allocations, &self.leaves, today),
            workload_percent: derive::workload_percent(resource, allocations, today),
            current_projects: derive::current_projects(
                resource,
                allocations,
                &self.projects,
                today,
            ),
            current_leave: derive::current_leave(resource, &self.leaves, today),
            upcoming_leaves: derive::upcoming_leaves(resource, &self.leaves, today),
        }
    }

    pub fn resource_summary(
        &self,
        resource_id: &str,
        today: NaiveDate,
    ) -> Result<Option<ResourceSummary>, PolarsError> {
        let Some(resource) = self.find_resource(resource_id) else {
            return Ok(None);
        };
        let allocations = self.allocations()?;
        Ok(Some(self.summarize_resource(resource, &allocations, today)))
    }

    /// Summaries for every active resource. Derivation per resource is
    /// independent, so the fan-out runs on the rayon pool.
    pub fn resource_summaries(&self, today: NaiveDate) -> Result<Vec<ResourceSummary>, PolarsError> {
        let allocations = self.allocations()?;
        Ok(self
            .resources
            .par_iter()
            .filter(|resource| resource.is_active)
            .map(|resource| self.summarize_resource(resource, &allocations, today))
            .collect())
    }

    pub fn project_summary(
        &self,
        project_id: &str,
        today: NaiveDate,
    ) -> Result<Option<ProjectSummary>, PolarsError> {
        let Some(project) = self.find_project(project_id) else {
            return Ok(None);
        };
        let allocations = self.allocations()?;
        let monthly: Vec<&Allocation> = allocations
            .iter()
            .filter(|allocation| {
                allocation.project_id == project.id
                    && allocation.is_for_period(today.year(), today.month())
            })
            .collect();

        let mut allocated: Vec<AllocatedResource> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for allocation in &monthly {
            for resource_id in &allocation.resource_ids {
                if !seen.insert(resource_id.as_str()) {
                    continue;
                }
                let Some(resource) = self.find_resource(resource_id) else {
                    continue;
                };
                let planned: f64 = monthly
                    .iter()
                    .filter(|a| a.includes_resource(resource_id))
                    .map(|a| a.planned_hours)
                    .sum();
                allocated.push(AllocatedResource {
                    id: resource.id.clone(),
                    code: resource.code.clone(),
                    name: resource.name.clone(),
                    role: self
                        .find_role(&resource.role_id)
                        .map(|role| role.name.clone())
                        .unwrap_or_default(),
                    status: derive::resolve_status(resource, &allocations, &self.leaves, today),
                    planned_hours: aggregate::round_to_tenth(planned),
                });
            }
        }

        let month_rows: Vec<Allocation> = monthly.iter().map(|a| (*a).clone()).collect();
        let total_planned_hours = aggregate::sum_hours(&month_rows, HoursField::Planned);
        Ok(Some(ProjectSummary {
            project: project.clone(),
            resource_count: allocated.len(),
            allocated_resources: allocated,
            total_planned_hours,
        }))
    }

    pub fn dashboard_overview(&self, today: NaiveDate) -> Result<DashboardOverview, PolarsError> {
        let allocations = self.allocations()?;
        let monthly: Vec<Allocation> = allocations
            .iter()
            .filter(|allocation| allocation.is_for_period(today.year(), today.month()))
            .cloned()
            .collect();

        let total_planned_raw: f64 = monthly.iter().map(|a| a.planned_hours).sum();
        let total_actual_raw: f64 = monthly.iter().map(|a| a.actual_hours).sum();
        let utilization = if total_planned_raw > 0.0 {
            (total_actual_raw / total_planned_raw) * 100.0
        } else {
            0.0
        };

        Ok(DashboardOverview {
            total_projects: self.projects.iter().filter(|p| !p.is_archived).count(),
            active_projects: self
                .projects
                .iter()
                .filter(|p| !p.is_archived && p.is_ongoing)
                .count(),
            total_resources: self.resources.iter().filter(|r| r.is_active).count(),
            total_allocations: allocations.len(),
            monthly_utilization: (utilization * 100.0).round() / 100.0,
            total_planned_hours: aggregate::round_to_tenth(total_planned_raw),
            total_actual_hours: aggregate::round_to_tenth(total_actual_raw),
        })
    }

    pub fn dashboard_monthly(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthlyDashboard, PolarsError> {
        let monthly = self.allocations_for_month(year, month)?;

        let weekly_breakdown = aggregate::group_by_week(&monthly)
            .into_iter()
            .map(|(week, totals)| WeekBreakdown {
                week,
                planned: totals.planned,
                actual: totals.actual,
            })
            .collect();

        let mut project_breakdown: Vec<ProjectBreakdown> = aggregate::group_by_project(&monthly)
            .into_iter()
            .filter_map(|(project_id, totals)| {
                // Rows whose project vanished from the catalog are dropped
                // from the breakdown, matching the join on the upstream path.
                let project = self.find_project(&project_id)?;
                Some(ProjectBreakdown {
                    project_id,
                    code: project.code.clone(),
                    name: project.name.clone(),
                    planned: totals.planned,
                    actual: totals.actual,
                })
            })
            .collect();
        project_breakdown.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(MonthlyDashboard {
            year,
            month,
            weekly_breakdown,
            project_breakdown,
            total_planned: aggregate::sum_hours(&monthly, HoursField::Planned),
            total_actual: aggregate::sum_hours(&monthly, HoursField::Actual),
        })
    }

    // ---- id and code suggestions ----

    fn next_numeric_id<'a, I>(prefix: &str, existing: I) -> String
    where
        I: Iterator<Item = &'a str>,
    {
        let max = existing
            .filter_map(|id| id.strip_prefix(prefix))
            .filter_map(|rest| rest.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{prefix}{}", max + 1)
    }

    pub fn next_role_id(&self) -> String {
        Self::next_numeric_id("role-", self.roles.iter().map(|r| r.id.as_str()))
    }

    pub fn next_resource_id(&self) -> String {
        Self::next_numeric_id("res-", self.resources.iter().map(|r| r.id.as_str()))
    }

    pub fn next_project_id(&self) -> String {
        Self::next_numeric_id("prj-", self.projects.iter().map(|p| p.id.as_str()))
    }

    pub fn next_leave_id(&self) -> String {
        Self::next_numeric_id("lv-", self.leaves.iter().map(|l| l.id.as_str()))
    }

    pub fn generate_project_code(&self, name: &str, description: Option<&str>) -> String {
        let base = codes::suggest_code(name, description);
        codes::dedupe_code(&base, self.projects.iter().map(|p| p.code.as_str()))
    }

    pub fn generate_resource_code(&self, name: &str) -> String {
        let base = codes::suggest_code(name, None);
        codes::dedupe_code(&base, self.resources.iter().map(|r| r.code.as_str()))
    }

    // ---- column rewrite helpers ----

    fn update_string_column(
        &mut self,
        column_name: &str,
        allocation_id: &str,
        new_value: &str,
    ) -> Result<(), PolarsError> {
        let id_col = self.allocations_df.column("id")?;
        let target_col = self.allocations_df.column(column_name)?;

        let new_series = target_col
            .str()?
            .into_iter()
            .zip(id_col.str()?.into_iter())
            .map(|(val, id)| {
                if id == Some(allocation_id) {
                    Some(new_value)
                } else {
                    val
                }
            })
            .collect::<StringChunked>()
            .into_series()
            .with_name(column_name.into());

        self.allocations_df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_opt_string_column(
        &mut self,
        column_name: &str,
        allocation_id: &str,
        new_value: Option<&str>,
    ) -> Result<(), PolarsError> {
        let id_col = self.allocations_df.column("id")?;
        let target_col = self.allocations_df.column(column_name)?;

        let new_series = target_col
            .str()?
            .into_iter()
            .zip(id_col.str()?.into_iter())
            .map(|(val, id)| {
                if id == Some(allocation_id) {
                    new_value
                } else {
                    val
                }
            })
            .collect::<StringChunked>()
            .into_series()
            .with_name(column_name.into());

        self.allocations_df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_i32_column(
        &mut self,
        column_name: &str,
        allocation_id: &str,
        new_value: i32,
    ) -> Result<(), PolarsError> {
        let id_col = self.allocations_df.column("id")?;
        let target_col = self.allocations_df.column(column_name)?;

        let new_series = target_col
            .i32()?
            .into_iter()
            .zip(id_col.str()?.into_iter())
            .map(|(val, id)| {
                if id == Some(allocation_id) {
                    Some(new_value)
                } else {
                    val
                }
            })
            .collect::<Int32Chunked>()
            .into_series()
            .with_name(column_name.into());

        self.allocations_df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_float_column(
        &mut self,
        column_name: &str,
        allocation_id: &str,
        new_value: f64,
    ) -> Result<(), PolarsError> {
        let id_col = self.allocations_df.column("id")?;
        let target_col = self.allocations_df.column(column_name)?;

        let new_series = target_col
            .f64()?
            .into_iter()
            .zip(id_col.str()?.into_iter())
            .map(|(val, id)| {
                if id == Some(allocation_id) {
                    Some(new_value)
                } else {
                    val
                }
            })
            .collect::<Float64Chunked>()
            .into_series()
            .with_name(column_name.into());

        self.allocations_df.replace(column_name, new_series)?;
        Ok(())
    }

    fn update_list_str_column(
        &mut self,
        column_name: &str,
        allocation_id: &str,
        new_values: Vec<String>,
    ) -> Result<(), PolarsError> {
        let id_col = self.allocations_df.column("id")?;
        let target_col = self.allocations_df.column(column_name)?;

        let replacement = Series::new(PlSmallStr::from_static(""), new_values);
        let new_series = target_col
            .list()?
            .into_iter()
            .zip(id_col.str()?.into_iter())
            .map(|(val, id)| {
                if id == Some(allocation_id) {
                    Some(replacement.clone())
                } else {
                    val
                }
            })
            .collect::<ListChunked>()
            .into_series()
            .with_name(column_name.into());

        self.allocations_df.replace(column_name, new_series)?;
        Ok(())
    }
}
