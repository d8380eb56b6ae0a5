use super::{PersistenceError, PersistenceResult};
use crate::allocation::Allocation;
use crate::leave::ResourceLeave;
use crate::project::Project;
use crate::resource::{Resource, Role};
use crate::tracker::Tracker;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct TrackerSnapshot {
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    leaves: Vec<ResourceLeave>,
    #[serde(default)]
    allocations: Vec<Allocation>,
}

impl TrackerSnapshot {
    fn from_tracker(tracker: &Tracker) -> PersistenceResult<Self> {
        super::validate_tracker(tracker)?;
        Ok(Self {
            roles: tracker.roles().to_vec(),
            resources: tracker.resources().to_vec(),
            projects: tracker.projects().to_vec(),
            leaves: tracker.leaves().to_vec(),
            allocations: tracker.allocations()?,
        })
    }

    fn into_tracker(self) -> PersistenceResult<Tracker> {
        super::validate_allocations(&self.allocations)?;
        let mut tracker =
            Tracker::from_parts(self.roles, self.resources, self.projects, self.leaves);
        for allocation in self.allocations {
            tracker.upsert_allocation_record(allocation)?;
        }
        super::validate_tracker(&tracker)?;
        Ok(tracker)
    }
}

pub fn save_tracker_to_json<P: AsRef<Path>>(tracker: &Tracker, path: P) -> PersistenceResult<()> {
    let snapshot = TrackerSnapshot::from_tracker(tracker)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_tracker_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Tracker> {
    let file = File::open(path)?;
    let snapshot: TrackerSnapshot = serde_json::from_reader(file)?;
    snapshot.into_tracker()
}

/// One allocation row of the grid export. Hours travel as one-decimal
/// strings, the upstream storage representation.
#[derive(Default, Serialize, Deserialize)]
struct AllocationCsvRecord {
    id: String,
    project_id: String,
    role_id: String,
    resource_ids: String,
    year: i32,
    month: u32,
    week: u32,
    planned_hours: String,
    actual_hours: String,
    #[serde(default)]
    notes: String,
}

impl From<&Allocation> for AllocationCsvRecord {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: allocation.id.clone(),
            project_id: allocation.project_id.clone(),
            role_id: allocation.role_id.clone(),
            resource_ids: join_ids(&allocation.resource_ids),
            year: allocation.year,
            month: allocation.month,
            week: allocation.week,
            planned_hours: format_hours(allocation.planned_hours),
            actual_hours: format_hours(allocation.actual_hours),
            notes: allocation.notes.clone().unwrap_or_default(),
        }
    }
}

impl AllocationCsvRecord {
    fn into_allocation(self) -> PersistenceResult<Allocation> {
        let mut allocation = Allocation::new(
            self.id,
            self.project_id,
            self.role_id,
            self.year,
            self.month,
            self.week,
        );
        allocation.resource_ids = split_ids(&self.resource_ids);
        allocation.planned_hours = parse_hours(&self.planned_hours)?;
        allocation.actual_hours = parse_hours(&self.actual_hours)?;
        allocation.notes = parse_string_option(self.notes);
        Ok(allocation)
    }
}

pub fn save_allocations_to_csv<P: AsRef<Path>>(tracker: &Tracker, path: P) -> PersistenceResult<()> {
    super::validate_tracker(tracker)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for allocation in tracker.allocations()? {
        writer.serialize(AllocationCsvRecord::from(&allocation))?;
    }
    writer.flush()?;
    Ok(())
}

/// Load grid rows from CSV. Catalog data (roles, resources, projects,
/// leaves) lives in the JSON snapshot only; callers merge these rows into
/// a tracker that already has its catalogs.
pub fn load_allocations_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Allocation>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut allocations = Vec::new();
    for record in reader.deserialize::<AllocationCsvRecord>() {
        allocations.push(record?.into_allocation()?);
    }

    if allocations.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no allocations".into(),
        ));
    }

    super::validate_allocations(&allocations)?;
    Ok(allocations)
}

fn format_hours(value: f64) -> String {
    format!("{value:.1}")
}

fn parse_hours(input: &str) -> PersistenceResult<f64> {
    if input.trim().is_empty() {
        return Ok(0.0);
    }
    input
        .trim()
        .parse::<f64>()
        .map_err(|e| PersistenceError::InvalidData(format!("invalid hours '{input}': {e}")))
}

fn join_ids(values: &[String]) -> String {
    values.join(";")
}

fn split_ids(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(';').map(|s| s.trim().to_string()).collect()
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
