use crate::allocation::Allocation;
use crate::leave::ResourceLeave;
use crate::resource::Resource;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_allocation(allocation: &Allocation) -> Result<(), ValidationError> {
    if allocation.id.trim().is_empty() {
        return Err(ValidationError::new("allocation requires a non-empty id"));
    }
    if allocation.project_id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "allocation {} requires a non-empty project_id",
            allocation.id
        )));
    }
    if allocation.role_id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "allocation {} requires a non-empty role_id",
            allocation.id
        )));
    }
    if !(1..=12).contains(&allocation.month) {
        return Err(ValidationError::new(format!(
            "allocation {} has invalid month {} (must be 1-12)",
            allocation.id, allocation.month
        )));
    }
    if !(1..=5).contains(&allocation.week) {
        return Err(ValidationError::new(format!(
            "allocation {} has invalid week {} (must be 1-5)",
            allocation.id, allocation.week
        )));
    }
    if !allocation.planned_hours.is_finite() || allocation.planned_hours < 0.0 {
        return Err(ValidationError::new(format!(
            "allocation {} has invalid planned_hours {}",
            allocation.id, allocation.planned_hours
        )));
    }
    if !allocation.actual_hours.is_finite() || allocation.actual_hours < 0.0 {
        return Err(ValidationError::new(format!(
            "allocation {} has invalid actual_hours {}",
            allocation.id, allocation.actual_hours
        )));
    }

    let mut seen = HashSet::with_capacity(allocation.resource_ids.len());
    for resource_id in &allocation.resource_ids {
        if resource_id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "allocation {} contains an empty resource id",
                allocation.id
            )));
        }
        if !seen.insert(resource_id.as_str()) {
            return Err(ValidationError::new(format!(
                "allocation {} lists resource {} more than once",
                allocation.id, resource_id
            )));
        }
    }

    Ok(())
}

pub fn validate_allocation_collection(allocations: &[Allocation]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(allocations.len());
    let mut seen_slots = HashSet::with_capacity(allocations.len());
    for allocation in allocations {
        if !seen_ids.insert(allocation.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate allocation id {}",
                allocation.id
            )));
        }
        let slot = (
            allocation.project_id.as_str(),
            allocation.role_id.as_str(),
            allocation.year,
            allocation.month,
            allocation.week,
        );
        if !seen_slots.insert(slot) {
            return Err(ValidationError::new(format!(
                "duplicate allocation slot for project {} role {} at {}-{} week {}",
                allocation.project_id,
                allocation.role_id,
                allocation.year,
                allocation.month,
                allocation.week
            )));
        }
        validate_allocation(allocation)?;
    }
    Ok(())
}

pub fn validate_leave(leave: &ResourceLeave) -> Result<(), ValidationError> {
    if leave.id.trim().is_empty() {
        return Err(ValidationError::new("leave requires a non-empty id"));
    }
    if leave.resource_id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "leave {} requires a non-empty resource_id",
            leave.id
        )));
    }
    if leave.start_date > leave.end_date {
        return Err(ValidationError::new(format!(
            "leave {} start date {} is after end date {}",
            leave.id, leave.start_date, leave.end_date
        )));
    }
    Ok(())
}

pub fn validate_leave_collection(leaves: &[ResourceLeave]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(leaves.len());
    for leave in leaves {
        if !seen_ids.insert(leave.id.as_str()) {
            return Err(ValidationError::new(format!("duplicate leave id {}", leave.id)));
        }
        validate_leave(leave)?;
    }
    Ok(())
}

/// Write-path bounds check. The derivation core still tolerates
/// out-of-range availability defensively.
pub fn validate_resource(resource: &Resource) -> Result<(), ValidationError> {
    if resource.id.trim().is_empty() {
        return Err(ValidationError::new("resource requires a non-empty id"));
    }
    if resource.code.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "resource {} requires a non-empty code",
            resource.id
        )));
    }
    if resource.role_id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "resource {} requires a non-empty role_id",
            resource.id
        )));
    }
    if !(0..=100).contains(&resource.availability) {
        return Err(ValidationError::new(format!(
            "resource {} has invalid availability {} (must be 0-100)",
            resource.id, resource.availability
        )));
    }
    Ok(())
}

pub fn validate_resource_collection(resources: &[Resource]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    let mut seen_codes = HashSet::with_capacity(resources.len());
    for resource in resources {
        if !seen_ids.insert(resource.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }
        if !seen_codes.insert(resource.code.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate resource code {}",
                resource.code
            )));
        }
        validate_resource(resource)?;
    }
    Ok(())
}
