use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    Allocation, LeaveType, Project, Resource, ResourceLeave, Role, Tracker, TrackerError,
    tracker::{DashboardOverview, MonthlyDashboard, ProjectSummary, ResourceSummary},
};

#[derive(Clone)]
pub struct AppState {
    tracker: Arc<RwLock<Tracker>>,
}

impl AppState {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker: Arc::new(RwLock::new(tracker)),
        }
    }

    pub fn with_shared(tracker: Arc<RwLock<Tracker>>) -> Self {
        Self { tracker }
    }

    fn tracker(&self) -> Arc<RwLock<Tracker>> {
        self.tracker.clone()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<polars::prelude::PolarsError> for ApiError {
    fn from(value: polars::prelude::PolarsError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl From<TrackerError> for ApiError {
    fn from(value: TrackerError) -> Self {
        match value {
            TrackerError::NotFound(message) => ApiError::NotFound(message),
            TrackerError::Conflict(message) => ApiError::Conflict(message),
            TrackerError::Invalid(message) => ApiError::Invalid(message),
            TrackerError::DataFrame(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Conflict(message) => {
                let body = Json(ErrorBody {
                    error: "conflict",
                    message,
                });
                (StatusCode::CONFLICT, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/:id", get(get_role).put(update_role).delete(delete_role))
        .route("/resources", get(list_resources).post(create_resource))
        .route(
            "/resources/:id",
            get(get_resource).patch(update_resource).delete(delete_resource),
        )
        .route("/resources/:id/leaves", get(list_resource_leaves))
        .route("/resources/generate-code", get(generate_resource_code))
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/projects/generate-code", get(generate_project_code))
        .route("/allocations", get(list_allocations).post(create_allocation))
        .route(
            "/allocations/:id",
            get(get_allocation).put(update_allocation).delete(delete_allocation),
        )
        .route("/allocations/assign", post(assign_resource))
        .route("/leaves", get(list_leaves).post(create_leave))
        .route(
            "/leaves/:id",
            get(get_leave).put(update_leave).delete(delete_leave),
        )
        .route("/dashboard/overview", get(dashboard_overview))
        .route("/dashboard/monthly", get(dashboard_monthly))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, tracker: Tracker) -> std::io::Result<()> {
    let state = AppState::new(tracker);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ---- roles ----

#[derive(Debug, Deserialize)]
struct RolePayload {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    order: Option<i64>,
}

async fn list_roles(State(state): State<AppState>) -> Json<Vec<Role>> {
    let tracker = state.tracker();
    let mut roles = {
        let guard = tracker.read();
        guard.roles().to_vec()
    };
    roles.sort_by_key(|role| role.order);
    Json(roles)
}

async fn create_role(
    State(state): State<AppState>,
    Json(payload): Json<RolePayload>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let id = payload
        .id
        .unwrap_or_else(|| guard.next_role_id());
    if guard.find_role(&id).is_some() {
        return Err(ApiError::Conflict(format!("role {id} already exists")));
    }
    let mut role = Role::new(id.clone(), payload.name);
    role.description = payload.description;
    role.order = payload.order.unwrap_or(0);
    guard.upsert_role(role.clone())?;
    Ok((StatusCode::CREATED, Json(role)))
}

async fn get_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Json<Role>, ApiError> {
    let tracker = state.tracker();
    let guard = tracker.read();
    match guard.find_role(&role_id) {
        Some(role) => Ok(Json(role.clone())),
        None => Err(ApiError::not_found(format!("role {role_id} not found"))),
    }
}

async fn update_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<RolePayload>,
) -> Result<Json<Role>, ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let Some(existing) = guard.find_role(&role_id).cloned() else {
        return Err(ApiError::not_found(format!("role {role_id} not found")));
    };
    let role = Role {
        id: role_id,
        name: payload.name,
        description: payload.description.or(existing.description),
        order: payload.order.unwrap_or(existing.order),
    };
    guard.upsert_role(role.clone())?;
    Ok(Json(role))
}

async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tracker = state.tracker();
    let removed = {
        let mut guard = tracker.write();
        guard.remove_role(&role_id)?
    };
    if !removed {
        return Err(ApiError::not_found(format!("role {role_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- resources ----

#[derive(Debug, Deserialize)]
struct CreateResourcePayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    code: Option<String>,
    name: String,
    #[serde(default)]
    email: Option<String>,
    role_id: String,
    #[serde(default)]
    specialization: Option<String>,
    #[serde(default)]
    availability: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UpdateResourcePayload {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role_id: Option<String>,
    #[serde(default)]
    specialization: Option<String>,
    #[serde(default)]
    availability: Option<i64>,
    #[serde(default)]
    is_active: Option<bool>,
}

async fn list_resources(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceSummary>>, ApiError> {
    let tracker = state.tracker();
    let summaries = {
        let guard = tracker.read();
        guard.resource_summaries(today())?
    };
    Ok(Json(summaries))
}

async fn create_resource(
    State(state): State<AppState>,
    Json(payload): Json<CreateResourcePayload>,
) -> Result<(StatusCode, Json<ResourceSummary>), ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let id = payload
        .id
        .unwrap_or_else(|| guard.next_resource_id());
    let code = payload
        .code
        .unwrap_or_else(|| guard.generate_resource_code(&payload.name));
    let mut resource = Resource::new(id.clone(), code, payload.name, payload.role_id);
    resource.email = payload.email;
    resource.specialization = payload.specialization;
    resource.availability = payload.availability.unwrap_or(100);
    guard.add_resource(resource)?;
    let summary = guard
        .resource_summary(&id, today())?
        .ok_or_else(|| ApiError::internal("resource not found after creation"))?;
    Ok((StatusCode::CREATED, Json(summary)))
}

async fn get_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
) -> Result<Json<ResourceSummary>, ApiError> {
    let tracker = state.tracker();
    let summary = {
        let guard = tracker.read();
        guard.resource_summary(&resource_id, today())?
    };
    match summary {
        Some(summary) => Ok(Json(summary)),
        None => Err(ApiError::not_found(format!(
            "resource {resource_id} not found"
        ))),
    }
}

async fn update_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
    Json(payload): Json<UpdateResourcePayload>,
) -> Result<Json<ResourceSummary>, ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let Some(mut resource) = guard.find_resource(&resource_id).cloned() else {
        return Err(ApiError::not_found(format!(
            "resource {resource_id} not found"
        )));
    };
    if let Some(code) = payload.code {
        resource.code = code;
    }
    if let Some(name) = payload.name {
        resource.name = name;
    }
    if let Some(email) = payload.email {
        resource.email = Some(email);
    }
    if let Some(role_id) = payload.role_id {
        resource.role_id = role_id;
    }
    if let Some(specialization) = payload.specialization {
        resource.specialization = Some(specialization);
    }
    if let Some(availability) = payload.availability {
        resource.availability = availability;
    }
    if let Some(is_active) = payload.is_active {
        resource.is_active = is_active;
    }
    guard.update_resource(resource)?;
    let summary = guard
        .resource_summary(&resource_id, today())?
        .ok_or_else(|| ApiError::internal("resource not found after update"))?;
    Ok(Json(summary))
}

async fn delete_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tracker = state.tracker();
    let removed = {
        let mut guard = tracker.write();
        guard.remove_resource(&resource_id)?
    };
    if !removed {
        return Err(ApiError::not_found(format!(
            "resource {resource_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// A leave annotated with its relation to today, for the per-resource
/// leave listing.
#[derive(Debug, Serialize)]
struct LeaveView {
    #[serde(flatten)]
    leave: ResourceLeave,
    is_active: bool,
    is_upcoming: bool,
}

async fn list_resource_leaves(
    State(state): State<AppState>,
    Path(resource_id): Path<String>,
) -> Result<Json<Vec<LeaveView>>, ApiError> {
    let tracker = state.tracker();
    let guard = tracker.read();
    if guard.find_resource(&resource_id).is_none() {
        return Err(ApiError::not_found(format!(
            "resource {resource_id} not found"
        )));
    }
    let reference = today();
    let views = guard
        .leaves_for_resource(&resource_id)
        .into_iter()
        .map(|leave| LeaveView {
            is_active: leave.is_active_on(reference),
            is_upcoming: leave.is_upcoming_on(reference),
            leave,
        })
        .collect();
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
struct GenerateCodeQuery {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

async fn generate_resource_code(
    State(state): State<AppState>,
    Query(query): Query<GenerateCodeQuery>,
) -> Json<serde_json::Value> {
    let tracker = state.tracker();
    let code = {
        let guard = tracker.read();
        guard.generate_resource_code(&query.name)
    };
    Json(json!({ "code": code }))
}

// ---- projects ----

#[derive(Debug, Deserialize)]
struct CreateProjectPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    code: Option<String>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    is_ongoing: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UpdateProjectPayload {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    is_ongoing: Option<bool>,
    #[serde(default)]
    is_archived: Option<bool>,
}

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let tracker = state.tracker();
    let projects = {
        let guard = tracker.read();
        guard
            .projects()
            .iter()
            .filter(|p| !p.is_archived)
            .cloned()
            .collect()
    };
    Json(projects)
}

async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectPayload>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let id = payload
        .id
        .unwrap_or_else(|| guard.next_project_id());
    let code = payload
        .code
        .unwrap_or_else(|| guard.generate_project_code(&payload.name, payload.description.as_deref()));
    let mut project = Project::new(id, code, payload.name);
    project.description = payload.description;
    project.start_date = payload.start_date;
    project.end_date = payload.end_date;
    project.is_ongoing = payload.is_ongoing.unwrap_or(false);
    guard.add_project(project.clone())?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectSummary>, ApiError> {
    let tracker = state.tracker();
    let summary = {
        let guard = tracker.read();
        guard.project_summary(&project_id, today())?
    };
    match summary {
        Some(summary) => Ok(Json(summary)),
        None => Err(ApiError::not_found(format!(
            "project {project_id} not found"
        ))),
    }
}

async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<UpdateProjectPayload>,
) -> Result<Json<Project>, ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let Some(mut project) = guard.find_project(&project_id).cloned() else {
        return Err(ApiError::not_found(format!(
            "project {project_id} not found"
        )));
    };
    if let Some(code) = payload.code {
        project.code = code;
    }
    if let Some(name) = payload.name {
        project.name = name;
    }
    if let Some(description) = payload.description {
        project.description = Some(description);
    }
    if let Some(start_date) = payload.start_date {
        project.start_date = Some(start_date);
    }
    if let Some(end_date) = payload.end_date {
        project.end_date = Some(end_date);
    }
    if let Some(is_ongoing) = payload.is_ongoing {
        project.is_ongoing = is_ongoing;
    }
    if let Some(is_archived) = payload.is_archived {
        project.is_archived = is_archived;
    }
    guard.update_project(project.clone())?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tracker = state.tracker();
    let removed = {
        let mut guard = tracker.write();
        guard.remove_project(&project_id)?
    };
    if !removed {
        return Err(ApiError::not_found(format!(
            "project {project_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn generate_project_code(
    State(state): State<AppState>,
    Query(query): Query<GenerateCodeQuery>,
) -> Json<serde_json::Value> {
    let tracker = state.tracker();
    let code = {
        let guard = tracker.read();
        guard.generate_project_code(&query.name, query.description.as_deref())
    };
    Json(json!({ "code": code }))
}

// ---- allocations ----

#[derive(Debug, Deserialize)]
struct AllocationsQuery {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    role_id: Option<String>,
}

async fn list_allocations(
    State(state): State<AppState>,
    Query(query): Query<AllocationsQuery>,
) -> Result<Json<Vec<Allocation>>, ApiError> {
    let reference = today();
    let year = query.year.unwrap_or_else(|| reference.year());
    let month = query.month.unwrap_or_else(|| reference.month());
    let tracker = state.tracker();
    let mut allocations = {
        let guard = tracker.read();
        guard.allocations_for_month(year, month)?
    };
    if let Some(project_id) = query.project_id {
        allocations.retain(|a| a.project_id == project_id);
    }
    if let Some(role_id) = query.role_id {
        allocations.retain(|a| a.role_id == role_id);
    }
    allocations.sort_by(|a, b| {
        a.project_id
            .cmp(&b.project_id)
            .then(a.role_id.cmp(&b.role_id))
            .then(a.week.cmp(&b.week))
    });
    Ok(Json(allocations))
}

async fn create_allocation(
    State(state): State<AppState>,
    Json(allocation): Json<Allocation>,
) -> Result<(StatusCode, Json<Allocation>), ApiError> {
    let tracker = state.tracker();
    let created = {
        let mut guard = tracker.write();
        if !allocation.id.is_empty() && guard.find_allocation(&allocation.id)?.is_some() {
            return Err(ApiError::Conflict(format!(
                "allocation {} already exists",
                allocation.id
            )));
        }
        guard.upsert_allocation_record(allocation)?
    };
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_allocation(
    State(state): State<AppState>,
    Path(allocation_id): Path<String>,
) -> Result<Json<Allocation>, ApiError> {
    let tracker = state.tracker();
    let result = {
        let guard = tracker.read();
        guard.find_allocation(&allocation_id)?
    };
    match result {
        Some(allocation) => Ok(Json(allocation)),
        None => Err(ApiError::not_found(format!(
            "allocation {allocation_id} not found"
        ))),
    }
}

async fn update_allocation(
    State(state): State<AppState>,
    Path(allocation_id): Path<String>,
    Json(allocation): Json<Allocation>,
) -> Result<Json<Allocation>, ApiError> {
    if allocation.id != allocation_id {
        return Err(ApiError::invalid(
            "allocation id in payload does not match path parameter",
        ));
    }
    let tracker = state.tracker();
    let updated = {
        let mut guard = tracker.write();
        if guard.find_allocation(&allocation_id)?.is_none() {
            return Err(ApiError::not_found(format!(
                "allocation {allocation_id} not found"
            )));
        }
        guard.upsert_allocation_record(allocation)?
    };
    Ok(Json(updated))
}

async fn delete_allocation(
    State(state): State<AppState>,
    Path(allocation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tracker = state.tracker();
    let removed = {
        let mut guard = tracker.write();
        guard.delete_allocation(&allocation_id)?
    };
    if !removed {
        return Err(ApiError::not_found(format!(
            "allocation {allocation_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct AssignResourcePayload {
    project_id: String,
    resource_id: String,
    year: i32,
    month: u32,
    #[serde(default)]
    role_id: Option<String>,
}

async fn assign_resource(
    State(state): State<AppState>,
    Json(payload): Json<AssignResourcePayload>,
) -> Result<Json<Vec<Allocation>>, ApiError> {
    let tracker = state.tracker();
    let touched = {
        let mut guard = tracker.write();
        guard.assign_resource(
            &payload.project_id,
            &payload.resource_id,
            payload.year,
            payload.month,
            payload.role_id.as_deref(),
        )?
    };
    Ok(Json(touched))
}

// ---- leaves ----

#[derive(Debug, Deserialize)]
struct LeavesQuery {
    #[serde(default)]
    resource_id: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    leave_type: Option<LeaveType>,
}

#[derive(Debug, Deserialize)]
struct CreateLeavePayload {
    #[serde(default)]
    id: Option<String>,
    resource_id: String,
    #[serde(default)]
    leave_type: Option<LeaveType>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    notes: Option<String>,
}

async fn list_leaves(
    State(state): State<AppState>,
    Query(query): Query<LeavesQuery>,
) -> Json<Vec<ResourceLeave>> {
    let tracker = state.tracker();
    let mut leaves = {
        let guard = tracker.read();
        guard.leaves().to_vec()
    };
    if let Some(resource_id) = query.resource_id {
        leaves.retain(|l| l.resource_id == resource_id);
    }
    match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => leaves.retain(|l| l.overlaps(start, end)),
        (Some(start), None) => leaves.retain(|l| l.end_date >= start),
        (None, Some(end)) => leaves.retain(|l| l.start_date <= end),
        (None, None) => {}
    }
    if let Some(leave_type) = query.leave_type {
        leaves.retain(|l| l.leave_type == leave_type);
    }
    leaves.sort_by_key(|l| l.start_date);
    Json(leaves)
}

async fn create_leave(
    State(state): State<AppState>,
    Json(payload): Json<CreateLeavePayload>,
) -> Result<(StatusCode, Json<ResourceLeave>), ApiError> {
    let tracker = state.tracker();
    let mut guard = tracker.write();
    let id = payload.id.unwrap_or_else(|| guard.next_leave_id());
    let mut leave = ResourceLeave::new(
        id,
        payload.resource_id,
        payload.start_date,
        payload.end_date,
    );
    leave.leave_type = payload.leave_type.unwrap_or_default();
    leave.notes = payload.notes;
    guard.add_leave(leave.clone())?;
    Ok((StatusCode::CREATED, Json(leave)))
}

async fn get_leave(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> Result<Json<ResourceLeave>, ApiError> {
    let tracker = state.tracker();
    let guard = tracker.read();
    match guard.find_leave(&leave_id) {
        Some(leave) => Ok(Json(leave.clone())),
        None => Err(ApiError::not_found(format!("leave {leave_id} not found"))),
    }
}

async fn update_leave(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
    Json(leave): Json<ResourceLeave>,
) -> Result<Json<ResourceLeave>, ApiError> {
    if leave.id != leave_id {
        return Err(ApiError::invalid(
            "leave id in payload does not match path parameter",
        ));
    }
    let tracker = state.tracker();
    {
        let mut guard = tracker.write();
        guard.update_leave(leave.clone())?;
    }
    Ok(Json(leave))
}

async fn delete_leave(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tracker = state.tracker();
    let removed = {
        let mut guard = tracker.write();
        guard.remove_leave(&leave_id)
    };
    if !removed {
        return Err(ApiError::not_found(format!("leave {leave_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- dashboards ----

async fn dashboard_overview(
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let tracker = state.tracker();
    let overview = {
        let guard = tracker.read();
        guard.dashboard_overview(today())?
    };
    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
struct MonthlyQuery {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
}

async fn dashboard_monthly(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlyDashboard>, ApiError> {
    let reference = today();
    let year = query.year.unwrap_or_else(|| reference.year());
    let month = query.month.unwrap_or_else(|| reference.month());
    let tracker = state.tracker();
    let dashboard = {
        let guard = tracker.read();
        guard.dashboard_monthly(year, month)?
    };
    Ok(Json(dashboard))
}
