use chrono::NaiveDate;
use resource_tracker::{
    Allocation, Project, Resource, ResourceLeave, ResourceStatus, current_projects,
    monthly_capacity, resolve_status, upcoming_leaves, workload_percent,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn resource(availability: i64) -> Resource {
    Resource::new("res-1", "JDO", "Jane Doe", "role-1").with_availability(availability)
}

fn month_alloc(id: &str, project_id: &str, week: u32, planned: f64) -> Allocation {
    Allocation::new(id, project_id, "role-1", 2025, 6, week)
        .with_resources(["res-1"])
        .with_hours(planned, 0.0)
}

fn today() -> NaiveDate {
    date(2025, 6, 16)
}

#[test]
fn status_is_available_with_no_data() {
    let res = resource(100);
    assert_eq!(resolve_status(&res, &[], &[], today()), ResourceStatus::Available);
}

#[test]
fn status_is_working_with_current_month_planned_hours() {
    let res = resource(100);
    let allocations = vec![month_alloc("a1", "p1", 1, 20.0)];
    assert_eq!(
        resolve_status(&res, &allocations, &[], today()),
        ResourceStatus::Working
    );
}

#[test]
fn zero_planned_hours_do_not_count_as_working() {
    let res = resource(100);
    let allocations = vec![month_alloc("a1", "p1", 1, 0.0)];
    assert_eq!(
        resolve_status(&res, &allocations, &[], today()),
        ResourceStatus::Available
    );
}

#[test]
fn allocations_for_other_periods_are_ignored() {
    let res = resource(100);
    let mut other_month = month_alloc("a1", "p1", 1, 40.0);
    other_month.month = 5;
    let mut other_year = month_alloc("a2", "p1", 2, 40.0);
    other_year.year = 2024;
    let allocations = vec![other_month, other_year];
    assert_eq!(
        resolve_status(&res, &allocations, &[], today()),
        ResourceStatus::Available
    );
    assert_eq!(workload_percent(&res, &allocations, today()), 0);
}

#[test]
fn allocations_for_other_resources_are_ignored() {
    let res = resource(100);
    let allocation = Allocation::new("a1", "p1", "role-1", 2025, 6, 1)
        .with_resources(["res-2"])
        .with_hours(40.0, 0.0);
    assert_eq!(
        resolve_status(&res, &[allocation], &[], today()),
        ResourceStatus::Available
    );
}

#[test]
fn active_leave_takes_precedence_over_allocations() {
    let res = resource(100);
    let allocations = vec![month_alloc("a1", "p1", 1, 40.0)];
    let leaves = vec![ResourceLeave::new(
        "lv-1",
        "res-1",
        date(2025, 6, 10),
        date(2025, 6, 20),
    )];
    assert_eq!(
        resolve_status(&res, &allocations, &leaves, today()),
        ResourceStatus::OnLeave
    );
}

#[test]
fn other_resources_leave_does_not_shadow_status() {
    let res = resource(100);
    let leaves = vec![ResourceLeave::new(
        "lv-1",
        "res-2",
        date(2025, 6, 10),
        date(2025, 6, 20),
    )];
    assert_eq!(resolve_status(&res, &[], &leaves, today()), ResourceStatus::Available);
}

#[test]
fn capacity_follows_fixed_four_week_model() {
    assert_eq!(monthly_capacity(&resource(100)), 160.0);
    assert_eq!(monthly_capacity(&resource(50)), 80.0);
    assert_eq!(monthly_capacity(&resource(0)), 0.0);
}

#[test]
fn workload_is_zero_for_non_positive_availability() {
    let allocations = vec![month_alloc("a1", "p1", 1, 40.0)];
    assert_eq!(workload_percent(&resource(0), &allocations, today()), 0);
    assert_eq!(workload_percent(&resource(-25), &allocations, today()), 0);
}

#[test]
fn workload_is_monotonic_in_planned_hours() {
    let res = resource(100);
    let mut allocations = vec![month_alloc("a1", "p1", 1, 10.0)];
    let mut previous = workload_percent(&res, &allocations, today());
    for (idx, planned) in [10.0, 25.0, 42.5, 80.0].into_iter().enumerate() {
        allocations.push(month_alloc(&format!("ax{idx}"), "p1", (idx as u32 % 5) + 1, planned));
        let next = workload_percent(&res, &allocations, today());
        assert!(next >= previous, "workload decreased: {previous} -> {next}");
        previous = next;
    }
}

#[test]
fn full_availability_half_allocated_is_fifty_percent() {
    let res = resource(100);
    let allocations = vec![month_alloc("a1", "p1", 1, 80.0)];
    assert_eq!(workload_percent(&res, &allocations, today()), 50);
    assert_eq!(
        resolve_status(&res, &allocations, &[], today()),
        ResourceStatus::Working
    );
}

#[test]
fn over_allocation_is_not_clamped() {
    let res = resource(50);
    let allocations = vec![month_alloc("a1", "p1", 1, 100.0)];
    assert_eq!(workload_percent(&res, &allocations, today()), 125);
}

#[test]
fn current_projects_sums_raw_hours_per_project() {
    let res = resource(100);
    let projects = vec![
        Project::new("p1", "ACME", "Acme Website"),
        Project::new("p2", "INT", "Internal Tools"),
    ];
    let allocations = vec![
        month_alloc("a1", "p1", 1, 12.3),
        month_alloc("a2", "p1", 2, 7.7),
        month_alloc("a3", "p2", 1, 4.0),
    ];
    let mut current = current_projects(&res, &allocations, &projects, today());
    current.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(current.len(), 2);
    assert_eq!(current[0].id, "p1");
    assert_eq!(current[0].code, "ACME");
    assert!((current[0].planned_hours - 20.0).abs() < 1e-9);
    assert_eq!(current[1].id, "p2");
    assert!((current[1].planned_hours - 4.0).abs() < 1e-9);
}

#[test]
fn dangling_project_references_are_silently_omitted() {
    let res = resource(100);
    let projects = vec![Project::new("p1", "ACME", "Acme Website")];
    let allocations = vec![
        month_alloc("a1", "p1", 1, 8.0),
        month_alloc("a2", "p-gone", 2, 16.0),
    ];
    let current = current_projects(&res, &allocations, &projects, today());
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, "p1");
}

#[test]
fn zero_hour_allocations_do_not_surface_as_current_projects() {
    let res = resource(100);
    let projects = vec![Project::new("p1", "ACME", "Acme Website")];
    let allocations = vec![month_alloc("a1", "p1", 1, 0.0)];
    assert!(current_projects(&res, &allocations, &projects, today()).is_empty());
}

#[test]
fn upcoming_leaves_are_sorted_and_exclude_active_ones() {
    let res = resource(100);
    let leaves = vec![
        ResourceLeave::new("lv-later", "res-1", date(2025, 8, 1), date(2025, 8, 5)),
        ResourceLeave::new("lv-active", "res-1", date(2025, 6, 16), date(2025, 6, 16)),
        ResourceLeave::new("lv-soon", "res-1", date(2025, 6, 20), date(2025, 6, 22)),
    ];
    let upcoming = upcoming_leaves(&res, &leaves, today());
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].id, "lv-soon");
    assert_eq!(upcoming[1].id, "lv-later");
}
