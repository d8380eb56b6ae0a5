use chrono::NaiveDate;
use resource_tracker::{
    Allocation, Project, Resource, ResourceLeave, ResourceStatus, Role, Tracker, TrackerError,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn seeded_tracker() -> Tracker {
    let mut tracker = Tracker::new();
    tracker.upsert_role(Role::new("role-1", "Engineer")).unwrap();
    tracker
        .add_resource(Resource::new("res-1", "JDO", "Jane Doe", "role-1"))
        .unwrap();
    tracker
        .add_resource(Resource::new("res-2", "BSM", "Bob Smith", "role-1").with_availability(50))
        .unwrap();
    tracker
        .add_project(Project::new("p1", "ACME", "Acme Website"))
        .unwrap();
    tracker
}

#[test]
fn record_hours_creates_and_updates_a_slot_row() {
    let mut tracker = seeded_tracker();
    let created = tracker
        .record_hours("p1", "role-1", 2025, 6, 1, Some(12.5), None)
        .unwrap();
    assert_eq!(created.planned_hours, 12.5);
    assert_eq!(created.actual_hours, 0.0);

    let updated = tracker
        .record_hours("p1", "role-1", 2025, 6, 1, None, Some(10.0))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.planned_hours, 12.5);
    assert_eq!(updated.actual_hours, 10.0);
    assert_eq!(tracker.allocations().unwrap().len(), 1);

    let slot = tracker
        .find_slot("p1", "role-1", 2025, 6, 1)
        .unwrap()
        .expect("slot row");
    assert_eq!(slot.actual_hours, 10.0);
}

#[test]
fn occupied_slot_rejects_a_second_row() {
    let mut tracker = seeded_tracker();
    tracker
        .record_hours("p1", "role-1", 2025, 6, 1, Some(8.0), None)
        .unwrap();
    let duplicate = Allocation::new("other-id", "p1", "role-1", 2025, 6, 1);
    let err = tracker.upsert_allocation_record(duplicate).unwrap_err();
    assert!(matches!(err, TrackerError::Conflict(_)), "got {err:?}");
}

#[test]
fn upsert_rejects_unknown_references() {
    let mut tracker = seeded_tracker();
    let unknown_project = Allocation::new("a1", "p-gone", "role-1", 2025, 6, 1);
    assert!(matches!(
        tracker.upsert_allocation_record(unknown_project),
        Err(TrackerError::Invalid(_))
    ));

    let unknown_resource =
        Allocation::new("a2", "p1", "role-1", 2025, 6, 1).with_resources(["res-gone"]);
    assert!(matches!(
        tracker.upsert_allocation_record(unknown_resource),
        Err(TrackerError::Invalid(_))
    ));
}

#[test]
fn allocation_validation_bounds_month_and_week() {
    let mut tracker = seeded_tracker();
    let bad_week = Allocation::new("a1", "p1", "role-1", 2025, 6, 6);
    assert!(matches!(
        tracker.upsert_allocation_record(bad_week),
        Err(TrackerError::Invalid(_))
    ));
    let bad_month = Allocation::new("a2", "p1", "role-1", 2025, 13, 1);
    assert!(matches!(
        tracker.upsert_allocation_record(bad_month),
        Err(TrackerError::Invalid(_))
    ));
}

#[test]
fn assign_resource_touches_all_five_weeks_without_duplicates() {
    let mut tracker = seeded_tracker();
    let touched = tracker
        .assign_resource("p1", "res-1", 2025, 6, None)
        .unwrap();
    assert_eq!(touched.len(), 5);
    for allocation in &touched {
        assert!(allocation.includes_resource("res-1"));
        assert_eq!(allocation.planned_hours, 0.0);
    }

    // Re-assigning must not duplicate membership or add rows.
    let touched_again = tracker
        .assign_resource("p1", "res-1", 2025, 6, None)
        .unwrap();
    assert_eq!(touched_again.len(), 5);
    for allocation in &touched_again {
        assert_eq!(allocation.resource_ids, vec!["res-1".to_string()]);
    }
    assert_eq!(tracker.allocations().unwrap().len(), 5);
}

#[test]
fn deleting_a_project_cascades_its_rows() {
    let mut tracker = seeded_tracker();
    tracker
        .add_project(Project::new("p2", "INT", "Internal Tools"))
        .unwrap();
    tracker
        .record_hours("p1", "role-1", 2025, 6, 1, Some(8.0), None)
        .unwrap();
    tracker
        .record_hours("p2", "role-1", 2025, 6, 1, Some(4.0), None)
        .unwrap();

    assert!(tracker.remove_project("p1").unwrap());
    let remaining = tracker.allocations().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].project_id, "p2");
    assert!(tracker.find_project("p1").is_none());
}

#[test]
fn deleting_a_resource_scrubs_membership_and_leaves() {
    let mut tracker = seeded_tracker();
    tracker.assign_resource("p1", "res-1", 2025, 6, None).unwrap();
    tracker.assign_resource("p1", "res-2", 2025, 6, None).unwrap();
    tracker
        .add_leave(ResourceLeave::new(
            "lv-1",
            "res-1",
            date(2025, 7, 1),
            date(2025, 7, 5),
        ))
        .unwrap();

    assert!(tracker.remove_resource("res-1").unwrap());
    assert!(tracker.find_resource("res-1").is_none());
    assert!(tracker.leaves().is_empty());
    for allocation in tracker.allocations().unwrap() {
        assert!(!allocation.includes_resource("res-1"));
        assert!(allocation.includes_resource("res-2"));
    }
}

#[test]
fn referenced_roles_cannot_be_removed() {
    let mut tracker = seeded_tracker();
    let err = tracker.remove_role("role-1").unwrap_err();
    assert!(matches!(err, TrackerError::Conflict(_)));

    tracker.upsert_role(Role::new("role-2", "Designer")).unwrap();
    assert!(tracker.remove_role("role-2").unwrap());
    assert!(!tracker.remove_role("role-gone").unwrap());
}

#[test]
fn resource_summary_carries_the_derived_fields() {
    let mut tracker = seeded_tracker();
    tracker.assign_resource("p1", "res-1", 2025, 6, None).unwrap();
    let slot = tracker.find_slot("p1", "role-1", 2025, 6, 1).unwrap().unwrap();
    tracker.set_planned_hours(&slot.id, 80.0).unwrap();

    let today = date(2025, 6, 16);
    let summary = tracker
        .resource_summary("res-1", today)
        .unwrap()
        .expect("summary");
    assert_eq!(summary.status, ResourceStatus::Working);
    assert_eq!(summary.workload_percent, 50);
    assert_eq!(summary.current_projects.len(), 1);
    assert_eq!(summary.current_projects[0].code, "ACME");
    assert_eq!(summary.role.as_ref().unwrap().name, "Engineer");
    assert!(summary.current_leave.is_none());
}

#[test]
fn resource_summaries_skip_inactive_resources() {
    let mut tracker = seeded_tracker();
    let mut bob = tracker.find_resource("res-2").unwrap().clone();
    bob.is_active = false;
    tracker.update_resource(bob).unwrap();

    let summaries = tracker.resource_summaries(date(2025, 6, 16)).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].resource.id, "res-1");
}

#[test]
fn project_summary_rolls_up_allocated_resources() {
    let mut tracker = seeded_tracker();
    tracker.assign_resource("p1", "res-1", 2025, 6, None).unwrap();
    for week in 1..=2u32 {
        let slot = tracker.find_slot("p1", "role-1", 2025, 6, week).unwrap().unwrap();
        tracker.set_planned_hours(&slot.id, 20.0).unwrap();
    }

    let summary = tracker
        .project_summary("p1", date(2025, 6, 16))
        .unwrap()
        .expect("summary");
    assert_eq!(summary.resource_count, 1);
    assert_eq!(summary.allocated_resources.len(), 1);
    let allocated = &summary.allocated_resources[0];
    assert_eq!(allocated.code, "JDO");
    assert_eq!(allocated.role, "Engineer");
    assert_eq!(allocated.status, ResourceStatus::Working);
    assert_eq!(allocated.planned_hours, 40.0);
    assert_eq!(summary.total_planned_hours, 40.0);
}

#[test]
fn monthly_dashboard_breaks_down_by_week_and_project() {
    let mut tracker = seeded_tracker();
    tracker
        .add_project(Project::new("p2", "INT", "Internal Tools"))
        .unwrap();
    tracker.record_hours("p1", "role-1", 2025, 6, 1, Some(10.0), Some(8.0)).unwrap();
    tracker.record_hours("p1", "role-1", 2025, 6, 2, Some(5.5), Some(0.0)).unwrap();
    tracker.record_hours("p2", "role-1", 2025, 6, 1, Some(4.0), Some(4.0)).unwrap();
    // A different month must not leak into the breakdown.
    tracker.record_hours("p1", "role-1", 2025, 7, 1, Some(99.0), None).unwrap();

    let dashboard = tracker.dashboard_monthly(2025, 6).unwrap();
    assert_eq!(dashboard.weekly_breakdown.len(), 2);
    assert_eq!(dashboard.weekly_breakdown[0].week, 1);
    assert_eq!(dashboard.weekly_breakdown[0].planned, 14.0);
    assert_eq!(dashboard.weekly_breakdown[0].actual, 12.0);
    assert_eq!(dashboard.weekly_breakdown[1].week, 2);
    assert_eq!(dashboard.weekly_breakdown[1].planned, 5.5);
    assert_eq!(dashboard.project_breakdown.len(), 2);
    assert_eq!(dashboard.total_planned, 19.5);
    assert_eq!(dashboard.total_actual, 12.0);
}

#[test]
fn overview_counts_and_utilization() {
    let mut tracker = seeded_tracker();
    let mut archived = Project::new("p2", "OLD", "Legacy");
    archived.is_archived = true;
    tracker.add_project(archived).unwrap();
    let mut ongoing = tracker.find_project("p1").unwrap().clone();
    ongoing.is_ongoing = true;
    tracker.update_project(ongoing).unwrap();

    let today = date(2025, 6, 16);
    tracker.record_hours("p1", "role-1", 2025, 6, 1, Some(40.0), Some(10.0)).unwrap();

    let overview = tracker.dashboard_overview(today).unwrap();
    assert_eq!(overview.total_projects, 1);
    assert_eq!(overview.active_projects, 1);
    assert_eq!(overview.total_resources, 2);
    assert_eq!(overview.total_allocations, 1);
    assert_eq!(overview.total_planned_hours, 40.0);
    assert_eq!(overview.total_actual_hours, 10.0);
    assert_eq!(overview.monthly_utilization, 25.0);
}

#[test]
fn generated_codes_avoid_collisions() {
    let mut tracker = seeded_tracker();
    assert_eq!(tracker.generate_project_code("Acme Website", None), "ACMWEB");
    tracker
        .add_project(Project::new("p9", "ACMWEB", "Acme Website"))
        .unwrap();
    assert_eq!(tracker.generate_project_code("Acme Website", None), "ACMWEB2");
    assert_eq!(tracker.generate_resource_code("Grace"), "GRACE");
}

#[test]
fn numeric_ids_advance_past_the_highest_existing() {
    let tracker = seeded_tracker();
    assert_eq!(tracker.next_resource_id(), "res-3");
    assert_eq!(tracker.next_project_id(), "prj-1");
    assert_eq!(tracker.next_leave_id(), "lv-1");
}
