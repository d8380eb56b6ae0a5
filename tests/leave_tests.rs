use chrono::NaiveDate;
use resource_tracker::{LeaveType, Resource, ResourceLeave, current_leave};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn single_day_leave_is_active_on_that_day_only() {
    let today = date(2025, 6, 16);
    let leave = ResourceLeave::new("lv-1", "res-1", today, today);
    assert!(leave.is_active_on(today));
    assert!(!leave.is_upcoming_on(today));
    assert!(!leave.is_active_on(date(2025, 6, 15)));
    assert!(!leave.is_active_on(date(2025, 6, 17)));
}

#[test]
fn leave_starting_tomorrow_is_upcoming_not_active() {
    let today = date(2025, 6, 16);
    let leave = ResourceLeave::new("lv-1", "res-1", date(2025, 6, 17), date(2025, 6, 20));
    assert!(!leave.is_active_on(today));
    assert!(leave.is_upcoming_on(today));
}

#[test]
fn leave_bounds_are_inclusive_on_both_ends() {
    let leave = ResourceLeave::new("lv-1", "res-1", date(2025, 6, 10), date(2025, 6, 20));
    assert!(leave.is_active_on(date(2025, 6, 10)));
    assert!(leave.is_active_on(date(2025, 6, 20)));
    assert!(!leave.is_active_on(date(2025, 6, 9)));
    assert!(!leave.is_active_on(date(2025, 6, 21)));
}

#[test]
fn expired_leave_is_neither_active_nor_upcoming() {
    let today = date(2025, 6, 16);
    let leave = ResourceLeave::new("lv-1", "res-1", date(2025, 6, 1), date(2025, 6, 15));
    assert!(!leave.is_active_on(today));
    assert!(!leave.is_upcoming_on(today));
}

#[test]
fn overlap_matches_any_intersection_with_the_range() {
    let leave = ResourceLeave::new("lv-1", "res-1", date(2025, 6, 10), date(2025, 6, 20));
    // Fully inside, straddling either bound, and touching a single day.
    assert!(leave.overlaps(date(2025, 6, 1), date(2025, 6, 30)));
    assert!(leave.overlaps(date(2025, 6, 1), date(2025, 6, 10)));
    assert!(leave.overlaps(date(2025, 6, 20), date(2025, 6, 25)));
    assert!(leave.overlaps(date(2025, 6, 12), date(2025, 6, 14)));
    assert!(!leave.overlaps(date(2025, 6, 1), date(2025, 6, 9)));
    assert!(!leave.overlaps(date(2025, 6, 21), date(2025, 6, 30)));
}

#[test]
fn current_leave_picks_the_leave_covering_today() {
    let res = Resource::new("res-1", "JDO", "Jane Doe", "role-1");
    let today = date(2025, 6, 16);
    let leaves = vec![
        ResourceLeave::new("lv-past", "res-1", date(2025, 5, 1), date(2025, 5, 5)),
        ResourceLeave::new("lv-now", "res-1", date(2025, 6, 16), date(2025, 6, 18)),
    ];
    let current = current_leave(&res, &leaves, today).expect("leave covering today");
    assert_eq!(current.id, "lv-now");
    assert!(current_leave(&res, &leaves, date(2025, 6, 19)).is_none());
}

#[test]
fn leave_type_round_trips_through_its_string_form() {
    for name in LeaveType::variants() {
        let parsed = LeaveType::from_str(name).expect("known leave type");
        assert_eq!(parsed.as_str(), name);
    }
    assert!(LeaveType::from_str("sabbatical").is_none());
}
