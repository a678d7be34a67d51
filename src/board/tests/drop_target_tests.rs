//! Resolver tests for drop-zone identifier parsing.

use crate::board::domain::{DayOfWeek, DropTarget, DropZoneError, TaskStatus};
use rstest::rstest;

const ALL_STATUSES: [TaskStatus; 3] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

#[rstest]
fn resolver_round_trips_every_day_and_status() {
    for day in DayOfWeek::ALL {
        for status in ALL_STATUSES {
            let zone = DropTarget::new(day, status).to_string();
            let resolved = DropTarget::resolve(&zone).expect("enumerated zone should resolve");
            assert_eq!(resolved, DropTarget::new(day, status), "zone '{zone}'");
        }
    }
}

#[rstest]
fn in_progress_suffix_wins_over_first_hyphen_split() {
    let resolved =
        DropTarget::resolve("monday-in-progress").expect("hyphenated status should resolve");

    assert_eq!(resolved.day, DayOfWeek::Monday);
    assert_eq!(resolved.status, TaskStatus::InProgress);
}

#[rstest]
#[case("tuesday-todo", DayOfWeek::Tuesday, TaskStatus::Todo)]
#[case("wednesday-in-progress", DayOfWeek::Wednesday, TaskStatus::InProgress)]
#[case("sunday-completed", DayOfWeek::Sunday, TaskStatus::Completed)]
fn resolver_extracts_exact_day_prefix(
    #[case] zone: &str,
    #[case] day: DayOfWeek,
    #[case] status: TaskStatus,
) {
    let resolved = DropTarget::resolve(zone).expect("zone should resolve");

    assert_eq!(resolved.day, day);
    assert_eq!(resolved.status, status);
}

#[rstest]
fn resolver_tolerates_day_prefix_casing() {
    let resolved = DropTarget::resolve("MONDAY-todo").expect("day casing should be normalised");

    assert_eq!(resolved.day, DayOfWeek::Monday);
    assert_eq!(resolved.status, TaskStatus::Todo);
}

#[rstest]
#[case("monday-blocked")]
#[case("monday")]
#[case("")]
#[case("inprogress")]
fn resolver_rejects_unknown_status_suffix(#[case] zone: &str) {
    let result = DropTarget::resolve(zone);

    assert_eq!(
        result,
        Err(DropZoneError::UnknownStatusSuffix(zone.to_owned()))
    );
}

#[rstest]
#[case("someday-todo", "someday")]
#[case("-completed", "")]
#[case("monday-tuesday-todo", "monday-tuesday")]
fn resolver_rejects_unknown_day_prefix(#[case] zone: &str, #[case] day: &str) {
    let result = DropTarget::resolve(zone);

    assert_eq!(
        result,
        Err(DropZoneError::UnknownDay {
            zone: zone.to_owned(),
            day: day.to_owned(),
        })
    );
}
