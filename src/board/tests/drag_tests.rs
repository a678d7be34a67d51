//! Reconciliation tests for drag completion: optimistic moves, rollback,
//! and overlapping-drag ordering.

use std::sync::Arc;

use crate::board::{
    domain::{DayOfWeek, DragEndEvent, NewTask, Task, TaskId, TaskStatus, WeekId},
    ports::TaskStoreError,
    services::{BoardService, DragOutcome},
    tests::support::{GatedFailStore, MockStore, local_owner, reference_monday},
};
use mockable::DefaultClock;
use rstest::rstest;

/// Seeds a task at (tuesday, todo) for the reference week.
fn seeded_task() -> Task {
    let draft = NewTask::new("Write launch notes", DayOfWeek::Tuesday).expect("valid draft");
    Task::create(
        local_owner(),
        WeekId::containing(reference_monday()),
        draft,
        &DefaultClock,
    )
}

/// Builds a service over the given mock store with the seeded task loaded.
async fn loaded_service(
    mut store: MockStore,
    task: Task,
) -> BoardService<MockStore, DefaultClock> {
    let snapshot = task.clone();
    store
        .expect_tasks_for_week()
        .times(1)
        .returning(move |_, _| Ok(vec![snapshot.clone()]));
    let service = BoardService::new(
        Arc::new(store),
        Arc::new(DefaultClock),
        local_owner(),
        reference_monday(),
    );
    service.load_week().await.expect("load should succeed");
    service
}

fn backend_failure() -> TaskStoreError {
    TaskStoreError::backend(std::io::Error::other("backend rejected the write"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_the_current_cell_issues_no_store_write() {
    let task = seeded_task();
    let task_id = task.id();
    let service = loaded_service(MockStore::new(), task.clone()).await;

    let outcome = service
        .complete_drag(DragEndEvent::new(task_id, "tuesday-todo"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::AlreadyInPlace);
    let unchanged = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(unchanged, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_move_updates_the_cell_and_writes_day_then_status() {
    let task = seeded_task();
    let task_id = task.id();
    let mut store = MockStore::new();
    let mut order = mockall::Sequence::new();
    store
        .expect_update_task_day()
        .times(1)
        .in_sequence(&mut order)
        .withf(move |id, day| *id == task_id && *day == DayOfWeek::Wednesday)
        .returning(|_, _| Ok(()));
    store
        .expect_update_task_status()
        .times(1)
        .in_sequence(&mut order)
        .withf(move |id, status| *id == task_id && *status == TaskStatus::InProgress)
        .returning(|_, _| Ok(()));
    let service = loaded_service(store, task).await;

    let outcome = service
        .complete_drag(DragEndEvent::new(task_id, "wednesday-in-progress"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::Moved);
    let moved = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(moved.day(), DayOfWeek::Wednesday);
    assert_eq!(moved.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_day_update_reverts_the_task_exactly() {
    let task = seeded_task();
    let task_id = task.id();
    let before = task.clone();
    let mut store = MockStore::new();
    store
        .expect_update_task_day()
        .times(1)
        .returning(|_, _| Err(backend_failure()));
    let service = loaded_service(store, task).await;

    let outcome = service
        .complete_drag(DragEndEvent::new(task_id, "wednesday-in-progress"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::RolledBack);
    let reverted = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(reverted, before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_status_update_reverts_the_task_exactly() {
    let task = seeded_task();
    let task_id = task.id();
    let before = task.clone();
    let mut store = MockStore::new();
    store
        .expect_update_task_day()
        .times(1)
        .returning(|_, _| Ok(()));
    store
        .expect_update_task_status()
        .times(1)
        .returning(|_, _| Err(backend_failure()));
    let service = loaded_service(store, task).await;

    let outcome = service
        .complete_drag(DragEndEvent::new(task_id, "wednesday-in-progress"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::RolledBack);
    let reverted = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(reverted.day(), DayOfWeek::Tuesday);
    assert_eq!(reverted.status(), TaskStatus::Todo);
    assert_eq!(reverted.updated_at(), before.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_released_outside_every_zone_is_ignored() {
    let task = seeded_task();
    let task_id = task.id();
    let service = loaded_service(MockStore::new(), task.clone()).await;

    let outcome = service
        .complete_drag(DragEndEvent::outside(task_id))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::NoTarget);
    let unchanged = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(unchanged, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_zone_is_ignored_without_mutation() {
    let task = seeded_task();
    let task_id = task.id();
    let service = loaded_service(MockStore::new(), task.clone()).await;

    let outcome = service
        .complete_drag(DragEndEvent::new(task_id, "tuesday-blocked"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::UnresolvedZone);
    let unchanged = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(unchanged, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_of_a_concurrently_deleted_task_is_ignored() {
    let task = seeded_task();
    let service = loaded_service(MockStore::new(), task).await;
    let missing = TaskId::new();

    let outcome = service
        .complete_drag(DragEndEvent::new(missing, "friday-completed"))
        .await
        .expect("reconciliation should succeed");

    assert_eq!(outcome, DragOutcome::UnknownTask);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delayed_rollback_is_discarded_once_a_newer_move_wins() {
    let task = seeded_task();
    let task_id = task.id();
    let store = Arc::new(GatedFailStore::new(vec![task]));
    let service = Arc::new(BoardService::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
        local_owner(),
        reference_monday(),
    ));
    service.load_week().await.expect("load should succeed");

    let first_drag = {
        let racing = Arc::clone(&service);
        tokio::spawn(async move {
            racing
                .complete_drag(DragEndEvent::new(task_id, "wednesday-in-progress"))
                .await
        })
    };
    while !store.gate_entered() {
        tokio::task::yield_now().await;
    }

    let second_outcome = service
        .complete_drag(DragEndEvent::new(task_id, "friday-completed"))
        .await
        .expect("second reconciliation should succeed");
    assert_eq!(second_outcome, DragOutcome::Moved);

    store.release();
    let first_outcome = first_drag
        .await
        .expect("drag task should not panic")
        .expect("first reconciliation should succeed");
    assert_eq!(first_outcome, DragOutcome::SupersededRollback);

    let settled = service
        .task(task_id)
        .expect("state readable")
        .expect("task on board");
    assert_eq!(settled.day(), DayOfWeek::Friday);
    assert_eq!(settled.status(), TaskStatus::Completed);
}
