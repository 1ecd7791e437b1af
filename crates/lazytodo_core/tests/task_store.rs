use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use lazytodo_core::{
    CreateTask, FixedClock, KeyValueStore, KvTaskRepository, MemoryKvStore, TaskStore,
    TaskStoreError, TaskValidationError,
};

type MemoryStore = TaskStore<KvTaskRepository<MemoryKvStore>, FixedClock>;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
}

fn new_store() -> MemoryStore {
    let mut store = TaskStore::with_clock(
        KvTaskRepository::new(MemoryKvStore::new()),
        FixedClock::utc(fixed_now()),
    );
    store.load();
    store
}

#[test]
fn create_then_delete_restores_previous_collection() {
    let mut store = new_store();
    store
        .create(CreateTask::new("existing").deadline(fixed_now() + Duration::hours(3)))
        .unwrap();
    let before = store.all().to_vec();

    store.clock_mut().advance(Duration::seconds(1));
    let created = store.create(CreateTask::new("temporary")).unwrap();
    assert_eq!(store.all().len(), 2);

    store.delete(created.id).unwrap();
    assert_eq!(store.all(), before.as_slice());
}

#[test]
fn delete_of_unknown_id_is_a_no_op() {
    let mut store = new_store();
    let task = store.create(CreateTask::new("keep me")).unwrap();

    store.delete(task.id + 1_000).unwrap();
    store.delete(task.id + 1_000).unwrap();
    assert_eq!(store.all().len(), 1);
}

#[test]
fn double_toggle_restores_task() {
    let mut store = new_store();
    let task = store.create(CreateTask::new("flip")).unwrap();

    store.toggle_completed(task.id).unwrap();
    assert!(store.get(task.id).unwrap().completed);
    store.toggle_completed(task.id).unwrap();
    assert_eq!(store.get(task.id).unwrap(), &task);
}

#[test]
fn toggle_and_edit_of_unknown_id_change_nothing() {
    let mut store = new_store();
    let task = store.create(CreateTask::new("only")).unwrap();

    store.toggle_completed(task.id - 1).unwrap();
    store.edit_text(task.id - 1, "other").unwrap();
    assert_eq!(store.all(), [task]);
}

#[test]
fn edit_text_rejects_blank_input_and_keeps_text() {
    let mut store = new_store();
    let task = store.create(CreateTask::new("Buy milk")).unwrap();

    for blank in ["", "   "] {
        let err = store.edit_text(task.id, blank).unwrap_err();
        assert!(matches!(
            err,
            TaskStoreError::Validation(TaskValidationError::EmptyText)
        ));
        assert_eq!(store.get(task.id).unwrap().text, "Buy milk");
    }

    store.edit_text(task.id, "  Buy oat milk  ").unwrap();
    assert_eq!(store.get(task.id).unwrap().text, "Buy oat milk");
}

#[test]
fn create_rejects_blank_text_without_side_effects() {
    let mut store = new_store();
    let err = store
        .create(CreateTask::new("   ").label("Work"))
        .unwrap_err();

    assert!(matches!(err, TaskStoreError::Validation(_)));
    assert!(store.all().is_empty());
    assert!(store.labels().is_empty());
    assert_eq!(store.repo().store().get("todos").unwrap(), None);
}

#[test]
fn missing_deadline_defaults_to_end_of_local_day() {
    // 10:00 local time in UTC+2 on 2026-10-18.
    let local = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = local.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
    let mut store = TaskStore::with_clock(
        KvTaskRepository::new(MemoryKvStore::new()),
        FixedClock::new(now.with_timezone(&Utc), local),
    );

    let task = store.create(CreateTask::new("Buy milk")).unwrap();
    let expected = local.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap();
    assert_eq!(task.deadline, expected.with_timezone(&Utc));
    assert_eq!(task.created_at, now.with_timezone(&Utc));
    assert_eq!(task.id, now.timestamp_millis());
    assert!(!task.completed);
}

#[test]
fn explicit_deadline_is_kept() {
    let mut store = new_store();
    let deadline = fixed_now() + Duration::days(4);
    let task = store
        .create(CreateTask::new("file taxes").deadline(deadline))
        .unwrap();
    assert_eq!(task.deadline, deadline);
}

#[test]
fn novel_label_is_added_exactly_once() {
    let mut store = new_store();

    store.create(CreateTask::new("standup").label("Work")).unwrap();
    store.create(CreateTask::new("review").label("Work")).unwrap();
    store.create(CreateTask::new("groceries").label("  ")).unwrap();

    assert_eq!(store.labels(), ["Work"]);
    assert_eq!(
        store.repo().store().get("labels").unwrap().as_deref(),
        Some(r#"["Work"]"#)
    );
}

#[test]
fn labels_outlive_deleted_tasks() {
    let mut store = new_store();
    let task = store.create(CreateTask::new("gym").label("Health")).unwrap();

    store.delete(task.id).unwrap();
    assert!(store.all().is_empty());
    assert_eq!(store.labels(), ["Health"]);
}

#[test]
fn mutations_are_persisted_and_reloaded() {
    let backing = MemoryKvStore::new();
    let task_id = {
        let mut store = TaskStore::with_clock(
            KvTaskRepository::new(&backing),
            FixedClock::utc(fixed_now()),
        );
        store.load();
        let task = store.create(CreateTask::new("persist me").label("Home")).unwrap();
        store.toggle_completed(task.id).unwrap();
        store.edit_text(task.id, "persisted").unwrap();
        task.id
    };

    let mut reloaded = TaskStore::with_clock(
        KvTaskRepository::new(&backing),
        FixedClock::utc(fixed_now()),
    );
    reloaded.load();
    let task = reloaded.get(task_id).unwrap();
    assert_eq!(task.text, "persisted");
    assert!(task.completed);
    assert_eq!(task.label.as_deref(), Some("Home"));
    assert_eq!(reloaded.labels(), ["Home"]);
}

#[test]
fn ids_issued_after_reload_do_not_collide() {
    let backing = MemoryKvStore::new();
    let first_id = {
        let mut store = TaskStore::with_clock(
            KvTaskRepository::new(&backing),
            FixedClock::utc(fixed_now()),
        );
        store.create(CreateTask::new("first")).unwrap().id
    };

    let mut store = TaskStore::with_clock(
        KvTaskRepository::new(&backing),
        FixedClock::utc(fixed_now()),
    );
    store.load();
    let second = store.create(CreateTask::new("second")).unwrap();
    assert_eq!(second.id, first_id + 1);
}
