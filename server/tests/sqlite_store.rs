use chrono::NaiveDate;
use tempfile::tempdir;
use todo_server::{
    seed_if_empty, FixedClock, SequentialIds, SqliteTodoStore, StoreError, Todo, TodoStore,
};

fn todo(id: &str, title: &str) -> Todo {
    let at = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 58, 250)
        .unwrap();
    Todo::new(id, title, at)
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.db");

    {
        let store = SqliteTodoStore::open(&path).unwrap();
        store.insert(&todo("a", "Learn React")).await.unwrap();
        store.insert(&todo("b", "Go to work")).await.unwrap();
        store.remove("b").await.unwrap();
    }

    let reopened = SqliteTodoStore::open(&path).unwrap();
    let todos = reopened.list_all().await.unwrap();
    assert_eq!(todos, vec![todo("a", "Learn React")]);
    assert!(matches!(
        reopened.find_by_id("b").await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn remove_missing_is_not_found() {
    let store = SqliteTodoStore::open_in_memory().unwrap();
    let err = store.remove("ghost").await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("ghost".to_string()));
}

#[tokio::test]
async fn list_count_tracks_writes() {
    let store = SqliteTodoStore::open_in_memory().unwrap();
    assert!(store.list_all().await.unwrap().is_empty());

    for i in 0..5 {
        store.insert(&todo(&format!("id-{i}"), "x")).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), i + 1);
    }
    store.remove("id-2").await.unwrap();
    assert_eq!(store.list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn seeding_a_file_store_happens_once_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seeded.db");
    let clock = FixedClock(todo("", "").date_created);

    let first = SqliteTodoStore::open(&path).unwrap();
    let inserted = seed_if_empty(&first, &clock, &SequentialIds::new("seed"))
        .await
        .unwrap();
    assert_eq!(inserted, 6);
    drop(first);

    let second = SqliteTodoStore::open(&path).unwrap();
    let inserted = seed_if_empty(&second, &clock, &SequentialIds::new("again"))
        .await
        .unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(second.list_all().await.unwrap().len(), 6);
}
