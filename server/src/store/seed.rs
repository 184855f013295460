use tracing::info;

use super::{StoreResult, TodoStore};
use crate::effects::{Clock, IdGenerator};
use crate::model::Todo;

pub const STARTER_TITLES: [&str; 6] = [
    "Learn React",
    "Wash Dishes",
    "Do the washing",
    "Learn Typescript",
    "Go to work",
    "Brush teeth",
];

/// Inserts the starter todos when the store holds no records.
///
/// Returns how many were inserted: `0` for a store that already had data.
pub async fn seed_if_empty(
    store: &dyn TodoStore,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
) -> StoreResult<usize> {
    if !store.list_all().await?.is_empty() {
        info!("store already populated, skipping seed");
        return Ok(0);
    }

    for title in STARTER_TITLES {
        let todo = Todo::new(ids.next_id(), title, clock.now());
        store.insert(&todo).await?;
    }
    info!(count = STARTER_TITLES.len(), "seeded starter todos");
    Ok(STARTER_TITLES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{FixedClock, SequentialIds};
    use crate::store::MemoryTodoStore;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let store = MemoryTodoStore::new();
        let ids = SequentialIds::new("seed");

        assert_eq!(seed_if_empty(&store, &clock(), &ids).await.unwrap(), 6);
        assert_eq!(seed_if_empty(&store, &clock(), &ids).await.unwrap(), 0);

        let mut titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        titles.sort();
        let mut expected: Vec<String> = STARTER_TITLES.iter().map(|t| t.to_string()).collect();
        expected.sort();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn leaves_populated_store_alone() {
        let store = MemoryTodoStore::new();
        store
            .insert(&Todo::new("mine", "Existing", clock().now()))
            .await
            .unwrap();

        let inserted = seed_if_empty(&store, &clock(), &SequentialIds::new("seed"))
            .await
            .unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
