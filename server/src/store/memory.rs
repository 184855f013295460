use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, TodoStore};
use crate::model::Todo;

pub type Db = Arc<RwLock<HashMap<String, Todo>>>;

/// In-process store keyed by id. Cloning shares the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryTodoStore {
    db: Db,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> StoreResult<Vec<Todo>> {
        let todos = self.db.read().await;
        Ok(todos.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Todo> {
        let todos = self.db.read().await;
        todos
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, todo: &Todo) -> StoreResult<()> {
        let mut todos = self.db.write().await;
        if todos.contains_key(&todo.id) {
            return Err(StoreError::Rejected(format!("duplicate id {}", todo.id)));
        }
        todos.insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut todos = self.db.write().await;
        todos
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
