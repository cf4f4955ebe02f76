use async_trait::async_trait;
use domain::{CommentId, InsertOutcome, PersistedComment, StoredComment};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::traits::CommentStore;

/// Keeps rows in process. Used when no hosted backend is configured.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<Vec<StoredComment>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<StoredComment> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert(&self, record: &PersistedComment) -> InsertOutcome {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let row = StoredComment {
            id: CommentId::new(id.to_string()),
            record: record.clone(),
        };
        self.rows.write().await.push(row.clone());
        info!("Stored comment {} in memory", id);
        InsertOutcome::Inserted(vec![row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::Category;

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = MemoryStore::new();
        let record = PersistedComment {
            blog_writer_email: "b@x.com".into(),
            commenter_email: "a@x.com".into(),
            comment: "hi".into(),
            name_commenter: "Ann".into(),
            category: Category::Bug,
            image: None,
            created_at: Utc::now(),
        };

        store.insert(&record).await;
        let outcome = store.insert(&record).await;

        match outcome {
            InsertOutcome::Inserted(rows) => assert_eq!(rows[0].id.as_str(), "2"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(store.rows().await.len(), 2);
    }
}
