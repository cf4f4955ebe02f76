use crate::Db;
use domain::{CommentId, StoredComment};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Locally persisted list of comments seen by this form.
///
/// Loaded once at startup and written back on every change. It is a display
/// projection only: nothing on the submit path reads it, and it is never
/// reconciled with the remote store. Persistence is best effort, so write
/// failures are logged and the in-memory list stays authoritative for the
/// lifetime of the process.
#[derive(Clone)]
pub struct LocalCache {
    db: Db,
    entries: Arc<RwLock<Vec<StoredComment>>>,
}

impl LocalCache {
    pub async fn load(db: Db) -> Self {
        let entries = match db.load_cached_comments().await {
            Ok(entries) => {
                info!("Loaded {} cached comment(s)", entries.len());
                entries
            }
            Err(e) => {
                warn!("Failed to load cached comments, starting empty: {:?}", e);
                Vec::new()
            }
        };
        Self {
            db,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub async fn list(&self) -> Vec<StoredComment> {
        self.entries.read().await.clone()
    }

    pub async fn get(&self, id: &CommentId) -> Option<StoredComment> {
        self.entries.read().await.iter().find(|c| &c.id == id).cloned()
    }

    pub async fn extend(&self, rows: Vec<StoredComment>) {
        if rows.is_empty() {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.extend(rows);
        self.mirror(&entries).await;
    }

    /// Returns false when no entry carried `id`.
    pub async fn remove(&self, id: &CommentId) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|c| &c.id != id);
        if entries.len() == before {
            return false;
        }
        self.mirror(&entries).await;
        true
    }

    async fn mirror(&self, entries: &[StoredComment]) {
        if let Err(e) = self.db.save_cached_comments(entries).await {
            warn!("Failed to mirror local comment cache: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::{Category, PersistedComment};

    fn stored(id: &str, text: &str) -> StoredComment {
        StoredComment {
            id: CommentId::new(id),
            record: PersistedComment {
                blog_writer_email: "b@x.com".into(),
                commenter_email: "a@x.com".into(),
                comment: text.into(),
                name_commenter: "Ann".into(),
                category: Category::Comment,
                image: None,
                created_at: Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn changes_are_mirrored_and_reloaded() {
        let db = Db::in_memory().await.unwrap();
        let cache = LocalCache::load(db.clone()).await;
        assert!(cache.list().await.is_empty());

        cache
            .extend(vec![stored("1", "first"), stored("2", "second")])
            .await;
        assert!(cache.remove(&CommentId::new("1")).await);
        assert!(!cache.remove(&CommentId::new("404")).await);

        let reloaded = LocalCache::load(db).await;
        let list = reloaded.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].record.comment, "second");
        assert!(reloaded.get(&CommentId::new("2")).await.is_some());
    }

    #[tokio::test]
    async fn corrupt_slot_loads_as_empty() {
        let db = Db::in_memory().await.unwrap();
        db.save_slot("comments", "not json").await.unwrap();

        let cache = LocalCache::load(db).await;
        assert!(cache.list().await.is_empty());
    }
}
