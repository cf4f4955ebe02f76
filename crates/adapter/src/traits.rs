use async_trait::async_trait;
use domain::{InsertOutcome, PersistedComment};

/// The hosted table comments are written to. A store never fails with an
/// `Err`: transport problems come back as `InsertOutcome::Rejected`.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, record: &PersistedComment) -> InsertOutcome;
}
