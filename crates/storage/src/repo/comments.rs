use crate::Db;
use anyhow::Context;
use domain::StoredComment;

const COMMENTS_SLOT: &str = "comments";

impl Db {
    // 槽位不存在时视为空列表
    pub async fn load_cached_comments(&self) -> anyhow::Result<Vec<StoredComment>> {
        match self.get_slot(COMMENTS_SLOT).await? {
            Some(raw) => serde_json::from_str(&raw).context("Cached comments slot is not valid JSON"),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_cached_comments(&self, comments: &[StoredComment]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(comments)?;
        self.save_slot(COMMENTS_SLOT, &raw).await
    }
}
