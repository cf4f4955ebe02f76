use adapter::CommentStore;
use chrono::Utc;
use domain::{
    image::{self, SelectedFile},
    protocol::{self, MSG_COMMENT_ADDED, MSG_COMMENT_DELETED},
    CommentId, Draft, FieldUpdate, FormError, IdentityResolver, Notification, NotificationSlot,
    PageQuery, StoredComment,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use storage::LocalCache;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Drafting,
    Editing { comment_id: CommentId },
}

#[derive(Default)]
struct FormState {
    draft: Draft,
    phase: Phase,
    notifications: NotificationSlot,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub draft: Draft,
    pub phase: Phase,
    pub notification: Option<Notification>,
}

/// Interactive yes/no answer guarding destructive actions.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl Confirmation for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

pub struct FormController {
    store: Arc<dyn CommentStore>,
    identity: Box<dyn IdentityResolver>,
    cache: LocalCache,
    state: Arc<RwLock<FormState>>,
    notification_ttl: Duration,
}

impl FormController {
    pub fn new(
        store: Arc<dyn CommentStore>,
        identity: Box<dyn IdentityResolver>,
        cache: LocalCache,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            store,
            identity,
            cache,
            state: Arc::new(RwLock::new(FormState::default())),
            notification_ttl,
        }
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.read().await;
        FormSnapshot {
            draft: state.draft.clone(),
            phase: state.phase.clone(),
            notification: state.notifications.current().cloned(),
        }
    }

    pub async fn update_field(&self, update: FieldUpdate) {
        self.state.write().await.draft.apply(update);
    }

    /// Replaces any previous image.
    pub async fn attach_image(&self, file: SelectedFile) {
        let data_uri = image::to_data_uri(&file);
        debug!(
            "Attached image {:?} ({} bytes)",
            file.file_name,
            file.bytes.len()
        );
        self.state.write().await.draft.image = Some(data_uri);
    }

    pub async fn remove_image(&self) {
        self.state.write().await.draft.image = None;
    }

    /// Loads a cached comment into the draft and enters the editing phase.
    pub async fn begin_edit(&self, id: &CommentId) -> Result<(), FormError> {
        let Some(stored) = self.cache.get(id).await else {
            return Err(self.fail(FormError::CommentNotFound(id.clone())).await);
        };

        let mut state = self.state.write().await;
        state.draft = Draft {
            author_name: stored.record.name_commenter,
            author_email: stored.record.commenter_email,
            recipient_email: stored.record.blog_writer_email,
            category: stored.record.category,
            has_image_issue: false,
            image: stored.record.image,
            message: stored.record.comment,
        };
        state.phase = Phase::Editing {
            comment_id: id.clone(),
        };
        Ok(())
    }

    /// Validates the current draft and sends it to the store.
    ///
    /// A draft that fails validation is left untouched. Anything past
    /// validation resets the draft, whatever the store answered. The state
    /// lock is not held while the store call is in flight, so a second
    /// submit may start before the first one finishes.
    pub async fn submit(&self, query: &PageQuery) -> Result<Notification, FormError> {
        let (draft, phase) = {
            let state = self.state.read().await;
            (state.draft.clone(), state.phase.clone())
        };

        let identity = match protocol::validate_draft(&draft, self.identity.as_ref(), query) {
            Ok(identity) => identity,
            Err(e) => return Err(self.fail(FormError::Validation(e)).await),
        };

        if let Phase::Editing { comment_id } = phase {
            warn!("Rejected submit while editing comment {}", comment_id);
            {
                let mut state = self.state.write().await;
                state.phase = Phase::Drafting;
                state.draft = Draft::default();
            }
            return Err(self.fail(FormError::EditNotSupported).await);
        }

        let record = protocol::build_record(&draft, identity, Utc::now());
        info!(
            "Submitting {} from {} to {}",
            record.category, record.commenter_email, record.blog_writer_email
        );
        let outcome = self.store.insert(&record).await;

        self.state.write().await.draft = Draft::default();

        match outcome.into_result() {
            Ok(rows) => {
                info!("Comment stored ({} row(s))", rows.len());
                self.cache.extend(rows).await;
                let notification = Notification::success(MSG_COMMENT_ADDED);
                self.notify(notification.clone()).await;
                Ok(notification)
            }
            Err(e) => {
                error!("Comment insert failed: {}", e);
                Err(self.fail(FormError::RemoteWrite(e)).await)
            }
        }
    }

    /// Removes a comment from the local cache only; the store is untouched.
    /// Returns `Ok(None)` when the user declined.
    pub async fn delete_comment(
        &self,
        id: &CommentId,
        confirmation: &dyn Confirmation,
    ) -> Result<Option<Notification>, FormError> {
        let prompt = format!("Are you sure you want to delete comment {}?", id);
        if !confirmation.confirm(&prompt) {
            return Ok(None);
        }

        if !self.cache.remove(id).await {
            return Err(self.fail(FormError::CommentNotFound(id.clone())).await);
        }

        info!("Deleted cached comment {}", id);
        let notification = Notification::success(MSG_COMMENT_DELETED);
        self.notify(notification.clone()).await;
        Ok(Some(notification))
    }

    pub async fn list_comments(&self) -> Vec<StoredComment> {
        self.cache.list().await
    }

    async fn fail(&self, err: FormError) -> FormError {
        self.notify(err.to_notification()).await;
        err
    }

    async fn notify(&self, notification: Notification) {
        let generation = self.state.write().await.notifications.show(notification);

        let state = Arc::clone(&self.state);
        let ttl = self.notification_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if state
                .write()
                .await
                .notifications
                .clear_if_current(generation)
            {
                debug!("Notification {} expired", generation);
            }
        });
    }
}
