use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::{CommentId, Notification, StoredComment};
use serde::Deserialize;
use std::sync::Arc;

use super::{notification_error, NotificationError};
use crate::controller::FormController;

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_comments(
    State(controller): State<Arc<FormController>>,
) -> Json<Vec<StoredComment>> {
    Json(controller.list_comments().await)
}

/// `null` body when the deletion was not confirmed.
pub async fn delete_comment(
    State(controller): State<Arc<FormController>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Option<Notification>>, NotificationError> {
    let id = CommentId::new(id);
    controller
        .delete_comment(&id, &query.confirm)
        .await
        .map(Json)
        .map_err(notification_error)
}
