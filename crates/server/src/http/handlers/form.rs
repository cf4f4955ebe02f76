use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{image::SelectedFile, CommentId, FieldUpdate, Notification, PageQuery};
use std::sync::Arc;

use super::{notification_error, NotificationError};
use crate::controller::{FormController, FormSnapshot};

const IMAGE_FIELD: &str = "image";

pub async fn get_form(State(controller): State<Arc<FormController>>) -> Json<FormSnapshot> {
    Json(controller.snapshot().await)
}

pub async fn update_field(
    State(controller): State<Arc<FormController>>,
    Json(update): Json<FieldUpdate>,
) -> Json<FormSnapshot> {
    controller.update_field(update).await;
    Json(controller.snapshot().await)
}

pub async fn upload_image(
    State(controller): State<Arc<FormController>>,
    mut multipart: Multipart,
) -> Result<Json<FormSnapshot>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        controller
            .attach_image(SelectedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            })
            .await;
        return Ok(Json(controller.snapshot().await));
    }

    Err((
        StatusCode::BAD_REQUEST,
        format!("Missing multipart field '{}'", IMAGE_FIELD),
    ))
}

pub async fn remove_image(State(controller): State<Arc<FormController>>) -> Json<FormSnapshot> {
    controller.remove_image().await;
    Json(controller.snapshot().await)
}

pub async fn begin_edit(
    State(controller): State<Arc<FormController>>,
    Path(id): Path<String>,
) -> Result<Json<FormSnapshot>, NotificationError> {
    controller
        .begin_edit(&CommentId::new(id))
        .await
        .map_err(notification_error)?;
    Ok(Json(controller.snapshot().await))
}

/// The page forwards its own query string, so `sender`/`receiver` arrive here.
pub async fn submit(
    State(controller): State<Arc<FormController>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Notification>, NotificationError> {
    controller
        .submit(&query)
        .await
        .map(Json)
        .map_err(notification_error)
}
