pub mod comments;
pub mod form;
pub mod page;

use axum::{http::StatusCode, Json};
use domain::{FormError, Notification};

/// Every failed form action answers with the notification the user sees.
pub type NotificationError = (StatusCode, Json<Notification>);

pub fn notification_error(err: FormError) -> NotificationError {
    let status = match err {
        FormError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FormError::RemoteWrite(_) => StatusCode::BAD_GATEWAY,
        FormError::EditNotSupported => StatusCode::CONFLICT,
        FormError::CommentNotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(err.to_notification()))
}
