mod errors;
mod identity;
pub mod image;
mod models;
mod notification;
pub mod protocol;

pub use errors::{FormError, RemoteWriteError, ValidationError};
pub use identity::{
    FormFieldIdentity, Identity, IdentityMode, IdentityResolver, PageQuery, QueryStringIdentity,
    RECEIVER_PARAM, SENDER_PARAM,
};
pub use models::{Category, CommentId, Draft, FieldUpdate, PersistedComment, StoredComment};
pub use notification::{Notification, NotificationSlot, Severity};
pub use protocol::InsertOutcome;
