use crate::errors::{RemoteWriteError, ValidationError};
use crate::identity::{is_blank, Identity, IdentityResolver, PageQuery};
use crate::models::{Draft, PersistedComment, StoredComment};
use chrono::{DateTime, Utc};

pub const COMMENTS_TABLE: &str = "comments";
pub const MSG_COMMENT_ADDED: &str = "New comment added!";
pub const MSG_COMMENT_DELETED: &str = "Comment deleted";

/// What the store said about one insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written. Carries the returned rows that fit the local
    /// cache, which may be none of them.
    Inserted(Vec<StoredComment>),
    /// Success status but nothing came back.
    NoData,
    Rejected { message: String },
}

impl InsertOutcome {
    pub fn into_result(self) -> Result<Vec<StoredComment>, RemoteWriteError> {
        match self {
            InsertOutcome::Inserted(rows) => Ok(rows),
            InsertOutcome::NoData => Err(RemoteWriteError::NoData),
            InsertOutcome::Rejected { message } => Err(RemoteWriteError::Rejected(message)),
        }
    }
}

/// Name and message are always required; the resolver decides the rest.
pub fn validate_draft(
    draft: &Draft,
    resolver: &dyn IdentityResolver,
    query: &PageQuery,
) -> Result<Identity, ValidationError> {
    if is_blank(&draft.author_name) || is_blank(&draft.message) {
        return Err(ValidationError::MissingFields);
    }
    resolver.resolve(draft, query)
}

pub fn build_record(draft: &Draft, identity: Identity, created_at: DateTime<Utc>) -> PersistedComment {
    PersistedComment {
        blog_writer_email: identity.receiver,
        commenter_email: identity.sender,
        comment: draft.message.clone(),
        name_commenter: draft.author_name.clone(),
        category: draft.category,
        image: draft.image.clone(),
        created_at,
    }
}
