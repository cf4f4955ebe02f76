use crate::models::CommentId;
use crate::notification::{Notification, Severity};
use thiserror::Error;

/// Local rejection of a draft. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Missing sender or receiver in the page URL")]
    MissingUrlIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteWriteError {
    #[error("the store returned no data")]
    NoData,
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Error: {0}")]
    RemoteWrite(#[from] RemoteWriteError),
    #[error("You cannot edit comments")]
    EditNotSupported,
    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),
}

impl FormError {
    pub fn severity(&self) -> Severity {
        match self {
            FormError::EditNotSupported => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn to_notification(&self) -> Notification {
        Notification {
            message: self.to_string(),
            severity: self.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_read_like_the_form_banner() {
        let err = FormError::from(RemoteWriteError::Rejected("permission denied".into()));
        assert_eq!(err.to_string(), "Error: permission denied");
        assert_eq!(err.severity(), Severity::Error);

        let err = FormError::from(RemoteWriteError::NoData);
        assert_eq!(err.to_string(), "Error: the store returned no data");

        let n = FormError::EditNotSupported.to_notification();
        assert_eq!(n, Notification::warning("You cannot edit comments"));
    }
}
