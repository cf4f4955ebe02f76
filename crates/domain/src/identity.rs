use crate::errors::ValidationError;
use crate::models::Draft;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SENDER_PARAM: &str = "sender";
pub const RECEIVER_PARAM: &str = "receiver";

/// Who a comment is from and who it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub sender: String,
    pub receiver: String,
}

/// Query parameters of the page the form was opened from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PageQuery(HashMap<String, String>);

impl PageQuery {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Present and non-blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }
}

/// Strategy for producing the sender/receiver pair of a submission.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, draft: &Draft, query: &PageQuery) -> Result<Identity, ValidationError>;
}

/// Identities typed into the form: the author's own email is the sender,
/// the requester email is the receiver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFieldIdentity;

impl IdentityResolver for FormFieldIdentity {
    fn resolve(&self, draft: &Draft, _query: &PageQuery) -> Result<Identity, ValidationError> {
        if is_blank(&draft.author_email) || is_blank(&draft.recipient_email) {
            return Err(ValidationError::MissingFields);
        }
        Ok(Identity {
            sender: draft.author_email.clone(),
            receiver: draft.recipient_email.clone(),
        })
    }
}

/// Identities carried by the page URL as `?sender=..&receiver=..`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStringIdentity;

impl IdentityResolver for QueryStringIdentity {
    fn resolve(&self, _draft: &Draft, query: &PageQuery) -> Result<Identity, ValidationError> {
        match (query.get(SENDER_PARAM), query.get(RECEIVER_PARAM)) {
            (Some(sender), Some(receiver)) => Ok(Identity {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
            }),
            _ => Err(ValidationError::MissingUrlIdentity),
        }
    }
}

/// Configurable choice between the two resolvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    Fields,
    #[default]
    Query,
}

impl IdentityMode {
    pub fn resolver(&self) -> Box<dyn IdentityResolver> {
        match self {
            IdentityMode::Fields => Box::new(FormFieldIdentity),
            IdentityMode::Query => Box::new(QueryStringIdentity),
        }
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
