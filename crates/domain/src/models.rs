use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Comment,
    Issue,
    Bug,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::Issue => "issue",
            Category::Bug => "bug",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The comment being composed. Reset to `Draft::default()` after every
/// attempt that reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub author_name: String,
    pub author_email: String,
    pub recipient_email: String,
    pub category: Category,
    pub has_image_issue: bool,
    pub image: Option<String>,
    pub message: String,
}

impl Draft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::AuthorName(v) => self.author_name = v,
            FieldUpdate::AuthorEmail(v) => self.author_email = v,
            FieldUpdate::RecipientEmail(v) => self.recipient_email = v,
            FieldUpdate::Category(v) => self.category = v,
            FieldUpdate::HasImageIssue(v) => self.has_image_issue = v,
            FieldUpdate::Message(v) => self.message = v,
        }
    }
}

/// One user edit of a text/select/checkbox input. The image has its own
/// operations since it goes through the file encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    AuthorName(String),
    AuthorEmail(String),
    RecipientEmail(String),
    Category(Category),
    HasImageIssue(bool),
    Message(String),
}

/// Row shape accepted by the store's create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedComment {
    pub blog_writer_email: String,
    pub commenter_email: String,
    pub comment: String,
    pub name_commenter: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

// `timestamp without time zone` columns come back without an offset
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Identifier assigned by the store. PostgREST hands back numbers for
/// bigint keys and strings for uuid keys; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for CommentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "comment id must be a string or number, got {}",
                other
            ))),
        }
    }
}

/// A row as returned by the store, also the element type of the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredComment {
    pub id: CommentId,
    #[serde(flatten)]
    pub record: PersistedComment,
}
