use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod db;

#[cfg(test)]
pub mod memory;

/// A stored article. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: uuid::Uuid,

    pub title: String,

    /// Author chosen label, only used for display and ordering
    pub date: String,

    pub content: String,

    pub created_at: DateTime<Utc>,
}

/// The client editable part of an article, as submitted by the admin forms.
///
/// Missing fields deserialize to empty strings and get rejected by
/// [ArticleForm::validate] instead of failing the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleForm {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub content: String,
}

impl ArticleForm {
    #[cfg(test)]
    pub fn new(title: &str, date: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            date: date.to_string(),
            content: content.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.is_empty() {
            return Err(StoreError::Invalid("title is required"));
        }
        if self.date.is_empty() {
            return Err(StoreError::Invalid("date is required"));
        }
        if self.content.is_empty() {
            return Err(StoreError::Invalid("content is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article {0} not found")]
    NotFound(uuid::Uuid),

    #[error("{0}")]
    Invalid(&'static str),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence contract for articles.
///
/// Lookups by identifier report [StoreError::NotFound] instead of an empty
/// success so callers can pick their own recovery.
#[async_trait]
pub trait ArticleStore: std::fmt::Debug + Send + Sync {
    async fn insert(&self, form: ArticleForm) -> Result<Article, StoreError>;

    /// All articles, `date` descending compared as plain text.
    async fn list(&self) -> Result<Vec<Article>, StoreError>;

    async fn find(&self, id: uuid::Uuid) -> Result<Article, StoreError>;

    /// Replaces title, date and content. `id` and `created_at` are kept.
    async fn update(&self, id: uuid::Uuid, form: ArticleForm) -> Result<Article, StoreError>;

    async fn delete(&self, id: uuid::Uuid) -> Result<(), StoreError>;
}

/// Path identifiers that are not UUIDs can never resolve to an article.
pub fn parse_id(raw: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).ok()
}
