//! In-memory article store used to drive handlers in tests.

use super::{Article, ArticleForm, ArticleStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Default)]
pub struct MemoryArticles {
    articles: RwLock<HashMap<uuid::Uuid, Article>>,

    /// When set every operation fails as if the database went away
    offline: AtomicBool,
}

impl MemoryArticles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.articles.read().len()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleStore for MemoryArticles {
    async fn insert(&self, form: ArticleForm) -> Result<Article, StoreError> {
        self.check_online()?;
        form.validate()?;

        let article = Article {
            id: uuid::Uuid::new_v4(),
            title: form.title,
            date: form.date,
            content: form.content,
            created_at: Utc::now(),
        };

        self.articles.write().insert(article.id, article.clone());

        Ok(article)
    }

    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        self.check_online()?;

        let mut articles = self.articles.read().values().cloned().collect::<Vec<_>>();
        // Same order as the `COLLATE "C"` query in `ArticleDb::list`.
        articles.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(articles)
    }

    async fn find(&self, id: uuid::Uuid) -> Result<Article, StoreError> {
        self.check_online()?;

        self.articles
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: uuid::Uuid, form: ArticleForm) -> Result<Article, StoreError> {
        self.check_online()?;
        form.validate()?;

        let mut articles = self.articles.write();
        let Some(article) = articles.get_mut(&id) else {
            return Err(StoreError::NotFound(id));
        };

        article.title = form.title;
        article.date = form.date;
        article.content = form.content;

        Ok(article.clone())
    }

    async fn delete(&self, id: uuid::Uuid) -> Result<(), StoreError> {
        self.check_online()?;

        self.articles
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_submitted_fields() {
        let store = MemoryArticles::new();

        let created = store
            .insert(ArticleForm::new("Hello", "2024-01-01", "First post"))
            .await
            .unwrap();
        let fetched = store.find(created.id).await.unwrap();

        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.date, "2024-01-01");
        assert_eq!(fetched.content, "First post");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn list_sorts_by_date_text_descending() {
        let store = MemoryArticles::new();
        for date in ["2024-01-01", "2024-06-01", "2023-12-31"] {
            store
                .insert(ArticleForm::new("Title", date, "Body"))
                .await
                .unwrap();
        }

        let dates = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|article| article.date)
            .collect::<Vec<_>>();

        assert_eq!(dates, ["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[tokio::test]
    async fn list_compares_dates_bytewise() {
        let store = MemoryArticles::new();
        for date in ["Zulu", "alpha", "2024-01-01"] {
            store
                .insert(ArticleForm::new("Title", date, "Body"))
                .await
                .unwrap();
        }

        let dates = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|article| article.date)
            .collect::<Vec<_>>();

        assert_eq!(dates, ["alpha", "Zulu", "2024-01-01"]);
    }

    #[tokio::test]
    async fn update_keeps_store_assigned_fields() {
        let store = MemoryArticles::new();
        let created = store
            .insert(ArticleForm::new("Old", "2024-01-01", "Old body"))
            .await
            .unwrap();

        let updated = store
            .update(created.id, ArticleForm::new("New", "2024-02-02", "New body"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "New");
        assert_eq!(store.find(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryArticles::new();
        let id = uuid::Uuid::new_v4();

        assert!(matches!(store.find(id).await, Err(StoreError::NotFound(_))));
        assert!(matches!(
            store
                .update(id, ArticleForm::new("Title", "2024-01-01", "Body"))
                .await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn delete_removes_article() {
        let store = MemoryArticles::new();
        let created = store
            .insert(ArticleForm::new("Title", "2024-01-01", "Body"))
            .await
            .unwrap();

        store.delete(created.id).await.unwrap();

        assert!(matches!(
            store.find(created.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_forms_are_not_stored() {
        let store = MemoryArticles::new();

        let result = store.insert(ArticleForm::new("", "2024-01-01", "Body")).await;

        assert!(matches!(result, Err(StoreError::Invalid(_))));
        assert_eq!(store.len(), 0);
    }
}
