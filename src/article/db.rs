use super::{Article, ArticleForm, ArticleStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ArticleDb {
    pool: sqlx::PgPool,
}

impl ArticleDb {
    pub async fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for ArticleDb {
    async fn insert(&self, form: ArticleForm) -> Result<Article, StoreError> {
        form.validate()?;

        let ArticleForm {
            title,
            date,
            content,
        } = form;

        let article = sqlx::query_as::<_, Article>(
            r#"INSERT INTO articles(id, title, "date", content, created_at) VALUES($1, $2, $3, $4, $5) RETURNING *"#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(title)
        .bind(date)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted article {}", article.id);

        Ok(article)
    }

    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        // Bytewise date order, newest insert first on ties. Keep in sync with
        // `MemoryArticles::list`.
        sqlx::query_as::<_, Article>(
            r#"SELECT * FROM articles ORDER BY "date" COLLATE "C" DESC, created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from)
    }

    async fn find(&self, id: uuid::Uuid) -> Result<Article, StoreError> {
        sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: uuid::Uuid, form: ArticleForm) -> Result<Article, StoreError> {
        form.validate()?;

        let ArticleForm {
            title,
            date,
            content,
        } = form;

        sqlx::query_as::<_, Article>(
            r#"UPDATE articles SET title = $2, "date" = $3, content = $4 WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(title)
        .bind(date)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: uuid::Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
