// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use super::postgres_tag::write_article_tags;
use super::scope_sql::{ARTICLE_COLUMNS, select_scope};
use crate::domain::article::{
    Article, ArticleContent, ArticleId, ArticleReadRepository, ArticleScope, ArticleTitle,
    ArticleUpdate, ArticleWriteRepository, NewArticle, RotStateUpdate,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    editor_id: Option<i64>,
    guide: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
    rotted_at: Option<DateTime<Utc>>,
    rot_reporter_id: Option<i64>,
    last_notified_author_at: Option<DateTime<Utc>>,
    tags_count: i32,
    endorsements_count: i32,
    subscriptions_count: i32,
    visits: i64,
}

fn counter(value: i32, column: &str) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::Persistence(format!("negative {column}: {value}")))
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            content: ArticleContent::new(row.content),
            author_id: UserId::new(row.author_id)?,
            editor_id: row.editor_id.map(UserId::new).transpose()?,
            guide: row.guide,
            created_at: row.created_at,
            updated_at: row.updated_at,
            archived_at: row.archived_at,
            rotted_at: row.rotted_at,
            rot_reporter_id: row.rot_reporter_id.map(UserId::new).transpose()?,
            last_notified_author_at: row.last_notified_author_at,
            tags_count: counter(row.tags_count, "tags_count")?,
            endorsements_count: counter(row.endorsements_count, "endorsements_count")?,
            subscriptions_count: counter(row.subscriptions_count, "subscriptions_count")?,
            visits: u64::try_from(row.visits)
                .map_err(|_| DomainError::Persistence(format!("negative visits: {}", row.visits)))?,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            content,
            author_id,
            guide,
            created_at,
            tags,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, content, author_id, guide, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(title.as_str())
        .bind(content.as_str())
        .bind(i64::from(author_id))
        .bind(guide)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let mut created = Article::try_from(row)?;
        if !tags.is_empty() {
            created.tags_count = write_article_tags(&mut *tx, created.id, &tags).await?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            content,
            editor_id,
            guide,
            archived_at,
            rot_state,
            last_notified_author_at,
            tags,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(content) = content {
            builder.push(", content = ");
            builder.push_bind(content.into_inner());
        }

        if let Some(editor) = editor_id {
            builder.push(", editor_id = ");
            builder.push_bind(i64::from(editor));
        }

        if let Some(guide) = guide {
            builder.push(", guide = ");
            builder.push_bind(guide);
        }

        if let Some(archived_at) = archived_at {
            builder.push(", archived_at = ");
            builder.push_bind(archived_at);
        }

        match rot_state {
            Some(RotStateUpdate::Reported { at, reporter }) => {
                builder.push(", rotted_at = ");
                builder.push_bind(at);
                builder.push(", rot_reporter_id = ");
                builder.push_bind(i64::from(reporter));
            }
            Some(RotStateUpdate::Cleared) => {
                builder.push(", rotted_at = NULL");
            }
            None => {}
        }

        if let Some(at) = last_notified_author_at {
            builder.push(", last_notified_author_at = ");
            builder.push_bind(at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(format!(" RETURNING {ARTICLE_COLUMNS}"));

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let Some(row) = maybe_row else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM articles WHERE id = $1)")
                    .bind(i64::from(id))
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx)?;
            return if exists {
                Err(DomainError::Conflict(
                    "article update conflict, please retry".into(),
                ))
            } else {
                Err(DomainError::NotFound("article not found".into()))
            };
        };

        let mut updated = Article::try_from(row)?;
        if let Some(labels) = tags {
            updated.tags_count = write_article_tags(&mut *tx, id, &labels).await?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(updated)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn increment_visits(&self, id: ArticleId) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE articles SET visits = visits + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&self, scope: &ArticleScope) -> DomainResult<Vec<Article>> {
        let mut builder = select_scope(scope);
        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
