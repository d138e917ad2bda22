use super::map_sqlx;
use crate::domain::article::{ArticleId, Relationship, RelationshipKind, RelationshipRepository};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

/// Endorsements and subscriptions share one shape; only the link table and
/// the cached counter column differ.
#[derive(Clone)]
pub struct PostgresRelationshipRepository {
    pool: PgPool,
}

impl PostgresRelationshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Endorsement => "article_endorsements",
        RelationshipKind::Subscription => "article_subscriptions",
    }
}

fn counter_column(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Endorsement => "endorsements_count",
        RelationshipKind::Subscription => "subscriptions_count",
    }
}

#[derive(Debug, FromRow)]
struct RelationshipRow {
    article_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl RelationshipRow {
    fn into_relationship(self, kind: RelationshipKind) -> DomainResult<Relationship> {
        Ok(Relationship {
            kind,
            article_id: ArticleId::new(self.article_id)?,
            user_id: UserId::new(self.user_id)?,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl RelationshipRepository for PostgresRelationshipRepository {
    async fn get_or_create(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Relationship, bool)> {
        let table = table(kind);
        let counter = counter_column(kind);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let inserted = sqlx::query_as::<_, RelationshipRow>(&format!(
            "INSERT INTO {table} (article_id, user_id, created_at) VALUES ($1, $2, $3)
             ON CONFLICT (article_id, user_id) DO NOTHING
             RETURNING article_id, user_id, created_at"
        ))
        .bind(i64::from(article_id))
        .bind(i64::from(user_id))
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if let Some(row) = inserted {
            sqlx::query(&format!(
                "UPDATE articles SET {counter} = {counter} + 1 WHERE id = $1"
            ))
            .bind(i64::from(article_id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
            tx.commit().await.map_err(map_sqlx)?;
            return Ok((row.into_relationship(kind)?, true));
        }

        let existing = sqlx::query_as::<_, RelationshipRow>(&format!(
            "SELECT article_id, user_id, created_at FROM {table}
             WHERE article_id = $1 AND user_id = $2"
        ))
        .bind(i64::from(article_id))
        .bind(i64::from(user_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;

        match existing {
            Some(row) => Ok((row.into_relationship(kind)?, false)),
            // The conflicting row was removed between our insert and read.
            None => Err(DomainError::DuplicateRelationship(format!(
                "{} changed concurrently",
                kind.as_str()
            ))),
        }
    }

    async fn remove(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<bool> {
        let table = table(kind);
        let counter = counter_column(kind);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE article_id = $1 AND user_id = $2"
        ))
        .bind(i64::from(article_id))
        .bind(i64::from(user_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_sqlx)?;
            return Ok(false);
        }

        sqlx::query(&format!(
            "UPDATE articles SET {counter} = GREATEST({counter} - 1, 0) WHERE id = $1"
        ))
        .bind(i64::from(article_id))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(true)
    }

    async fn list(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
    ) -> DomainResult<Vec<Relationship>> {
        let rows = sqlx::query_as::<_, RelationshipRow>(&format!(
            "SELECT article_id, user_id, created_at FROM {} WHERE article_id = $1
             ORDER BY created_at, id",
            table(kind)
        ))
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| row.into_relationship(kind))
            .collect()
    }
}
