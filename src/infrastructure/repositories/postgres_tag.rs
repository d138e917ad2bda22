use super::map_sqlx;
use crate::domain::article::{ArticleId, Tag, TagId, TagLabel, TagRepository};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool};

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    label: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            label: TagLabel::new(row.label)?,
        })
    }
}

/// Creates missing tags, replaces the article's links and sets
/// `tags_count`, all on the caller's transaction. Returns the new count.
pub(super) async fn write_article_tags(
    conn: &mut PgConnection,
    article_id: ArticleId,
    labels: &[TagLabel],
) -> DomainResult<u32> {
    let labels: Vec<&str> = labels.iter().map(TagLabel::as_str).collect();

    // A concurrent insert of the same label blocks here until it settles.
    sqlx::query(
        "INSERT INTO tags (label)
         SELECT label FROM UNNEST($1::TEXT[]) AS label
         ON CONFLICT (label) DO NOTHING",
    )
    .bind(&labels)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    sqlx::query("DELETE FROM articles_tags WHERE article_id = $1")
        .bind(i64::from(article_id))
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    sqlx::query(
        "INSERT INTO articles_tags (article_id, tag_id)
         SELECT $1, t.id FROM tags t WHERE t.label = ANY($2::TEXT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(i64::from(article_id))
    .bind(&labels)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    let count: Option<i32> = sqlx::query_scalar(
        "UPDATE articles
         SET tags_count = (SELECT COUNT(*) FROM articles_tags WHERE article_id = $1)
         WHERE id = $1
         RETURNING tags_count",
    )
    .bind(i64::from(article_id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    let count = count.ok_or_else(|| DomainError::NotFound("article not found".into()))?;
    u32::try_from(count)
        .map_err(|_| DomainError::Persistence(format!("negative tags_count: {count}")))
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn tags_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT t.id, t.label
             FROM tags t
             JOIN articles_tags at ON at.tag_id = t.id
             WHERE at.article_id = $1
             ORDER BY t.label",
        )
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Tag::try_from).collect()
    }

    async fn reset_tag_counts(&self) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE articles a
             SET tags_count = counted.total
             FROM (
                 SELECT ar.id, COUNT(at.tag_id)::INTEGER AS total
                 FROM articles ar
                 LEFT JOIN articles_tags at ON at.article_id = ar.id
                 GROUP BY ar.id
             ) AS counted
             WHERE a.id = counted.id AND a.tags_count <> counted.total",
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }
}
