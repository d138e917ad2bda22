//! Ranked text search over `articles` using tsvector ranking blended with
//! pg_trgm similarity.

use super::map_sqlx;
use super::postgres_article::ArticleRow;
use super::scope_sql::{ARTICLE_COLUMNS, push_filters};
use crate::domain::article::search::SearchFields;
use crate::domain::article::{Article, SearchEngine, SearchHit, SearchRequest};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const HEADLINE_OPTIONS: &str = "StartSel=<mark>, StopSel=</mark>, MaxFragments=2, MaxWords=24";

#[derive(Clone)]
pub struct PostgresSearchEngine {
    pool: PgPool,
}

impl PostgresSearchEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SearchRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    rank: f32,
    highlight: Option<String>,
}

/// `stew & yum` becomes `stew:* & yum:*`. Terms are alphanumeric only, so
/// the result is always a valid tsquery.
fn prefix_tsquery(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| format!("{term}:*"))
        .collect::<Vec<_>>()
        .join(" & ")
}

fn push_document(builder: &mut QueryBuilder<'_, Postgres>, fields: SearchFields) {
    if fields == SearchFields::default() {
        builder.push("search");
        return;
    }
    builder.push("setweight(to_tsvector('english', coalesce(title, '')), '");
    builder.push(fields.title.as_char());
    builder.push("') || setweight(to_tsvector('english', coalesce(content, '')), '");
    builder.push(fields.content.as_char());
    builder.push("')");
}

fn build_query(request: &SearchRequest) -> QueryBuilder<'static, Postgres> {
    let raw = request.query.as_str().to_owned();
    let tsquery = prefix_tsquery(&request.query.terms());

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {ARTICLE_COLUMNS}, \
         (ts_rank(document, tsq) + GREATEST(similarity(title, raw), word_similarity(raw, content)))::REAL AS rank, \
         ts_headline('english', content, tsq, '{HEADLINE_OPTIONS}') AS highlight \
         FROM (SELECT {ARTICLE_COLUMNS}, "
    ));
    push_document(&mut builder, request.fields);
    builder.push(" AS document, to_tsquery('english', ");
    builder.push_bind(tsquery);
    builder.push(") AS tsq, ");
    builder.push_bind(raw);
    builder.push("::TEXT AS raw FROM articles");
    push_filters(&mut builder, request.scope.filters());
    builder.push(") AS scoped WHERE document @@ tsq OR similarity(title, raw) >= ");
    builder.push_bind(request.trigram_threshold);
    builder.push(" OR word_similarity(raw, content) >= ");
    builder.push_bind(request.trigram_threshold);
    builder.push(" ORDER BY rank DESC, id DESC");
    if let Some(limit) = request.scope.max_results() {
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
    }
    builder
}

#[async_trait]
impl SearchEngine for PostgresSearchEngine {
    async fn search(&self, request: &SearchRequest) -> DomainResult<Vec<SearchHit>> {
        let mut builder = build_query(request);
        let rows = builder
            .build_query_as::<SearchRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        tracing::debug!(query = %request.query.as_str(), hits = rows.len(), "article search");

        rows.into_iter()
            .map(|row| {
                Ok(SearchHit {
                    article: Article::try_from(row.article)?,
                    rank: row.rank,
                    highlight: row.highlight,
                })
            })
            .collect()
    }
}
