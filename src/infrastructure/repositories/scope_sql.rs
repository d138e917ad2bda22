//! Translation of [`ArticleScope`] into SQL fragments.

use crate::domain::article::{ArticleFilter, ArticleOrdering, ArticleScope};
use sqlx::{Postgres, QueryBuilder};

pub(super) const ARTICLE_COLUMNS: &str = "id, title, content, author_id, editor_id, guide, \
     created_at, updated_at, archived_at, rotted_at, rot_reporter_id, last_notified_author_at, \
     tags_count, endorsements_count, subscriptions_count, visits";

pub(super) fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &[ArticleFilter]) {
    for (position, filter) in filters.iter().enumerate() {
        builder.push(if position == 0 { " WHERE " } else { " AND " });
        match filter {
            ArticleFilter::Unarchived => {
                builder.push("archived_at IS NULL");
            }
            ArticleFilter::Archived => {
                builder.push("archived_at IS NOT NULL");
            }
            ArticleFilter::Unrotten => {
                builder.push("rotted_at IS NULL");
            }
            ArticleFilter::Rotten => {
                builder.push("rotted_at IS NOT NULL");
            }
            ArticleFilter::Guide => {
                builder.push("guide = TRUE");
            }
            ArticleFilter::UpdatedSince(cutoff) => {
                builder.push("updated_at >= ");
                builder.push_bind(*cutoff);
            }
            ArticleFilter::UpdatedBefore(cutoff) => {
                builder.push("updated_at < ");
                builder.push_bind(*cutoff);
            }
            ArticleFilter::AuthorReminderDue(now) => {
                builder.push(
                    "(last_notified_author_at IS NULL \
                     OR date_trunc('day', last_notified_author_at AT TIME ZONE 'UTC') < (",
                );
                builder.push_bind(*now);
                builder.push(" AT TIME ZONE 'UTC') - INTERVAL '7 days')");
            }
        }
    }
}

fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, ordering: Option<ArticleOrdering>) {
    builder.push(match ordering {
        Some(ArticleOrdering::Current) => {
            " ORDER BY rotted_at DESC NULLS FIRST, updated_at DESC, created_at DESC, id DESC"
        }
        Some(ArticleOrdering::Popular) => {
            " ORDER BY endorsements_count DESC, subscriptions_count DESC, visits DESC, id DESC"
        }
        Some(ArticleOrdering::Alphabetical) => " ORDER BY title ASC, id DESC",
        None => " ORDER BY id ASC",
    });
}

fn push_limit(builder: &mut QueryBuilder<'_, Postgres>, scope: &ArticleScope) {
    if let Some(limit) = scope.max_results() {
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
    }
}

/// `SELECT ... FROM articles` restricted, ordered and limited by `scope`.
pub(super) fn select_scope(scope: &ArticleScope) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
    push_filters(&mut builder, scope.filters());
    push_ordering(&mut builder, scope.ordering());
    push_limit(&mut builder, scope);
    builder
}
