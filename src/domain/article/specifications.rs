//! Named listing scopes.
//!
//! A scope is plain data: a conjunction of filters plus an optional ordering.
//! Storage adapters translate it to SQL; [`ArticleScope::matches`] and
//! [`ArticleScope::compare`] give the same answers in memory.

use crate::domain::article::entity::Article;
use crate::domain::article::lifecycle;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleFilter {
    Unarchived,
    Archived,
    Unrotten,
    Rotten,
    Guide,
    /// `updated_at >= cutoff`
    UpdatedSince(DateTime<Utc>),
    /// `updated_at < cutoff`
    UpdatedBefore(DateTime<Utc>),
    /// Author has not had a staleness reminder within the reminder window
    /// as of the given instant.
    AuthorReminderDue(DateTime<Utc>),
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            ArticleFilter::Unarchived => article.archived_at.is_none(),
            ArticleFilter::Archived => article.archived_at.is_some(),
            ArticleFilter::Unrotten => article.rotted_at.is_none(),
            ArticleFilter::Rotten => article.rotted_at.is_some(),
            ArticleFilter::Guide => article.guide,
            ArticleFilter::UpdatedSince(cutoff) => article.updated_at >= *cutoff,
            ArticleFilter::UpdatedBefore(cutoff) => article.updated_at < *cutoff,
            ArticleFilter::AuthorReminderDue(now) => {
                article.ready_to_notify_author_of_staleness(*now)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleOrdering {
    /// Never-rotten first, then most recently rotted; then `updated_at`
    /// desc, then `created_at` desc.
    Current,
    /// Endorsements, subscriptions, visits; all descending.
    Popular,
    /// Title ascending.
    Alphabetical,
}

impl ArticleOrdering {
    /// Ties are broken by id descending so pages are deterministic.
    pub fn compare(&self, a: &Article, b: &Article) -> Ordering {
        let primary = match self {
            ArticleOrdering::Current => compare_rotted_desc_nulls_first(a, b)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| b.created_at.cmp(&a.created_at)),
            ArticleOrdering::Popular => b
                .endorsements_count
                .cmp(&a.endorsements_count)
                .then_with(|| b.subscriptions_count.cmp(&a.subscriptions_count))
                .then_with(|| b.visits.cmp(&a.visits)),
            ArticleOrdering::Alphabetical => a.title.as_str().cmp(b.title.as_str()),
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

fn compare_rotted_desc_nulls_first(a: &Article, b: &Article) -> Ordering {
    match (a.rotted_at, b.rotted_at) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleScope {
    filters: Vec<ArticleFilter>,
    ordering: Option<ArticleOrdering>,
    limit: Option<u32>,
}

impl ArticleScope {
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything not archived, in the current ordering. The default base
    /// for listings and text search.
    pub fn current() -> Self {
        Self::all()
            .filter(ArticleFilter::Unarchived)
            .order_by(ArticleOrdering::Current)
    }

    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self::current()
            .filter(ArticleFilter::Unrotten)
            .filter(ArticleFilter::UpdatedSince(lifecycle::freshness_cutoff(now)))
    }

    pub fn stale(now: DateTime<Utc>) -> Self {
        Self::all().filter(ArticleFilter::UpdatedBefore(lifecycle::staleness_cutoff(now)))
    }

    pub fn archived() -> Self {
        Self::all().filter(ArticleFilter::Archived)
    }

    pub fn rotten() -> Self {
        Self::all().filter(ArticleFilter::Rotten)
    }

    pub fn guide() -> Self {
        Self::all().filter(ArticleFilter::Guide)
    }

    pub fn popular() -> Self {
        Self::all().order_by(ArticleOrdering::Popular)
    }

    pub fn alphabetical() -> Self {
        Self::all().order_by(ArticleOrdering::Alphabetical)
    }

    pub fn filter(mut self, filter: ArticleFilter) -> Self {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
        self
    }

    /// Replaces any previous ordering.
    pub fn order_by(mut self, ordering: ArticleOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[ArticleFilter] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<ArticleOrdering> {
        self.ordering
    }

    pub fn max_results(&self) -> Option<u32> {
        self.limit
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.filters.iter().all(|filter| filter.matches(article))
    }

    pub fn compare(&self, a: &Article, b: &Article) -> Ordering {
        match self.ordering {
            Some(ordering) => ordering.compare(a, b),
            None => a.id.cmp(&b.id),
        }
    }

    /// Filters, sorts and truncates an in-memory collection.
    pub fn apply(&self, articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
        let mut selected: Vec<Article> = articles
            .into_iter()
            .filter(|article| self.matches(article))
            .collect();
        selected.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            selected.truncate(limit as usize);
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::value_objects::{ArticleContent, ArticleId, ArticleTitle};
    use crate::domain::user::UserId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 15, 12, 0, 0).unwrap()
    }

    fn article(id: i64, title: &str, updated_days_ago: i64) -> Article {
        let updated_at = now() - Duration::days(updated_days_ago);
        Article {
            id: ArticleId::new(id).unwrap(),
            title: ArticleTitle::new(title).unwrap(),
            content: ArticleContent::default(),
            author_id: UserId::new(1).unwrap(),
            editor_id: None,
            guide: false,
            created_at: updated_at,
            updated_at,
            archived_at: None,
            rotted_at: None,
            rot_reporter_id: None,
            last_notified_author_at: None,
            tags_count: 0,
            endorsements_count: 0,
            subscriptions_count: 0,
            visits: 0,
        }
    }

    fn ids(articles: &[Article]) -> Vec<i64> {
        articles.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn current_excludes_archived_and_puts_rotten_after_clean() {
        let recent = article(1, "Recent", 1);
        let older = article(2, "Older", 3);
        let mut rotten = article(3, "Rotten", 0);
        rotten.rotted_at = Some(now());
        let mut archived = article(4, "Archived", 0);
        archived.archived_at = Some(now());

        let listed = ArticleScope::current().apply(vec![older, rotten, archived, recent]);
        assert_eq!(ids(&listed), vec![1, 2, 3]);
    }

    #[test]
    fn more_recently_rotted_comes_first_among_rotten() {
        let mut a = article(1, "A", 0);
        a.rotted_at = Some(now() - Duration::days(5));
        let mut b = article(2, "B", 0);
        b.rotted_at = Some(now() - Duration::days(1));
        let listed = ArticleScope::current().apply(vec![a, b]);
        assert_eq!(ids(&listed), vec![2, 1]);
    }

    #[test]
    fn fresh_filters_flags_and_window() {
        let fresh = article(1, "Fresh", 2);
        let old = article(2, "Old", 10);
        let mut rotten = article(3, "Rotten", 1);
        rotten.rotted_at = Some(now());
        let mut archived = article(4, "Archived", 1);
        archived.archived_at = Some(now());

        let listed = ArticleScope::fresh(now()).apply(vec![fresh, old, rotten, archived]);
        assert_eq!(ids(&listed), vec![1]);
    }

    #[test]
    fn stale_ignores_flags() {
        let mut archived_stale = article(1, "Archived stale", 400);
        archived_stale.archived_at = Some(now());
        let recent = article(2, "Recent", 10);
        let listed = ArticleScope::stale(now()).apply(vec![archived_stale, recent]);
        assert_eq!(ids(&listed), vec![1]);
    }

    #[test]
    fn popular_ranks_by_endorsements_then_subscriptions_then_visits() {
        let mut a = article(1, "A", 0);
        a.endorsements_count = 2;
        let mut b = article(2, "B", 0);
        b.endorsements_count = 2;
        b.subscriptions_count = 1;
        let mut c = article(3, "C", 0);
        c.visits = 100;
        let listed = ArticleScope::popular().apply(vec![a, b, c]);
        assert_eq!(ids(&listed), vec![2, 1, 3]);
    }

    #[test]
    fn alphabetical_with_limit() {
        let listed = ArticleScope::alphabetical().limit(2).apply(vec![
            article(1, "Zebra", 0),
            article(2, "Apple", 0),
            article(3, "Mango", 0),
        ]);
        assert_eq!(ids(&listed), vec![2, 3]);
    }

    #[test]
    fn scopes_compose_and_reorder() {
        let scope = ArticleScope::current()
            .filter(ArticleFilter::Guide)
            .order_by(ArticleOrdering::Alphabetical);
        assert_eq!(
            scope.filters(),
            &[ArticleFilter::Unarchived, ArticleFilter::Guide]
        );
        assert_eq!(scope.ordering(), Some(ArticleOrdering::Alphabetical));
    }
}
