use super::ArticleQueryService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::ArticleScope,
};
use chrono::{DateTime, Utc};

/// Named listings offered to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    Current,
    Fresh,
    Stale,
    Popular,
    Alphabetical,
    Archived,
    Rotten,
    Guide,
}

impl Listing {
    pub fn scope(self, now: DateTime<Utc>) -> ArticleScope {
        match self {
            Listing::Current => ArticleScope::current(),
            Listing::Fresh => ArticleScope::fresh(now),
            Listing::Stale => ArticleScope::stale(now),
            Listing::Popular => ArticleScope::popular(),
            Listing::Alphabetical => ArticleScope::alphabetical(),
            Listing::Archived => ArticleScope::archived(),
            Listing::Rotten => ArticleScope::rotten(),
            Listing::Guide => ArticleScope::guide(),
        }
    }
}

pub struct ListArticlesQuery {
    pub listing: Listing,
    pub limit: u32,
}

impl ArticleQueryService {
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<Vec<ArticleDto>> {
        let now = self.clock.now();
        let scope = query.listing.scope(now).limit(normalize_limit(query.limit));
        let records = self.read_repo.list(&scope).await?;
        Ok(records
            .into_iter()
            .map(|article| ArticleDto::at(article, now))
            .collect())
    }
}

pub(super) fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}
