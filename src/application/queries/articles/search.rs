use super::ArticleQueryService;
use crate::{
    application::{dto::SearchHitDto, error::ApplicationResult},
    domain::article::{ArticleScope, SearchHit, TextSearch},
};

pub struct SearchArticlesQuery {
    pub query: String,
    /// Base scope; `None` means the current listing. Any limit set on it is
    /// honoured by both branches.
    pub scope: Option<ArticleScope>,
}

impl ArticleQueryService {
    /// Blank queries list the base scope as given, without touching the
    /// search engine. Anything else is ranked by the engine inside that scope.
    pub async fn text_search(
        &self,
        query: SearchArticlesQuery,
    ) -> ApplicationResult<Vec<SearchHitDto>> {
        let now = self.clock.now();

        let hits = match TextSearch::plan(&query.query, query.scope) {
            TextSearch::Unfiltered(scope) => self
                .read_repo
                .list(&scope)
                .await?
                .into_iter()
                .map(SearchHit::unranked)
                .collect(),
            TextSearch::Ranked(request) => {
                let request = request.with_trigram_threshold(self.trigram_threshold)?;
                tracing::debug!(query = request.query.as_str(), "running text search");
                self.search_engine.search(&request).await?
            }
        };

        Ok(hits.into_iter().map(|hit| SearchHitDto::at(hit, now)).collect())
    }
}
