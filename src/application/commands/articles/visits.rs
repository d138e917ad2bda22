use super::ArticleCommandService;
use crate::{application::error::ApplicationResult, domain::article::ArticleId};

impl ArticleCommandService {
    /// Counts a read. No notifications; `false` for an unknown article.
    pub async fn record_visit(&self, article_id: i64) -> ApplicationResult<bool> {
        let article_id = ArticleId::new(article_id)?;
        Ok(self.write_repo.increment_visits(article_id).await?)
    }
}
