// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::article::{ArticleChange, ArticleId},
};

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Deletes the article together with its tag links, endorsements and
    /// subscriptions, then announces the removal.
    pub async fn delete_article(&self, command: DeleteArticleCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        let article = self.load(id).await?;

        self.write_repo.delete(id).await?;

        tracing::info!(article_id = %id, "article deleted");
        drop(self.dispatcher.dispatch(ArticleChange::destroyed(article)));
        Ok(())
    }
}
