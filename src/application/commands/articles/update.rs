use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::{
        article::{ArticleContent, ArticleId, ArticleTitle, ArticleUpdate, TagTokens},
        user::UserId,
    },
};

/// An edit by `editor`. Unset fields keep their current value; `tags`
/// replaces the whole tag set when present.
pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub guide: Option<bool>,
    pub tags: Option<TagTokens>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        editor: UserId,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let title = command.title.map(ArticleTitle::new).transpose()?;
        let content = command.content.map(ArticleContent::new);

        let mut article = self.load(id).await?;
        let previous = article.clone();
        let now = self.clock.now();

        let new_title = title.unwrap_or_else(|| article.title.clone());
        let new_content = content.unwrap_or_else(|| article.content.clone());
        article.set_content(new_title.clone(), new_content.clone(), editor, now);

        let mut update = ArticleUpdate::new(id, previous.updated_at)
            .with_title(new_title)
            .with_content(new_content)
            .with_editor(editor);
        if let Some(guide) = command.guide {
            update = update.with_guide(guide);
        }
        if let Some(tokens) = &command.tags {
            update = update.with_tags(tokens.labels());
        }
        update.set_updated_at(article.updated_at);

        let updated = self.write_repo.update(update).await?;

        tracing::info!(article_id = %id, editor_id = %editor, "article updated");
        self.publish_saved(Some(&previous), &updated);
        Ok(ArticleDto::at(updated, now))
    }
}
