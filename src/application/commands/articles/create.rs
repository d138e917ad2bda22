// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::{
        article::{ArticleContent, ArticleTitle, NewArticle, TagTokens},
        user::UserId,
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
    pub guide: bool,
    pub tags: Option<TagTokens>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content: Option<String>,
    guide: bool,
    tags: Option<TagTokens>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn guide(mut self, guide: bool) -> Self {
        self.guide = guide;
        self
    }

    pub fn tags(mut self, tags: TagTokens) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.unwrap_or_default(),
            guide: self.guide,
            tags: self.tags,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        author: UserId,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let content = ArticleContent::new(command.content);
        let now = self.clock.now();

        let new_article = NewArticle {
            title,
            content,
            author_id: author,
            guide: command.guide,
            created_at: now,
            tags: command.tags.as_ref().map(TagTokens::labels).unwrap_or_default(),
        };

        let created = self.write_repo.insert(new_article).await?;

        tracing::info!(article_id = %created.id, author_id = %author, "article created");
        self.publish_saved(None, &created);
        Ok(ArticleDto::at(created, now))
    }
}
