// src/application/commands/articles/lifecycle.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult, ports::jobs::Job},
    domain::{
        article::{Article, ArticleId, ArticleUpdate, RotStateUpdate},
        user::UserId,
    },
};

pub struct ArchiveArticleCommand {
    pub id: i64,
    pub archive: bool,
}

pub struct RotArticleCommand {
    pub id: i64,
}

pub struct RefreshArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Archives or unarchives. Re-archiving overwrites the timestamp.
    pub async fn set_archive_state(
        &self,
        command: ArchiveArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;
        let previous = article.clone();
        let now = self.clock.now();

        if command.archive {
            article.archive(now);
        } else {
            article.unarchive();
        }

        let update =
            ArticleUpdate::new(id, previous.updated_at).with_archived_at(article.archived_at);
        let updated = self.commit(&previous, update).await?;
        tracing::info!(article_id = %id, archived = command.archive, "archive state changed");
        Ok(ArticleDto::at(updated, now))
    }

    /// Flags the article as needing an update and queues a note to the
    /// author. Queueing failures are logged, not returned.
    pub async fn rot_article(
        &self,
        reporter: UserId,
        command: RotArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;
        let previous = article.clone();
        let now = self.clock.now();

        article.rot(reporter, now);
        let update = ArticleUpdate::new(id, previous.updated_at)
            .with_rot_state(RotStateUpdate::Reported { at: now, reporter });
        let updated = self.commit(&previous, update).await?;

        if let Err(err) = self.jobs.schedule(Job::article_rotten(id, reporter)).await {
            tracing::warn!(
                article_id = %id,
                reporter_id = %reporter,
                error = %err,
                "failed to schedule rotten-article notification"
            );
        }

        tracing::info!(article_id = %id, reporter_id = %reporter, "article marked rotten");
        Ok(ArticleDto::at(updated, now))
    }

    /// Clears the rot flag and bumps `updated_at`, putting the article back
    /// in the freshness window.
    pub async fn refresh_article(
        &self,
        command: RefreshArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self.load(id).await?;
        let previous = article.clone();
        let now = self.clock.now();

        article.refresh(now);
        let mut update =
            ArticleUpdate::new(id, previous.updated_at).with_rot_state(RotStateUpdate::Cleared);
        update.set_updated_at(article.updated_at);
        let updated = self.commit(&previous, update).await?;

        tracing::info!(article_id = %id, "article refreshed");
        Ok(ArticleDto::at(updated, now))
    }

    async fn commit(&self, previous: &Article, update: ArticleUpdate) -> ApplicationResult<Article> {
        let updated = self.write_repo.update(update).await?;
        self.publish_saved(Some(previous), &updated);
        Ok(updated)
    }
}
