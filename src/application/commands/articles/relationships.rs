use super::ArticleCommandService;
use crate::{
    application::{dto::RelationshipDto, error::ApplicationResult},
    domain::{
        article::{ArticleId, RelationshipKind},
        errors::DomainError,
        user::UserId,
    },
};

impl ArticleCommandService {
    pub async fn endorse(&self, user: UserId, article_id: i64) -> ApplicationResult<RelationshipDto> {
        self.link(RelationshipKind::Endorsement, user, article_id).await
    }

    /// `false` when the user had not endorsed the article.
    pub async fn unendorse(&self, user: UserId, article_id: i64) -> ApplicationResult<bool> {
        self.unlink(RelationshipKind::Endorsement, user, article_id).await
    }

    pub async fn subscribe(&self, user: UserId, article_id: i64) -> ApplicationResult<RelationshipDto> {
        self.link(RelationshipKind::Subscription, user, article_id).await
    }

    /// `false` when the user was not subscribed.
    pub async fn unsubscribe(&self, user: UserId, article_id: i64) -> ApplicationResult<bool> {
        self.unlink(RelationshipKind::Subscription, user, article_id).await
    }

    async fn link(
        &self,
        kind: RelationshipKind,
        user: UserId,
        article_id: i64,
    ) -> ApplicationResult<RelationshipDto> {
        let article_id = ArticleId::new(article_id)?;
        let now = self.clock.now();

        // A concurrent unlink can delete the row between the conflicting
        // insert and the read-back; one retry settles it.
        let (relationship, created) = match self
            .relationship_repo
            .get_or_create(kind, article_id, user, now)
            .await
        {
            Err(DomainError::DuplicateRelationship(msg)) => {
                tracing::debug!(kind = kind.as_str(), %article_id, user_id = %user, %msg, "retrying relationship insert");
                self.relationship_repo
                    .get_or_create(kind, article_id, user, now)
                    .await?
            }
            other => other?,
        };

        if created {
            tracing::info!(kind = kind.as_str(), %article_id, user_id = %user, "relationship created");
        }
        Ok(RelationshipDto::new(relationship, created))
    }

    async fn unlink(
        &self,
        kind: RelationshipKind,
        user: UserId,
        article_id: i64,
    ) -> ApplicationResult<bool> {
        let Ok(article_id) = ArticleId::new(article_id) else {
            return Ok(false);
        };
        let removed = self.relationship_repo.remove(kind, article_id, user).await?;
        if removed {
            tracing::info!(kind = kind.as_str(), %article_id, user_id = %user, "relationship removed");
        }
        Ok(removed)
    }
}
