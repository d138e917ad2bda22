use super::ArticleQueryService;
use crate::{
    application::error::ApplicationResult,
    domain::article::{ArticleId, RelationshipKind},
};

impl ArticleQueryService {
    pub async fn endorsers(&self, article_id: i64) -> ApplicationResult<Vec<i64>> {
        self.related_users(RelationshipKind::Endorsement, article_id)
            .await
    }

    pub async fn subscribers(&self, article_id: i64) -> ApplicationResult<Vec<i64>> {
        self.related_users(RelationshipKind::Subscription, article_id)
            .await
    }

    async fn related_users(
        &self,
        kind: RelationshipKind,
        article_id: i64,
    ) -> ApplicationResult<Vec<i64>> {
        let article_id = ArticleId::new(article_id)?;
        let rows = self.relationship_repo.list(kind, article_id).await?;
        Ok(rows.into_iter().map(|r| r.user_id.into()).collect())
    }
}
