use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::relationship::{Relationship, RelationshipKind};
use crate::domain::article::specifications::ArticleScope;
use crate::domain::article::tag::Tag;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Writes the row together with its tags: missing tags are created, the
    /// links are written and `tags_count` is set, all or nothing.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `Conflict` when the stored `updated_at` no longer equals
    /// `update.original_updated_at`. A tag replacement commits with the row
    /// or not at all.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Removes the article with its tag links, endorsements and
    /// subscriptions. Tags themselves survive.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
    /// Atomic `visits = visits + 1`; `false` when the article does not exist.
    async fn increment_visits(&self, id: ArticleId) -> DomainResult<bool>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn list(&self, scope: &ArticleScope) -> DomainResult<Vec<Article>>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn tags_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Tag>>;
    /// Recomputes every cached `tags_count`; returns how many rows changed.
    async fn reset_tag_counts(&self) -> DomainResult<u64>;
}

#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Idempotent insert backed by a unique (article, user) constraint; the
    /// counter on the article moves in the same transaction. The flag is
    /// `true` when a new row was created.
    async fn get_or_create(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Relationship, bool)>;
    /// `false` when there was nothing to remove.
    async fn remove(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<bool>;
    async fn list(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
    ) -> DomainResult<Vec<Relationship>>;
}
