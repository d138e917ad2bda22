// src/application/ports/notifications.rs
use crate::application::ApplicationResult;
use crate::domain::article::{Article, ArticleId, Relationship, TransitionKind};
use async_trait::async_trait;

/// Team-wide feed of article changes (chat webhook or similar). Best effort.
#[async_trait]
pub trait AnnounceChannel: Send + Sync {
    async fn announce(&self, article: &Article, transition: TransitionKind)
    -> ApplicationResult<()>;
}

/// Delivers "this article changed" notices to one subscriber.
#[async_trait]
pub trait SubscriberNotifier: Send + Sync {
    async fn send_update(
        &self,
        subscription: &Relationship,
        article_id: ArticleId,
    ) -> ApplicationResult<()>;
}
