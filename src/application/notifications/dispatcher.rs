// src/application/notifications/dispatcher.rs
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    application::ports::notifications::{AnnounceChannel, SubscriberNotifier},
    domain::article::{
        Article, ArticleChange, RelationshipKind, RelationshipRepository, RelationshipSet,
    },
};

/// Fans committed article changes out to subscribers and the announce
/// channel. Runs after the write has committed; nothing here can fail the
/// write, and one failed recipient does not stop the others.
#[derive(Clone)]
pub struct NotificationDispatcher {
    relationship_repo: Arc<dyn RelationshipRepository>,
    announcer: Arc<dyn AnnounceChannel>,
    notifier: Arc<dyn SubscriberNotifier>,
}

impl NotificationDispatcher {
    pub fn new(
        relationship_repo: Arc<dyn RelationshipRepository>,
        announcer: Arc<dyn AnnounceChannel>,
        notifier: Arc<dyn SubscriberNotifier>,
    ) -> Self {
        Self {
            relationship_repo,
            announcer,
            notifier,
        }
    }

    /// Spawns delivery on the runtime and returns immediately. Callers may
    /// drop the handle.
    pub fn dispatch(&self, change: ArticleChange) -> JoinHandle<()> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.deliver(change).await })
    }

    /// Subscriber notices first (saves only), then the announcement.
    pub async fn deliver(&self, change: ArticleChange) {
        if !change.is_destroyed() {
            self.update_subscribers(&change.article).await;
        }
        self.announce(&change).await;
    }

    async fn update_subscribers(&self, article: &Article) {
        let subscriptions = match self
            .relationship_repo
            .list(RelationshipKind::Subscription, article.id)
            .await
        {
            Ok(rows) => {
                RelationshipSet::from_relationships(RelationshipKind::Subscription, article.id, rows)
            }
            Err(err) => {
                tracing::warn!(
                    article_id = %article.id,
                    error = %err,
                    "failed to load subscriptions; skipping subscriber updates"
                );
                return;
            }
        };

        for subscription in article.subscribers_to_update(&subscriptions) {
            if let Err(err) = self.notifier.send_update(subscription, article.id).await {
                tracing::warn!(
                    article_id = %article.id,
                    user_id = %subscription.user_id,
                    error = %err,
                    "subscriber update failed"
                );
            }
        }
    }

    async fn announce(&self, change: &ArticleChange) {
        if let Err(err) = self
            .announcer
            .announce(&change.article, change.transition)
            .await
        {
            tracing::warn!(
                article_id = %change.article.id,
                transition = %change.transition,
                error = %err,
                "announcement failed"
            );
        }
    }
}
