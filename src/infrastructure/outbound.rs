//! Outbound adapters that write to the structured log instead of a chat
//! webhook, mailer or job queue. Deployments that need real delivery swap
//! these for their own port implementations.

use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::jobs::{Job, JobScheduler};
use crate::application::ports::notifications::{AnnounceChannel, SubscriberNotifier};
use crate::domain::article::{Article, ArticleId, Relationship, TransitionKind};
use async_trait::async_trait;

/// One-line summary of a change, e.g. `"Onboarding" was archived`.
pub fn announcement_text(article: &Article, transition: TransitionKind) -> String {
    let verb = match transition {
        TransitionKind::Created => "was created",
        TransitionKind::Updated => "was updated",
        TransitionKind::Archived => "was archived",
        TransitionKind::Rotten => "was marked rotten",
        TransitionKind::Destroyed => "was deleted",
    };
    format!("\"{article}\" {verb}")
}

#[derive(Default, Clone)]
pub struct TracingAnnounceChannel;

#[async_trait]
impl AnnounceChannel for TracingAnnounceChannel {
    async fn announce(
        &self,
        article: &Article,
        transition: TransitionKind,
    ) -> ApplicationResult<()> {
        tracing::info!(
            article_id = %article.id,
            transition = %transition,
            message = %announcement_text(article, transition),
            "article announcement"
        );
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct TracingSubscriberNotifier;

#[async_trait]
impl SubscriberNotifier for TracingSubscriberNotifier {
    async fn send_update(
        &self,
        subscription: &Relationship,
        article_id: ArticleId,
    ) -> ApplicationResult<()> {
        tracing::info!(
            user_id = %subscription.user_id,
            article_id = %article_id,
            "subscriber update"
        );
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct TracingJobScheduler;

#[async_trait]
impl JobScheduler for TracingJobScheduler {
    async fn schedule(&self, job: Job) -> ApplicationResult<()> {
        let payload = serde_json::to_string(&job)
            .map_err(|e| ApplicationError::infrastructure(format!("job encoding failed: {e}")))?;
        tracing::info!(kind = job.kind(), %payload, "job scheduled");
        Ok(())
    }
}
