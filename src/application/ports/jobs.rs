// src/application/ports/jobs.rs
use crate::application::ApplicationResult;
use crate::domain::{article::ArticleId, user::UserId};
use async_trait::async_trait;
use serde::Serialize;

/// Background work handed to the job runner. Payloads carry raw ids so they
/// serialize without domain types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    /// Tell the author that someone flagged their article as rotten.
    ArticleRotten { article_id: i64, reporter_id: i64 },
    /// Remind the author that their article has not been updated in a while.
    StaleArticleReminder { article_id: i64, author_id: i64 },
}

impl Job {
    pub fn article_rotten(article_id: ArticleId, reporter: UserId) -> Self {
        Job::ArticleRotten {
            article_id: article_id.into(),
            reporter_id: reporter.into(),
        }
    }

    pub fn stale_article_reminder(article_id: ArticleId, author: UserId) -> Self {
        Job::StaleArticleReminder {
            article_id: article_id.into(),
            author_id: author.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Job::ArticleRotten { .. } => "article_rotten",
            Job::StaleArticleReminder { .. } => "stale_article_reminder",
        }
    }
}

/// At-least-once job queue. No ordering across job kinds.
#[async_trait]
pub trait JobScheduler: Send + Sync {
    async fn schedule(&self, job: Job) -> ApplicationResult<()>;
}
