// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        notifications::NotificationDispatcher,
        ports::{jobs::JobScheduler, time::Clock},
    },
    domain::article::{
        Article, ArticleChange, ArticleId, ArticleReadRepository, ArticleWriteRepository,
        RelationshipRepository,
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) relationship_repo: Arc<dyn RelationshipRepository>,
    pub(super) dispatcher: NotificationDispatcher,
    pub(super) jobs: Arc<dyn JobScheduler>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        relationship_repo: Arc<dyn RelationshipRepository>,
        dispatcher: NotificationDispatcher,
        jobs: Arc<dyn JobScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            relationship_repo,
            dispatcher,
            jobs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: ArticleId) -> ApplicationResult<Article> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }

    /// Hands a committed save to the dispatcher without waiting for it.
    pub(super) fn publish_saved(&self, previous: Option<&Article>, current: &Article) {
        let change = ArticleChange::saved(previous, current.clone());
        tracing::debug!(
            article_id = %current.id,
            transition = %change.transition,
            "article saved"
        );
        drop(self.dispatcher.dispatch(change));
    }
}
