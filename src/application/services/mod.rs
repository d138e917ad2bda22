// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::articles::ArticleCommandService,
        maintenance::MaintenanceService,
        notifications::NotificationDispatcher,
        ports::{AnnounceChannelPort, ClockPort, JobSchedulerPort, SubscriberNotifierPort},
        queries::articles::ArticleQueryService,
    },
    domain::article::{
        ArticleReadRepository, ArticleWriteRepository, RelationshipRepository, SearchEngine,
        TagRepository, search::DEFAULT_TRIGRAM_THRESHOLD,
    },
};

/// Storage and search adapters.
#[derive(Clone)]
pub struct Repositories {
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub relationships: Arc<dyn RelationshipRepository>,
    pub search: Arc<dyn SearchEngine>,
}

/// Outbound side effects and time.
#[derive(Clone)]
pub struct Collaborators {
    pub announcer: Arc<AnnounceChannelPort>,
    pub notifier: Arc<SubscriberNotifierPort>,
    pub jobs: Arc<JobSchedulerPort>,
    pub clock: Arc<ClockPort>,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub trigram_threshold: f32,
    pub staleness_sweep_limit: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            trigram_threshold: DEFAULT_TRIGRAM_THRESHOLD,
            staleness_sweep_limit: 100,
        }
    }
}

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub maintenance: Arc<MaintenanceService>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        collaborators: Collaborators,
        settings: ServiceSettings,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(
            Arc::clone(&repos.relationships),
            Arc::clone(&collaborators.announcer),
            Arc::clone(&collaborators.notifier),
        );

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.relationships),
            dispatcher,
            Arc::clone(&collaborators.jobs),
            Arc::clone(&collaborators.clock),
        ));

        let article_queries = Arc::new(
            ArticleQueryService::new(
                Arc::clone(&repos.article_read),
                Arc::clone(&repos.tags),
                Arc::clone(&repos.relationships),
                Arc::clone(&repos.search),
                Arc::clone(&collaborators.clock),
            )
            .with_trigram_threshold(settings.trigram_threshold),
        );

        let maintenance = Arc::new(MaintenanceService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.tags),
            Arc::clone(&collaborators.jobs),
            Arc::clone(&collaborators.clock),
            settings.staleness_sweep_limit,
        ));

        Self {
            article_commands,
            article_queries,
            maintenance,
        }
    }
}
