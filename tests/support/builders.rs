// tests/support/builders.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;

use kb_core::application::services::{
    ApplicationServices, Collaborators, Repositories, ServiceSettings,
};
use kb_core::domain::article::*;
use kb_core::domain::user::UserId;
use kb_core::infrastructure::repositories::InMemoryArticleStore;

use super::mocks::{
    CountingSearchEngine, FixedClock, RecordingAnnouncer, RecordingJobs, RecordingNotifier,
    fixed_now,
};

pub fn user(id: i64) -> UserId {
    UserId::new(id).unwrap()
}

/// Stored article with explicit timestamps, for seeding the in-memory store.
pub struct ArticleBuilder {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    editor_id: Option<i64>,
    guide: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
    rotted: Option<(DateTime<Utc>, i64)>,
    last_notified_author_at: Option<DateTime<Utc>>,
    endorsements_count: u32,
    subscriptions_count: u32,
    visits: u64,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            title: "Test Article".into(),
            content: "Test content".into(),
            author_id: 1,
            editor_id: None,
            guide: false,
            created_at: fixed_now(),
            updated_at: fixed_now(),
            archived_at: None,
            rotted: None,
            last_notified_author_at: None,
            endorsements_count: 0,
            subscriptions_count: 0,
            visits: 0,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn editor(mut self, editor_id: i64) -> Self {
        self.editor_id = Some(editor_id);
        self
    }

    pub fn guide(mut self) -> Self {
        self.guide = true;
        self
    }

    /// Sets both `created_at` and `updated_at`.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    pub fn archived_at(mut self, at: DateTime<Utc>) -> Self {
        self.archived_at = Some(at);
        self
    }

    pub fn rotted(mut self, at: DateTime<Utc>, reporter: i64) -> Self {
        self.rotted = Some((at, reporter));
        self
    }

    pub fn notified_author_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_notified_author_at = Some(at);
        self
    }

    pub fn popularity(mut self, endorsements: u32, subscriptions: u32, visits: u64) -> Self {
        self.endorsements_count = endorsements;
        self.subscriptions_count = subscriptions;
        self.visits = visits;
        self
    }

    pub fn build(self) -> Article {
        Article {
            id: ArticleId::new(self.id).unwrap(),
            title: ArticleTitle::new(self.title).unwrap(),
            content: ArticleContent::new(self.content),
            author_id: user(self.author_id),
            editor_id: self.editor_id.map(user),
            guide: self.guide,
            created_at: self.created_at,
            updated_at: self.updated_at,
            archived_at: self.archived_at,
            rotted_at: self.rotted.map(|(at, _)| at),
            rot_reporter_id: self.rotted.map(|(_, reporter)| user(reporter)),
            last_notified_author_at: self.last_notified_author_at,
            tags_count: 0,
            endorsements_count: self.endorsements_count,
            subscriptions_count: self.subscriptions_count,
            visits: self.visits,
        }
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Services wired to the in-memory store and recording collaborators.
pub struct Harness {
    pub services: ApplicationServices,
    pub store: Arc<InMemoryArticleStore>,
    pub announcer: Arc<RecordingAnnouncer>,
    pub notifier: Arc<RecordingNotifier>,
    pub jobs: Arc<RecordingJobs>,
    pub search: Arc<CountingSearchEngine>,
    pub clock: Arc<FixedClock>,
}

pub struct HarnessBuilder {
    announcer: RecordingAnnouncer,
    notifier: RecordingNotifier,
    jobs: RecordingJobs,
    settings: ServiceSettings,
}

impl HarnessBuilder {
    pub fn notifier(mut self, notifier: RecordingNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn announcer(mut self, announcer: RecordingAnnouncer) -> Self {
        self.announcer = announcer;
        self
    }

    pub fn jobs(mut self, jobs: RecordingJobs) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Harness {
        let store = Arc::new(InMemoryArticleStore::new());
        let announcer = Arc::new(self.announcer);
        let notifier = Arc::new(self.notifier);
        let jobs = Arc::new(self.jobs);
        let search = Arc::new(CountingSearchEngine::new());
        let clock = Arc::new(FixedClock::new());

        let repos = Repositories {
            article_write: store.clone(),
            article_read: store.clone(),
            tags: store.clone(),
            relationships: store.clone(),
            search: search.clone(),
        };
        let collaborators = Collaborators {
            announcer: announcer.clone(),
            notifier: notifier.clone(),
            jobs: jobs.clone(),
            clock: clock.clone(),
        };

        Harness {
            services: ApplicationServices::new(repos, collaborators, self.settings),
            store,
            announcer,
            notifier,
            jobs,
            search,
            clock,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            announcer: RecordingAnnouncer::new(),
            notifier: RecordingNotifier::new(),
            jobs: RecordingJobs::new(),
            settings: ServiceSettings::default(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Seeds `article` directly, bypassing commands and notifications.
    pub fn seed(&self, article: Article) -> Article {
        self.store.seed(article.clone()).unwrap();
        article
    }

    pub async fn stored(&self, id: i64) -> Option<Article> {
        ArticleReadRepository::find_by_id(self.store.as_ref(), ArticleId::new(id).unwrap())
            .await
            .unwrap()
    }

    pub async fn relationships(&self, kind: RelationshipKind, id: i64) -> Vec<Relationship> {
        RelationshipRepository::list(self.store.as_ref(), kind, ArticleId::new(id).unwrap())
            .await
            .unwrap()
    }

    pub async fn tag_labels(&self, id: i64) -> Vec<String> {
        TagRepository::tags_for_article(self.store.as_ref(), ArticleId::new(id).unwrap())
            .await
            .unwrap()
            .into_iter()
            .map(|tag| tag.label.to_string())
            .collect()
    }
}
