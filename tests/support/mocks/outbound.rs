// tests/support/mocks/outbound.rs
use async_trait::async_trait;
use kb_core::application::ApplicationResult;
use kb_core::application::error::ApplicationError;
use kb_core::application::ports::jobs::{Job, JobScheduler};
use kb_core::application::ports::notifications::{AnnounceChannel, SubscriberNotifier};
use kb_core::domain::article::{Article, ArticleId, Relationship, TransitionKind};
use kb_core::domain::user::UserId;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, mpsc};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Forwards every announcement to a channel so tests can await fan-out.
pub struct RecordingAnnouncer {
    tx: mpsc::UnboundedSender<(Article, TransitionKind)>,
    rx: AsyncMutex<mpsc::UnboundedReceiver<(Article, TransitionKind)>>,
    fail: bool,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: AsyncMutex::new(rx),
            fail: false,
        }
    }

    /// Records like [`RecordingAnnouncer::new`] but reports failure to the
    /// caller after recording.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Next announcement, or a panic when none arrives in time.
    pub async fn next(&self) -> (Article, TransitionKind) {
        let mut rx = self.rx.lock().await;
        tokio::time::timeout(RECV_TIMEOUT, rx.recv())
            .await
            .expect("timed out waiting for announcement")
            .expect("announcement channel closed")
    }

    /// True when nothing further is queued right now.
    pub async fn is_idle(&self) -> bool {
        tokio::task::yield_now().await;
        self.rx.lock().await.try_recv().is_err()
    }
}

impl Default for RecordingAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnounceChannel for RecordingAnnouncer {
    async fn announce(
        &self,
        article: &Article,
        transition: TransitionKind,
    ) -> ApplicationResult<()> {
        let _ = self.tx.send((article.clone(), transition));
        if self.fail {
            return Err(ApplicationError::infrastructure("announce channel down"));
        }
        Ok(())
    }
}

/// Keeps every attempted delivery; fails for one user when configured.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, ArticleId)>>,
    fail_for: Option<UserId>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(user: UserId) -> Self {
        Self {
            sent: Mutex::default(),
            fail_for: Some(user),
        }
    }

    pub fn recipients(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.sent.lock().unwrap().iter().map(|(u, _)| *u).collect();
        users.sort();
        users
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl SubscriberNotifier for RecordingNotifier {
    async fn send_update(
        &self,
        subscription: &Relationship,
        article_id: ArticleId,
    ) -> ApplicationResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((subscription.user_id, article_id));
        if self.fail_for == Some(subscription.user_id) {
            return Err(ApplicationError::infrastructure("mailbox unavailable"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingJobs {
    jobs: Mutex<Vec<Job>>,
    fail: bool,
}

impl RecordingJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            jobs: Mutex::default(),
            fail: true,
        }
    }

    pub fn scheduled(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobScheduler for RecordingJobs {
    async fn schedule(&self, job: Job) -> ApplicationResult<()> {
        if self.fail {
            return Err(ApplicationError::infrastructure("queue unavailable"));
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}
