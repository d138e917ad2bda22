//! Process-local storage implementing every repository port. Used by the
//! integration tests and handy for running the services without Postgres.

use crate::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleScope, ArticleUpdate, ArticleWriteRepository,
    NewArticle, Relationship, RelationshipKind, RelationshipRepository, RelationshipSet, Tag,
    TagId, TagLabel, TagRepository,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default, Clone)]
struct StoreState {
    articles: BTreeMap<ArticleId, Article>,
    last_article_id: i64,
    tags: Vec<Tag>,
    tag_index: HashMap<TagLabel, TagId>,
    article_tags: HashMap<ArticleId, Vec<TagId>>,
    endorsements: HashMap<ArticleId, RelationshipSet>,
    subscriptions: HashMap<ArticleId, RelationshipSet>,
}

impl StoreState {
    fn article_mut(&mut self, id: ArticleId) -> DomainResult<&mut Article> {
        self.articles
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    fn tag_for(&mut self, label: &TagLabel) -> DomainResult<TagId> {
        if let Some(id) = self.tag_index.get(label) {
            return Ok(*id);
        }
        let id = TagId::new(i64::try_from(self.tags.len() + 1).unwrap_or(i64::MAX))?;
        self.tag_index.insert(label.clone(), id);
        self.tags.push(Tag {
            id,
            label: label.clone(),
        });
        Ok(id)
    }

    /// Creates missing tags, replaces the article's links and returns the
    /// new `tags_count`.
    fn replace_tags(&mut self, article_id: ArticleId, labels: &[TagLabel]) -> DomainResult<u32> {
        let mut ids: Vec<TagId> = Vec::with_capacity(labels.len());
        for label in labels {
            let id = self.tag_for(label)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        let count = saturating_u32(ids.len());
        self.article_mut(article_id)?.tags_count = count;
        self.article_tags.insert(article_id, ids);
        Ok(count)
    }

    fn relationships_mut(
        &mut self,
        kind: RelationshipKind,
        article_id: ArticleId,
    ) -> &mut RelationshipSet {
        let sets = match kind {
            RelationshipKind::Endorsement => &mut self.endorsements,
            RelationshipKind::Subscription => &mut self.subscriptions,
        };
        sets.entry(article_id)
            .or_insert_with(|| RelationshipSet::new(kind, article_id))
    }

    fn relationships(&self, kind: RelationshipKind, article_id: ArticleId) -> Option<&RelationshipSet> {
        match kind {
            RelationshipKind::Endorsement => self.endorsements.get(&article_id),
            RelationshipKind::Subscription => self.subscriptions.get(&article_id),
        }
    }
}

fn saturating_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[derive(Default)]
pub struct InMemoryArticleStore {
    state: Mutex<StoreState>,
    tag_writes_fail: AtomicBool,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }

    /// Runs `write` against a staged copy that replaces the live state only
    /// when every step succeeds.
    fn transaction<T>(
        &self,
        write: impl FnOnce(&mut StoreState) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let mut state = self.lock()?;
        let mut staged = state.clone();
        let value = write(&mut staged)?;
        *state = staged;
        Ok(value)
    }

    fn write_tags(
        &self,
        state: &mut StoreState,
        article_id: ArticleId,
        labels: &[TagLabel],
    ) -> DomainResult<u32> {
        if self.tag_writes_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("tag write failed".into()));
        }
        state.replace_tags(article_id, labels)
    }

    /// Makes every tag write fail, simulating a storage fault partway
    /// through a save.
    pub fn fail_tag_writes(&self, fail: bool) {
        self.tag_writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Overwrites the cached tag count, simulating drift for maintenance runs.
    pub fn corrupt_tags_count(&self, id: ArticleId, value: u32) -> DomainResult<()> {
        let mut state = self.lock()?;
        state.article_mut(id)?.tags_count = value;
        Ok(())
    }

    /// Stores an article as-is, keeping its id. Lets callers seed rows with
    /// timestamps the services would never produce.
    pub fn seed(&self, article: Article) -> DomainResult<()> {
        let mut state = self.lock()?;
        state.last_article_id = state.last_article_id.max(article.id.0);
        state.articles.insert(article.id, article);
        Ok(())
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.transaction(|state| {
            state.last_article_id += 1;
            let id = ArticleId::new(state.last_article_id)?;
            state.articles.insert(
                id,
                Article {
                    id,
                    title: article.title,
                    content: article.content,
                    author_id: article.author_id,
                    editor_id: None,
                    guide: article.guide,
                    created_at: article.created_at,
                    updated_at: article.created_at,
                    archived_at: None,
                    rotted_at: None,
                    rot_reporter_id: None,
                    last_notified_author_at: None,
                    tags_count: 0,
                    endorsements_count: 0,
                    subscriptions_count: 0,
                    visits: 0,
                },
            );
            if !article.tags.is_empty() {
                self.write_tags(state, id, &article.tags)?;
            }
            Ok(state.article_mut(id)?.clone())
        })
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        self.transaction(|state| {
            let article = state.article_mut(update.id)?;
            if article.updated_at != update.original_updated_at {
                return Err(DomainError::Conflict(
                    "article update conflict, please retry".into(),
                ));
            }
            update.apply_to(article);
            if let Some(labels) = &update.tags {
                self.write_tags(state, update.id, labels)?;
            }
            Ok(state.article_mut(update.id)?.clone())
        })
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut state = self.lock()?;
        if state.articles.remove(&id).is_none() {
            return Err(DomainError::NotFound("article not found".into()));
        }
        state.article_tags.remove(&id);
        state.endorsements.remove(&id);
        state.subscriptions.remove(&id);
        Ok(())
    }

    async fn increment_visits(&self, id: ArticleId) -> DomainResult<bool> {
        let mut state = self.lock()?;
        Ok(match state.articles.get_mut(&id) {
            Some(article) => {
                article.record_visit();
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.lock()?.articles.get(&id).cloned())
    }

    async fn list(&self, scope: &ArticleScope) -> DomainResult<Vec<Article>> {
        let state = self.lock()?;
        Ok(scope.apply(state.articles.values().cloned()))
    }
}

#[async_trait]
impl TagRepository for InMemoryArticleStore {
    async fn tags_for_article(&self, article_id: ArticleId) -> DomainResult<Vec<Tag>> {
        let state = self.lock()?;
        let ids = state.article_tags.get(&article_id).cloned().unwrap_or_default();
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|tag| ids.contains(&tag.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.label.as_str().cmp(b.label.as_str()));
        Ok(tags)
    }

    async fn reset_tag_counts(&self) -> DomainResult<u64> {
        let mut state = self.lock()?;
        let StoreState {
            articles,
            article_tags,
            ..
        } = &mut *state;
        let mut corrected = 0;
        for (id, article) in articles.iter_mut() {
            let actual = saturating_u32(article_tags.get(id).map_or(0, Vec::len));
            if article.tags_count != actual {
                article.tags_count = actual;
                corrected += 1;
            }
        }
        Ok(corrected)
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryArticleStore {
    async fn get_or_create(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> DomainResult<(Relationship, bool)> {
        let mut state = self.lock()?;
        state.article_mut(article_id)?;
        let set = state.relationships_mut(kind, article_id);
        let (relationship, created) = set.get_or_insert(user_id, at);
        let relationship = relationship.clone();
        let count = saturating_u32(set.len());
        let article = state.article_mut(article_id)?;
        match kind {
            RelationshipKind::Endorsement => article.endorsements_count = count,
            RelationshipKind::Subscription => article.subscriptions_count = count,
        }
        Ok((relationship, created))
    }

    async fn remove(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
        user_id: UserId,
    ) -> DomainResult<bool> {
        let mut state = self.lock()?;
        if !state.articles.contains_key(&article_id) {
            return Ok(false);
        }
        let set = state.relationships_mut(kind, article_id);
        let removed = set.remove(user_id);
        let count = saturating_u32(set.len());
        let article = state.article_mut(article_id)?;
        match kind {
            RelationshipKind::Endorsement => article.endorsements_count = count,
            RelationshipKind::Subscription => article.subscriptions_count = count,
        }
        Ok(removed)
    }

    async fn list(
        &self,
        kind: RelationshipKind,
        article_id: ArticleId,
    ) -> DomainResult<Vec<Relationship>> {
        let state = self.lock()?;
        Ok(state
            .relationships(kind, article_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }
}
