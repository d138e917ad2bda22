// src/domain/article/entity.rs
use crate::domain::article::lifecycle;
use crate::domain::article::relationship::{Relationship, RelationshipSet};
use crate::domain::article::tag::TagLabel;
use crate::domain::article::value_objects::{ArticleContent, ArticleId, ArticleTitle};
use crate::domain::user::UserId;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub author_id: UserId,
    pub editor_id: Option<UserId>,
    pub guide: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub rotted_at: Option<DateTime<Utc>>,
    pub rot_reporter_id: Option<UserId>,
    pub last_notified_author_at: Option<DateTime<Utc>>,
    pub tags_count: u32,
    pub endorsements_count: u32,
    pub subscriptions_count: u32,
    pub visits: u64,
}

impl Article {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        lifecycle::is_fresh(now, self.updated_at, self.archived_at, self.rotted_at)
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        lifecycle::is_stale(now, self.updated_at)
    }

    pub fn is_rotten(&self) -> bool {
        lifecycle::is_rotten(self.rotted_at)
    }

    pub fn is_archived(&self) -> bool {
        lifecycle::is_archived(self.archived_at)
    }

    pub fn is_author(&self, user: UserId) -> bool {
        self.author_id == user
    }

    pub fn is_edited(&self) -> bool {
        self.editor_id.is_some()
    }

    pub fn has_different_editor(&self) -> bool {
        self.editor_id != Some(self.author_id)
    }

    pub fn never_notified_author(&self) -> bool {
        self.last_notified_author_at.is_none()
    }

    pub fn recently_notified_author(&self, now: DateTime<Utc>) -> bool {
        lifecycle::recently_notified(now, self.last_notified_author_at)
    }

    pub fn ready_to_notify_author_of_staleness(&self, now: DateTime<Utc>) -> bool {
        lifecycle::ready_to_notify_author(now, self.last_notified_author_at)
    }

    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.archived_at = Some(now);
    }

    pub fn unarchive(&mut self) {
        self.archived_at = None;
    }

    pub fn rot(&mut self, reporter: UserId, now: DateTime<Utc>) {
        self.rotted_at = Some(now);
        self.rot_reporter_id = Some(reporter);
    }

    /// Clears the rot flag and counts as an edit. The reporter is kept as a
    /// record of who last flagged the article.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.rotted_at = None;
        self.touch(now);
    }

    /// `updated_at` always moves forward, even when `now` does not.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = now.max(floor);
    }

    pub fn set_content(
        &mut self,
        title: ArticleTitle,
        content: ArticleContent,
        editor: UserId,
        now: DateTime<Utc>,
    ) {
        self.title = title;
        self.content = content;
        self.editor_id = Some(editor);
        self.touch(now);
    }

    pub fn record_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    /// Author and editor, deduplicated, minus `excluding`.
    pub fn contributors(&self, excluding: Option<UserId>) -> Vec<UserId> {
        let mut contributors = vec![self.author_id];
        if let Some(editor) = self.editor_id {
            if editor != self.author_id {
                contributors.push(editor);
            }
        }
        contributors.retain(|user| Some(*user) != excluding);
        contributors
    }

    /// Subscriptions that should hear about the latest save: everyone except
    /// the editor who made it.
    pub fn subscribers_to_update<'a>(
        &self,
        subscriptions: &'a RelationshipSet,
    ) -> Vec<&'a Relationship> {
        subscriptions
            .iter()
            .filter(|subscription| Some(subscription.user_id) != self.editor_id)
            .collect()
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.title, f)
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub author_id: UserId,
    pub guide: bool,
    pub created_at: DateTime<Utc>,
    /// Canonical labels; storage creates missing tags and links them in the
    /// same transaction as the row.
    pub tags: Vec<TagLabel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotStateUpdate {
    Reported {
        at: DateTime<Utc>,
        reporter: UserId,
    },
    Cleared,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub content: Option<ArticleContent>,
    pub editor_id: Option<UserId>,
    pub guide: Option<bool>,
    pub archived_at: Option<Option<DateTime<Utc>>>,
    pub rot_state: Option<RotStateUpdate>,
    pub last_notified_author_at: Option<DateTime<Utc>>,
    /// Replaces the whole tag set, atomically with the row update.
    pub tags: Option<Vec<TagLabel>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            content: None,
            editor_id: None,
            guide: None,
            archived_at: None,
            rot_state: None,
            last_notified_author_at: None,
            tags: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_editor(mut self, editor: UserId) -> Self {
        self.editor_id = Some(editor);
        self
    }

    pub fn with_guide(mut self, guide: bool) -> Self {
        self.guide = Some(guide);
        self
    }

    pub fn with_archived_at(mut self, archived_at: Option<DateTime<Utc>>) -> Self {
        self.archived_at = Some(archived_at);
        self
    }

    pub fn with_rot_state(mut self, rot_state: RotStateUpdate) -> Self {
        self.rot_state = Some(rot_state);
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagLabel>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_author_notified_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_notified_author_at = Some(at);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    /// Applies the changes to an in-memory copy. Storage adapters that keep
    /// whole rows use this to stay consistent with the SQL adapter.
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(content) = &self.content {
            article.content = content.clone();
        }
        if let Some(editor) = self.editor_id {
            article.editor_id = Some(editor);
        }
        if let Some(guide) = self.guide {
            article.guide = guide;
        }
        if let Some(archived_at) = self.archived_at {
            article.archived_at = archived_at;
        }
        match self.rot_state {
            Some(RotStateUpdate::Reported { at, reporter }) => {
                article.rotted_at = Some(at);
                article.rot_reporter_id = Some(reporter);
            }
            Some(RotStateUpdate::Cleared) => article.rotted_at = None,
            None => {}
        }
        if let Some(at) = self.last_notified_author_at {
            article.last_notified_author_at = Some(at);
        }
        article.updated_at = self.updated_at;
    }
}
