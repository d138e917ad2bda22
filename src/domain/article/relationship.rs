//! User-to-article links: endorsements and subscriptions.
//!
//! [`RelationshipSet`] holds the links of one kind for one article. Entries
//! live in a vector and a user index points into it, so membership checks are
//! O(1) and a user can appear at most once.

use crate::domain::article::value_objects::ArticleId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Endorsement,
    Subscription,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Endorsement => "endorsement",
            RelationshipKind::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RelationshipSet {
    kind: RelationshipKind,
    article_id: ArticleId,
    entries: Vec<Relationship>,
    index: HashMap<UserId, usize>,
}

impl RelationshipSet {
    pub fn new(kind: RelationshipKind, article_id: ArticleId) -> Self {
        Self {
            kind,
            article_id,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a set from stored rows. Rows for other articles or kinds, and
    /// repeated users, are ignored.
    pub fn from_relationships(
        kind: RelationshipKind,
        article_id: ArticleId,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Self {
        let mut set = Self::new(kind, article_id);
        for relationship in relationships {
            if relationship.kind == kind
                && relationship.article_id == article_id
                && !set.contains(relationship.user_id)
            {
                set.index.insert(relationship.user_id, set.entries.len());
                set.entries.push(relationship);
            }
        }
        set
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.index.contains_key(&user)
    }

    pub fn get(&self, user: UserId) -> Option<&Relationship> {
        self.index.get(&user).map(|&slot| &self.entries[slot])
    }

    /// Returns the existing link for `user`, or creates one. The flag is
    /// `true` when a new link was created.
    pub fn get_or_insert(&mut self, user: UserId, now: DateTime<Utc>) -> (&Relationship, bool) {
        if let Some(&slot) = self.index.get(&user) {
            return (&self.entries[slot], false);
        }

        let slot = self.entries.len();
        self.entries.push(Relationship {
            kind: self.kind,
            article_id: self.article_id,
            user_id: user,
            created_at: now,
        });
        self.index.insert(user, slot);
        (&self.entries[slot], true)
    }

    /// Removes the link for `user`; `false` when there was none.
    pub fn remove(&mut self, user: UserId) -> bool {
        let Some(slot) = self.index.remove(&user) else {
            return false;
        };

        self.entries.swap_remove(slot);
        if let Some(moved) = self.entries.get(slot) {
            self.index.insert(moved.user_id, slot);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.entries.iter().map(|r| r.user_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> UserId {
        UserId::new(id).unwrap()
    }

    fn set() -> RelationshipSet {
        RelationshipSet::new(RelationshipKind::Endorsement, ArticleId::new(1).unwrap())
    }

    #[test]
    fn get_or_insert_is_idempotent() {
        let mut endorsements = set();
        let now = Utc::now();
        let (_, created) = endorsements.get_or_insert(user(5), now);
        assert!(created);
        let (existing, created) = endorsements.get_or_insert(user(5), now);
        assert!(!created);
        assert_eq!(existing.user_id, user(5));
        assert_eq!(endorsements.len(), 1);
    }

    #[test]
    fn remove_reports_whether_a_link_existed() {
        let mut endorsements = set();
        assert!(!endorsements.remove(user(5)));

        endorsements.get_or_insert(user(5), Utc::now());
        assert!(endorsements.remove(user(5)));
        assert!(endorsements.is_empty());
        assert!(!endorsements.remove(user(5)));
    }

    #[test]
    fn index_survives_swap_remove() {
        let mut endorsements = set();
        let now = Utc::now();
        for id in 1..=4 {
            endorsements.get_or_insert(user(id), now);
        }
        assert!(endorsements.remove(user(1)));

        for id in 2..=4 {
            assert_eq!(endorsements.get(user(id)).map(|r| r.user_id), Some(user(id)));
        }
        assert!(endorsements.get(user(1)).is_none());
        assert_eq!(endorsements.len(), 3);
    }

    #[test]
    fn from_relationships_drops_duplicates() {
        let article_id = ArticleId::new(1).unwrap();
        let now = Utc::now();
        let row = |id| Relationship {
            kind: RelationshipKind::Subscription,
            article_id,
            user_id: user(id),
            created_at: now,
        };
        let subscriptions = RelationshipSet::from_relationships(
            RelationshipKind::Subscription,
            article_id,
            vec![row(1), row(2), row(1)],
        );
        assert_eq!(subscriptions.user_ids(), vec![user(1), user(2)]);
    }
}
