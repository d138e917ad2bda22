use crate::domain::article::entity::Article;
use serde::Serialize;
use std::fmt;

/// What a committed write did to an article, as reported to the announce
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Created,
    Updated,
    Archived,
    Rotten,
    Destroyed,
}

impl TransitionKind {
    /// Classifies a save. `previous` is the row as it was before the write,
    /// `None` for the first persisted version.
    pub fn classify(previous: Option<&Article>, current: &Article) -> Self {
        let Some(previous) = previous else {
            return TransitionKind::Created;
        };

        if previous.archived_at.is_none() && current.archived_at.is_some() {
            TransitionKind::Archived
        } else if previous.rotted_at.is_none() && current.rotted_at.is_some() {
            TransitionKind::Rotten
        } else {
            TransitionKind::Updated
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Created => "created",
            TransitionKind::Updated => "updated",
            TransitionKind::Archived => "archived",
            TransitionKind::Rotten => "rotten",
            TransitionKind::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed change, handed to the notification dispatcher.
#[derive(Debug, Clone)]
pub struct ArticleChange {
    pub article: Article,
    pub transition: TransitionKind,
}

impl ArticleChange {
    pub fn saved(previous: Option<&Article>, current: Article) -> Self {
        let transition = TransitionKind::classify(previous, &current);
        Self {
            article: current,
            transition,
        }
    }

    pub fn destroyed(article: Article) -> Self {
        Self {
            article,
            transition: TransitionKind::Destroyed,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.transition == TransitionKind::Destroyed
    }
}
