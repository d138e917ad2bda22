use crate::domain::article::{Article, Relationship, RelationshipKind, SearchHit, Tag};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Article as seen by readers at a given instant. The lifecycle flags are
/// derived from `now` and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub editor_id: Option<i64>,
    pub guide: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub rotted_at: Option<DateTime<Utc>>,
    pub rot_reporter_id: Option<i64>,
    pub tags_count: u32,
    pub endorsements_count: u32,
    pub subscriptions_count: u32,
    pub visits: u64,
    pub fresh: bool,
    pub stale: bool,
    pub rotten: bool,
    pub archived: bool,
}

impl ArticleDto {
    pub fn at(article: Article, now: DateTime<Utc>) -> Self {
        let fresh = article.is_fresh(now);
        let stale = article.is_stale(now);
        let rotten = article.is_rotten();
        let archived = article.is_archived();
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            content: article.content.into_inner(),
            author_id: article.author_id.into(),
            editor_id: article.editor_id.map(Into::into),
            guide: article.guide,
            created_at: article.created_at,
            updated_at: article.updated_at,
            archived_at: article.archived_at,
            rotted_at: article.rotted_at,
            rot_reporter_id: article.rot_reporter_id.map(Into::into),
            tags_count: article.tags_count,
            endorsements_count: article.endorsements_count,
            subscriptions_count: article.subscriptions_count,
            visits: article.visits,
            fresh,
            stale,
            rotten,
            archived,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetailDto {
    #[serde(flatten)]
    pub article: ArticleDto,
    pub tags: Vec<String>,
    pub contributors: Vec<i64>,
}

impl ArticleDetailDto {
    pub fn new(article: Article, tags: Vec<Tag>, now: DateTime<Utc>) -> Self {
        let contributors = article.contributors(None).into_iter().map(Into::into).collect();
        Self {
            article: ArticleDto::at(article, now),
            tags: tags.into_iter().map(|tag| tag.label.to_string()).collect(),
            contributors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipDto {
    pub kind: RelationshipKind,
    pub article_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    /// `false` when the link already existed.
    pub created: bool,
}

impl RelationshipDto {
    pub fn new(relationship: Relationship, created: bool) -> Self {
        Self {
            kind: relationship.kind,
            article_id: relationship.article_id.into(),
            user_id: relationship.user_id.into(),
            created_at: relationship.created_at,
            created,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHitDto {
    #[serde(flatten)]
    pub article: ArticleDto,
    pub rank: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl SearchHitDto {
    pub fn at(hit: SearchHit, now: DateTime<Utc>) -> Self {
        Self {
            article: ArticleDto::at(hit.article, now),
            rank: hit.rank,
            highlight: hit.highlight,
        }
    }
}
