pub mod entity;
pub mod events;
pub mod lifecycle;
pub mod relationship;
pub mod repository;
pub mod search;
pub mod specifications;
pub mod tag;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle, RotStateUpdate};
pub use events::{ArticleChange, TransitionKind};
pub use relationship::{Relationship, RelationshipKind, RelationshipSet};
pub use repository::{
    ArticleReadRepository, ArticleWriteRepository, RelationshipRepository, TagRepository,
};
pub use search::{SearchEngine, SearchHit, SearchQuery, SearchRequest, TextSearch};
pub use specifications::{ArticleFilter, ArticleOrdering, ArticleScope};
pub use tag::{Tag, TagId, TagLabel, TagTokens};
pub use value_objects::{ArticleContent, ArticleId, ArticleTitle};
