pub mod articles;
pub mod maintenance;

pub use articles::{ArticleDetailDto, ArticleDto, RelationshipDto, SearchHitDto};
pub use maintenance::{StalenessSweepReport, TagCountReset};
