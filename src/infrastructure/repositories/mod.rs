// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_article;
mod postgres_relationship;
mod postgres_search;
mod postgres_tag;
mod scope_sql;

pub use error::map_sqlx;
pub use memory::InMemoryArticleStore;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_relationship::PostgresRelationshipRepository;
pub use postgres_search::PostgresSearchEngine;
pub use postgres_tag::PostgresTagRepository;
