// src/application/commands/articles/mod.rs
mod create;
mod delete;
mod lifecycle;
mod relationships;
mod service;
mod update;
mod visits;

pub use create::{CreateArticleCommand, CreateArticleCommandBuilder};
pub use delete::DeleteArticleCommand;
pub use lifecycle::{ArchiveArticleCommand, RefreshArticleCommand, RotArticleCommand};
pub use service::ArticleCommandService;
pub use update::UpdateArticleCommand;
