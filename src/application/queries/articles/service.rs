use std::sync::Arc;

use crate::{
    application::ports::time::Clock,
    domain::article::{
        ArticleReadRepository, RelationshipRepository, SearchEngine, TagRepository,
        search::DEFAULT_TRIGRAM_THRESHOLD,
    },
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) relationship_repo: Arc<dyn RelationshipRepository>,
    pub(super) search_engine: Arc<dyn SearchEngine>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) trigram_threshold: f32,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        tag_repo: Arc<dyn TagRepository>,
        relationship_repo: Arc<dyn RelationshipRepository>,
        search_engine: Arc<dyn SearchEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            tag_repo,
            relationship_repo,
            search_engine,
            clock,
            trigram_threshold: DEFAULT_TRIGRAM_THRESHOLD,
        }
    }

    pub fn with_trigram_threshold(mut self, threshold: f32) -> Self {
        self.trigram_threshold = threshold;
        self
    }
}
