use crate::domain::article::entity::Article;
use crate::domain::article::specifications::ArticleScope;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;

/// Trigram similarity below which fuzzy matches are discarded.
pub const DEFAULT_TRIGRAM_THRESHOLD: f32 = 0.3;

/// Full-text weight class, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWeight {
    A,
    B,
    C,
    D,
}

impl FieldWeight {
    pub fn as_char(&self) -> char {
        match self {
            FieldWeight::A => 'A',
            FieldWeight::B => 'B',
            FieldWeight::C => 'C',
            FieldWeight::D => 'D',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub title: FieldWeight,
    pub content: FieldWeight,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            title: FieldWeight::A,
            content: FieldWeight::B,
        }
    }
}

/// Trimmed, non-blank search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lexemes for prefix matching (`stew` also finds `stews`).
    pub fn terms(&self) -> Vec<String> {
        self.0
            .split(|c: char| !c.is_alphanumeric())
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub fields: SearchFields,
    pub trigram_threshold: f32,
    pub scope: ArticleScope,
}

impl SearchRequest {
    pub fn new(query: SearchQuery, scope: ArticleScope) -> Self {
        Self {
            query,
            fields: SearchFields::default(),
            trigram_threshold: DEFAULT_TRIGRAM_THRESHOLD,
            scope,
        }
    }

    pub fn with_trigram_threshold(mut self, threshold: f32) -> DomainResult<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DomainError::Validation(
                "trigram threshold must be within (0, 1]".into(),
            ));
        }
        self.trigram_threshold = threshold;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub article: Article,
    pub rank: f32,
    /// Content excerpt with matches marked up by the engine.
    pub highlight: Option<String>,
}

impl SearchHit {
    pub fn unranked(article: Article) -> Self {
        Self {
            article,
            rank: 0.0,
            highlight: None,
        }
    }
}

/// Ranking engine. Implementations combine lexical prefix matching with
/// trigram similarity and restrict results to `request.scope`'s filters.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> DomainResult<Vec<SearchHit>>;
}

/// What a text search should do.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSearch {
    /// Blank query: list the base scope as-is.
    Unfiltered(ArticleScope),
    Ranked(SearchRequest),
}

impl TextSearch {
    /// `scope` defaults to [`ArticleScope::current`].
    pub fn plan(query: &str, scope: Option<ArticleScope>) -> Self {
        let scope = scope.unwrap_or_else(ArticleScope::current);
        match SearchQuery::parse(query) {
            Some(query) => TextSearch::Ranked(SearchRequest::new(query, scope)),
            None => TextSearch::Unfiltered(scope),
        }
    }
}
