// tests/support/mocks/search.rs
use async_trait::async_trait;
use kb_core::domain::article::{Article, SearchEngine, SearchHit, SearchRequest};
use kb_core::domain::errors::DomainResult;
use std::sync::Mutex;

/// Returns canned hits and remembers each request it was given.
#[derive(Default)]
pub struct CountingSearchEngine {
    requests: Mutex<Vec<SearchRequest>>,
    hits: Mutex<Vec<SearchHit>>,
}

impl CountingSearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, articles: Vec<Article>) {
        *self.hits.lock().unwrap() = articles
            .into_iter()
            .enumerate()
            .map(|(i, article)| SearchHit {
                article,
                rank: 1.0 / (i as f32 + 1.0),
                highlight: Some("<mark>match</mark>".into()),
            })
            .collect();
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SearchEngine for CountingSearchEngine {
    async fn search(&self, request: &SearchRequest) -> DomainResult<Vec<SearchHit>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.hits.lock().unwrap().clone())
    }
}
