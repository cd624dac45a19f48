//! Search index client.
//!
//! Read-only access to the external Meilisearch index holding one
//! denormalized document per livro. The index is refreshed by an external
//! loader off the sync feed; this service only queries it.

use meilisearch_sdk::client::Client;
use uuid::Uuid;

use crate::{
    config::SearchConfig,
    error::{AppError, AppResult},
    models::livro::LivroSearchDoc,
};

/// Upper bound on ranked ids pulled from the index per query.
const SEARCH_LIMIT: usize = 50;

#[derive(Clone)]
pub struct SearchService {
    client: Client,
    index: String,
}

impl SearchService {
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let client = Client::new(&config.url, config.api_key.as_deref())
            .map_err(|e| AppError::Internal(format!("Invalid search index URL: {}", e)))?;

        Ok(Self {
            client,
            index: config.index.clone(),
        })
    }

    /// Free-text search over titulo/autor, returning livro ids in the
    /// index's ranking order. The index may be stale; callers must
    /// reconcile the ids against the primary store.
    pub async fn search_livro_ids(&self, query: &str) -> AppResult<Vec<Uuid>> {
        let results = self
            .client
            .index(&self.index)
            .search()
            .with_query(query)
            .with_limit(SEARCH_LIMIT)
            .execute::<LivroSearchDoc>()
            .await
            .map_err(|e| AppError::Internal(format!("Search index query failed: {}", e)))?;

        Ok(results.hits.into_iter().map(|hit| hit.result.id).collect())
    }
}
