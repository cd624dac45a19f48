//! Locações sync feed service

use chrono::{DateTime, Utc};

use crate::{error::AppResult, models::locacao::LocacaoSync, repository::Repository};

#[derive(Clone)]
pub struct LocacoesService {
    repository: Repository,
}

impl LocacoesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Flat reserva projection for incremental loading into the external
    /// search index.
    pub async fn find_for_sync(
        &self,
        updated_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<LocacaoSync>> {
        self.repository.locacoes.find_for_sync(updated_after).await
    }
}
