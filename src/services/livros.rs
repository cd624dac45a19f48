//! Livro (catalog) management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::livro::{CreateLivro, Livro, LivroFilter, UpdateLivro},
    repository::Repository,
    services::search::SearchService,
};

#[derive(Clone)]
pub struct LivrosService {
    repository: Repository,
    search: SearchService,
}

impl LivrosService {
    pub fn new(repository: Repository, search: SearchService) -> Self {
        Self { repository, search }
    }

    /// Create a new livro, available by default
    pub async fn create(&self, livro: CreateLivro) -> AppResult<Livro> {
        self.repository.livros.create(&livro.titulo, &livro.autor).await
    }

    /// List livros with optional availability/last-modified filters
    pub async fn list(&self, filter: &LivroFilter) -> AppResult<Vec<Livro>> {
        self.repository.livros.list(filter).await
    }

    /// Free-text search. Blank queries degrade to a plain list.
    ///
    /// The external index only ranks; results are re-fetched from the
    /// primary store so stale index entries never surface. When nothing
    /// resolves (or the index is unreachable) the plain list is returned.
    pub async fn search(&self, query: &str, filter: &LivroFilter) -> AppResult<Vec<Livro>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list(filter).await;
        }

        let ids = match self.search.search_livro_ids(query).await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!("Search index unavailable, serving plain list: {}", err);
                return self.list(filter).await;
            }
        };

        let livros = self.repository.livros.get_by_ids_preserving_order(&ids).await?;

        if livros.is_empty() {
            return self.list(filter).await;
        }

        Ok(livros)
    }

    /// Get a livro by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Livro> {
        self.repository.livros.get_by_id(id).await
    }

    /// Update titulo/autor. Availability is owned by the reservation
    /// lifecycle and cannot be set here.
    pub async fn update(&self, id: Uuid, update: UpdateLivro) -> AppResult<Livro> {
        self.repository.livros.get_by_id(id).await?;

        self.repository
            .livros
            .update(id, update.titulo.as_deref(), update.autor.as_deref())
            .await
    }

    /// Delete a livro. A livro currently on loan cannot be removed.
    /// Hard delete when nothing references it; soft delete when historical
    /// reservas hold a foreign key to it.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let livro = self.repository.livros.get_by_id(id).await?;

        if !livro.disponivel {
            return Err(AppError::Conflict(
                "Não é possível remover um livro que está reservado".to_string(),
            ));
        }

        match self.repository.livros.hard_delete(id).await {
            Err(AppError::ReferentialConstraint(_)) => {
                tracing::debug!("Livro {} has historical reservas, soft deleting", id);
                self.repository.livros.soft_delete(id).await
            }
            other => other,
        }
    }
}
