//! Livros repository for database operations.
//!
//! Deletion is soft (deleted_at) when historical reservas still reference
//! the livro, hard otherwise; every read query excludes soft-deleted rows.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::livro::{Livro, LivroFilter},
};

#[derive(Clone)]
pub struct LivrosRepository {
    pool: Pool<Postgres>,
}

impl LivrosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new livro; `disponivel` always starts true.
    pub async fn create(&self, titulo: &str, autor: &str) -> AppResult<Livro> {
        let now = Utc::now();

        let livro = sqlx::query_as::<_, Livro>(
            r#"
            INSERT INTO livros (id, titulo, autor, disponivel, created_at, updated_at)
            VALUES ($1, $2, $3, TRUE, $4, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(titulo)
        .bind(autor)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(livro)
    }

    /// List livros with optional filters, excluding soft-deleted rows.
    ///
    /// Default ordering is by titulo; incremental reads (updated_after set)
    /// are ordered by last modification, newest first.
    pub async fn list(&self, filter: &LivroFilter) -> AppResult<Vec<Livro>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM livros WHERE deleted_at IS NULL");

        if let Some(disponivel) = filter.disponivel {
            qb.push(" AND disponivel = ");
            qb.push_bind(disponivel);
        }

        if let Some(updated_after) = filter.updated_after {
            qb.push(" AND updated_at > ");
            qb.push_bind(updated_after);
        }

        if filter.updated_after.is_some() {
            qb.push(" ORDER BY updated_at DESC");
        } else {
            qb.push(" ORDER BY titulo ASC");
        }

        let livros = qb
            .build_query_as::<Livro>()
            .fetch_all(&self.pool)
            .await?;

        Ok(livros)
    }

    /// Get livro by ID, excluding soft-deleted rows
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Livro> {
        sqlx::query_as::<_, Livro>("SELECT * FROM livros WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Livro com ID {} não encontrado", id)))
    }

    /// Fetch livros by id, preserving the order of `ids`.
    ///
    /// Ids that do not resolve (unknown or soft-deleted) are dropped; the
    /// search index may be stale relative to the primary store.
    pub async fn get_by_ids_preserving_order(&self, ids: &[Uuid]) -> AppResult<Vec<Livro>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let livros = sqlx::query_as::<_, Livro>(
            "SELECT * FROM livros WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_id: HashMap<Uuid, Livro> =
            livros.into_iter().map(|l| (l.id, l)).collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Apply a partial update to titulo/autor. `disponivel` is never
    /// touched here; only the reservation lifecycle flips it.
    pub async fn update(
        &self,
        id: Uuid,
        titulo: Option<&str>,
        autor: Option<&str>,
    ) -> AppResult<Livro> {
        let now = Utc::now();

        let livro = sqlx::query_as::<_, Livro>(
            r#"
            UPDATE livros SET
                titulo = COALESCE($1, titulo),
                autor = COALESCE($2, autor),
                updated_at = $3
            WHERE id = $4 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(titulo)
        .bind(autor)
        .bind(now)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(livro)
    }

    /// Attempt a hard delete. Fails with `ReferentialConstraint` when
    /// reservas still reference the livro.
    pub async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM livros WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_delete_failure(e, "Livro"))?;

        Ok(())
    }

    /// Soft delete: mark deleted_at and withdraw the livro from circulation.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let now = Utc::now();

        sqlx::query(
            "UPDATE livros SET deleted_at = $1, disponivel = FALSE, updated_at = $1 WHERE id = $2",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
