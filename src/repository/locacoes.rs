//! Locações repository: the denormalized sync feed over reservas.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::locacao::{LocacaoStatus, LocacaoSync},
};

const SYNC_SELECT_JOINED: &str = r#"
    SELECT r.id, r.data_reserva, r.data_prevista_devolucao, r.data_devolucao,
           r.updated_at, r.cliente_id, r.cliente_nome, r.livro_id,
           c.id as cliente_live_id, c.nome as cliente_live_nome,
           l.titulo as livro_titulo
    FROM reservas r
    LEFT JOIN clientes c ON r.cliente_id = c.id
    LEFT JOIN livros l ON r.livro_id = l.id
"#;

const SYNC_SELECT_BARE: &str = r#"
    SELECT r.id, r.data_reserva, r.data_prevista_devolucao, r.data_devolucao,
           r.updated_at, r.cliente_id, r.cliente_nome, r.livro_id,
           c.id as cliente_live_id, c.nome as cliente_live_nome
    FROM reservas r
    LEFT JOIN clientes c ON r.cliente_id = c.id
"#;

const SYNC_FILTER: &str =
    " WHERE (r.updated_at > $1 OR r.data_reserva > $1 OR r.data_devolucao > $1)";

const SYNC_ORDER: &str = " ORDER BY r.updated_at ASC";

#[derive(Clone)]
pub struct LocacoesRepository {
    pool: Pool<Postgres>,
}

impl LocacoesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Every reserva as a flat sync document, optionally restricted to rows
    /// touched after `updated_after`.
    ///
    /// If the livro join cannot be executed (schema drift on the livros
    /// side), the feed degrades to a bare reservas query and merges titles
    /// fetched separately by id.
    pub async fn find_for_sync(
        &self,
        updated_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<LocacaoSync>> {
        match self.fetch_joined(updated_after).await {
            Ok(rows) => Ok(rows
                .iter()
                .map(|row| map_sync(row, row.get("livro_titulo")))
                .collect()),
            Err(err) => {
                tracing::warn!(
                    "Sync feed joined query failed, falling back to separate livro lookup: {}",
                    err
                );
                self.fetch_with_separate_titles(updated_after).await
            }
        }
    }

    async fn fetch_joined(
        &self,
        updated_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<PgRow>, sqlx::Error> {
        match updated_after {
            Some(cutoff) => {
                sqlx::query(&format!("{}{}{}", SYNC_SELECT_JOINED, SYNC_FILTER, SYNC_ORDER))
                    .bind(cutoff)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query(&format!("{}{}", SYNC_SELECT_JOINED, SYNC_ORDER))
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }

    async fn fetch_with_separate_titles(
        &self,
        updated_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<LocacaoSync>> {
        let rows = match updated_after {
            Some(cutoff) => {
                sqlx::query(&format!("{}{}{}", SYNC_SELECT_BARE, SYNC_FILTER, SYNC_ORDER))
                    .bind(cutoff)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query(&format!("{}{}", SYNC_SELECT_BARE, SYNC_ORDER))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let livro_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = rows.iter().map(|r| r.get("livro_id")).collect();
            ids.sort();
            ids.dedup();
            ids
        };

        let titulos: HashMap<Uuid, String> = if livro_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query("SELECT id, titulo FROM livros WHERE id = ANY($1)")
                .bind(&livro_ids)
                .fetch_all(&self.pool)
                .await?
                .iter()
                .map(|r| (r.get::<Uuid, _>("id"), r.get::<String, _>("titulo")))
                .collect()
        };

        Ok(rows
            .iter()
            .map(|row| {
                let livro_id: Uuid = row.get("livro_id");
                let titulo = titulos.get(&livro_id).cloned();
                map_sync(row, titulo)
            })
            .collect())
    }
}

fn map_sync(row: &PgRow, livro_titulo: Option<String>) -> LocacaoSync {
    let cliente_live_id: Option<Uuid> = row.get("cliente_live_id");
    let cliente_live_nome: Option<String> = row.get("cliente_live_nome");
    let cliente_snapshot_nome: String = row.get("cliente_nome");
    let data_devolucao: Option<DateTime<Utc>> = row.get("data_devolucao");

    LocacaoSync {
        id_locacao: row.get("id"),
        data_locacao: row.get("data_reserva"),
        data_prevista_devolucao: row.get("data_prevista_devolucao"),
        data_devolucao,
        status: LocacaoStatus::from_data_devolucao(data_devolucao),
        id_livro: row.get("livro_id"),
        livro_titulo: livro_titulo.unwrap_or_default(),
        id_usuario: cliente_live_id.or_else(|| row.get("cliente_id")),
        usuario_nome: cliente_live_nome.or(Some(cliente_snapshot_nome)),
        updated_at: row.get("updated_at"),
    }
}
