//! Reservas repository for database operations.
//!
//! Creation and return are the two multi-step writes of the system: each
//! pairs a reservas mutation with a livros availability flip inside a
//! single transaction, so neither effect is ever observed without the other.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        cliente::{Cliente, ClienteResumo},
        livro::LivroResumo,
        reserva::{CreateReserva, Reserva, ReservaDetalhes},
    },
};

const DETALHES_SELECT: &str = r#"
    SELECT r.id, r.cliente_id, r.cliente_nome, r.cliente_cpf, r.livro_id,
           r.data_reserva, r.data_prevista_devolucao, r.data_devolucao,
           r.created_at, r.updated_at,
           c.id as cliente_live_id, c.nome as cliente_live_nome, c.cpf as cliente_live_cpf,
           l.titulo as livro_titulo, l.autor as livro_autor
    FROM reservas r
    LEFT JOIN clientes c ON r.cliente_id = c.id
    JOIN livros l ON r.livro_id = l.id
"#;

#[derive(Clone)]
pub struct ReservasRepository {
    pool: Pool<Postgres>,
}

impl ReservasRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the raw reserva row by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Reserva> {
        sqlx::query_as::<_, Reserva>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva com ID {} não encontrada", id)))
    }

    /// Insert a reserva and mark the livro unavailable, atomically.
    ///
    /// The availability flip re-checks `disponivel` inside the transaction,
    /// so two concurrent reservations of the same livro cannot both commit.
    pub async fn create(&self, reserva: &CreateReserva, cliente: &Cliente) -> AppResult<Uuid> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO reservas (
                id, cliente_id, cliente_nome, cliente_cpf, livro_id,
                data_reserva, data_prevista_devolucao, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            "#,
        )
        .bind(id)
        .bind(cliente.id)
        .bind(&cliente.nome)
        .bind(&cliente.cpf)
        .bind(reserva.livro_id)
        .bind(reserva.data_reserva)
        .bind(reserva.data_prevista_devolucao)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let flipped = sqlx::query(
            "UPDATE livros SET disponivel = FALSE, updated_at = $1 WHERE id = $2 AND disponivel = TRUE",
        )
        .bind(now)
        .bind(reserva.livro_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back.
            return Err(AppError::Conflict(
                "Este livro não está disponível para reserva no momento".to_string(),
            ));
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Record the return: set data_devolucao and release the livro, atomically.
    pub async fn devolver(&self, id: Uuid) -> AppResult<()> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let livro_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE reservas SET data_devolucao = $1, updated_at = $1
            WHERE id = $2 AND data_devolucao IS NULL
            RETURNING livro_id
            "#,
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(livro_id) = livro_id else {
            return Err(AppError::Conflict("Este livro já foi devolvido".to_string()));
        };

        sqlx::query("UPDATE livros SET disponivel = TRUE, updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(livro_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// List all reservas, most recent first
    pub async fn list(&self) -> AppResult<Vec<ReservaDetalhes>> {
        let rows = sqlx::query(&format!("{} ORDER BY r.data_reserva DESC", DETALHES_SELECT))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_detalhes).collect())
    }

    /// List reservas belonging to a cliente, most recent first
    pub async fn list_by_cliente(&self, cliente_id: Uuid) -> AppResult<Vec<ReservaDetalhes>> {
        let rows = sqlx::query(&format!(
            "{} WHERE r.cliente_id = $1 ORDER BY r.data_reserva DESC",
            DETALHES_SELECT
        ))
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_detalhes).collect())
    }

    /// Get reserva details by ID
    pub async fn get_detalhes(&self, id: Uuid) -> AppResult<ReservaDetalhes> {
        let row = sqlx::query(&format!("{} WHERE r.id = $1", DETALHES_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva com ID {} não encontrada", id)))?;

        Ok(map_detalhes(&row))
    }

    /// Reservas not yet returned whose due date has passed, ordered by due
    /// date ascending (most overdue first).
    pub async fn em_atraso(&self, now: DateTime<Utc>) -> AppResult<Vec<ReservaDetalhes>> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE r.data_devolucao IS NULL AND r.data_prevista_devolucao < $1
            ORDER BY r.data_prevista_devolucao ASC
            "#,
            DETALHES_SELECT
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_detalhes).collect())
    }
}

/// Maps a joined row to `ReservaDetalhes`, falling back to the snapshot
/// columns when the cliente no longer exists.
fn map_detalhes(row: &PgRow) -> ReservaDetalhes {
    let cliente_live_id: Option<Uuid> = row.get("cliente_live_id");

    let cliente = match cliente_live_id {
        Some(id) => ClienteResumo {
            id: Some(id),
            nome: row.get("cliente_live_nome"),
            cpf: row.get("cliente_live_cpf"),
        },
        None => ClienteResumo {
            id: row.get("cliente_id"),
            nome: row.get("cliente_nome"),
            cpf: row.get("cliente_cpf"),
        },
    };

    ReservaDetalhes {
        id: row.get("id"),
        data_reserva: row.get("data_reserva"),
        data_prevista_devolucao: row.get("data_prevista_devolucao"),
        data_devolucao: row.get("data_devolucao"),
        cliente,
        livro: LivroResumo {
            id: row.get("livro_id"),
            titulo: row.get("livro_titulo"),
            autor: row.get("livro_autor"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
