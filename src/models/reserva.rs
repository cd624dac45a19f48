//! Reserva (loan/reservation) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::cliente::ClienteResumo;
use super::livro::LivroResumo;

/// Reserva model from database.
///
/// `cliente_id` is nullable: deleting a cliente detaches its reservas,
/// and the `cliente_nome`/`cliente_cpf` snapshot columns keep the history
/// readable. `data_devolucao` is set exactly once by the return operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reserva {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    pub cliente_nome: String,
    pub cliente_cpf: String,
    pub livro_id: Uuid,
    pub data_reserva: DateTime<Utc>,
    pub data_prevista_devolucao: DateTime<Utc>,
    pub data_devolucao: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create reserva request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReserva {
    pub cliente_id: Uuid,
    pub livro_id: Uuid,
    pub data_reserva: DateTime<Utc>,
    pub data_prevista_devolucao: DateTime<Utc>,
}

/// Reserva with embedded cliente/livro summaries for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaDetalhes {
    pub id: Uuid,
    pub data_reserva: DateTime<Utc>,
    pub data_prevista_devolucao: DateTime<Utc>,
    pub data_devolucao: Option<DateTime<Utc>>,
    pub cliente: ClienteResumo,
    pub livro: LivroResumo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Overdue reserva with the computed late fee
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservaEmAtraso {
    #[serde(flatten)]
    pub reserva: ReservaDetalhes,
    pub dias_de_atraso: i64,
    pub multa_total: f64,
}

/// Late fee breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Multa {
    pub dias_de_atraso: i64,
    pub multa_total: f64,
}
