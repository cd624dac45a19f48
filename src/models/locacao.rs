//! Locação sync feed projection.
//!
//! Flat, denormalized view of reservas consumed by the external search
//! index loader via `GET /locacoes/sync`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Derived reservation status. Never stored; `Devolvida` iff the reserva
/// has a `data_devolucao`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LocacaoStatus {
    #[serde(rename = "ATIVA")]
    Ativa,
    #[serde(rename = "DEVOLVIDA")]
    Devolvida,
}

impl LocacaoStatus {
    pub fn from_data_devolucao(data_devolucao: Option<DateTime<Utc>>) -> Self {
        if data_devolucao.is_some() {
            LocacaoStatus::Devolvida
        } else {
            LocacaoStatus::Ativa
        }
    }
}

/// One row of the sync feed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocacaoSync {
    pub id_locacao: Uuid,
    pub data_locacao: DateTime<Utc>,
    pub data_prevista_devolucao: DateTime<Utc>,
    pub data_devolucao: Option<DateTime<Utc>>,
    pub status: LocacaoStatus,
    pub id_livro: Uuid,
    pub livro_titulo: String,
    pub id_usuario: Option<Uuid>,
    pub usuario_nome: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
