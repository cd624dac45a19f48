//! Locações sync feed endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, models::locacao::LocacaoSync};

/// Query parameters for the sync feed
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncQuery {
    /// ISO 8601 cutoff; only reservas touched after it are returned
    pub updated_after: Option<String>,
}

/// Denormalized reserva feed for incremental search index loading
#[utoipa::path(
    get,
    path = "/locacoes/sync",
    tag = "locacoes",
    params(
        ("updatedAfter" = Option<String>, Query, description = "ISO 8601 lower bound on last modification")
    ),
    responses(
        (status = 200, description = "Sync documents", body = Vec<LocacaoSync>),
        (status = 400, description = "Malformed updatedAfter timestamp")
    )
)]
pub async fn sync(
    State(state): State<crate::AppState>,
    Query(query): Query<SyncQuery>,
) -> AppResult<Json<Vec<LocacaoSync>>> {
    let updated_after = super::parse_updated_after(query.updated_after.as_deref())?;

    let locacoes = state.services.locacoes.find_for_sync(updated_after).await?;
    Ok(Json(locacoes))
}
