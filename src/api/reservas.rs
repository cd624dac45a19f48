//! Reserva lifecycle endpoints.
//!
//! Route registration order matters: `/reservas/em-atraso` and
//! `/reservas/cliente/:clienteId` must be declared before the generic
//! `/reservas/:id` lookup so they are not captured as path parameters.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::reserva::{CreateReserva, ReservaDetalhes, ReservaEmAtraso},
};

/// Create a new reserva (borrow a livro)
#[utoipa::path(
    post,
    path = "/reservas",
    tag = "reservas",
    request_body = CreateReserva,
    responses(
        (status = 201, description = "Reserva created", body = ReservaDetalhes),
        (status = 400, description = "Due date not after reservation date"),
        (status = 404, description = "Cliente or livro not found"),
        (status = 409, description = "Livro not available")
    )
)]
pub async fn create_reserva(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateReserva>,
) -> AppResult<(StatusCode, Json<ReservaDetalhes>)> {
    let reserva = state.services.reservas.create(payload).await?;
    Ok((StatusCode::CREATED, Json(reserva)))
}

/// List all reservas
#[utoipa::path(
    get,
    path = "/reservas",
    tag = "reservas",
    responses(
        (status = 200, description = "All reservas", body = Vec<ReservaDetalhes>)
    )
)]
pub async fn list_reservas(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservaDetalhes>>> {
    let reservas = state.services.reservas.list().await?;
    Ok(Json(reservas))
}

/// List overdue reservas with computed late fees
#[utoipa::path(
    get,
    path = "/reservas/em-atraso",
    tag = "reservas",
    responses(
        (status = 200, description = "Overdue reservas", body = Vec<ReservaEmAtraso>)
    )
)]
pub async fn list_em_atraso(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<ReservaEmAtraso>>> {
    let reservas = state.services.reservas.em_atraso().await?;
    Ok(Json(reservas))
}

/// List reservas of a specific cliente
#[utoipa::path(
    get,
    path = "/reservas/cliente/{clienteId}",
    tag = "reservas",
    params(
        ("clienteId" = Uuid, Path, description = "Cliente ID")
    ),
    responses(
        (status = 200, description = "Cliente's reservas", body = Vec<ReservaDetalhes>),
        (status = 404, description = "Cliente not found")
    )
)]
pub async fn list_by_cliente(
    State(state): State<crate::AppState>,
    Path(cliente_id): Path<Uuid>,
) -> AppResult<Json<Vec<ReservaDetalhes>>> {
    let reservas = state.services.reservas.list_by_cliente(cliente_id).await?;
    Ok(Json(reservas))
}

/// Get a reserva by ID
#[utoipa::path(
    get,
    path = "/reservas/{id}",
    tag = "reservas",
    params(
        ("id" = Uuid, Path, description = "Reserva ID")
    ),
    responses(
        (status = 200, description = "Reserva found", body = ReservaDetalhes),
        (status = 404, description = "Reserva not found")
    )
)]
pub async fn get_reserva(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReservaDetalhes>> {
    let reserva = state.services.reservas.get(id).await?;
    Ok(Json(reserva))
}

/// Return a borrowed livro
#[utoipa::path(
    patch,
    path = "/reservas/{id}/devolver",
    tag = "reservas",
    params(
        ("id" = Uuid, Path, description = "Reserva ID")
    ),
    responses(
        (status = 200, description = "Livro returned", body = ReservaDetalhes),
        (status = 404, description = "Reserva not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn devolver_reserva(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReservaDetalhes>> {
    let reserva = state.services.reservas.devolver(id).await?;
    Ok(Json(reserva))
}
