//! Cliente management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::cliente::{Cliente, CreateCliente, UpdateCliente},
};

use super::MessageResponse;

/// Create a new cliente
#[utoipa::path(
    post,
    path = "/clientes",
    tag = "clientes",
    request_body = CreateCliente,
    responses(
        (status = 201, description = "Cliente created", body = Cliente),
        (status = 400, description = "Invalid CPF or payload"),
        (status = 409, description = "CPF already registered")
    )
)]
pub async fn create_cliente(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateCliente>,
) -> AppResult<(StatusCode, Json<Cliente>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cliente = state.services.clientes.create(payload).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

/// List all clientes, ordered by name
#[utoipa::path(
    get,
    path = "/clientes",
    tag = "clientes",
    responses(
        (status = 200, description = "All clientes", body = Vec<Cliente>)
    )
)]
pub async fn list_clientes(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Cliente>>> {
    let clientes = state.services.clientes.list().await?;
    Ok(Json(clientes))
}

/// Get a cliente by ID
#[utoipa::path(
    get,
    path = "/clientes/{id}",
    tag = "clientes",
    params(
        ("id" = Uuid, Path, description = "Cliente ID")
    ),
    responses(
        (status = 200, description = "Cliente found", body = Cliente),
        (status = 404, description = "Cliente not found")
    )
)]
pub async fn get_cliente(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Cliente>> {
    let cliente = state.services.clientes.get(id).await?;
    Ok(Json(cliente))
}

/// Update a cliente (partial: only present fields are applied)
#[utoipa::path(
    patch,
    path = "/clientes/{id}",
    tag = "clientes",
    params(
        ("id" = Uuid, Path, description = "Cliente ID")
    ),
    request_body = UpdateCliente,
    responses(
        (status = 200, description = "Cliente updated", body = Cliente),
        (status = 400, description = "Invalid CPF or payload"),
        (status = 404, description = "Cliente not found"),
        (status = 409, description = "CPF already registered to another cliente")
    )
)]
pub async fn update_cliente(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCliente>,
) -> AppResult<Json<Cliente>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let cliente = state.services.clientes.update(id, payload).await?;
    Ok(Json(cliente))
}

/// Delete a cliente. Reservation history is preserved through snapshots.
#[utoipa::path(
    delete,
    path = "/clientes/{id}",
    tag = "clientes",
    params(
        ("id" = Uuid, Path, description = "Cliente ID")
    ),
    responses(
        (status = 200, description = "Cliente deleted", body = MessageResponse),
        (status = 404, description = "Cliente not found")
    )
)]
pub async fn delete_cliente(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.clientes.remove(id).await?;

    Ok(Json(MessageResponse {
        message: "Cliente removido com sucesso".to_string(),
    }))
}
