//! Livro (catalog) management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::livro::{CreateLivro, Livro, LivroFilter, UpdateLivro},
};

use super::MessageResponse;

/// Query parameters for listing/searching livros
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivrosQuery {
    /// Filter by availability
    pub disponivel: Option<bool>,
    /// Only livros modified after this ISO 8601 instant (incremental reads)
    pub updated_after: Option<String>,
    /// Free-text search over titulo/autor via the external index
    pub q: Option<String>,
}

/// Create a new livro
#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    request_body = CreateLivro,
    responses(
        (status = 201, description = "Livro created", body = Livro),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_livro(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateLivro>,
) -> AppResult<(StatusCode, Json<Livro>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let livro = state.services.livros.create(payload).await?;
    Ok((StatusCode::CREATED, Json(livro)))
}

/// List livros, optionally filtered or free-text searched
#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    params(
        ("disponivel" = Option<bool>, Query, description = "Filter by availability"),
        ("updatedAfter" = Option<String>, Query, description = "ISO 8601 lower bound on last modification"),
        ("q" = Option<String>, Query, description = "Free-text search over titulo/autor")
    ),
    responses(
        (status = 200, description = "Matching livros", body = Vec<Livro>),
        (status = 400, description = "Malformed updatedAfter timestamp")
    )
)]
pub async fn list_livros(
    State(state): State<crate::AppState>,
    Query(query): Query<LivrosQuery>,
) -> AppResult<Json<Vec<Livro>>> {
    let filter = LivroFilter {
        disponivel: query.disponivel,
        updated_after: super::parse_updated_after(query.updated_after.as_deref())?,
    };

    let livros = match query.q {
        Some(ref q) => state.services.livros.search(q, &filter).await?,
        None => state.services.livros.list(&filter).await?,
    };

    Ok(Json(livros))
}

/// Get a livro by ID
#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = Uuid, Path, description = "Livro ID")
    ),
    responses(
        (status = 200, description = "Livro found", body = Livro),
        (status = 404, description = "Livro not found")
    )
)]
pub async fn get_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Livro>> {
    let livro = state.services.livros.get(id).await?;
    Ok(Json(livro))
}

/// Update a livro (titulo/autor only; availability is not writable)
#[utoipa::path(
    patch,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = Uuid, Path, description = "Livro ID")
    ),
    request_body = UpdateLivro,
    responses(
        (status = 200, description = "Livro updated", body = Livro),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Livro not found")
    )
)]
pub async fn update_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLivro>,
) -> AppResult<Json<Livro>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let livro = state.services.livros.update(id, payload).await?;
    Ok(Json(livro))
}

/// Delete a livro (refused while on loan)
#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    params(
        ("id" = Uuid, Path, description = "Livro ID")
    ),
    responses(
        (status = 200, description = "Livro deleted", body = MessageResponse),
        (status = 404, description = "Livro not found"),
        (status = 409, description = "Livro is currently reserved")
    )
)]
pub async fn delete_livro(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.livros.remove(id).await?;

    Ok(Json(MessageResponse {
        message: "Livro removido com sucesso".to_string(),
    }))
}
