//! Livro (book) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Livro model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Livro {
    pub id: Uuid,
    pub titulo: String,
    pub autor: String,
    /// Toggled exclusively by the reservation lifecycle, never by updates.
    pub disponivel: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create livro request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLivro {
    #[validate(length(min = 1, message = "O título é obrigatório"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "O autor é obrigatório"))]
    pub autor: String,
}

/// Partial update for a livro. `disponivel` is deliberately not part of
/// the writable surface.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLivro {
    #[validate(length(min = 1, message = "O título é obrigatório"))]
    pub titulo: Option<String>,
    #[validate(length(min = 1, message = "O autor é obrigatório"))]
    pub autor: Option<String>,
}

/// Filters for listing livros
#[derive(Debug, Default, Clone)]
pub struct LivroFilter {
    pub disponivel: Option<bool>,
    pub updated_after: Option<DateTime<Utc>>,
}

/// Denormalized livro document held by the external search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivroSearchDoc {
    pub id: Uuid,
    pub titulo: String,
    pub autor: String,
    pub disponivel: bool,
}

/// Short livro summary embedded in reserva read models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LivroResumo {
    pub id: Uuid,
    pub titulo: String,
    pub autor: String,
}
