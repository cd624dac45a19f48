//! Cliente (customer) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Cliente model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,
    pub nome: String,
    /// CPF in canonical form (11 digits, no punctuation)
    pub cpf: String,
    pub telefone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create cliente request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCliente {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: String,
    /// CPF, punctuated or bare (e.g. "529.982.247-25" or "52998224725")
    #[validate(length(min = 11, max = 14, message = "O CPF deve ter entre 11 e 14 caracteres"))]
    pub cpf: String,
    #[validate(length(min = 10, max = 15, message = "O telefone deve ter entre 10 e 15 caracteres"))]
    pub telefone: String,
}

/// Partial update for a cliente. Only present fields are applied.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCliente {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    pub nome: Option<String>,
    #[validate(length(min = 11, max = 14, message = "O CPF deve ter entre 11 e 14 caracteres"))]
    pub cpf: Option<String>,
    #[validate(length(min = 10, max = 15, message = "O telefone deve ter entre 10 e 15 caracteres"))]
    pub telefone: Option<String>,
}

/// Short cliente summary embedded in reserva read models.
///
/// `id` is absent when the cliente was deleted after the reservation was
/// made; `nome` and `cpf` then come from the snapshot taken at creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClienteResumo {
    pub id: Option<Uuid>,
    pub nome: String,
    pub cpf: String,
}
