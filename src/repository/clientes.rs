//! Clientes repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::cliente::Cliente,
};

#[derive(Clone)]
pub struct ClientesRepository {
    pool: Pool<Postgres>,
}

impl ClientesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new cliente. `cpf` must already be in canonical form.
    pub async fn create(&self, nome: &str, cpf: &str, telefone: &str) -> AppResult<Cliente> {
        let now = Utc::now();

        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (id, nome, cpf, telefone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nome)
        .bind(cpf)
        .bind(telefone)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    /// List all clientes ordered by name
    pub async fn list(&self) -> AppResult<Vec<Cliente>> {
        let clientes = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clientes)
    }

    /// Get cliente by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Cliente> {
        sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cliente com ID {} não encontrado", id)))
    }

    /// Find a cliente by canonical CPF
    pub async fn find_by_cpf(&self, cpf: &str) -> AppResult<Option<Cliente>> {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cliente)
    }

    /// Apply a partial update. Absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        nome: Option<&str>,
        cpf: Option<&str>,
        telefone: Option<&str>,
    ) -> AppResult<Cliente> {
        let now = Utc::now();

        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                nome = COALESCE($1, nome),
                cpf = COALESCE($2, cpf),
                telefone = COALESCE($3, telefone),
                updated_at = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(cpf)
        .bind(telefone)
        .bind(now)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(cliente)
    }

    /// Delete a cliente. Reservas referencing it are detached
    /// (ON DELETE SET NULL); their snapshot columns keep the history.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
