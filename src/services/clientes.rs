//! Cliente management service

use uuid::Uuid;

use crate::{
    cpf::{normalizar_cpf, validar_cpf},
    error::{AppError, AppResult},
    models::cliente::{Cliente, CreateCliente, UpdateCliente},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientesService {
    repository: Repository,
}

impl ClientesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new cliente. The CPF is normalized before the uniqueness
    /// check and stored canonical.
    pub async fn create(&self, cliente: CreateCliente) -> AppResult<Cliente> {
        let cpf = normalizar_cpf(&cliente.cpf);

        if !validar_cpf(&cpf) {
            return Err(AppError::Validation("CPF inválido".to_string()));
        }

        if self.repository.clientes.find_by_cpf(&cpf).await?.is_some() {
            return Err(AppError::Conflict(
                "Já existe um cliente cadastrado com este CPF".to_string(),
            ));
        }

        self.repository
            .clientes
            .create(&cliente.nome, &cpf, &cliente.telefone)
            .await
    }

    /// List all clientes ordered by name
    pub async fn list(&self) -> AppResult<Vec<Cliente>> {
        self.repository.clientes.list().await
    }

    /// Get a cliente by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Cliente> {
        self.repository.clientes.get_by_id(id).await
    }

    /// Apply a partial update. A CPF change is re-validated and checked
    /// for conflicts against other clientes (keeping one's own CPF is fine).
    pub async fn update(&self, id: Uuid, update: UpdateCliente) -> AppResult<Cliente> {
        self.repository.clientes.get_by_id(id).await?;

        let cpf = match update.cpf {
            Some(ref raw) => {
                let cpf = normalizar_cpf(raw);

                if !validar_cpf(&cpf) {
                    return Err(AppError::Validation("CPF inválido".to_string()));
                }

                if let Some(existente) = self.repository.clientes.find_by_cpf(&cpf).await? {
                    if existente.id != id {
                        return Err(AppError::Conflict(
                            "Já existe outro cliente cadastrado com este CPF".to_string(),
                        ));
                    }
                }

                Some(cpf)
            }
            None => None,
        };

        self.repository
            .clientes
            .update(
                id,
                update.nome.as_deref(),
                cpf.as_deref(),
                update.telefone.as_deref(),
            )
            .await
    }

    /// Delete a cliente. Historical reservas survive via their snapshot
    /// columns; the live relation is detached by the store.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.repository.clientes.get_by_id(id).await?;
        self.repository.clientes.delete(id).await
    }
}
