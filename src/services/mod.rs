//! Business logic services

pub mod clientes;
pub mod livros;
pub mod locacoes;
pub mod reservas;
pub mod search;

use crate::{config::SearchConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub clientes: clientes::ClientesService,
    pub livros: livros::LivrosService,
    pub reservas: reservas::ReservasService,
    pub locacoes: locacoes::LocacoesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, search_config: &SearchConfig) -> AppResult<Self> {
        let search = search::SearchService::new(search_config)?;

        Ok(Self {
            clientes: clientes::ClientesService::new(repository.clone()),
            livros: livros::LivrosService::new(repository.clone(), search),
            reservas: reservas::ReservasService::new(repository.clone()),
            locacoes: locacoes::LocacoesService::new(repository),
        })
    }
}
