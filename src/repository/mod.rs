//! Repository layer for database operations

pub mod clientes;
pub mod livros;
pub mod locacoes;
pub mod reservas;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub clientes: clientes::ClientesRepository,
    pub livros: livros::LivrosRepository,
    pub reservas: reservas::ReservasRepository,
    pub locacoes: locacoes::LocacoesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            clientes: clientes::ClientesRepository::new(pool.clone()),
            livros: livros::LivrosRepository::new(pool.clone()),
            reservas: reservas::ReservasRepository::new(pool.clone()),
            locacoes: locacoes::LocacoesRepository::new(pool.clone()),
            pool,
        }
    }
}
