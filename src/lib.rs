//! Biblioteca Library Management System
//!
//! A Rust REST API server for a small library: customers (clientes),
//! books (livros) and loans/reservations (reservas), plus a denormalized
//! sync feed (locacoes) consumed by an external search index.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod cpf;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
