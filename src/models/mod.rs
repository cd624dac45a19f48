//! Data models for the Biblioteca server

pub mod cliente;
pub mod livro;
pub mod locacao;
pub mod reserva;
