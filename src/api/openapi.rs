//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{clientes, health, livros, locacoes, reservas};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "1.0.0",
        description = "Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Clientes
        clientes::create_cliente,
        clientes::list_clientes,
        clientes::get_cliente,
        clientes::update_cliente,
        clientes::delete_cliente,
        // Livros
        livros::create_livro,
        livros::list_livros,
        livros::get_livro,
        livros::update_livro,
        livros::delete_livro,
        // Reservas
        reservas::create_reserva,
        reservas::list_reservas,
        reservas::list_em_atraso,
        reservas::list_by_cliente,
        reservas::get_reserva,
        reservas::devolver_reserva,
        // Locações
        locacoes::sync,
    ),
    components(
        schemas(
            // Clientes
            crate::models::cliente::Cliente,
            crate::models::cliente::CreateCliente,
            crate::models::cliente::UpdateCliente,
            crate::models::cliente::ClienteResumo,
            // Livros
            crate::models::livro::Livro,
            crate::models::livro::CreateLivro,
            crate::models::livro::UpdateLivro,
            crate::models::livro::LivroResumo,
            // Reservas
            crate::models::reserva::CreateReserva,
            crate::models::reserva::ReservaDetalhes,
            crate::models::reserva::ReservaEmAtraso,
            crate::models::reserva::Multa,
            // Locações
            crate::models::locacao::LocacaoSync,
            crate::models::locacao::LocacaoStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "clientes", description = "Customer management"),
        (name = "livros", description = "Book catalog management"),
        (name = "reservas", description = "Reservation lifecycle"),
        (name = "locacoes", description = "Denormalized sync feed")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
