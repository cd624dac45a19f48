//! API integration tests
//!
//! Run against a live server (database and migrations in place):
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Generates a unique, checksum-valid CPF so repeated runs never collide
/// on the uniqueness constraint.
fn gerar_cpf() -> String {
    let mut digitos: Vec<u32> = uuid::Uuid::new_v4().as_bytes()[..9]
        .iter()
        .map(|b| (*b % 10) as u32)
        .collect();

    if digitos.iter().all(|&d| d == digitos[0]) {
        digitos[0] = (digitos[0] + 1) % 10;
    }

    let soma: u32 = digitos
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (10 - i as u32))
        .sum();
    let mut dv1 = (soma * 10) % 11;
    if dv1 >= 10 {
        dv1 = 0;
    }
    digitos.push(dv1);

    let soma: u32 = digitos
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (11 - i as u32))
        .sum();
    let mut dv2 = (soma * 10) % 11;
    if dv2 >= 10 {
        dv2 = 0;
    }
    digitos.push(dv2);

    digitos.iter().map(|d| d.to_string()).collect()
}

async fn criar_cliente(client: &Client) -> Value {
    let response = client
        .post(format!("{}/clientes", BASE_URL))
        .json(&json!({
            "nome": "Maria da Silva",
            "cpf": gerar_cpf(),
            "telefone": "11987654321"
        }))
        .send()
        .await
        .expect("Failed to create cliente");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse cliente")
}

async fn criar_livro(client: &Client) -> Value {
    let response = client
        .post(format!("{}/livros", BASE_URL))
        .json(&json!({
            "titulo": "Dom Casmurro",
            "autor": "Machado de Assis"
        }))
        .send()
        .await
        .expect("Failed to create livro");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse livro")
}

async fn criar_reserva(client: &Client, cliente_id: &str, livro_id: &str) -> Value {
    let response = client
        .post(format!("{}/reservas", BASE_URL))
        .json(&json!({
            "clienteId": cliente_id,
            "livroId": livro_id,
            "dataReserva": "2026-01-10T00:00:00Z",
            "dataPrevistaDevolucao": "2026-01-20T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create reserva");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse reserva")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_cliente_invalid_cpf() {
    let client = Client::new();

    let response = client
        .post(format!("{}/clientes", BASE_URL))
        .json(&json!({
            "nome": "João",
            "cpf": "12345678900",
            "telefone": "11987654321"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_cliente_duplicate_cpf() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;

    let response = client
        .post(format!("{}/clientes", BASE_URL))
        .json(&json!({
            "nome": "Outro Nome",
            "cpf": cliente["cpf"],
            "telefone": "11912345678"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_cliente_cpf_is_stored_canonical() {
    let client = Client::new();
    let cpf = gerar_cpf();
    let pontuado = format!(
        "{}.{}.{}-{}",
        &cpf[0..3],
        &cpf[3..6],
        &cpf[6..9],
        &cpf[9..11]
    );

    let response = client
        .post(format!("{}/clientes", BASE_URL))
        .json(&json!({
            "nome": "Ana",
            "cpf": pontuado,
            "telefone": "11987654321"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["cpf"], cpf.as_str());
}

#[tokio::test]
#[ignore]
async fn test_reserva_lifecycle_flips_availability() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;
    let livro_id = livro["id"].as_str().expect("No livro id");

    assert_eq!(livro["disponivel"], true);

    let reserva = criar_reserva(&client, cliente["id"].as_str().unwrap(), livro_id).await;
    let reserva_id = reserva["id"].as_str().expect("No reserva id");

    // Livro is now unavailable
    let livro: Value = client
        .get(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to get livro")
        .json()
        .await
        .expect("Failed to parse livro");
    assert_eq!(livro["disponivel"], false);

    // A second reservation of the same livro conflicts
    let response = client
        .post(format!("{}/reservas", BASE_URL))
        .json(&json!({
            "clienteId": cliente["id"],
            "livroId": livro_id,
            "dataReserva": "2026-01-11T00:00:00Z",
            "dataPrevistaDevolucao": "2026-01-21T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return the livro
    let response = client
        .patch(format!("{}/reservas/{}/devolver", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let devolvida: Value = response.json().await.expect("Failed to parse response");
    assert!(devolvida["dataDevolucao"].is_string());

    // Livro is available again
    let livro: Value = client
        .get(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to get livro")
        .json()
        .await
        .expect("Failed to parse livro");
    assert_eq!(livro["disponivel"], true);

    // A second return conflicts and leaves availability untouched
    let response = client
        .patch(format!("{}/reservas/{}/devolver", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let livro: Value = client
        .get(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to get livro")
        .json()
        .await
        .expect("Failed to parse livro");
    assert_eq!(livro["disponivel"], true);
}

#[tokio::test]
#[ignore]
async fn test_reserva_rejects_bad_date_ordering() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;

    let response = client
        .post(format!("{}/reservas", BASE_URL))
        .json(&json!({
            "clienteId": cliente["id"],
            "livroId": livro["id"],
            "dataReserva": "2026-01-20T00:00:00Z",
            "dataPrevistaDevolucao": "2026-01-10T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_reservas_by_unknown_cliente_is_404() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/reservas/cliente/00000000-0000-0000-0000-000000000000",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_livro_on_loan_is_409() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;
    let livro_id = livro["id"].as_str().unwrap();

    criar_reserva(&client, cliente["id"].as_str().unwrap(), livro_id).await;

    let response = client
        .delete(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_soft_deleted_livro_hidden_but_history_preserved() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;
    let livro_id = livro["id"].as_str().unwrap();

    let reserva = criar_reserva(&client, cliente["id"].as_str().unwrap(), livro_id).await;
    let reserva_id = reserva["id"].as_str().unwrap();

    // Return it so the livro becomes deletable, then delete (soft, since a
    // reserva references it).
    client
        .patch(format!("{}/reservas/{}/devolver", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to return reserva");

    let response = client
        .delete(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to delete livro");
    assert!(response.status().is_success());

    // Gone from direct reads
    let response = client
        .get(format!("{}/livros/{}", BASE_URL, livro_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Still referenced from the historical reserva
    let reserva: Value = client
        .get(format!("{}/reservas/{}", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to get reserva")
        .json()
        .await
        .expect("Failed to parse reserva");
    assert_eq!(reserva["livro"]["titulo"], "Dom Casmurro");
}

#[tokio::test]
#[ignore]
async fn test_deleted_cliente_keeps_snapshot_in_reserva() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let cliente_id = cliente["id"].as_str().unwrap();
    let livro = criar_livro(&client).await;

    let reserva = criar_reserva(&client, cliente_id, livro["id"].as_str().unwrap()).await;
    let reserva_id = reserva["id"].as_str().unwrap();

    let response = client
        .delete(format!("{}/clientes/{}", BASE_URL, cliente_id))
        .send()
        .await
        .expect("Failed to delete cliente");
    assert!(response.status().is_success());

    let reserva: Value = client
        .get(format!("{}/reservas/{}", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to get reserva")
        .json()
        .await
        .expect("Failed to parse reserva");

    assert_eq!(reserva["cliente"]["nome"], "Maria da Silva");
    assert!(reserva["cliente"]["id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_em_atraso_excludes_returned_and_future() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;

    // Due date in the past: overdue until returned.
    let response = client
        .post(format!("{}/reservas", BASE_URL))
        .json(&json!({
            "clienteId": cliente["id"],
            "livroId": livro["id"],
            "dataReserva": "2020-01-01T00:00:00Z",
            "dataPrevistaDevolucao": "2020-01-10T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create reserva");
    assert_eq!(response.status(), 201);

    let reserva: Value = response.json().await.expect("Failed to parse reserva");
    let reserva_id = reserva["id"].as_str().unwrap();

    let atrasadas: Value = client
        .get(format!("{}/reservas/em-atraso", BASE_URL))
        .send()
        .await
        .expect("Failed to list overdue")
        .json()
        .await
        .expect("Failed to parse response");

    let encontrada = atrasadas
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == reserva_id)
        .expect("Overdue reserva not listed");
    assert!(encontrada["diasDeAtraso"].as_i64().unwrap() > 0);
    assert!(encontrada["multaTotal"].as_f64().unwrap() > 10.0);

    // After returning it disappears from the overdue list.
    client
        .patch(format!("{}/reservas/{}/devolver", BASE_URL, reserva_id))
        .send()
        .await
        .expect("Failed to return reserva");

    let atrasadas: Value = client
        .get(format!("{}/reservas/em-atraso", BASE_URL))
        .send()
        .await
        .expect("Failed to list overdue")
        .json()
        .await
        .expect("Failed to parse response");

    assert!(atrasadas
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"] != reserva_id));
}

#[tokio::test]
#[ignore]
async fn test_livros_updated_after_filter() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/livros?updatedAfter=2020-01-01T00:00:00Z",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/livros?updatedAfter=not-a-date", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_locacoes_sync_feed() {
    let client = Client::new();
    let cliente = criar_cliente(&client).await;
    let livro = criar_livro(&client).await;

    let reserva = criar_reserva(
        &client,
        cliente["id"].as_str().unwrap(),
        livro["id"].as_str().unwrap(),
    )
    .await;
    let reserva_id = reserva["id"].as_str().unwrap();

    let docs: Value = client
        .get(format!("{}/locacoes/sync", BASE_URL))
        .send()
        .await
        .expect("Failed to get sync feed")
        .json()
        .await
        .expect("Failed to parse response");

    let doc = docs
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["idLocacao"] == reserva_id)
        .expect("Reserva missing from sync feed");

    assert_eq!(doc["status"], "ATIVA");
    assert_eq!(doc["livroTitulo"], "Dom Casmurro");
    assert_eq!(doc["usuarioNome"], "Maria da Silva");
    assert!(doc["dataDevolucao"].is_null());

    // Malformed cutoff is a validation error
    let response = client
        .get(format!("{}/locacoes/sync?updatedAfter=garbage", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}
