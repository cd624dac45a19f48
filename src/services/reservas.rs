//! Reserva lifecycle service.
//!
//! A reserva has exactly two states: created (active) and returned
//! (terminal). Creation and return each pair a reserva write with a livro
//! availability flip; the repository runs both inside one transaction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::reserva::{CreateReserva, Multa, ReservaDetalhes, ReservaEmAtraso},
    repository::Repository,
};

const MULTA_FIXA: f64 = 10.0;
const PERCENTUAL_ACRESCIMO: f64 = 0.05;
const MS_POR_DIA: f64 = 86_400_000.0;

/// Computes the late fee for a reservation due at `data_prevista`,
/// evaluated at `agora`.
///
/// Days late are counted in wall-clock milliseconds and rounded up, so any
/// positive fraction of a day counts as a full day. The `dias <= 0` guard
/// stays explicit: calling this for a non-overdue reservation yields a zero
/// fee rather than a negative-day miscalculation.
pub fn calcular_multa(data_prevista: DateTime<Utc>, agora: DateTime<Utc>) -> Multa {
    let diferenca_ms = (agora - data_prevista).num_milliseconds();
    let dias = (diferenca_ms as f64 / MS_POR_DIA).ceil() as i64;

    if dias <= 0 {
        return Multa {
            dias_de_atraso: 0,
            multa_total: 0.0,
        };
    }

    let total = MULTA_FIXA + MULTA_FIXA * PERCENTUAL_ACRESCIMO * dias as f64;

    Multa {
        dias_de_atraso: dias,
        multa_total: (total * 100.0).round() / 100.0,
    }
}

#[derive(Clone)]
pub struct ReservasService {
    repository: Repository,
}

impl ReservasService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new reserva.
    ///
    /// The cliente and livro must exist, the livro must be available and
    /// the due date must come after the reservation date. The insert and
    /// the availability flip land atomically.
    pub async fn create(&self, reserva: CreateReserva) -> AppResult<ReservaDetalhes> {
        let cliente = self.repository.clientes.get_by_id(reserva.cliente_id).await?;
        let livro = self.repository.livros.get_by_id(reserva.livro_id).await?;

        if !livro.disponivel {
            return Err(AppError::Conflict(
                "Este livro não está disponível para reserva no momento".to_string(),
            ));
        }

        if reserva.data_prevista_devolucao <= reserva.data_reserva {
            return Err(AppError::Validation(
                "A data prevista de devolução deve ser posterior à data de reserva".to_string(),
            ));
        }

        let id = self.repository.reservas.create(&reserva, &cliente).await?;
        self.repository.reservas.get_detalhes(id).await
    }

    /// Record the return of a livro. Rejected if already returned.
    pub async fn devolver(&self, id: Uuid) -> AppResult<ReservaDetalhes> {
        let reserva = self.repository.reservas.get_by_id(id).await?;

        if reserva.data_devolucao.is_some() {
            return Err(AppError::Conflict("Este livro já foi devolvido".to_string()));
        }

        self.repository.reservas.devolver(id).await?;
        self.repository.reservas.get_detalhes(id).await
    }

    /// List all reservas
    pub async fn list(&self) -> AppResult<Vec<ReservaDetalhes>> {
        self.repository.reservas.list().await
    }

    /// List reservas for a cliente; the cliente itself must exist
    pub async fn list_by_cliente(&self, cliente_id: Uuid) -> AppResult<Vec<ReservaDetalhes>> {
        self.repository.clientes.get_by_id(cliente_id).await?;
        self.repository.reservas.list_by_cliente(cliente_id).await
    }

    /// Get a reserva by ID
    pub async fn get(&self, id: Uuid) -> AppResult<ReservaDetalhes> {
        self.repository.reservas.get_detalhes(id).await
    }

    /// Overdue reservas (due date passed, not returned), each with its
    /// computed late fee, most overdue first.
    pub async fn em_atraso(&self) -> AppResult<Vec<ReservaEmAtraso>> {
        let agora = Utc::now();
        let reservas = self.repository.reservas.em_atraso(agora).await?;

        Ok(reservas
            .into_iter()
            .map(|reserva| {
                let multa = calcular_multa(reserva.data_prevista_devolucao, agora);
                ReservaEmAtraso {
                    reserva,
                    dias_de_atraso: multa.dias_de_atraso,
                    multa_total: multa.multa_total,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn one_day_and_a_second_late_counts_two_days() {
        let multa = calcular_multa(utc(2026, 1, 22, 0, 0, 0), utc(2026, 1, 23, 0, 0, 1));
        assert_eq!(multa.dias_de_atraso, 2);
        assert_eq!(multa.multa_total, 11.00);
    }

    #[test]
    fn five_days_and_a_second_late_counts_six_days() {
        let multa = calcular_multa(utc(2026, 1, 20, 0, 0, 0), utc(2026, 1, 25, 0, 0, 1));
        assert_eq!(multa.dias_de_atraso, 6);
        assert_eq!(multa.multa_total, 13.00);
    }

    #[test]
    fn ten_days_and_a_second_late_counts_eleven_days() {
        let multa = calcular_multa(utc(2026, 1, 15, 0, 0, 0), utc(2026, 1, 25, 0, 0, 1));
        assert_eq!(multa.dias_de_atraso, 11);
        assert_eq!(multa.multa_total, 15.50);
    }

    #[test]
    fn fractional_day_rounds_up() {
        // 18 hours past a noon due date is 0.75 of a day: one day late.
        let multa = calcular_multa(utc(2026, 1, 22, 12, 0, 0), utc(2026, 1, 23, 6, 0, 0));
        assert_eq!(multa.dias_de_atraso, 1);
        assert_eq!(multa.multa_total, 10.50);
    }

    #[test]
    fn exactly_one_full_day_counts_one_day() {
        let multa = calcular_multa(utc(2026, 1, 22, 0, 0, 0), utc(2026, 1, 23, 0, 0, 0));
        assert_eq!(multa.dias_de_atraso, 1);
        assert_eq!(multa.multa_total, 10.50);
    }

    #[test]
    fn not_overdue_yields_zero() {
        let multa = calcular_multa(utc(2026, 1, 22, 0, 0, 0), utc(2026, 1, 21, 0, 0, 0));
        assert_eq!(multa.dias_de_atraso, 0);
        assert_eq!(multa.multa_total, 0.0);

        // Due this very instant is not overdue either.
        let multa = calcular_multa(utc(2026, 1, 22, 0, 0, 0), utc(2026, 1, 22, 0, 0, 0));
        assert_eq!(multa.dias_de_atraso, 0);
        assert_eq!(multa.multa_total, 0.0);
    }
}
