//! API handlers for the Biblioteca REST endpoints

pub mod clientes;
pub mod health;
pub mod livros;
pub mod locacoes;
pub mod openapi;
pub mod reservas;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Simple confirmation body returned by delete endpoints
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Parses an optional `updatedAfter` query value as an ISO 8601 timestamp.
pub(crate) fn parse_updated_after(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(value)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                AppError::Validation(
                    "Parâmetro updatedAfter deve estar no formato ISO 8601 válido".to_string(),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_8601_timestamps() {
        let parsed = parse_updated_after(Some("2026-01-22T00:00:00.000Z")).unwrap();
        assert!(parsed.is_some());

        let parsed = parse_updated_after(Some("2026-01-22T03:00:00-03:00")).unwrap();
        assert_eq!(parsed.unwrap(), parse_updated_after(Some("2026-01-22T06:00:00Z")).unwrap().unwrap());
    }

    #[test]
    fn absent_value_is_none() {
        assert!(parse_updated_after(None).unwrap().is_none());
    }

    #[test]
    fn malformed_value_is_a_validation_error() {
        assert!(matches!(
            parse_updated_after(Some("not-a-date")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_updated_after(Some("2026-13-45")),
            Err(AppError::Validation(_))
        ));
    }
}
