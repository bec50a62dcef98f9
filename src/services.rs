pub mod auth;
pub mod rental_service;
pub mod report_service;

use crate::common::error::AppError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 1000;

// `limit` ausente vira o padrão; fora de 1..=MAX_LIMIT é erro do cliente.
pub(crate) fn resolve_limit(limit: Option<i64>) -> Result<i64, AppError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {n}"
        ))),
    }
}
