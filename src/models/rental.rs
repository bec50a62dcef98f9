// src/models/rental.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Um empréstimo de uma cópia física (tabela 'rental').
// Aberto enquanto `return_date` for nulo; devolvido é terminal; cancelado apaga a linha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Rental {
    pub rental_id: i32,
    pub rental_date: NaiveDateTime,
    pub inventory_id: i32,
    pub customer_id: i32,
    pub staff_id: i32,
    pub return_date: Option<NaiveDateTime>,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

// Dados para criar um aluguel
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RentPayload {
    #[validate(range(min = 1, message = "must be a positive id"))]
    #[schema(example = 1)]
    pub customer_id: i32,

    #[validate(range(min = 1, message = "must be a positive id"))]
    #[schema(example = 367)]
    pub inventory_id: i32,

    #[validate(range(min = 1, message = "must be a positive id"))]
    #[schema(example = 1)]
    pub staff_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RentResponse {
    pub rental_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReturnResponse {
    pub returned: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancelResponse {
    pub canceled: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableInventoryQuery {
    /// Filme cujas cópias livres queremos
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub film_id: Option<i32>,
    /// Máximo de cópias devolvidas (padrão 10)
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableInventory {
    pub inventory_ids: Vec<i32>,
}
