// src/models/report.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

// 1. Histórico de um cliente
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct CustomerRental {
    pub rental_id: i32,
    pub rental_date: NaiveDateTime,
    pub return_date: Option<NaiveDateTime>,
    pub title: String,
    pub inventory_id: i32,
}

// 2. DVDs ainda não devolvidos (mais antigos primeiro)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct OutstandingRental {
    pub rental_id: i32,
    pub customer: String,
    pub title: String,
    pub rental_date: NaiveDateTime,
    pub inventory_id: i32,
}

// 3. Ranking dos mais alugados
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct TopRentedFilm {
    pub title: String,
    pub total: i64,
}

// 4. Faturamento por funcionário
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct StaffRevenue {
    pub staff_id: i32,
    pub staff: String,
    pub revenue: Decimal,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopRentedQuery {
    /// Tamanho do ranking (padrão 10)
    #[serde(default, deserialize_with = "super::empty_as_none")]
    pub limit: Option<i64>,
}
