// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{CustomerRental, OutstandingRental, StaffRevenue, TopRentedFilm, TopRentedQuery},
};

// GET /api/reports/customer/{customer_id}/rentals
#[utoipa::path(
    get,
    path = "/api/reports/customer/{customer_id}/rentals",
    tag = "Reports",
    params(("customer_id" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Aluguéis do cliente, mais recentes primeiro", body = Vec<CustomerRental>)
    )
)]
pub async fn customer_rentals(
    State(app_state): State<AppState>,
    WithRejection(Path(customer_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Vec<CustomerRental>>, AppError> {
    let rows = app_state
        .report_service
        .customer_rental_history(customer_id)
        .await?;

    Ok(Json(rows))
}

// GET /api/reports/not-returned
#[utoipa::path(
    get,
    path = "/api/reports/not-returned",
    tag = "Reports",
    responses(
        (status = 200, description = "Aluguéis em aberto, mais antigos primeiro", body = Vec<OutstandingRental>)
    )
)]
pub async fn not_returned(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<OutstandingRental>>, AppError> {
    let rows = app_state.report_service.not_returned().await?;

    Ok(Json(rows))
}

// GET /api/reports/top-rented?limit=
#[utoipa::path(
    get,
    path = "/api/reports/top-rented",
    tag = "Reports",
    params(TopRentedQuery),
    responses(
        (status = 200, description = "Filmes mais alugados", body = Vec<TopRentedFilm>),
        (status = 400, description = "limit inválido")
    )
)]
pub async fn top_rented(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<TopRentedQuery>, AppError>,
) -> Result<Json<Vec<TopRentedFilm>>, AppError> {
    let rows = app_state.report_service.top_rented(query.limit).await?;

    Ok(Json(rows))
}

// GET /api/reports/revenue-by-staff
#[utoipa::path(
    get,
    path = "/api/reports/revenue-by-staff",
    tag = "Reports",
    responses(
        (status = 200, description = "Faturamento por funcionário (inclui quem faturou 0)", body = Vec<StaffRevenue>)
    )
)]
pub async fn revenue_by_staff(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<StaffRevenue>>, AppError> {
    let rows = app_state.report_service.revenue_by_staff().await?;

    Ok(Json(rows))
}
