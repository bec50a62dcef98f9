// src/handlers/rentals.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::rental::{
        AvailableInventory, AvailableInventoryQuery, CancelResponse, RentPayload, RentResponse,
        ReturnResponse,
    },
};

// POST /api/rentals
#[utoipa::path(
    post,
    path = "/api/rentals",
    tag = "Rentals",
    request_body = RentPayload,
    responses(
        (status = 201, description = "Aluguel criado", body = RentResponse),
        (status = 404, description = "Cliente, cópia ou funcionário inexistente"),
        (status = 409, description = "Cópia já alugada")
    )
)]
pub async fn rent(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RentPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let rental_id = app_state
        .rental_service
        .rent(payload.customer_id, payload.inventory_id, payload.staff_id)
        .await?;

    Ok((StatusCode::CREATED, Json(RentResponse { rental_id })))
}

// POST /api/returns/{rental_id}
#[utoipa::path(
    post,
    path = "/api/returns/{rental_id}",
    tag = "Rentals",
    params(("rental_id" = i32, Path, description = "ID do aluguel")),
    responses(
        (status = 200, description = "Devolução registrada", body = ReturnResponse),
        (status = 404, description = "Aluguel inexistente ou já devolvido")
    )
)]
pub async fn return_rental(
    State(app_state): State<AppState>,
    WithRejection(Path(rental_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let returned = app_state.rental_service.return_rental(rental_id).await?;

    Ok((StatusCode::OK, Json(ReturnResponse { returned })))
}

// POST /api/rentals/{rental_id}/cancel
#[utoipa::path(
    post,
    path = "/api/rentals/{rental_id}/cancel",
    tag = "Rentals",
    params(("rental_id" = i32, Path, description = "ID do aluguel")),
    responses(
        (status = 200, description = "Aluguel cancelado (linha removida)", body = CancelResponse),
        (status = 409, description = "Aluguel já devolvido ou inexistente")
    )
)]
pub async fn cancel_rental(
    State(app_state): State<AppState>,
    WithRejection(Path(rental_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let canceled = app_state.rental_service.cancel(rental_id).await?;

    Ok((StatusCode::OK, Json(CancelResponse { canceled })))
}

// GET /api/inventory/available?film_id=
#[utoipa::path(
    get,
    path = "/api/inventory/available",
    tag = "Rentals",
    params(AvailableInventoryQuery),
    responses(
        (status = 200, description = "Cópias sem aluguel em aberto", body = AvailableInventory),
        (status = 400, description = "film_id ausente ou limit inválido")
    )
)]
pub async fn available_inventory(
    State(app_state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<AvailableInventoryQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let film_id = query
        .film_id
        .ok_or_else(|| AppError::InvalidInput("film_id required".to_string()))?;

    let inventory_ids = app_state
        .rental_service
        .available_inventory(film_id, query.limit)
        .await?;

    Ok((StatusCode::OK, Json(AvailableInventory { inventory_ids })))
}
