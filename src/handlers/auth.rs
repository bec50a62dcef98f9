use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, Session},
};

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Identidade encontrada", body = Session),
        (status = 400, description = "Papel ou e-mail inválido"),
        (status = 401, description = "Nenhum cadastro com esse e-mail")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginPayload>, AppError>,
) -> Result<Json<Session>, AppError> {
    payload.validate()?;

    let session = app_state
        .identity_service
        .check_identity(&payload.email, &payload.role)
        .await?;

    Ok(Json(session))
}
