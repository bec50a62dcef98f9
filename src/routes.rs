// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{config::AppState, handlers, middleware::request_id::request_id};

pub fn router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas; não há rota protegida)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let report_routes = Router::new()
        .route(
            "/customer/{customer_id}/rentals",
            get(handlers::reports::customer_rentals),
        )
        .route("/not-returned", get(handlers::reports::not_returned))
        .route("/top-rented", get(handlers::reports::top_rented))
        .route("/revenue-by-staff", get(handlers::reports::revenue_by_staff));

    // Combina tudo no router principal
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api-docs/openapi.json", get(handlers::health::openapi))
        .route("/api/rentals", post(handlers::rentals::rent))
        .route("/api/returns/{rental_id}", post(handlers::rentals::return_rental))
        .route(
            "/api/rentals/{rental_id}/cancel",
            post(handlers::rentals::cancel_rental),
        )
        .route(
            "/api/inventory/available",
            get(handlers::rentals::available_inventory),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/reports", report_routes)
        .fallback(handlers::health::not_found)
        .layer(axum_middleware::from_fn(request_id))
        .with_state(app_state)
}
