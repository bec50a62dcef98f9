// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "DVD Rental API", description = "Aluguel, devolução e relatórios da locadora"),
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Rentals ---
        handlers::rentals::rent,
        handlers::rentals::return_rental,
        handlers::rentals::cancel_rental,
        handlers::rentals::available_inventory,

        // --- Reports ---
        handlers::reports::customer_rentals,
        handlers::reports::not_returned,
        handlers::reports::top_rented,
        handlers::reports::revenue_by_staff,

        // --- Health ---
        handlers::health::health,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::LoginPayload,
            models::auth::Session,

            // --- Rentals ---
            models::rental::Rental,
            models::rental::RentPayload,
            models::rental::RentResponse,
            models::rental::ReturnResponse,
            models::rental::CancelResponse,
            models::rental::AvailableInventory,

            // --- Reports ---
            models::report::CustomerRental,
            models::report::OutstandingRental,
            models::report::TopRentedFilm,
            models::report::StaffRevenue,
        )
    ),
    tags(
        (name = "Auth", description = "Checagem de identidade por e-mail"),
        (name = "Rentals", description = "Aluguel, devolução e cancelamento"),
        (name = "Reports", description = "Relatórios de leitura"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;
