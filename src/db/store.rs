// src/db/store.rs
//
// As "portas" de acesso ao banco que os serviços enxergam.
// Os serviços recebem `Arc<dyn ...Store>` já construído, nunca um pool global.

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        auth::{Identity, Role},
        report::{CustomerRental, OutstandingRental, StaffRevenue, TopRentedFilm},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRental {
    pub customer_id: i32,
    pub inventory_id: i32,
    pub staff_id: i32,
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Busca case-insensitive por e-mail na tabela do papel informado.
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Identity>, AppError>;
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Cria o aluguel se a cópia não tiver outro aluguel em aberto.
    /// `Ok(None)` significa que a cópia já está alugada (inclusive quando perdeu uma corrida).
    async fn create_rental(&self, rental: NewRental) -> Result<Option<i32>, AppError>;

    /// Marca a devolução. `false` se o aluguel não existe ou já foi devolvido.
    async fn mark_returned(&self, rental_id: i32) -> Result<bool, AppError>;

    /// Apaga o aluguel se ainda estiver em aberto. `false` caso contrário.
    async fn delete_open_rental(&self, rental_id: i32) -> Result<bool, AppError>;

    async fn available_inventory(&self, film_id: i32, limit: i64) -> Result<Vec<i32>, AppError>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn customer_rentals(&self, customer_id: i32) -> Result<Vec<CustomerRental>, AppError>;

    async fn not_returned(&self) -> Result<Vec<OutstandingRental>, AppError>;

    async fn top_rented(&self, limit: i64) -> Result<Vec<TopRentedFilm>, AppError>;

    async fn revenue_by_staff(&self) -> Result<Vec<StaffRevenue>, AppError>;
}
