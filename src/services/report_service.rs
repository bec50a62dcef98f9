// src/services/report_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::ReportStore,
    models::report::{CustomerRental, OutstandingRental, StaffRevenue, TopRentedFilm},
    services::resolve_limit,
};

#[derive(Clone)]
pub struct ReportService {
    repo: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportStore>) -> Self {
        Self { repo }
    }

    pub async fn customer_rental_history(
        &self,
        customer_id: i32,
    ) -> Result<Vec<CustomerRental>, AppError> {
        self.repo.customer_rentals(customer_id).await
    }

    pub async fn not_returned(&self) -> Result<Vec<OutstandingRental>, AppError> {
        self.repo.not_returned().await
    }

    pub async fn top_rented(&self, limit: Option<i64>) -> Result<Vec<TopRentedFilm>, AppError> {
        let limit = resolve_limit(limit)?;
        self.repo.top_rented(limit).await
    }

    pub async fn revenue_by_staff(&self) -> Result<Vec<StaffRevenue>, AppError> {
        self.repo.revenue_by_staff().await
    }
}
