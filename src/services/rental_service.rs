// src/services/rental_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{NewRental, RentalStore},
    services::resolve_limit,
};

// Máquina de estados do aluguel:
//   Aberto --devolver--> Devolvido (terminal)
//   Aberto --cancelar--> linha apagada (terminal)
// A garantia de "um aberto por cópia" fica no banco (índice parcial), não em lock local.
#[derive(Clone)]
pub struct RentalService {
    store: Arc<dyn RentalStore>,
}

impl RentalService {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    pub async fn rent(
        &self,
        customer_id: i32,
        inventory_id: i32,
        staff_id: i32,
    ) -> Result<i32, AppError> {
        let created = self
            .store
            .create_rental(NewRental {
                customer_id,
                inventory_id,
                staff_id,
            })
            .await?;

        match created {
            Some(rental_id) => {
                tracing::info!(rental_id, inventory_id, customer_id, staff_id, "aluguel criado");
                Ok(rental_id)
            }
            None => {
                tracing::warn!(inventory_id, customer_id, "cópia já está alugada");
                Err(AppError::Conflict("inventory already rented".to_string()))
            }
        }
    }

    pub async fn return_rental(&self, rental_id: i32) -> Result<i32, AppError> {
        if !self.store.mark_returned(rental_id).await? {
            tracing::warn!(rental_id, "devolução recusada");
            return Err(AppError::NotFound(
                "rental not found or already returned".to_string(),
            ));
        }

        tracing::info!(rental_id, "aluguel devolvido");
        Ok(rental_id)
    }

    pub async fn cancel(&self, rental_id: i32) -> Result<i32, AppError> {
        if !self.store.delete_open_rental(rental_id).await? {
            tracing::warn!(rental_id, "cancelamento recusado");
            return Err(AppError::Conflict(
                "cannot cancel: rental already returned or not found".to_string(),
            ));
        }

        tracing::info!(rental_id, "aluguel cancelado");
        Ok(rental_id)
    }

    pub async fn available_inventory(
        &self,
        film_id: i32,
        limit: Option<i64>,
    ) -> Result<Vec<i32>, AppError> {
        let limit = resolve_limit(limit)?;
        self.store.available_inventory(film_id, limit).await
    }
}
