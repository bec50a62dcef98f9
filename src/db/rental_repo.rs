// src/db/rental_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::store::{NewRental, RentalStore},
};

// Índice parcial criado pela migração: no máximo um aluguel aberto por cópia.
pub const OPEN_RENTAL_INDEX: &str = "rental_one_open_per_inventory";

const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Clone)]
pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte falhas do INSERT em fatos do domínio.
// - unique_violation no índice parcial: outra requisição alugou a cópia primeiro
// - foreign_key_violation: cliente, cópia ou funcionário inexistente
// - numeric_value_out_of_range: customer_id/staff_id são smallint no dvdrental,
//   então um id acima de 32767 não pode existir
fn map_insert_error(e: sqlx::Error, rental: &NewRental) -> Result<Option<i32>, AppError> {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            let smallint_max = i32::from(i16::MAX);
            if rental.customer_id > smallint_max {
                return Err(AppError::NotFound(format!(
                    "customer {} not found",
                    rental.customer_id
                )));
            }
            if rental.staff_id > smallint_max {
                return Err(AppError::NotFound(format!(
                    "staff member {} not found",
                    rental.staff_id
                )));
            }
        }
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint == OPEN_RENTAL_INDEX {
                return Ok(None);
            }
            return Err(AppError::Conflict(db_err.message().to_string()));
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            let message = if constraint.contains("customer") {
                format!("customer {} not found", rental.customer_id)
            } else if constraint.contains("inventory") {
                format!("inventory item {} not found", rental.inventory_id)
            } else if constraint.contains("staff") {
                format!("staff member {} not found", rental.staff_id)
            } else {
                db_err.message().to_string()
            };
            return Err(AppError::NotFound(message));
        }
    }
    Err(e.into())
}

#[async_trait]
impl RentalStore for RentalRepository {
    async fn create_rental(&self, rental: NewRental) -> Result<Option<i32>, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Verifica se a cópia já está fora (aluguel sem devolução)
        let open_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rental WHERE inventory_id = $1 AND return_date IS NULL",
        )
        .bind(rental.inventory_id)
        .fetch_one(&mut *tx)
        .await?;

        if open_count > 0 {
            // Drop do `tx` faz rollback
            return Ok(None);
        }

        // 2. Cria o aluguel. Se outra transação inseriu entre o passo 1 e aqui, o índice parcial barra.
        let inserted = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO rental (rental_date, inventory_id, customer_id, staff_id)
            VALUES (NOW(), $1, $2, $3)
            RETURNING rental_id
            "#,
        )
        .bind(rental.inventory_id)
        .bind(rental.customer_id)
        .bind(rental.staff_id)
        .fetch_one(&mut *tx)
        .await;

        let rental_id = match inserted {
            Ok(id) => id,
            Err(e) => return map_insert_error(e, &rental),
        };

        tx.commit().await?;
        Ok(Some(rental_id))
    }

    async fn mark_returned(&self, rental_id: i32) -> Result<bool, AppError> {
        // Update condicional num único comando: devolver duas vezes nunca aplica duas vezes.
        let result = sqlx::query(
            "UPDATE rental SET return_date = NOW() WHERE rental_id = $1 AND return_date IS NULL",
        )
        .bind(rental_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_open_rental(&self, rental_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rental WHERE rental_id = $1 AND return_date IS NULL")
            .bind(rental_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn available_inventory(&self, film_id: i32, limit: i64) -> Result<Vec<i32>, AppError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT i.inventory_id::int4
            FROM inventory i
            LEFT JOIN rental r ON r.inventory_id = i.inventory_id AND r.return_date IS NULL
            WHERE i.film_id = $1 AND r.rental_id IS NULL
            ORDER BY i.inventory_id
            LIMIT $2
            "#,
        )
        .bind(film_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
