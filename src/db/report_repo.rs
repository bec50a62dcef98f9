// src/db/report_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::store::ReportStore,
    models::report::{CustomerRental, OutstandingRental, StaffRevenue, TopRentedFilm},
};

// Consultas só de leitura. `staff_id` e `rental.customer_id` são smallint no dvdrental,
// por isso todo id devolvido recebe `::int4`.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    // 1. Todos os aluguéis de um cliente, mais recentes primeiro
    async fn customer_rentals(&self, customer_id: i32) -> Result<Vec<CustomerRental>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRental>(
            r#"
            SELECT
                r.rental_id::int4 AS rental_id,
                r.rental_date,
                r.return_date,
                f.title::text AS title,
                i.inventory_id::int4 AS inventory_id
            FROM rental r
            JOIN inventory i ON r.inventory_id = i.inventory_id
            JOIN film f ON i.film_id = f.film_id
            WHERE r.customer_id = $1
            ORDER BY r.rental_date DESC, r.rental_id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // 2. DVDs que não voltaram, os mais antigos primeiro
    async fn not_returned(&self) -> Result<Vec<OutstandingRental>, AppError> {
        let rows = sqlx::query_as::<_, OutstandingRental>(
            r#"
            SELECT
                r.rental_id::int4 AS rental_id,
                c.first_name || ' ' || c.last_name AS customer,
                f.title::text AS title,
                r.rental_date,
                i.inventory_id::int4 AS inventory_id
            FROM rental r
            JOIN customer c ON r.customer_id = c.customer_id
            JOIN inventory i ON r.inventory_id = i.inventory_id
            JOIN film f ON i.film_id = f.film_id
            WHERE r.return_date IS NULL
            ORDER BY r.rental_date ASC, r.rental_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // 3. Top N filmes por número de aluguéis (abertos ou devolvidos)
    async fn top_rented(&self, limit: i64) -> Result<Vec<TopRentedFilm>, AppError> {
        let rows = sqlx::query_as::<_, TopRentedFilm>(
            r#"
            SELECT f.title::text AS title, COUNT(*) AS total
            FROM rental r
            JOIN inventory i ON r.inventory_id = i.inventory_id
            JOIN film f ON i.film_id = f.film_id
            GROUP BY f.title
            ORDER BY total DESC, f.title ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // 4. Faturamento por funcionário. LEFT JOIN: quem não recebeu nada aparece com 0.
    async fn revenue_by_staff(&self) -> Result<Vec<StaffRevenue>, AppError> {
        let rows = sqlx::query_as::<_, StaffRevenue>(
            r#"
            SELECT
                s.staff_id::int4 AS staff_id,
                s.first_name || ' ' || s.last_name AS staff,
                COALESCE(SUM(p.amount), 0)::numeric AS revenue
            FROM staff s
            LEFT JOIN payment p ON s.staff_id = p.staff_id
            GROUP BY s.staff_id, s.first_name, s.last_name
            ORDER BY revenue DESC, s.staff_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
