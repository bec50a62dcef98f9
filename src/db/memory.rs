// src/db/memory.rs
//
// Implementação em memória das três stores, com as mesmas regras das consultas SQL
// (joins internos, LEFT JOIN no faturamento, ordenações e desempates).
// Usada nos testes unitários e nos testes HTTP.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::store::{IdentityStore, NewRental, RentalStore, ReportStore},
    models::{
        auth::{Identity, Role},
        rental::Rental,
        report::{CustomerRental, OutstandingRental, StaffRevenue, TopRentedFilm},
    },
};

#[derive(Debug, Clone)]
struct Person {
    first_name: String,
    last_name: String,
    email: String,
}

impl Person {
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i32, Person>,
    staff: BTreeMap<i32, Person>,
    films: BTreeMap<i32, String>,
    // inventory_id -> film_id
    inventory: BTreeMap<i32, i32>,
    rentals: BTreeMap<i32, Rental>,
    // (staff_id, amount)
    payments: Vec<(i32, Decimal)>,
    next_rental_id: i32,
}

impl Tables {
    fn title_of(&self, inventory_id: i32) -> Option<&String> {
        self.inventory
            .get(&inventory_id)
            .and_then(|film_id| self.films.get(film_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Nenhuma operação deixa as tabelas pela metade, então um lock envenenado ainda é utilizável.
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_customer(self, customer_id: i32, first_name: &str, last_name: &str, email: &str) -> Self {
        self.tables().customers.insert(
            customer_id,
            Person {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
            },
        );
        self
    }

    pub fn with_staff(self, staff_id: i32, first_name: &str, last_name: &str, email: &str) -> Self {
        self.tables().staff.insert(
            staff_id,
            Person {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
            },
        );
        self
    }

    pub fn with_film(self, film_id: i32, title: &str) -> Self {
        self.tables().films.insert(film_id, title.to_string());
        self
    }

    pub fn with_inventory(self, inventory_id: i32, film_id: i32) -> Self {
        self.tables().inventory.insert(inventory_id, film_id);
        self
    }

    pub fn with_payment(self, staff_id: i32, amount: Decimal) -> Self {
        self.tables().payments.push((staff_id, amount));
        self
    }

    /// Carrega um aluguel histórico com datas explícitas.
    pub fn with_rental(self, rental: Rental) -> Self {
        {
            let mut tables = self.tables();
            tables.next_rental_id = tables.next_rental_id.max(rental.rental_id);
            tables.rentals.insert(rental.rental_id, rental);
        }
        self
    }

    pub fn rental(&self, rental_id: i32) -> Option<Rental> {
        self.tables().rentals.get(&rental_id).cloned()
    }

    pub fn open_rentals_for(&self, inventory_id: i32) -> usize {
        self.tables()
            .rentals
            .values()
            .filter(|r| r.inventory_id == inventory_id && r.is_open())
            .count()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl IdentityStore for InMemoryStore {
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Identity>, AppError> {
        let tables = self.tables();
        let people = match role {
            Role::Staff => &tables.staff,
            Role::Customer => &tables.customers,
        };
        let wanted = email.to_lowercase();

        Ok(people
            .iter()
            .find(|(_, person)| person.email.to_lowercase() == wanted)
            .map(|(id, person)| Identity {
                id: *id,
                name: person.display_name(),
            }))
    }
}

#[async_trait]
impl RentalStore for InMemoryStore {
    async fn create_rental(&self, rental: NewRental) -> Result<Option<i32>, AppError> {
        // Verificação e inserção sob o mesmo lock: equivalente ao índice parcial do Postgres.
        let mut tables = self.tables();

        let already_open = tables
            .rentals
            .values()
            .any(|r| r.inventory_id == rental.inventory_id && r.is_open());
        if already_open {
            return Ok(None);
        }

        if !tables.inventory.contains_key(&rental.inventory_id) {
            return Err(AppError::NotFound(format!(
                "inventory item {} not found",
                rental.inventory_id
            )));
        }
        if !tables.customers.contains_key(&rental.customer_id) {
            return Err(AppError::NotFound(format!(
                "customer {} not found",
                rental.customer_id
            )));
        }
        if !tables.staff.contains_key(&rental.staff_id) {
            return Err(AppError::NotFound(format!(
                "staff member {} not found",
                rental.staff_id
            )));
        }

        tables.next_rental_id += 1;
        let rental_id = tables.next_rental_id;
        tables.rentals.insert(
            rental_id,
            Rental {
                rental_id,
                rental_date: now(),
                inventory_id: rental.inventory_id,
                customer_id: rental.customer_id,
                staff_id: rental.staff_id,
                return_date: None,
            },
        );

        Ok(Some(rental_id))
    }

    async fn mark_returned(&self, rental_id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables();
        match tables.rentals.get_mut(&rental_id) {
            Some(rental) if rental.is_open() => {
                rental.return_date = Some(now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_open_rental(&self, rental_id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables();
        let is_open = tables
            .rentals
            .get(&rental_id)
            .is_some_and(Rental::is_open);
        if is_open {
            tables.rentals.remove(&rental_id);
        }
        Ok(is_open)
    }

    async fn available_inventory(&self, film_id: i32, limit: i64) -> Result<Vec<i32>, AppError> {
        let tables = self.tables();
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(tables
            .inventory
            .iter()
            .filter(|(_, film)| **film == film_id)
            .map(|(inventory_id, _)| *inventory_id)
            .filter(|inventory_id| {
                !tables
                    .rentals
                    .values()
                    .any(|r| r.inventory_id == *inventory_id && r.is_open())
            })
            .take(limit)
            .collect())
    }
}

#[async_trait]
impl ReportStore for InMemoryStore {
    async fn customer_rentals(&self, customer_id: i32) -> Result<Vec<CustomerRental>, AppError> {
        let tables = self.tables();

        let mut rows: Vec<CustomerRental> = tables
            .rentals
            .values()
            .filter(|r| r.customer_id == customer_id)
            .filter_map(|r| {
                let title = tables.title_of(r.inventory_id)?;
                Some(CustomerRental {
                    rental_id: r.rental_id,
                    rental_date: r.rental_date,
                    return_date: r.return_date,
                    title: title.clone(),
                    inventory_id: r.inventory_id,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.rental_date
                .cmp(&a.rental_date)
                .then(b.rental_id.cmp(&a.rental_id))
        });
        Ok(rows)
    }

    async fn not_returned(&self) -> Result<Vec<OutstandingRental>, AppError> {
        let tables = self.tables();

        let mut rows: Vec<OutstandingRental> = tables
            .rentals
            .values()
            .filter(|r| r.is_open())
            .filter_map(|r| {
                let customer = tables.customers.get(&r.customer_id)?;
                let title = tables.title_of(r.inventory_id)?;
                Some(OutstandingRental {
                    rental_id: r.rental_id,
                    customer: customer.display_name(),
                    title: title.clone(),
                    rental_date: r.rental_date,
                    inventory_id: r.inventory_id,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            a.rental_date
                .cmp(&b.rental_date)
                .then(a.rental_id.cmp(&b.rental_id))
        });
        Ok(rows)
    }

    async fn top_rented(&self, limit: i64) -> Result<Vec<TopRentedFilm>, AppError> {
        let tables = self.tables();

        // GROUP BY título, como no SQL
        let mut totals: HashMap<&str, i64> = HashMap::new();
        for rental in tables.rentals.values() {
            if let Some(title) = tables.title_of(rental.inventory_id) {
                *totals.entry(title.as_str()).or_default() += 1;
            }
        }

        let mut rows: Vec<TopRentedFilm> = totals
            .into_iter()
            .map(|(title, total)| TopRentedFilm {
                title: title.to_string(),
                total,
            })
            .collect();

        rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.title.cmp(&b.title)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn revenue_by_staff(&self) -> Result<Vec<StaffRevenue>, AppError> {
        let tables = self.tables();

        let mut rows: Vec<StaffRevenue> = tables
            .staff
            .iter()
            .map(|(staff_id, person)| StaffRevenue {
                staff_id: *staff_id,
                staff: person.display_name(),
                revenue: tables
                    .payments
                    .iter()
                    .filter(|(paid_to, _)| paid_to == staff_id)
                    .map(|(_, amount)| *amount)
                    .sum(),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.revenue
                .cmp(&a.revenue)
                .then(a.staff_id.cmp(&b.staff_id))
        });
        Ok(rows)
    }
}
