use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::store::IdentityStore,
    models::auth::{Identity, Role},
};

// Busca de clientes e funcionários por e-mail (tabelas 'customer' e 'staff')
#[derive(Clone)]
pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for IdentityRepository {
    async fn find_by_email(&self, role: Role, email: &str) -> Result<Option<Identity>, AppError> {
        // O nome da tabela vem do enum, nunca do cliente.
        let sql = match role {
            Role::Staff => {
                r#"
                SELECT staff_id::int4 AS id, first_name || ' ' || last_name AS name
                FROM staff
                WHERE lower(email) = lower($1)
                ORDER BY staff_id
                LIMIT 1
                "#
            }
            Role::Customer => {
                r#"
                SELECT customer_id::int4 AS id, first_name || ' ' || last_name AS name
                FROM customer
                WHERE lower(email) = lower($1)
                ORDER BY customer_id
                LIMIT 1
                "#
            }
        };

        let identity = sqlx::query_as::<_, Identity>(sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(identity)
    }
}
