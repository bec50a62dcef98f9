// src/models/auth.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppError;

// Quem pode fazer login: funcionário da loja ou cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Role::Staff),
            "customer" => Ok(Role::Customer),
            _ => Err(AppError::InvalidInput(
                "role must be 'staff' or 'customer'".to_string(),
            )),
        }
    }
}

// Linha devolvida pela busca por e-mail (staff ou customer)
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Identity {
    pub id: i32,
    pub name: String,
}

// Dados para login. Não há senha: o login é só uma checagem de identidade.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "mary.smith@sakilacustomer.org")]
    pub email: String,

    #[schema(example = "customer")]
    pub role: String,
}

/// Resultado do login. O `token` é um rótulo legível (`<role>-<id>`), sem assinatura nem expiração.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Session {
    #[schema(example = "customer-1")]
    pub token: String,
    pub role: Role,
    pub id: i32,
    #[schema(example = "Mary Smith")]
    pub name: String,
}

impl Session {
    pub fn new(role: Role, identity: Identity) -> Self {
        Self {
            token: format!("{}-{}", role, identity.id),
            role,
            id: identity.id,
            name: identity.name,
        }
    }
}
