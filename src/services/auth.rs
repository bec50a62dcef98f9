// src/services/auth.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::IdentityStore,
    models::auth::{Role, Session},
};

#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Confere se existe um funcionário/cliente com esse e-mail.
    /// O papel é validado antes de qualquer acesso ao banco.
    pub async fn check_identity(&self, email: &str, role: &str) -> Result<Session, AppError> {
        let role: Role = role.parse()?;

        let identity = self
            .store
            .find_by_email(role, email)
            .await?
            .ok_or_else(|| AppError::NotAuthorized(format!("{role} not found")))?;

        tracing::info!(%role, id = identity.id, "login aceito");
        Ok(Session::new(role, identity))
    }
}
