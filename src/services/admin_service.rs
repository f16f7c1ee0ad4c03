//! Admin account service
//!
//! Credential verification, account management and first-admin
//! bootstrapping.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{PageSpyError, Result};
use crate::storage::{AdminAccount, SeaOrmStorage};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::{generate_secure_token, ident};

pub struct AdminService {
    storage: Arc<SeaOrmStorage>,
}

impl AdminService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Verify credentials. `Ok(None)` covers both unknown email and wrong
    /// password so the caller answers with one uniform rejection.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<AdminAccount>> {
        let Some(account) = self.storage.get_admin_by_email(email).await? else {
            return Ok(None);
        };

        let valid = verify_password(password, &account.password_hash).map_err(|e| {
            PageSpyError::serialization(format!(
                "Stored password hash for {} is unreadable: {}",
                email, e
            ))
        })?;

        Ok(valid.then_some(account))
    }

    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AdminAccount> {
        if name.is_empty() {
            return Err(PageSpyError::validation("name is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(PageSpyError::validation(format!(
                "Invalid email: '{}'",
                email
            )));
        }
        if password.is_empty() {
            return Err(PageSpyError::validation("password is required"));
        }

        if self.storage.get_admin_by_email(email).await?.is_some() {
            return Err(PageSpyError::duplicate(format!(
                "An admin already exists with email '{}'",
                email
            )));
        }

        let password_hash = hash_password(password)
            .map_err(|e| PageSpyError::serialization(format!("Password hashing failed: {}", e)))?;

        let account = AdminAccount {
            id: ident::new_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            updated_at: chrono::Utc::now(),
        };

        self.storage.insert_admin(&account).await?;
        Ok(account)
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        self.storage.list_admins().await
    }

    /// Delete an admin account. The last remaining account cannot be
    /// deleted: that would lock everyone out of the panel.
    pub async fn delete_admin(&self, id: &str) -> Result<()> {
        if self.storage.get_admin(id).await?.is_none() {
            return Err(PageSpyError::not_found(format!("Admin not found: {}", id)));
        }

        if self.storage.count_admins().await? <= 1 {
            return Err(PageSpyError::validation(
                "Cannot delete the last admin account",
            ));
        }

        self.storage.delete_admin(id).await
    }

    /// Bootstrap the first admin account at startup.
    ///
    /// No-op when any admin already exists. Without a configured password a
    /// random one is generated and logged once.
    pub async fn seed_first_admin(
        &self,
        email: &str,
        password: Option<&str>,
    ) -> Result<Option<AdminAccount>> {
        if self.storage.count_admins().await? > 0 {
            return Ok(None);
        }
        if email.is_empty() {
            return Ok(None);
        }

        let generated;
        let password = match password.filter(|p| !p.is_empty()) {
            Some(p) => p,
            None => {
                generated = generate_secure_token(16);
                warn!(
                    "No first admin password configured, generated one: {}",
                    generated
                );
                &generated
            }
        };

        info!("Creating the first admin with email: {}", email);
        let account = self.create_admin("Admin", email, password).await?;
        Ok(Some(account))
    }
}
