//! Admin account database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{admin_model_to_domain, admin_to_active_model};
use crate::errors::{PageSpyError, Result};
use crate::storage::models::AdminAccount;

use migration::entities::admin;

impl SeaOrmStorage {
    /// Insert a new admin. An email collision surfaces as `Duplicate`.
    pub async fn insert_admin(&self, account: &AdminAccount) -> Result<()> {
        let active = admin_to_active_model(account);
        admin::Entity::insert(active)
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        info!("Admin created: {}", account.email);
        Ok(())
    }

    pub async fn get_admin(&self, id: &str) -> Result<Option<AdminAccount>> {
        let model = admin::Entity::find_by_id(id)
            .one(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(model.map(admin_model_to_domain))
    }

    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(model.map(admin_model_to_domain))
    }

    pub async fn list_admins(&self) -> Result<Vec<AdminAccount>> {
        let models = admin::Entity::find()
            .order_by_asc(admin::Column::Email)
            .all(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(models.into_iter().map(admin_model_to_domain).collect())
    }

    pub async fn delete_admin(&self, id: &str) -> Result<()> {
        let result = admin::Entity::delete_by_id(id)
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        if result.rows_affected == 0 {
            return Err(PageSpyError::not_found(format!("Admin not found: {}", id)));
        }

        info!("Admin deleted: {}", id);
        Ok(())
    }

    pub async fn count_admins(&self) -> Result<u64> {
        admin::Entity::find()
            .count(self.get_db())
            .await
            .map_err(PageSpyError::from)
    }
}
