//! Lure registry database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::{error, info};

use super::SeaOrmStorage;
use super::converters::{lure_model_to_domain, lure_to_active_model};
use super::retry;
use crate::errors::{PageSpyError, Result};
use crate::storage::models::Lure;

use migration::entities::lure;

impl SeaOrmStorage {
    /// Insert a new lure. A path collision surfaces as `Duplicate`.
    pub async fn insert_lure(&self, new: &Lure) -> Result<()> {
        let active = lure_to_active_model(new);
        lure::Entity::insert(active)
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        info!("Lure created: {} -> {}", new.path, new.id);
        Ok(())
    }

    pub async fn get_lure(&self, id: &str) -> Result<Option<Lure>> {
        let db = self.get_db();
        let id_owned = id.to_string();

        let model = retry::with_retry(
            &format!("get_lure({})", id),
            self.retry_config(),
            || async { lure::Entity::find_by_id(&id_owned).one(db).await },
        )
        .await
        .map_err(PageSpyError::from)?;

        model.map(lure_model_to_domain).transpose()
    }

    /// Exact path lookup. No normalization: the stored path must match the
    /// request path byte for byte.
    pub async fn get_lure_by_path(&self, path: &str) -> Result<Option<Lure>> {
        let db = self.get_db();
        let path_owned = path.to_string();

        let model = retry::with_retry(
            &format!("get_lure_by_path({})", path),
            self.retry_config(),
            || async {
                lure::Entity::find()
                    .filter(lure::Column::Path.eq(&path_owned))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(PageSpyError::from)?;

        model.map(lure_model_to_domain).transpose()
    }

    /// Full update of an existing lure. `NotFound` when the id is unknown.
    pub async fn update_lure(&self, updated: &Lure) -> Result<()> {
        let active = lure_to_active_model(updated);

        match active.update(self.get_db()).await {
            Ok(_) => {
                info!("Lure updated: {}", updated.id);
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => Err(PageSpyError::not_found(format!(
                "Lure not found: {}",
                updated.id
            ))),
            Err(e) => {
                error!("Failed to update lure {}: {}", updated.id, e);
                Err(PageSpyError::from(e))
            }
        }
    }

    /// Delete a lure. Its views survive with a nulled lure reference.
    pub async fn delete_lure(&self, id: &str) -> Result<()> {
        let result = lure::Entity::delete_by_id(id)
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        if result.rows_affected == 0 {
            return Err(PageSpyError::not_found(format!("Lure not found: {}", id)));
        }

        info!("Lure deleted: {}", id);
        Ok(())
    }

    /// All lures, newest first.
    pub async fn list_lures(&self) -> Result<Vec<Lure>> {
        let models = lure::Entity::find()
            .order_by_desc(lure::Column::CreatedAt)
            .all(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        models.into_iter().map(lure_model_to_domain).collect()
    }
}
