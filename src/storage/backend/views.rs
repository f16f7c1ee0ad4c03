//! View ledger database operations.
//!
//! `set_view_location` / `set_view_photo` are conditional writes: the
//! UPDATE only matches while the column is still NULL, so the first
//! successful callback wins even under concurrent duplicates.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, ExprTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};

use super::SeaOrmStorage;
use super::converters::{view_model_to_domain, view_to_active_model};
use super::retry;
use crate::errors::{PageSpyError, Result};
use crate::storage::models::LureView;

use migration::entities::lure_view;

#[derive(Debug, FromQueryResult)]
struct ViewCountRow {
    lure_id: Option<String>,
    count: i64,
}

impl SeaOrmStorage {
    pub async fn insert_view(&self, view: &LureView) -> Result<()> {
        let active = view_to_active_model(view);
        lure_view::Entity::insert(active)
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;
        Ok(())
    }

    pub async fn get_view(&self, id: &str) -> Result<Option<LureView>> {
        let db = self.get_db();
        let id_owned = id.to_string();

        let model = retry::with_retry(
            &format!("get_view({})", id),
            self.retry_config(),
            || async { lure_view::Entity::find_by_id(&id_owned).one(db).await },
        )
        .await
        .map_err(PageSpyError::from)?;

        Ok(model.map(view_model_to_domain))
    }

    /// Write `location` only if it is still unset. Returns the number of
    /// rows changed: 0 means the field was already frozen (or the id is
    /// unknown — callers distinguish via `get_view`).
    pub async fn set_view_location(&self, id: &str, location: &str) -> Result<u64> {
        let result = lure_view::Entity::update_many()
            .col_expr(
                lure_view::Column::Location,
                Expr::value(location.to_string()),
            )
            .filter(lure_view::Column::Id.eq(id))
            .filter(lure_view::Column::Location.is_null())
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(result.rows_affected)
    }

    /// Same first-write-wins contract as `set_view_location`, over `photo`.
    pub async fn set_view_photo(&self, id: &str, photo: &str) -> Result<u64> {
        let result = lure_view::Entity::update_many()
            .col_expr(lure_view::Column::Photo, Expr::value(photo.to_string()))
            .filter(lure_view::Column::Id.eq(id))
            .filter(lure_view::Column::Photo.is_null())
            .exec(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(result.rows_affected)
    }

    /// Views of one lure, newest first. The v7 id doubles as the ordering
    /// key: descending id == descending creation time.
    pub async fn list_views_by_lure(&self, lure_id: &str) -> Result<Vec<LureView>> {
        let models = lure_view::Entity::find()
            .filter(lure_view::Column::LureId.eq(lure_id))
            .order_by_desc(lure_view::Column::Id)
            .all(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(models.into_iter().map(view_model_to_domain).collect())
    }

    /// View counts grouped by lure, one query for the whole admin listing.
    pub async fn count_views_per_lure(&self) -> Result<HashMap<String, i64>> {
        let rows = lure_view::Entity::find()
            .select_only()
            .column(lure_view::Column::LureId)
            .column_as(Expr::col(lure_view::Column::Id).count(), "count")
            .group_by(lure_view::Column::LureId)
            .into_model::<ViewCountRow>()
            .all(self.get_db())
            .await
            .map_err(PageSpyError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.lure_id.map(|id| (id, row.count)))
            .collect())
    }
}
