//! Lure registry service
//!
//! Business logic for lure management, shared by the admin API and the
//! public page handler. Content presence is validated against the declared
//! kind before anything touches storage.

use std::sync::Arc;

use tracing::info;

use crate::errors::{PageSpyError, Result};
use crate::storage::{Lure, LureContent, LureKind, SeaOrmStorage};
use crate::utils::{ident, is_valid_lure_path};

/// Request to create a new lure
#[derive(Debug, Clone)]
pub struct CreateLureRequest {
    pub path: String,
    pub kind: LureKind,
    /// Present iff kind is TEXT
    pub text_string: Option<String>,
    /// Present iff kind is IMAGE (data URI)
    pub file_base64: Option<String>,
}

/// Request to update an existing lure
#[derive(Debug, Clone)]
pub struct UpdateLureRequest {
    pub path: String,
    pub kind: LureKind,
    pub text_string: Option<String>,
    pub file_base64: Option<String>,
}

/// Service for lure management operations
pub struct LureService {
    storage: Arc<SeaOrmStorage>,
}

impl LureService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Assemble `LureContent` from the wire fields, rejecting a missing or
    /// empty payload for the declared kind.
    fn build_content(
        kind: LureKind,
        text_string: Option<String>,
        file_base64: Option<String>,
    ) -> Result<LureContent> {
        match kind {
            LureKind::Text => match text_string.filter(|s| !s.is_empty()) {
                Some(text) => Ok(LureContent::Text(text)),
                None => Err(PageSpyError::validation(
                    "textString is required for TEXT lures",
                )),
            },
            LureKind::Image => match file_base64.filter(|s| !s.is_empty()) {
                Some(image) => Ok(LureContent::Image(image)),
                None => Err(PageSpyError::validation(
                    "fileBase64 is required for IMAGE lures",
                )),
            },
        }
    }

    fn validate_path(path: &str) -> Result<()> {
        if !is_valid_lure_path(path) {
            return Err(PageSpyError::validation(format!(
                "Invalid lure path '{}'. Paths must start with '/', be longer than '/', and contain no whitespace.",
                path
            )));
        }
        Ok(())
    }

    /// Resolve a request path to its lure. Exact string match only.
    pub async fn find_by_path(&self, path: &str) -> Result<Option<Lure>> {
        self.storage.get_lure_by_path(path).await
    }

    pub async fn get_lure(&self, id: &str) -> Result<Option<Lure>> {
        self.storage.get_lure(id).await
    }

    /// All lures with their view counts, newest first.
    pub async fn list_with_counts(&self) -> Result<Vec<(Lure, i64)>> {
        let lures = self.storage.list_lures().await?;
        let mut counts = self.storage.count_views_per_lure().await?;

        Ok(lures
            .into_iter()
            .map(|lure| {
                let count = counts.remove(&lure.id).unwrap_or(0);
                (lure, count)
            })
            .collect())
    }

    pub async fn create_lure(&self, req: CreateLureRequest) -> Result<Lure> {
        Self::validate_path(&req.path)?;
        let content = Self::build_content(req.kind, req.text_string, req.file_base64)?;

        // Pre-check for a friendlier message; the unique index still backs
        // this up under concurrent creates.
        if self.storage.get_lure_by_path(&req.path).await?.is_some() {
            return Err(PageSpyError::duplicate(format!(
                "A lure already exists for path '{}'",
                req.path
            )));
        }

        let lure = Lure {
            id: ident::new_id(),
            path: req.path,
            content,
            created_at: chrono::Utc::now(),
        };

        self.storage.insert_lure(&lure).await?;
        info!("LureService: created {} lure at '{}'", lure.content.kind(), lure.path);
        Ok(lure)
    }

    pub async fn update_lure(&self, id: &str, req: UpdateLureRequest) -> Result<Lure> {
        Self::validate_path(&req.path)?;
        let content = Self::build_content(req.kind, req.text_string, req.file_base64)?;

        let existing = self
            .storage
            .get_lure(id)
            .await?
            .ok_or_else(|| PageSpyError::not_found(format!("Lure not found: {}", id)))?;

        // Moving to another lure's path is a conflict
        if req.path != existing.path {
            if let Some(other) = self.storage.get_lure_by_path(&req.path).await?
                && other.id != existing.id
            {
                return Err(PageSpyError::duplicate(format!(
                    "A lure already exists for path '{}'",
                    req.path
                )));
            }
        }

        let updated = Lure {
            id: existing.id,
            path: req.path,
            content,
            created_at: existing.created_at,
        };

        self.storage.update_lure(&updated).await?;
        info!("LureService: updated lure {}", updated.id);
        Ok(updated)
    }

    /// Delete a lure. Historical views are kept with a nulled reference.
    pub async fn delete_lure(&self, id: &str) -> Result<()> {
        self.storage.delete_lure(id).await?;
        info!("LureService: deleted lure {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_content_text_ok() {
        let content =
            LureService::build_content(LureKind::Text, Some("hi".to_string()), None).unwrap();
        assert_eq!(content, LureContent::Text("hi".to_string()));
    }

    #[test]
    fn test_build_content_text_missing() {
        assert!(LureService::build_content(LureKind::Text, None, None).is_err());
        assert!(LureService::build_content(LureKind::Text, Some(String::new()), None).is_err());
    }

    #[test]
    fn test_build_content_image_requires_file() {
        assert!(LureService::build_content(LureKind::Image, Some("txt".to_string()), None).is_err());
        let content = LureService::build_content(
            LureKind::Image,
            None,
            Some("data:image/png;base64,AAAA".to_string()),
        )
        .unwrap();
        assert_eq!(content.kind(), LureKind::Image);
    }

    #[test]
    fn test_validate_path() {
        assert!(LureService::validate_path("/ok").is_ok());
        assert!(LureService::validate_path("no-slash").is_err());
        assert!(LureService::validate_path("/").is_err());
    }
}
