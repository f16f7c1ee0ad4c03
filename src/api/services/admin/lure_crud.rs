//! Admin API lure CRUD operations.

use std::sync::Arc;

use actix_web::{Responder, web};
use tracing::{info, trace};

use crate::services::{LureService, ViewService};

use super::helpers::{created_response, deleted_response, error_from_pagespy, success_response};
use super::types::{LureDetailResponse, LurePayload, LureResponse, ViewResponse};

/// GET /api/admin/page-spy — all lures with their view counts
pub async fn list_lures(lure_service: web::Data<Arc<LureService>>) -> impl Responder {
    trace!("Admin API: list lures");

    match lure_service.list_with_counts().await {
        Ok(lures) => {
            let data: Vec<LureResponse> = lures
                .into_iter()
                .map(|(lure, count)| LureResponse::from_lure(lure, Some(count)))
                .collect();
            success_response(data)
        }
        Err(e) => error_from_pagespy(&e),
    }
}

/// POST /api/admin/page-spy
pub async fn create_lure(
    payload: web::Json<LurePayload>,
    lure_service: web::Data<Arc<LureService>>,
) -> impl Responder {
    let payload = payload.into_inner();
    info!("Admin API: create lure request for path '{}'", payload.path);

    match lure_service.create_lure(payload.into_create_request()).await {
        Ok(lure) => created_response(LureResponse::from_lure(lure, Some(0))),
        Err(e) => error_from_pagespy(&e),
    }
}

/// GET /api/admin/page-spy/{id} — one lure plus its views, newest first
pub async fn get_lure(
    id: web::Path<String>,
    lure_service: web::Data<Arc<LureService>>,
    view_service: web::Data<Arc<ViewService>>,
) -> impl Responder {
    let lure = match lure_service.get_lure(&id).await {
        Ok(Some(lure)) => lure,
        Ok(None) => {
            return error_from_pagespy(&crate::errors::PageSpyError::not_found(format!(
                "Lure not found: {}",
                id
            )));
        }
        Err(e) => return error_from_pagespy(&e),
    };

    match view_service.list_by_lure(&lure.id).await {
        Ok(views) => {
            let view_count = views.len() as i64;
            let views: Vec<ViewResponse> = views.into_iter().map(ViewResponse::from).collect();
            success_response(LureDetailResponse {
                lure: LureResponse::from_lure(lure, Some(view_count)),
                views,
            })
        }
        Err(e) => error_from_pagespy(&e),
    }
}

/// PUT /api/admin/page-spy/{id}
pub async fn update_lure(
    id: web::Path<String>,
    payload: web::Json<LurePayload>,
    lure_service: web::Data<Arc<LureService>>,
) -> impl Responder {
    let payload = payload.into_inner();
    info!("Admin API: update lure {} (path '{}')", id, payload.path);

    match lure_service
        .update_lure(&id, payload.into_update_request())
        .await
    {
        Ok(lure) => success_response(LureResponse::from_lure(lure, None)),
        Err(e) => error_from_pagespy(&e),
    }
}

/// DELETE /api/admin/page-spy/{id} — views survive with a nulled reference
pub async fn delete_lure(
    id: web::Path<String>,
    lure_service: web::Data<Arc<LureService>>,
) -> impl Responder {
    info!("Admin API: delete lure {}", id);

    match lure_service.delete_lure(&id).await {
        Ok(()) => deleted_response(),
        Err(e) => error_from_pagespy(&e),
    }
}
