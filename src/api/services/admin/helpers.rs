//! Admin API response helpers.
//!
//! The wire envelope is `{"success": true, ...}` on success and
//! `{"error": "<message>"}` on failure.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::errors::PageSpyError;

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "success": true, "data": data }))
}

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "success": true, "data": data }))
}

pub fn deleted_response() -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "success": true }))
}

pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({ "error": message }))
}

/// Map a service error onto the wire. Internal failures are logged and
/// answered with a generic message, nothing else leaks.
pub fn error_from_pagespy(err: &PageSpyError) -> HttpResponse {
    let status = err.http_status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Admin API internal error: {}", err);
        return error_response(status, "Erro interno do servidor");
    }
    error_response(status, err.message())
}
