//! Admin API route configuration.

use actix_web::web;

use super::accounts::{create_account, delete_account, list_accounts};
use super::auth::{login, verify};
use super::lure_crud::{create_lure, delete_lure, get_lure, list_lures, update_lure};

/// Admin routes, mounted under `/api/admin` behind the auth middleware
/// (login is let through by the middleware itself).
pub fn admin_routes() -> actix_web::Scope {
    web::scope("")
        .route("/login", web::post().to(login))
        .route("/verify", web::get().to(verify))
        .route("/page-spy", web::get().to(list_lures))
        .route("/page-spy", web::post().to(create_lure))
        .route("/page-spy/{id}", web::get().to(get_lure))
        .route("/page-spy/{id}", web::put().to(update_lure))
        .route("/page-spy/{id}", web::delete().to(delete_lure))
        .route("/accounts", web::get().to(list_accounts))
        .route("/accounts", web::post().to(create_account))
        .route("/accounts/{id}", web::delete().to(delete_account))
}
