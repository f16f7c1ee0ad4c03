//! Admin account management endpoints.

use std::sync::Arc;

use actix_web::{Responder, web};
use tracing::info;

use crate::services::AdminService;

use super::helpers::{created_response, deleted_response, error_from_pagespy, success_response};
use super::types::{AdminSummary, CreateAccountRequest};

/// GET /api/admin/accounts — password hashes never leave the server
pub async fn list_accounts(admin_service: web::Data<Arc<AdminService>>) -> impl Responder {
    match admin_service.list_admins().await {
        Ok(accounts) => {
            let data: Vec<AdminSummary> =
                accounts.into_iter().map(AdminSummary::from).collect();
            success_response(data)
        }
        Err(e) => error_from_pagespy(&e),
    }
}

/// POST /api/admin/accounts
pub async fn create_account(
    body: web::Json<CreateAccountRequest>,
    admin_service: web::Data<Arc<AdminService>>,
) -> impl Responder {
    let body = body.into_inner();
    info!("Admin API: create account request for {}", body.email);

    match admin_service
        .create_admin(&body.name, &body.email, &body.password)
        .await
    {
        Ok(account) => created_response(AdminSummary::from(account)),
        Err(e) => error_from_pagespy(&e),
    }
}

/// DELETE /api/admin/accounts/{id} — the last account cannot be deleted
pub async fn delete_account(
    id: web::Path<String>,
    admin_service: web::Data<Arc<AdminService>>,
) -> impl Responder {
    info!("Admin API: delete account {}", id);

    match admin_service.delete_admin(&id).await {
        Ok(()) => deleted_response(),
        Err(e) => error_from_pagespy(&e),
    }
}
