//! Admin authentication endpoints.

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{error, info};

use crate::api::jwt::{AdminClaims, JwtService};
use crate::services::AdminService;

use super::helpers::error_response;
use super::types::{AdminSummary, LoginRequest};

/// POST /api/admin/login
///
/// Unknown email and wrong password answer the same rejection.
pub async fn login(
    body: web::Json<LoginRequest>,
    admin_service: web::Data<Arc<AdminService>>,
    jwt: web::Data<Arc<JwtService>>,
) -> impl Responder {
    let body = body.into_inner();

    let account = match admin_service.authenticate(&body.email, &body.password).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            info!("Admin API: login rejected for {}", body.email);
            return error_response(
                actix_web::http::StatusCode::UNAUTHORIZED,
                "Credenciais inválidas",
            );
        }
        Err(e) => {
            error!("Admin API: login error for {}: {}", body.email, e);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao fazer login",
            );
        }
    };

    let token = match jwt.generate_token(&account) {
        Ok(token) => token,
        Err(e) => {
            error!("Admin API: token generation failed: {}", e);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao fazer login",
            );
        }
    };

    info!("Admin API: login successful for {}", account.email);

    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(json!({
            "success": true,
            "token": token,
            "admin": AdminSummary::from(account),
        }))
}

/// GET /api/admin/verify
///
/// Reaching this handler means the auth middleware accepted the token; the
/// claims it validated are echoed back.
pub async fn verify(req: HttpRequest) -> impl Responder {
    let claims = req.extensions().get::<AdminClaims>().cloned();

    match claims {
        Some(claims) => HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(json!({
                "message": "Admin verificado",
                "user": {
                    "id": claims.sub,
                    "email": claims.email,
                    "role": claims.role,
                },
            })),
        None => error_response(
            actix_web::http::StatusCode::UNAUTHORIZED,
            "Não autenticado. Token inválido ou ausente.",
        ),
    }
}
