//! Bearer-token authentication for the admin API scope.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::jwt::{AdminClaims, JwtService, extract_bearer_token};

/// Login must pass through unauthenticated; everything else in the admin
/// scope requires a valid token.
const LOGIN_PATH: &str = "/api/admin/login";

/// Admin authentication middleware
#[derive(Clone)]
pub struct AdminAuth {
    jwt: Arc<JwtService>,
}

impl AdminAuth {
    pub fn new(jwt: Arc<JwtService>) -> Self {
        Self { jwt }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            jwt: Arc::clone(&self.jwt),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    jwt: Arc<JwtService>,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "error": "Não autenticado. Token inválido ou ausente."
                }))
                .map_into_right_body(),
        )
    }

    fn validate_request(req: &ServiceRequest, jwt: &JwtService) -> Option<AdminClaims> {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())?;
        let token = extract_bearer_token(header)?;

        match jwt.validate_token(token) {
            Ok(claims) => {
                trace!("Bearer token validation successful for {}", claims.email);
                Some(claims)
            }
            Err(e) => {
                info!("Bearer token validation failed: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let jwt = Arc::clone(&self.jwt);

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            if req.path() == LOGIN_PATH {
                trace!("Login endpoint accessed - bypassing authentication");
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            if let Some(claims) = Self::validate_request(&req, &jwt) {
                req.extensions_mut().insert(claims);
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            Ok(Self::handle_unauthorized(req))
        })
    }
}
