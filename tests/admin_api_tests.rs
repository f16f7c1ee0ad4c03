//! End-to-end tests for the admin API: login, token verification, lure
//! CRUD and account management.

mod common;

use actix_web::{App, test, web};
use serde_json::json;

use pagespy::api::middleware::AdminAuth;
use pagespy::api::services::admin::routes::admin_routes;
use pagespy::storage::AdminAccount;

macro_rules! admin_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.lure_service.clone()))
                .app_data(web::Data::new($ctx.view_service.clone()))
                .app_data(web::Data::new($ctx.admin_service.clone()))
                .app_data(web::Data::new($ctx.jwt.clone()))
                .service(
                    web::scope("/api/admin")
                        .wrap(AdminAuth::new($ctx.jwt.clone()))
                        .service(admin_routes()),
                ),
        )
        .await
    };
}

async fn make_admin(ctx: &common::TestContext) -> AdminAccount {
    ctx.admin_service
        .create_admin("Admin", "admin@example.com", "senha123")
        .await
        .unwrap()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_login_with_wrong_password_is_401() {
    let ctx = common::setup().await;
    make_admin(&ctx).await;
    let app = admin_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@example.com", "password": "errada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Credenciais inválidas" }));
}

#[actix_rt::test]
async fn test_login_with_unknown_email_is_401() {
    let ctx = common::setup().await;
    make_admin(&ctx).await;
    let app = admin_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "ghost@example.com", "password": "senha123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Credenciais inválidas");
}

#[actix_rt::test]
async fn test_login_then_verify_roundtrip() {
    let ctx = common::setup().await;
    let admin = make_admin(&ctx).await;
    let app = admin_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@example.com", "password": "senha123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["admin"]["id"], admin.id.as_str());
    assert_eq!(body["admin"]["name"], "Admin");
    assert_eq!(body["admin"]["email"], "admin@example.com");
    let token = body["token"].as_str().expect("token should be present");

    let req = test::TestRequest::get()
        .uri("/api/admin/verify")
        .insert_header(bearer(token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Admin verificado");
    assert_eq!(body["user"]["id"], admin.id.as_str());
    assert_eq!(body["user"]["email"], "admin@example.com");
    assert_eq!(body["user"]["role"], "admin");
}

#[actix_rt::test]
async fn test_admin_routes_require_token() {
    let ctx = common::setup().await;
    make_admin(&ctx).await;
    let app = admin_app!(ctx);

    let req = test::TestRequest::get().uri("/api/admin/page-spy").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Não autenticado"));

    let req = test::TestRequest::get()
        .uri("/api/admin/page-spy")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_lure_crud_over_http() {
    let ctx = common::setup().await;
    let admin = make_admin(&ctx).await;
    let token = ctx.jwt.generate_token(&admin).unwrap();
    let app = admin_app!(ctx);

    // Create
    let req = test::TestRequest::post()
        .uri("/api/admin/page-spy")
        .insert_header(bearer(&token))
        .set_json(json!({ "path": "/promo", "type": "TEXT", "textString": "oi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["type"], "TEXT");
    assert_eq!(body["data"]["textString"], "oi");
    let lure_id = body["data"]["id"].as_str().unwrap().to_string();

    // Duplicate path conflicts
    let req = test::TestRequest::post()
        .uri("/api/admin/page-spy")
        .insert_header(bearer(&token))
        .set_json(json!({ "path": "/promo", "type": "TEXT", "textString": "outro" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Missing content for the declared kind is rejected up front
    let req = test::TestRequest::post()
        .uri("/api/admin/page-spy")
        .insert_header(bearer(&token))
        .set_json(json!({ "path": "/vazio", "type": "TEXT" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // List carries view counts
    ctx.view_service
        .record_view(&lure_id, "203.0.113.1", "ua")
        .await
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/admin/page-spy")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let lures = body["data"].as_array().unwrap();
    assert_eq!(lures.len(), 1);
    assert_eq!(lures[0]["viewCount"], 1);

    // Detail includes the recorded views
    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/page-spy/{}", lure_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["views"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["views"][0]["ip"], "203.0.113.1");

    // Update
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/page-spy/{}", lure_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "path": "/promo2", "type": "TEXT", "textString": "novo" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["path"], "/promo2");

    // Unknown id is 404
    let req = test::TestRequest::get()
        .uri("/api/admin/page-spy/ghost")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/page-spy/{}", lure_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/admin/page-spy")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_account_management_over_http() {
    let ctx = common::setup().await;
    let admin = make_admin(&ctx).await;
    let token = ctx.jwt.generate_token(&admin).unwrap();
    let app = admin_app!(ctx);

    // Create a second account
    let req = test::TestRequest::post()
        .uri("/api/admin/accounts")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Backup", "email": "backup@example.com", "password": "outra123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let backup_id = body["data"]["id"].as_str().unwrap().to_string();
    // Hashes never leave the server
    assert!(body["data"].get("password").is_none());

    // Duplicate email conflicts
    let req = test::TestRequest::post()
        .uri("/api/admin/accounts")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Dup", "email": "backup@example.com", "password": "x1234" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // List both
    let req = test::TestRequest::get()
        .uri("/api/admin/accounts")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Delete the second
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/accounts/{}", backup_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // The last account is protected
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/accounts/{}", admin.id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_seed_first_admin_runs_once() {
    let ctx = common::setup().await;

    let seeded = ctx
        .admin_service
        .seed_first_admin("boot@example.com", Some("inicial123"))
        .await
        .unwrap();
    let seeded = seeded.expect("first seed should create an account");
    assert_eq!(seeded.email, "boot@example.com");

    // Credentials work
    let authed = ctx
        .admin_service
        .authenticate("boot@example.com", "inicial123")
        .await
        .unwrap();
    assert!(authed.is_some());

    // Second seed is a no-op
    let again = ctx
        .admin_service
        .seed_first_admin("boot@example.com", Some("inicial123"))
        .await
        .unwrap();
    assert!(again.is_none());

    // Seeding without an email configured does nothing
    let ctx2 = common::setup().await;
    let none = ctx2.admin_service.seed_first_admin("", None).await.unwrap();
    assert!(none.is_none());
}
