//! Lure registry behavior: exact-path resolution, CRUD, validation and
//! duplicate handling.

mod common;

use pagespy::errors::PageSpyError;
use pagespy::services::{CreateLureRequest, UpdateLureRequest};
use pagespy::storage::{LureContent, LureKind};

fn text_request(path: &str, text: &str) -> CreateLureRequest {
    CreateLureRequest {
        path: path.to_string(),
        kind: LureKind::Text,
        text_string: Some(text.to_string()),
        file_base64: None,
    }
}

fn image_request(path: &str) -> CreateLureRequest {
    CreateLureRequest {
        path: path.to_string(),
        kind: LureKind::Image,
        text_string: None,
        file_base64: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
    }
}

#[actix_rt::test]
async fn test_created_lure_resolves_by_path() {
    let ctx = common::setup().await;

    let created = ctx
        .lure_service
        .create_lure(text_request("/promo", "oi"))
        .await
        .unwrap();

    let found = ctx.lure_service.find_by_path("/promo").await.unwrap();
    let found = found.expect("lure should resolve");
    assert_eq!(found.id, created.id);
    assert_eq!(found.content, LureContent::Text("oi".to_string()));
}

#[actix_rt::test]
async fn test_unknown_path_resolves_to_none() {
    let ctx = common::setup().await;
    assert!(ctx.lure_service.find_by_path("/nope").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_path_match_is_exact() {
    let ctx = common::setup().await;
    ctx.lure_service
        .create_lure(text_request("/a", "x"))
        .await
        .unwrap();

    // No trailing-slash normalization, no prefix matching
    assert!(ctx.lure_service.find_by_path("/a/").await.unwrap().is_none());
    assert!(ctx.lure_service.find_by_path("/A").await.unwrap().is_none());
    assert!(ctx.lure_service.find_by_path("/a/b").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_duplicate_path_rejected_and_original_unchanged() {
    let ctx = common::setup().await;
    ctx.lure_service
        .create_lure(text_request("/dup", "first"))
        .await
        .unwrap();

    let err = ctx
        .lure_service
        .create_lure(text_request("/dup", "second"))
        .await
        .unwrap_err();
    assert!(matches!(err, PageSpyError::Duplicate(_)));

    let found = ctx.lure_service.find_by_path("/dup").await.unwrap().unwrap();
    assert_eq!(found.content, LureContent::Text("first".to_string()));
}

#[actix_rt::test]
async fn test_text_lure_requires_text_content() {
    let ctx = common::setup().await;

    let err = ctx
        .lure_service
        .create_lure(CreateLureRequest {
            path: "/missing".to_string(),
            kind: LureKind::Text,
            text_string: None,
            file_base64: Some("data:image/png;base64,AAAA".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PageSpyError::Validation(_)));

    // Nothing was stored
    assert!(ctx.lure_service.find_by_path("/missing").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_image_lure_requires_image_content() {
    let ctx = common::setup().await;

    let err = ctx
        .lure_service
        .create_lure(CreateLureRequest {
            path: "/img".to_string(),
            kind: LureKind::Image,
            text_string: Some("not an image".to_string()),
            file_base64: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PageSpyError::Validation(_)));
}

#[actix_rt::test]
async fn test_invalid_paths_rejected() {
    let ctx = common::setup().await;

    for path in ["no-slash", "/", "", "/with space"] {
        let err = ctx
            .lure_service
            .create_lure(text_request(path, "x"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, PageSpyError::Validation(_)),
            "path '{}' should be rejected",
            path
        );
    }
}

#[actix_rt::test]
async fn test_update_replaces_content_and_kind() {
    let ctx = common::setup().await;
    let created = ctx
        .lure_service
        .create_lure(text_request("/switch", "text"))
        .await
        .unwrap();

    let updated = ctx
        .lure_service
        .update_lure(
            &created.id,
            UpdateLureRequest {
                path: "/switch".to_string(),
                kind: LureKind::Image,
                text_string: None,
                file_base64: Some("data:image/png;base64,AAAA".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.content.kind(), LureKind::Image);
    assert_eq!(updated.created_at, created.created_at);
}

#[actix_rt::test]
async fn test_update_unknown_id_fails() {
    let ctx = common::setup().await;
    let err = ctx
        .lure_service
        .update_lure(
            "does-not-exist",
            UpdateLureRequest {
                path: "/x".to_string(),
                kind: LureKind::Text,
                text_string: Some("x".to_string()),
                file_base64: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PageSpyError::NotFound(_)));
}

#[actix_rt::test]
async fn test_update_to_taken_path_conflicts() {
    let ctx = common::setup().await;
    ctx.lure_service
        .create_lure(text_request("/taken", "a"))
        .await
        .unwrap();
    let other = ctx
        .lure_service
        .create_lure(text_request("/other", "b"))
        .await
        .unwrap();

    let err = ctx
        .lure_service
        .update_lure(
            &other.id,
            UpdateLureRequest {
                path: "/taken".to_string(),
                kind: LureKind::Text,
                text_string: Some("b".to_string()),
                file_base64: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PageSpyError::Duplicate(_)));
}

#[actix_rt::test]
async fn test_delete_removes_lure() {
    let ctx = common::setup().await;
    let created = ctx
        .lure_service
        .create_lure(image_request("/gone"))
        .await
        .unwrap();

    ctx.lure_service.delete_lure(&created.id).await.unwrap();
    assert!(ctx.lure_service.find_by_path("/gone").await.unwrap().is_none());

    let err = ctx.lure_service.delete_lure(&created.id).await.unwrap_err();
    assert!(matches!(err, PageSpyError::NotFound(_)));
}

#[actix_rt::test]
async fn test_delete_orphans_views_softly() {
    let ctx = common::setup().await;
    let lure = ctx
        .lure_service
        .create_lure(text_request("/orphan", "x"))
        .await
        .unwrap();

    let view_id = ctx
        .view_service
        .record_view(&lure.id, "203.0.113.1", "UA")
        .await
        .unwrap();

    ctx.lure_service.delete_lure(&lure.id).await.unwrap();

    // The view survives with a nulled lure reference and intact data
    let view = ctx.view_service.get_view(&view_id).await.unwrap().unwrap();
    assert_eq!(view.lure_id, None);
    assert_eq!(view.ip, "203.0.113.1");
}

#[actix_rt::test]
async fn test_list_with_counts() {
    let ctx = common::setup().await;
    let busy = ctx
        .lure_service
        .create_lure(text_request("/busy", "x"))
        .await
        .unwrap();
    let quiet = ctx
        .lure_service
        .create_lure(text_request("/quiet", "y"))
        .await
        .unwrap();

    for _ in 0..3 {
        ctx.view_service
            .record_view(&busy.id, "203.0.113.1", "UA")
            .await
            .unwrap();
    }

    let listed = ctx.lure_service.list_with_counts().await.unwrap();
    assert_eq!(listed.len(), 2);

    let count_of = |id: &str| {
        listed
            .iter()
            .find(|(lure, _)| lure.id == id)
            .map(|(_, count)| *count)
            .unwrap()
    };
    assert_eq!(count_of(&busy.id), 3);
    assert_eq!(count_of(&quiet.id), 0);
}
