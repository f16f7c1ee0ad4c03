#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use pagespy::api::jwt::JwtService;
use pagespy::services::{AdminService, IpInfoProvider, LureService, ViewService};
use pagespy::storage::SeaOrmStorage;

pub const TEST_PRIVATE_KEY: &str = include_str!("../data/jwt_test_private.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../data/jwt_test_public.pem");

/// Everything a test needs, on a throwaway SQLite database.
pub struct TestContext {
    pub storage: Arc<SeaOrmStorage>,
    pub lure_service: Arc<LureService>,
    pub view_service: Arc<ViewService>,
    pub admin_service: Arc<AdminService>,
    pub jwt: Arc<JwtService>,
    pub ipinfo: Arc<IpInfoProvider>,
    // Held so the database file outlives the test
    _temp_dir: TempDir,
}

pub async fn setup() -> TestContext {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite://{}", db_path.display());

    let storage = Arc::new(
        SeaOrmStorage::new(&database_url)
            .await
            .expect("storage should initialize"),
    );

    TestContext {
        lure_service: Arc::new(LureService::new(storage.clone())),
        view_service: Arc::new(ViewService::new(storage.clone())),
        admin_service: Arc::new(AdminService::new(storage.clone())),
        jwt: Arc::new(JwtService::new(TEST_PRIVATE_KEY, TEST_PUBLIC_KEY, 7).expect("test keys")),
        ipinfo: Arc::new(IpInfoProvider::disabled()),
        storage,
        _temp_dir: temp_dir,
    }
}
