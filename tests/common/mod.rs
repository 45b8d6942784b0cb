// SPDX-License-Identifier: MIT

use meetsync_api::config::Config;
use meetsync_api::db::SupabaseDb;
use meetsync_api::routes::create_router;
use meetsync_api::services::StorageService;
use meetsync_api::AppState;
use std::sync::Arc;
use uuid::Uuid;

/// Create a mock database client (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> SupabaseDb {
    SupabaseDb::new_mock()
}

/// Create a test app with offline mock clients.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let storage = StorageService::new_mock();

    let state = Arc::new(AppState {
        config,
        db,
        storage,
    });

    (create_router(state.clone()), state)
}

/// Create a test session JWT.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, signing_key: &[u8]) -> String {
    meetsync_api::middleware::auth::create_jwt(user_id, signing_key)
        .expect("JWT creation should succeed")
}
