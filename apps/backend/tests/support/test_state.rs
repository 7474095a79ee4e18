use std::time::Duration;

use db_infra::{DbSettings, StartupPolicy};
use inventory_service::{build_state, AppError, AppState};

/// Fresh private in-memory SQLite store, brought up through the real startup
/// sequence so the schema is provisioned exactly as in production.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbSettings::sqlite_memory())
        .with_startup_policy(StartupPolicy::new(1, Duration::from_millis(10)))
        .build()
        .await
}

/// State without any store, for exercising the 503 path.
pub async fn build_test_state_without_db() -> AppState {
    AppState::without_db()
}
