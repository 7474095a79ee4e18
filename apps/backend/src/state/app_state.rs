use sea_orm::DatabaseConnection;

/// Shared handler state, injected through `web::Data<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store handle; absent only in tests that exercise the unavailable path.
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    pub fn without_db() -> Self {
        Self { db: None }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
