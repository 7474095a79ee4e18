use db_infra::{DbSettings, StartupPolicy};
use sea_orm::DatabaseConnection;

use crate::bootstrap::{bring_up_database, StartupReport};
use crate::error::AppError;
use crate::state::app_state::AppState;

enum DbSource {
    None,
    Settings(DbSettings),
    Connection(DatabaseConnection),
}

/// Builder for `AppState`, shared by `main` and the integration tests.
pub struct StateBuilder {
    db: DbSource,
    policy: StartupPolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db: DbSource::None,
            policy: StartupPolicy::default(),
        }
    }

    /// Connect through the startup sequencer using these settings.
    pub fn with_db(mut self, settings: DbSettings) -> Self {
        self.db = DbSource::Settings(settings);
        self
    }

    /// Use an already-open connection; no startup sequence runs.
    pub fn with_connection(mut self, db: DatabaseConnection) -> Self {
        self.db = DbSource::Connection(db);
        self
    }

    pub fn with_startup_policy(mut self, policy: StartupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let (state, _) = self.build_with_report().await?;
        Ok(state)
    }

    /// Like [`build`](Self::build), also returning the startup report when a
    /// startup sequence ran.
    pub async fn build_with_report(self) -> Result<(AppState, Option<StartupReport>), AppError> {
        match self.db {
            DbSource::None => Ok((AppState::without_db(), None)),
            DbSource::Connection(db) => Ok((AppState::new(db), None)),
            DbSource::Settings(settings) => {
                let (db, report) = bring_up_database(&settings, self.policy).await?;
                Ok((AppState::new(db), Some(report)))
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
