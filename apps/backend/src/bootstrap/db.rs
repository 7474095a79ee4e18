use db_infra::{connect, sanitize_db_url, DbSettings, StartupPolicy};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::sequencer::{StartupReport, StartupSequencer};
use crate::error::AppError;
use crate::infra::schema::ensure_schema;

/// Connect to the configured store and provision its schema under the
/// bounded startup policy. Nothing is served until this returns `Ok`.
pub async fn bring_up_database(
    settings: &DbSettings,
    policy: StartupPolicy,
) -> Result<(DatabaseConnection, StartupReport), AppError> {
    info!(
        "startup=begin engine={} url={} max_attempts={} interval_ms={}",
        settings.kind.engine(),
        sanitize_db_url(&settings.url),
        policy.max_attempts,
        policy.retry_interval.as_millis()
    );

    StartupSequencer::new(policy)
        .run(
            move || async move { connect(settings).await.map_err(AppError::from) },
            |db| async move {
                let outcome = ensure_schema(&db).await.map_err(AppError::from)?;
                Ok((db, outcome))
            },
        )
        .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::infra::schema::SchemaOutcome;

    #[tokio::test]
    async fn test_memory_store_comes_up_on_first_attempt() {
        let (_db, report) = bring_up_database(
            &DbSettings::sqlite_memory(),
            StartupPolicy::new(3, Duration::from_millis(10)),
        )
        .await
        .unwrap();

        assert_eq!(report.attempts, 1);
        assert_eq!(report.schema, SchemaOutcome::Created);
    }

    #[tokio::test]
    async fn test_unreachable_file_store_is_fatal() {
        let settings =
            DbSettings::from_url("sqlite:///definitely/not/here/inventory.db?mode=rw").unwrap();

        let err = bring_up_database(&settings, StartupPolicy::new(2, Duration::from_millis(10)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DbUnavailable { .. }));
    }
}
