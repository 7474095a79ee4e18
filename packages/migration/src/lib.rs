pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

mod m20251018_000001_create_inventory_items; // keep filename + module name in sync
mod m20251018_000002_add_name_and_supplier;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_inventory_items::Migration),
            Box::new(m20251018_000002_add_name_and_supplier::Migration),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an already-open connection.
/// Used by the CLI, the service startup path and tests.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = get_db_diagnostics(db).await?;

    tracing::info!("migrate=start cmd={command:?} backend={}", before.backend);
    tracing::info!("migrate=connected db={}", before.name);
    tracing::info!(
        "migrate=before defined={} applied={}",
        before.defined_migrations_count,
        before.applied_migrations_count
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let after = get_db_diagnostics(db).await?;
                tracing::info!(
                    "migrate=after defined={} applied={}",
                    after.defined_migrations_count,
                    after.applied_migrations_count
                );
            }
            tracing::info!("migrate=ok cmd={command:?} backend={}", before.backend);
            Ok(())
        }
        Err(e) => {
            tracing::error!("migrate=failed cmd={command:?} backend={}: {e}", before.backend);
            Err(e)
        }
    }
}

#[derive(Debug)]
struct DbDiagnostics {
    backend: String,
    name: String,
    applied_migrations_count: usize,
    defined_migrations_count: usize,
}

async fn get_db_diagnostics(db: &DatabaseConnection) -> Result<DbDiagnostics, DbErr> {
    let backend = format!("{:?}", db.get_database_backend());

    let name = match db.get_database_backend() {
        sea_orm_migration::sea_orm::DatabaseBackend::Postgres => {
            let stmt = Statement::from_string(
                db.get_database_backend(),
                String::from("select current_database() as name"),
            );
            match db.query_one(stmt).await? {
                Some(row) => row.try_get("", "name")?,
                None => "<unknown>".to_string(),
            }
        }
        sea_orm_migration::sea_orm::DatabaseBackend::Sqlite => {
            let stmt = Statement::from_string(
                db.get_database_backend(),
                String::from("SELECT file FROM pragma_database_list WHERE name = 'main'"),
            );
            match db.query_one(stmt).await? {
                Some(row) => match row.try_get::<String>("", "file") {
                    Ok(file) if file.is_empty() => ":memory:".to_string(),
                    Ok(file) => file,
                    Err(_) => "<unknown>".to_string(),
                },
                None => "<unknown>".to_string(),
            }
        }
        _ => "<unsupported>".to_string(),
    };

    Ok(DbDiagnostics {
        backend,
        name,
        applied_migrations_count: count_applied_migrations(db).await.unwrap_or(0),
        defined_migrations_count: Migrator::migrations().len(),
    })
}

/// Number of migrations recorded as applied.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Number of defined migrations not yet recorded as applied.
pub async fn count_pending_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    Ok(Migrator::get_pending_migrations(db).await?.len())
}

/// Name of the latest applied migration, or None when nothing has been applied
/// or the migration table doesn't exist.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    use super::*;

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.min_connections(1).max_connections(1);
        Database::connect(opt).await.expect("open sqlite memory db")
    }

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 2);
    }

    #[tokio::test]
    async fn test_up_applies_everything_and_is_idempotent() {
        let db = memory_db().await;

        migrate(&db, MigrationCommand::Up).await.unwrap();
        assert_eq!(count_applied_migrations(&db).await.unwrap(), 2);
        assert_eq!(count_pending_migrations(&db).await.unwrap(), 0);

        migrate(&db, MigrationCommand::Up).await.unwrap();
        assert_eq!(count_applied_migrations(&db).await.unwrap(), 2);

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("inventory_items").await.unwrap());
        assert!(manager.has_column("inventory_items", "supplier").await.unwrap());
    }

    #[tokio::test]
    async fn test_latest_version_before_and_after_up() {
        let db = memory_db().await;
        assert_eq!(get_latest_migration_version(&db).await.unwrap(), None);

        migrate(&db, MigrationCommand::Up).await.unwrap();
        assert_eq!(
            get_latest_migration_version(&db).await.unwrap().as_deref(),
            Some("m20251018_000002_add_name_and_supplier")
        );
    }

    #[tokio::test]
    async fn test_reset_drops_the_table() {
        let db = memory_db().await;
        migrate(&db, MigrationCommand::Up).await.unwrap();
        migrate(&db, MigrationCommand::Reset).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("inventory_items").await.unwrap());
        assert_eq!(count_applied_migrations(&db).await.unwrap(), 0);
    }
}
