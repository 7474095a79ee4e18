//! Idempotent schema provisioning for the inventory table.

use migration::{count_pending_migrations, Migrator, MigratorTrait, SchemaManager};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};
use tracing::{info, warn};

use crate::entities::inventory_items;

/// Result of a provisioning pass that did not hit a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Table was missing and has been created from the entity definition.
    Created,
    /// Table present and every migration already applied.
    UpToDate,
    /// Table present; `applied` pending migrations were run.
    Upgraded { applied: usize },
    /// Table present but the upgrade errored. The service keeps running on
    /// the existing schema.
    UpgradeFailed { detail: String },
}

/// Make sure `inventory_items` exists and is current.
///
/// Only the existence check and the table creation can return `Err`; a
/// failing upgrade is reported as [`SchemaOutcome::UpgradeFailed`].
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<SchemaOutcome, DbErr> {
    let manager = SchemaManager::new(db);

    if !manager.has_table(inventory_items::TABLE).await? {
        let backend = db.get_database_backend();
        let stmt = Schema::new(backend).create_table_from_entity(inventory_items::Entity);
        db.execute(backend.build(&stmt)).await?;
        info!("schema=created table={}", inventory_items::TABLE);
        return Ok(SchemaOutcome::Created);
    }

    let pending = match count_pending_migrations(db).await {
        Ok(pending) => pending,
        Err(e) => return Ok(upgrade_failed(e)),
    };
    if pending == 0 {
        info!("schema=up_to_date table={}", inventory_items::TABLE);
        return Ok(SchemaOutcome::UpToDate);
    }

    match Migrator::up(db, None).await {
        Ok(()) => {
            info!("schema=upgraded table={} applied={pending}", inventory_items::TABLE);
            Ok(SchemaOutcome::Upgraded { applied: pending })
        }
        Err(e) => Ok(upgrade_failed(e)),
    }
}

fn upgrade_failed(e: DbErr) -> SchemaOutcome {
    warn!("schema=upgrade_failed table={} error={e}", inventory_items::TABLE);
    SchemaOutcome::UpgradeFailed {
        detail: e.to_string(),
    }
}
