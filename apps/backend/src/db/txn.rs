use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Run `f` inside one store transaction: commit on `Ok`, roll back on `Err`.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(
        &'t DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, AppError>> + 't>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; the original error wins.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use db_infra::{connect, DbSettings};

    use super::*;
    use crate::infra::schema::ensure_schema;
    use crate::repos::inventory_items::{self, NewInventoryItem};

    async fn state() -> AppState {
        let db = connect(&DbSettings::sqlite_memory()).await.unwrap();
        ensure_schema(&db).await.unwrap();
        AppState::new(db)
    }

    fn item(article_number: &str) -> NewInventoryItem {
        NewInventoryItem {
            article_number: article_number.to_string(),
            quantity: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ok_commits() {
        let state = state().await;

        with_txn(&state, |txn| {
            Box::pin(async move {
                inventory_items::create(txn, item("TX-1")).await?;
                Ok::<_, AppError>(())
            })
        })
        .await
        .unwrap();

        let db = require_db(&state).unwrap();
        assert!(inventory_items::find_by_article_number(db, "TX-1")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_err_rolls_back() {
        let state = state().await;

        let err = with_txn(&state, |txn| {
            Box::pin(async move {
                inventory_items::create(txn, item("TX-2")).await?;
                Err::<(), _>(AppError::internal("abort"))
            })
        })
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));

        let db = require_db(&state).unwrap();
        assert!(inventory_items::find_by_article_number(db, "TX-2")
            .await
            .unwrap()
            .is_none());
    }
}
