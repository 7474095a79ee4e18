//! SeaORM -> DomainError translation.
//!
//! Adapters surface `sea_orm::DbErr`; repositories convert through
//! `From<DbErr> for DomainError`, and handlers get `AppError` from there.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_timeout(msg: &str) -> bool {
    let lower = msg.to_ascii_lowercase();
    lower.contains("timed out") || lower.contains("timeout")
}

/// Translate a `DbErr` into a `DomainError` with a client-safe detail.
/// The raw driver message is only logged.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found")
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            if mentions_timeout(&error_msg) {
                warn!(trace_id = %trace_id, raw_error = %error_msg, "db_error=timeout");
                DomainError::infra(InfraErrorKind::Timeout, "Database timeout")
            } else {
                warn!(trace_id = %trace_id, raw_error = %error_msg, "db_error=unavailable");
                DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
            }
        }
        _ if mentions_timeout(&error_msg) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "db_error=timeout");
            DomainError::infra(InfraErrorKind::Timeout, "Database timeout")
        }
        _ => {
            error!(trace_id = %trace_id, raw_error = %error_msg, "db_error=unhandled");
            DomainError::infra(
                InfraErrorKind::Other("DbErr".into()),
                "Database operation failed",
            )
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let mapped = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert_eq!(
            mapped,
            DomainError::infra(InfraErrorKind::Timeout, "Database timeout")
        );
    }

    #[test]
    fn test_closed_pool_maps_to_unavailable() {
        let mapped = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed));
        assert_eq!(
            mapped,
            DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
        );
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let mapped = map_db_err(DbErr::RecordNotFound("inventory_items".into()));
        assert!(mapped.is_not_found());
    }

    #[test]
    fn test_other_errors_hide_driver_text() {
        let mapped = map_db_err(DbErr::Exec(RuntimeErr::Internal(
            "syntax error near \"SELCT\"".into(),
        )));
        match mapped {
            DomainError::Infra(InfraErrorKind::Other(_), detail) => {
                assert_eq!(detail, "Database operation failed");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
