//! Bounded startup sequence: reach the store, provision the schema, then
//! hand the connection to the HTTP layer.
//!
//! The sequence is an explicit state machine over [`StartupPhase`]. Both
//! steps are injected as closures so the retry timing can be driven by a
//! paused tokio clock in tests.

use std::future::Future;

use db_infra::StartupPolicy;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::infra::schema::SchemaOutcome;

/// What the sequence achieved before the service started serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// Attempts used, counting the successful one.
    pub attempts: u32,
    pub schema: SchemaOutcome,
}

#[derive(Debug)]
pub enum StartupPhase<T> {
    Attempting { attempt: u32 },
    Provisioning { attempt: u32, conn: T },
    Ready { conn: T, report: StartupReport },
    Fatal { attempts: u32, last_error: AppError },
}

pub struct StartupSequencer {
    policy: StartupPolicy,
}

impl StartupSequencer {
    pub fn new(policy: StartupPolicy) -> Self {
        Self { policy }
    }

    /// Drive the phases until `Ready` or `Fatal`.
    ///
    /// A failed connect and a failed provisioning pass both consume one
    /// attempt. Between attempts the sequencer sleeps `retry_interval`; after
    /// the last failed attempt it gives up with `AppError::DbUnavailable`.
    pub async fn run<T, C, CFut, P, PFut>(
        &self,
        mut connect: C,
        mut provision: P,
    ) -> Result<(T, StartupReport), AppError>
    where
        C: FnMut() -> CFut,
        CFut: Future<Output = Result<T, AppError>>,
        P: FnMut(T) -> PFut,
        PFut: Future<Output = Result<(T, SchemaOutcome), AppError>>,
    {
        let mut phase = StartupPhase::Attempting { attempt: 1 };

        loop {
            phase = match phase {
                StartupPhase::Attempting { attempt } => {
                    info!(
                        "startup=attempt attempt={} max_attempts={}",
                        attempt, self.policy.max_attempts
                    );
                    match connect().await {
                        Ok(conn) => StartupPhase::Provisioning { attempt, conn },
                        Err(e) => self.after_failure(attempt, e).await,
                    }
                }
                StartupPhase::Provisioning { attempt, conn } => match provision(conn).await {
                    Ok((conn, schema)) => {
                        if let SchemaOutcome::UpgradeFailed { detail } = &schema {
                            warn!("startup=schema_upgrade_failed detail={detail}");
                        }
                        StartupPhase::Ready {
                            conn,
                            report: StartupReport {
                                attempts: attempt,
                                schema,
                            },
                        }
                    }
                    Err(e) => self.after_failure(attempt, e).await,
                },
                StartupPhase::Ready { conn, report } => {
                    info!(
                        "startup=ready attempts={} schema={:?}",
                        report.attempts, report.schema
                    );
                    return Ok((conn, report));
                }
                StartupPhase::Fatal {
                    attempts,
                    last_error,
                } => {
                    error!("startup=fatal attempts={attempts} last_error={last_error}");
                    return Err(AppError::db_unavailable(format!(
                        "database not reachable after {attempts} attempts: {last_error}"
                    )));
                }
            };
        }
    }

    async fn after_failure<T>(&self, attempt: u32, e: AppError) -> StartupPhase<T> {
        if attempt >= self.policy.max_attempts {
            return StartupPhase::Fatal {
                attempts: attempt,
                last_error: e,
            };
        }

        let interval_ms = self.policy.retry_interval.as_millis();
        warn!(
            "startup=retry attempt={} max_attempts={} interval_ms={} error={}",
            attempt, self.policy.max_attempts, interval_ms, e
        );
        tokio::time::sleep(self.policy.retry_interval).await;
        StartupPhase::Attempting {
            attempt: attempt + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;

    fn policy(max_attempts: u32, interval_ms: u64) -> StartupPolicy {
        StartupPolicy::new(max_attempts, Duration::from_millis(interval_ms))
    }

    async fn provision_up_to_date(conn: u32) -> Result<(u32, SchemaOutcome), AppError> {
        Ok((conn, SchemaOutcome::UpToDate))
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_store_uses_every_attempt_then_fails() {
        let sequencer = StartupSequencer::new(policy(4, 5_000));
        let start = Instant::now();
        let calls = RefCell::new(Vec::new());

        let result = sequencer
            .run(
                || {
                    calls.borrow_mut().push(start.elapsed());
                    async { Err::<u32, _>(AppError::db_unavailable("connection refused")) }
                },
                provision_up_to_date,
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable { .. }));
        assert!(err.to_string().contains("after 4 attempts"));

        let calls = calls.into_inner();
        assert_eq!(
            calls,
            vec![
                Duration::ZERO,
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(15),
            ]
        );
        // No sleep after the final attempt.
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_a_later_attempt() {
        let sequencer = StartupSequencer::new(policy(10, 250));
        let start = Instant::now();
        let mut failures_left = 2;

        let (conn, report) = sequencer
            .run(
                || {
                    let outcome = if failures_left > 0 {
                        failures_left -= 1;
                        Err(AppError::db_unavailable("not yet"))
                    } else {
                        Ok(7_u32)
                    };
                    async move { outcome }
                },
                provision_up_to_date,
            )
            .await
            .unwrap();

        assert_eq!(conn, 7);
        assert_eq!(report.attempts, 3);
        assert_eq!(report.schema, SchemaOutcome::UpToDate);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_provisioning_error_consumes_an_attempt() {
        let sequencer = StartupSequencer::new(policy(3, 1_000));
        let provisions = RefCell::new(0_u32);

        let (_, report) = sequencer
            .run(
                || async { Ok::<_, AppError>(1_u32) },
                |conn| {
                    *provisions.borrow_mut() += 1;
                    let first = *provisions.borrow() == 1;
                    async move {
                        if first {
                            Err(AppError::db("create table failed"))
                        } else {
                            Ok((conn, SchemaOutcome::Created))
                        }
                    }
                },
            )
            .await
            .unwrap();

        assert_eq!(report.attempts, 2);
        assert_eq!(report.schema, SchemaOutcome::Created);
        assert_eq!(provisions.into_inner(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upgrade_failure_still_reaches_ready() {
        let sequencer = StartupSequencer::new(policy(1, 5_000));

        let (_, report) = sequencer
            .run(
                || async { Ok::<_, AppError>(()) },
                |conn| async move {
                    Ok::<_, AppError>((
                        conn,
                        SchemaOutcome::UpgradeFailed {
                            detail: "duplicate column".to_string(),
                        },
                    ))
                },
            )
            .await
            .unwrap();

        assert_eq!(report.attempts, 1);
        assert!(matches!(report.schema, SchemaOutcome::UpgradeFailed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_does_not_sleep() {
        let sequencer = StartupSequencer::new(policy(1, 60_000));
        let start = Instant::now();

        let result = sequencer
            .run(
                || async { Err::<(), _>(AppError::db_unavailable("down")) },
                |conn| async move { Ok::<_, AppError>((conn, SchemaOutcome::UpToDate)) },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
