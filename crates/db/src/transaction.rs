//! Transaction scope shared by every multi-step write.

use sqlx::{Postgres, Transaction};

use crate::error::WriteError;

/// Close a write transaction according to the outcome of its steps.
///
/// `Ok` commits. `Err` rolls back explicitly before the error is returned,
/// so a failed write is never half-applied. If the rollback itself fails
/// the connection is dropped, which makes the server discard the
/// transaction anyway.
pub(crate) async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    outcome: Result<T, WriteError>,
) -> Result<T, WriteError> {
    match outcome {
        Ok(value) => {
            tx.commit().await.map_err(WriteError::Commit)?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Rolling back write transaction");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
