use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::cart::reconciliation::{MergeClaim, MergeToken};
use business::domain::cart::repository::MergeLedger;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

const IN_FLIGHT: &str = "in_flight";
const APPLIED: &str = "applied";

/// An in-flight claim older than this was left by an instance that died
/// mid-merge and may be taken over.
const CLAIM_TIMEOUT_SECS: f64 = 120.0;
/// Applied merges are forgotten after this many days.
const RETENTION_DAYS: i32 = 30;

/// Merge ledger on the `cart_merges` table. Claims are a single
/// `INSERT ... ON CONFLICT`, so two instances never both win one token.
pub struct MergeLedgerPostgres {
    pool: PgPool,
}

impl MergeLedgerPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn forget_expired(&self) {
        let result = sqlx::query(
            "DELETE FROM cart_merges WHERE state = $1 AND claimed_at < now() - make_interval(days => $2)",
        )
        .bind(APPLIED)
        .bind(RETENTION_DAYS)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => {
                tracing::debug!("Forgot {} expired cart merges", done.rows_affected())
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not prune cart merges: {}", e),
        }
    }
}

fn ledger_failed(token: &MergeToken) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    let token = token.clone();
    move |e| {
        tracing::error!("Cart merge ledger failed for {}: {}", token.as_str(), e);
        RepositoryError::DatabaseError
    }
}

/// Answer for a token someone else holds, from its stored state. A row that
/// vanished was released in between; the caller can trigger again.
fn claim_for_state(state: Option<&str>) -> MergeClaim {
    match state {
        Some(APPLIED) => MergeClaim::AlreadyApplied,
        _ => MergeClaim::InProgress,
    }
}

#[async_trait]
impl MergeLedger for MergeLedgerPostgres {
    async fn claim(
        &self,
        token: &MergeToken,
        user_id: &UserId,
    ) -> Result<MergeClaim, RepositoryError> {
        self.forget_expired().await;

        let claimed = sqlx::query_scalar::<_, String>(
            r#"INSERT INTO cart_merges (token, user_id, state, claimed_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (token) DO UPDATE SET claimed_at = now()
                WHERE cart_merges.state = $3
                  AND cart_merges.claimed_at < now() - make_interval(secs => $4)
            RETURNING token"#,
        )
        .bind(token.as_str())
        .bind(user_id.as_str())
        .bind(IN_FLIGHT)
        .bind(CLAIM_TIMEOUT_SECS)
        .fetch_optional(&self.pool)
        .await
        .map_err(ledger_failed(token))?;

        if claimed.is_some() {
            return Ok(MergeClaim::Granted);
        }

        let state = sqlx::query_scalar::<_, String>("SELECT state FROM cart_merges WHERE token = $1")
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(ledger_failed(token))?;
        Ok(claim_for_state(state.as_deref()))
    }

    async fn mark_applied(&self, token: &MergeToken) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE cart_merges SET state = $2, claimed_at = now() WHERE token = $1")
            .bind(token.as_str())
            .bind(APPLIED)
            .execute(&self.pool)
            .await
            .map_err(ledger_failed(token))?;
        Ok(())
    }

    async fn release(&self, token: &MergeToken) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_merges WHERE token = $1 AND state = $2")
            .bind(token.as_str())
            .bind(IN_FLIGHT)
            .execute(&self.pool)
            .await
            .map_err(ledger_failed(token))?;
        Ok(())
    }
}
