use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    /// One credit taken; remaining balance.
    Debited(i32),
    /// Balance was already zero (or the user is unknown); nothing changed.
    Insufficient,
}

/// Per-user generation credits. Balances never go below zero.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn balance(&self, user_id: Uuid) -> anyhow::Result<Option<i32>>;

    /// Atomically take one credit if any remain.
    async fn check_and_debit(&self, user_id: Uuid) -> anyhow::Result<DebitOutcome>;
}

#[derive(Clone)]
pub struct PgCreditLedger {
    db: PgPool,
}

impl PgCreditLedger {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CreditLedger for PgCreditLedger {
    async fn balance(&self, user_id: Uuid) -> anyhow::Result<Option<i32>> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT credit_amount
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("fetch credit balance")?;
        Ok(row.map(|(c,)| c))
    }

    async fn check_and_debit(&self, user_id: Uuid) -> anyhow::Result<DebitOutcome> {
        // single conditional update; concurrent debits cannot both pass the guard
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE users
               SET credit_amount = credit_amount - 1
             WHERE id = $1 AND credit_amount > 0
            RETURNING credit_amount
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("debit credit")?;

        Ok(match row {
            Some((remaining,)) => DebitOutcome::Debited(remaining),
            None => DebitOutcome::Insufficient,
        })
    }
}
