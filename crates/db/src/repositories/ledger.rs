//! Ledger repository for the school operating account.
//!
//! The account is a single row seeded by the initial migration. Writers
//! lock it with `SELECT ... FOR UPDATE` inside the caller's transaction so
//! that concurrent approvals and payments serialize on the balance.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, Set,
};
use tracing::debug;

use crate::entities::ledger_accounts;

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The singleton account row is missing.
    #[error("Ledger account has not been provisioned")]
    AccountMissing,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for reading the operating account balance.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the operating account with its current balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountMissing` if the migration seed row is
    /// absent, or a database error.
    pub async fn account(&self) -> Result<ledger_accounts::Model, LedgerError> {
        ledger_accounts::Entity::find()
            .one(&self.db)
            .await?
            .ok_or(LedgerError::AccountMissing)
    }
}

/// Locks the account row and applies `delta` to its balance.
///
/// Positive deltas credit the account (fee payments), negative deltas
/// debit it (approved budgets). Returns the balance after the change.
/// Must run inside the caller's transaction.
pub(crate) async fn apply_delta<C: ConnectionTrait>(
    conn: &C,
    delta: Decimal,
) -> Result<Decimal, LedgerError> {
    let account = ledger_accounts::Entity::find()
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(LedgerError::AccountMissing)?;

    let new_balance = account.balance + delta;

    let mut active: ledger_accounts::ActiveModel = account.into();
    active.balance = Set(new_balance);
    active.updated_at = Set(chrono::Utc::now().into());
    active.update(conn).await?;

    debug!(%delta, balance = %new_balance, "Ledger balance updated");
    Ok(new_balance)
}
