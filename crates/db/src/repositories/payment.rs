//! Payment repository for recording student fee payments.
//!
//! Recording a payment updates three things in one transaction: the payment
//! row, the student's `fees_paid` running total, and the operating account
//! balance (a credit).

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use bursary_shared::types::to_minor_units;

use crate::entities::{payments, students};
use crate::repositories::ledger::{self, LedgerError};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    /// Payment amount must be positive.
    #[error("Payment amount must be greater than zero")]
    NonPositiveAmount,

    /// Ledger error while crediting the operating account.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentInput {
    /// The paying student.
    pub student_id: Uuid,
    /// User recording the payment.
    pub recorded_by: Uuid,
    /// Amount paid, positive.
    pub amount: Decimal,
    /// Payment method, e.g. "cash", "bank_transfer".
    pub method: String,
    /// Optional receipt or slip reference.
    pub reference: Option<String>,
    /// What the payment covers, e.g. "Tuition".
    pub purpose: String,
}

/// The recorded payment with the balance after the credit.
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    /// The payment row.
    pub payment: payments::Model,
    /// Operating account balance after the credit.
    pub new_balance: Decimal,
}

/// Payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a fee payment atomically.
    ///
    /// # Errors
    ///
    /// - `PaymentError::NonPositiveAmount` for a zero or negative amount.
    /// - `PaymentError::StudentNotFound` if the student does not exist.
    pub async fn record(&self, input: RecordPaymentInput) -> Result<PaymentRecord, PaymentError> {
        let amount = to_minor_units(input.amount);
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }

        let txn = self.db.begin().await?;

        let student = students::Entity::find_by_id(input.student_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PaymentError::StudentNotFound(input.student_id))?;

        let fees_paid = student.fees_paid + amount;
        let mut student: students::ActiveModel = student.into();
        student.fees_paid = Set(fees_paid);
        student.updated_at = Set(chrono::Utc::now().into());
        student.update(&txn).await?;

        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(input.student_id),
            recorded_by: Set(input.recorded_by),
            amount: Set(amount),
            method: Set(input.method),
            reference: Set(input.reference),
            purpose: Set(input.purpose),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        let new_balance = ledger::apply_delta(&txn, amount).await?;

        txn.commit().await?;

        debug!(payment_id = %payment.id, %amount, "Payment committed");
        Ok(PaymentRecord {
            payment,
            new_balance,
        })
    }

    /// Lists payments, newest first, optionally for one student.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, student_id: Option<Uuid>) -> Result<Vec<payments::Model>, DbErr> {
        let mut query = payments::Entity::find().order_by_desc(payments::Column::CreatedAt);
        if let Some(student_id) = student_id {
            query = query.filter(payments::Column::StudentId.eq(student_id));
        }
        query.all(&self.db).await
    }
}
