//! Fee payment routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, response::{created, fail, ok}};
use bursary_core::access::Operation;
use bursary_shared::AppError;
use bursary_db::repositories::payment::{PaymentError, PaymentRepository, RecordPaymentInput};
use bursary_db::{StudentRepository, entities::payments};

/// Creates the payment routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/payments", get(list_payments).post(record_payment))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    /// The paying student's admission number.
    pub admission_number: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Payment method, e.g. "cash".
    pub method: String,
    /// Optional transaction reference.
    pub reference: Option<String>,
    /// What the payment covers.
    pub purpose: String,
}

/// Query parameters for the payment listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    /// Restrict to one student's payments.
    pub admission_number: Option<String>,
}

/// POST /payments - Record a fee payment and credit the operating account.
async fn record_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::RecordPayment) {
        return response;
    }

    let students = StudentRepository::new((*state.db).clone());
    let student = match students
        .find_by_admission_number(&payload.admission_number)
        .await
    {
        Ok(Some(student)) => student,
        Ok(None) => {
            return fail(&AppError::NotFound(format!(
                "student {}",
                payload.admission_number
            )));
        }
        Err(e) => {
            error!(error = %e, "Failed to look up student");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    let repo = PaymentRepository::new((*state.db).clone());
    match repo
        .record(RecordPaymentInput {
            student_id: student.id,
            recorded_by: auth.user_id(),
            amount: payload.amount,
            method: payload.method,
            reference: payload.reference,
            purpose: payload.purpose,
        })
        .await
    {
        Ok(record) => {
            info!(
                payment_id = %record.payment.id,
                student = %student.admission_number,
                amount = %record.payment.amount,
                "Payment recorded"
            );
            created(
                "Payment recorded",
                json!({
                    "payment": payment_json(&record.payment),
                    "newBalance": record.new_balance,
                }),
            )
        }
        Err(e) => map_payment_error(&e),
    }
}

/// GET /payments - Payment history, newest first.
async fn list_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PaymentQuery>,
) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::RecordPayment) {
        return response;
    }

    let student_id = match query.admission_number {
        Some(ref admission_number) => {
            let students = StudentRepository::new((*state.db).clone());
            match students.find_by_admission_number(admission_number).await {
                Ok(Some(student)) => Some(student.id),
                Ok(None) => {
                    return fail(&AppError::NotFound(format!("student {admission_number}")));
                }
                Err(e) => {
                    error!(error = %e, "Failed to look up student");
                    return fail(&AppError::Storage("An error occurred".to_string()));
                }
            }
        }
        None => None,
    };

    let repo = PaymentRepository::new((*state.db).clone());
    match repo.list(student_id).await {
        Ok(rows) => ok(
            "Payment history",
            json!(rows.iter().map(payment_json).collect::<Vec<_>>()),
        ),
        Err(e) => {
            error!(error = %e, "Failed to list payments");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}

fn payment_json(p: &payments::Model) -> serde_json::Value {
    json!({
        "id": p.id,
        "studentId": p.student_id,
        "recordedBy": p.recorded_by,
        "amount": p.amount,
        "method": p.method,
        "reference": p.reference,
        "purpose": p.purpose,
        "createdAt": p.created_at.to_rfc3339(),
    })
}

/// Maps payment errors to error classes and envelope responses.
fn map_payment_error(e: &PaymentError) -> axum::response::Response {
    let error = match e {
        PaymentError::NonPositiveAmount => {
            AppError::Validation("payment amount must be greater than zero".to_string())
        }
        PaymentError::StudentNotFound(id) => AppError::NotFound(format!("student {id}")),
        PaymentError::Ledger(_) | PaymentError::Database(_) => {
            error!(error = %e, "Payment operation failed");
            AppError::Storage("An error occurred".to_string())
        }
    };
    fail(&error)
}
