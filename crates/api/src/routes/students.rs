//! Student enrollment and fee balance routes.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, response::{created, fail, ok}};
use bursary_core::access::Operation;
use bursary_shared::AppError;
use bursary_db::StudentRepository;
use bursary_db::repositories::student::{CreateStudentInput, StudentError};

/// Creates the student routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(create_student))
        .route("/students/fees", get(list_fee_balances))
}

/// Request body for enrolling a student.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// Admission number, unique.
    pub admission_number: String,
    /// Student's full name.
    pub full_name: String,
    /// Course of study.
    pub course: String,
    /// Year of study, from 1.
    pub year: i32,
    /// Semester within the year, from 1.
    pub semester: i32,
    /// Total fees owed for the term.
    pub fees_due: Decimal,
}

/// POST /students - Enroll a student.
async fn create_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::CreateStudent) {
        return response;
    }

    if payload.fees_due < Decimal::ZERO {
        return fail(&AppError::Validation("fees due cannot be negative".to_string()));
    }
    if payload.year < 1 || payload.semester < 1 {
        return fail(&AppError::Validation("year and semester start at 1".to_string()));
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo
        .create(CreateStudentInput {
            admission_number: payload.admission_number,
            full_name: payload.full_name,
            course: payload.course,
            year: payload.year,
            semester: payload.semester,
            fees_due: payload.fees_due,
        })
        .await
    {
        Ok(student) => {
            info!(student_id = %student.id, admission = %student.admission_number, "Student enrolled");
            match serde_json::to_value(&student) {
                Ok(data) => created("Student enrolled", data),
                Err(e) => {
                    error!(error = %e, "Failed to serialize student");
                    fail(&AppError::Storage("An error occurred".to_string()))
                }
            }
        }
        Err(StudentError::AdmissionNumberTaken(number)) => fail(&AppError::Validation(
            format!("admission number '{number}' is already registered"),
        )),
        Err(e) => {
            error!(error = %e, "Failed to enroll student");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}

/// GET /students/fees - Per-student fee balances.
async fn list_fee_balances(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::ReadBalances) {
        return response;
    }

    let repo = StudentRepository::new((*state.db).clone());
    match repo.list_fee_balances().await {
        Ok(balances) => match serde_json::to_value(&balances) {
            Ok(data) => ok("Student fee balances", data),
            Err(e) => {
                error!(error = %e, "Failed to serialize fee balances");
                fail(&AppError::Storage("An error occurred".to_string()))
            }
        },
        Err(e) => {
            error!(error = %e, "Failed to list fee balances");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}
