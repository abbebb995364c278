//! Student repository for enrollment and fee balance queries.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use bursary_shared::types::to_minor_units;

use crate::entities::students;

/// Error types for student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Student not found.
    #[error("Student not found: {0}")]
    NotFound(String),

    /// Admission number already registered.
    #[error("Admission number '{0}' is already registered")]
    AdmissionNumberTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for enrolling a student.
#[derive(Debug, Clone)]
pub struct CreateStudentInput {
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

/// A student's fee position.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FeeBalance {
    /// The student.
    #[serde(flatten)]
    pub student: students::Model,
    /// Fees still outstanding.
    pub outstanding: Decimal,
}

/// Student repository.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls a new student.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::AdmissionNumberTaken` if the admission number
    /// exists, or a database error.
    pub async fn create(&self, input: CreateStudentInput) -> Result<students::Model, StudentError> {
        let taken = students::Entity::find()
            .filter(students::Column::AdmissionNumber.eq(input.admission_number.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(StudentError::AdmissionNumberTaken(input.admission_number));
        }

        let now = chrono::Utc::now().into();
        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            admission_number: Set(input.admission_number),
            full_name: Set(input.full_name),
            course: Set(input.course),
            year: Set(input.year),
            semester: Set(input.semester),
            fees_due: Set(to_minor_units(input.fees_due)),
            fees_paid: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(student.insert(&self.db).await?)
    }

    /// Finds a student by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a student by admission number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_admission_number(
        &self,
        admission_number: &str,
    ) -> Result<Option<students::Model>, DbErr> {
        students::Entity::find()
            .filter(students::Column::AdmissionNumber.eq(admission_number))
            .one(&self.db)
            .await
    }

    /// Lists all students with their outstanding fee balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_fee_balances(&self) -> Result<Vec<FeeBalance>, DbErr> {
        let students = students::Entity::find()
            .order_by_asc(students::Column::AdmissionNumber)
            .all(&self.db)
            .await?;

        Ok(students
            .into_iter()
            .map(|student| {
                let outstanding = to_minor_units(student.fees_due - student.fees_paid);
                FeeBalance {
                    student,
                    outstanding,
                }
            })
            .collect())
    }
}
