//! Staff account management routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, response::{created, fail, ok}};
use bursary_core::access::{AccessGate, Operation, Role};
use bursary_core::auth::{hash_password, verify_password};
use bursary_shared::AppError;
use bursary_db::UserRepository;
use bursary_db::repositories::user::{CreateUserInput, UserError};

/// Creates the user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/change-password", post(change_password))
}

/// Request body for creating a staff account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login name, unique.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub full_name: String,
    /// "accountant", "manager" or "director".
    pub role: String,
}

/// Request body for changing the caller's own password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The password in use today.
    pub current_password: String,
    /// The replacement password.
    pub new_password: String,
}

/// POST /users/change-password - Change the authenticated user's password.
///
/// Open to every role; the current password must be presented again.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if payload.new_password.len() < 8 {
        return fail(&AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let repo = UserRepository::new((*state.db).clone());
    let user = match repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return fail(&AppError::NotFound("user account".to_string()));
        }
        Err(e) => {
            error!(error = %e, "Failed to load user for password change");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    match verify_password(&payload.current_password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return fail(&AppError::Validation(
                "current password is incorrect".to_string(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Failed to verify password");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    }

    let password_hash = match hash_password(&payload.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    match repo.update_password(user.id, password_hash).await {
        Ok(()) => {
            info!(user_id = %user.id, "Password changed");
            ok("Password changed successfully", serde_json::Value::Null)
        }
        Err(e) => {
            error!(error = %e, "Failed to update password");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}

/// POST /users - Create a staff account.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::CreateUser) {
        return response;
    }

    let Some(role) = Role::parse(&payload.role) else {
        return fail(&AppError::Validation(
            "role must be 'accountant', 'manager' or 'director'".to_string(),
        ));
    };
    if payload.password.len() < 8 {
        return fail(&AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo
        .create(CreateUserInput {
            username: payload.username,
            password_hash,
            full_name: payload.full_name,
            role,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = %user.id, role = %user.role, "Staff account created");
            created(
                "Staff account created",
                json!({
                    "id": user.id,
                    "username": user.username,
                    "fullName": user.full_name,
                    "role": user.role,
                    "capabilities": AccessGate::allowed_operations(role),
                }),
            )
        }
        Err(UserError::UsernameTaken(username)) => fail(&AppError::Validation(format!(
            "username '{username}' is already taken"
        ))),
        Err(e) => {
            error!(error = %e, "Failed to create staff account");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}
