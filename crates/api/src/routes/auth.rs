//! Authentication routes for staff login.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use tracing::{error, info};

use crate::AppState;
use crate::response::{fail, ok};
use bursary_core::auth::verify_password;
use bursary_db::UserRepository;
use bursary_shared::AppError;
use bursary_shared::auth::{LoginRequest, LoginResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Authenticate a staff member and return a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for unknown user");
            return fail(&AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return fail(&AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    }

    let access_token = match state.jwt_service.generate_access_token(user.id, &user.role) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return fail(&AppError::Storage("An error occurred".to_string()));
        }
    };

    info!(user_id = %user.id, role = %user.role, "User logged in");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role,
        },
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    match serde_json::to_value(&response) {
        Ok(data) => ok("Login successful", data),
        Err(e) => {
            error!(error = %e, "Failed to serialize login response");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}
