//! Operating account balance route.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser, response::{fail, ok}};
use bursary_core::access::Operation;
use bursary_db::LedgerRepository;
use bursary_shared::AppError;

/// Creates the balance routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/balance", get(get_balance))
}

/// GET /balance - Current operating account balance.
async fn get_balance(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(response) = auth.require(Operation::ReadBalances) {
        return response;
    }

    let repo = LedgerRepository::new((*state.db).clone());
    match repo.account().await {
        Ok(account) => ok(
            "Current balance",
            json!({
                "name": account.name,
                "balance": account.balance,
                "updatedAt": account.updated_at.to_rfc3339(),
            }),
        ),
        Err(e) => {
            error!(error = %e, "Failed to read operating account");
            fail(&AppError::Storage("An error occurred".to_string()))
        }
    }
}
