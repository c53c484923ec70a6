use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::RegistrationRequest;
use crate::security::verify_init_data;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub success: bool,
}

/// Pull init data out of the Authorization header, if present
fn bearer_init_data(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|value| !value.is_empty())
}

/// Register a Mini App user
///
/// Strictly linear flow: authenticate the Telegram init data, validate the
/// payload, reject duplicates, append one row to the spreadsheet.
///
/// The duplicate check and the append are two independent store calls with
/// no transaction between them; two concurrent first-time submissions for
/// the same user can both pass the check and both append.
pub async fn submit_registration(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegistrationRequest>,
) -> Result<Json<RegistrationResponse>> {
    // Header takes precedence over the in-body field
    let init_data = bearer_init_data(&headers)
        .or(payload.init_data.as_deref())
        .unwrap_or("");

    let user_id = verify_init_data(
        init_data,
        &state.config.bot_token,
        state.config.init_data_max_age_secs,
    )?;

    let registration = payload
        .validate()
        .map_err(|errors| AppError::Validation(errors.join(", ")))?;

    let existing = state
        .store
        .read_column(&state.config.identity_range())
        .await?;
    let user_key = user_id.to_string();
    if existing.iter().any(|id| *id == user_key) {
        tracing::info!("Duplicate registration attempt for user {}", user_id);
        return Err(AppError::AlreadyRegistered);
    }

    let row = registration.to_row(user_id, Utc::now());
    state.store.append_row(&state.config.sheet_name, row).await?;

    tracing::info!("Registered user {}", user_id);

    Ok(Json(RegistrationResponse { success: true }))
}
