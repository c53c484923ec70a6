use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::constants::WEBAPP_HMAC_KEY;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Init data verification failure (all map to 401)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InitDataError {
    #[error("Authorization data is required")]
    Missing,

    #[error("Unauthorized: Invalid Telegram init data")]
    MissingHash,

    #[error("Unauthorized: Invalid Telegram init data")]
    InvalidSignature,

    #[error("Telegram init data is expired")]
    Expired,

    #[error("Unable to extract user ID from Telegram data")]
    MissingUser,
}

impl From<InitDataError> for AppError {
    fn from(err: InitDataError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

/// Parse an init data query string into decoded key/value pairs
fn parse_pairs(init_data: &str) -> HashMap<String, String> {
    init_data
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => {
                    let decoded = urlencoding::decode(value).ok()?;
                    Some((key.to_string(), decoded.into_owned()))
                }
                _ => None,
            }
        })
        .collect()
}

/// Verify Telegram Mini App init data and extract the authenticated user id
///
/// Telegram signs the payload with HMAC-SHA256. The verification key is
/// derived from the bot token: `secret_key = HMAC_SHA256("WebAppData", bot_token)`.
/// The signed message is the data-check-string: all `key=value` pairs except
/// `hash`, sorted by key, joined with newlines.
///
/// `auth_date` older than `max_age_secs` is rejected to bound replay of
/// captured tokens.
pub fn verify_init_data(
    init_data: &str,
    bot_token: &str,
    max_age_secs: i64,
) -> Result<i64, InitDataError> {
    if init_data.is_empty() {
        return Err(InitDataError::Missing);
    }

    let params = parse_pairs(init_data);

    let received_hash = params.get("hash").ok_or(InitDataError::MissingHash)?;
    let sig_bytes = hex::decode(received_hash).map_err(|_| {
        tracing::warn!("Init data hash is not valid hex");
        InitDataError::InvalidSignature
    })?;

    let mut check_pairs: Vec<String> = params
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    check_pairs.sort();
    let data_check_string = check_pairs.join("\n");

    let mut secret_key_mac = HmacSha256::new_from_slice(WEBAPP_HMAC_KEY)
        .map_err(|_| InitDataError::InvalidSignature)?;
    secret_key_mac.update(bot_token.as_bytes());
    let secret_key = secret_key_mac.finalize().into_bytes();

    let mut mac =
        HmacSha256::new_from_slice(&secret_key).map_err(|_| InitDataError::InvalidSignature)?;
    mac.update(data_check_string.as_bytes());
    if mac.verify_slice(&sig_bytes).is_err() {
        tracing::warn!("Init data signature mismatch");
        return Err(InitDataError::InvalidSignature);
    }

    let auth_date = params
        .get("auth_date")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(InitDataError::InvalidSignature)?;

    let now = chrono::Utc::now().timestamp();
    if now - auth_date > max_age_secs {
        tracing::warn!("Init data is too old: {} seconds", now - auth_date);
        return Err(InitDataError::Expired);
    }

    let user_json = params.get("user").ok_or(InitDataError::MissingUser)?;
    let user: serde_json::Value =
        serde_json::from_str(user_json).map_err(|_| InitDataError::MissingUser)?;

    user.get("id")
        .and_then(|v| v.as_i64())
        .ok_or(InitDataError::MissingUser)
}
