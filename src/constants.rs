/// Key used by Telegram to derive the init data verification secret:
/// `secret_key = HMAC_SHA256("WebAppData", bot_token)`
pub const WEBAPP_HMAC_KEY: &[u8] = b"WebAppData";

/// Maximum accepted age of init data in seconds (24 hours)
/// Bounds replay of captured session tokens
pub const DEFAULT_INIT_DATA_MAX_AGE_SECS: i64 = 86_400;

/// Per-request timeout applied at the router (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Timeout for a single row-store HTTP call (seconds)
pub const STORE_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default worksheet holding registration rows
pub const DEFAULT_SHEET_NAME: &str = "Registrations";

/// Default base URL of the Google Sheets REST API
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

// =============================================================================
// Validation Error Messages
// =============================================================================

pub const ERR_FULL_NAME_REQUIRED: &str = "Full name is required";

pub const ERR_INVALID_EMAIL: &str = "Invalid email format";

pub const ERR_PHONE_REQUIRED: &str = "Phone number is required";

pub const ERR_EXPERIENCE_LEVEL: &str =
    "Experience level must be one of: beginner, intermediate, advanced, expert";

pub const ERR_CONSENT_PD_REQUIRED: &str = "Consent to personal data processing is required";

pub const ERR_CONSENT_MARKETING_REQUIRED: &str = "Marketing consent flag is required";
