use std::env;

use crate::constants::{
    DEFAULT_INIT_DATA_MAX_AGE_SECS, DEFAULT_SHEETS_API_BASE, DEFAULT_SHEET_NAME,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Telegram bot token; init data signatures are keyed off it
    pub bot_token: String,
    /// Maximum accepted age of init data in seconds
    pub init_data_max_age_secs: i64,
    /// Spreadsheet holding the registration sheet
    pub spreadsheet_id: String,
    /// Worksheet rows are appended to
    pub sheet_name: String,
    /// Bearer token for the row-store API
    pub sheets_api_token: String,
    /// Row-store API base URL (overridable for tests and proxies)
    pub sheets_api_base: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let bot_token =
            env::var("BOT_TOKEN").map_err(|_| "BOT_TOKEN must be set for init data verification")?;

        let init_data_max_age_secs = env::var("INIT_DATA_MAX_AGE_SECS")
            .unwrap_or_else(|_| DEFAULT_INIT_DATA_MAX_AGE_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid INIT_DATA_MAX_AGE_SECS")?;

        let spreadsheet_id =
            env::var("GOOGLE_SHEET_ID").map_err(|_| "GOOGLE_SHEET_ID must be set")?;

        let sheet_name = env::var("SHEET_NAME").unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string());

        let sheets_api_token = env::var("SHEETS_API_TOKEN")
            .map_err(|_| "SHEETS_API_TOKEN must be set for row store access")?;

        let sheets_api_base =
            env::var("SHEETS_API_BASE").unwrap_or_else(|_| DEFAULT_SHEETS_API_BASE.to_string());

        Ok(Config {
            server_host,
            server_port,
            allowed_origins,
            environment,
            bot_token,
            init_data_max_age_secs,
            spreadsheet_id,
            sheet_name,
            sheets_api_token,
            sheets_api_base,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Column range holding one user identity per row
    pub fn identity_range(&self) -> String {
        format!("{}!A:A", self.sheet_name)
    }
}
