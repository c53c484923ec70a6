use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ERR_CONSENT_MARKETING_REQUIRED, ERR_CONSENT_PD_REQUIRED, ERR_EXPERIENCE_LEVEL,
    ERR_FULL_NAME_REQUIRED, ERR_INVALID_EMAIL, ERR_PHONE_REQUIRED,
};

/// Deliberately permissive: form input, not full RFC 5322
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Self-reported experience level (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// Raw wire payload for POST /registration
///
/// Every field is optional so validation can report all violations at once
/// instead of failing at deserialization on the first missing field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub init_data: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub consent_pd: Option<bool>,
    #[serde(default)]
    pub consent_marketing: Option<bool>,
}

/// A structurally valid registration
///
/// Personal-data consent is implied true: payloads without it never
/// construct this type.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience_level: ExperienceLevel,
    pub consent_marketing: bool,
}

impl RegistrationRequest {
    /// Check every field constraint and collect all violations
    pub fn validate(&self) -> Result<Registration, Vec<String>> {
        let mut errors = Vec::new();

        let full_name = self.full_name.as_deref().unwrap_or("");
        if full_name.is_empty() {
            errors.push(ERR_FULL_NAME_REQUIRED.to_string());
        }

        let email = self.email.as_deref().unwrap_or("");
        if !EMAIL_RE.is_match(email) {
            errors.push(ERR_INVALID_EMAIL.to_string());
        }

        let phone = self.phone.as_deref().unwrap_or("");
        if phone.is_empty() {
            errors.push(ERR_PHONE_REQUIRED.to_string());
        }

        let experience_level = self
            .experience_level
            .as_deref()
            .and_then(ExperienceLevel::parse);
        if experience_level.is_none() {
            errors.push(ERR_EXPERIENCE_LEVEL.to_string());
        }

        if self.consent_pd != Some(true) {
            errors.push(ERR_CONSENT_PD_REQUIRED.to_string());
        }

        if self.consent_marketing.is_none() {
            errors.push(ERR_CONSENT_MARKETING_REQUIRED.to_string());
        }

        match experience_level {
            Some(level) if errors.is_empty() => Ok(Registration {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                experience_level: level,
                consent_marketing: self.consent_marketing.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}

impl Registration {
    /// Compose the spreadsheet row for this registration
    ///
    /// Column order: user id, submission timestamp, full name, email, phone,
    /// experience level, personal-data consent timestamp, marketing consent.
    /// Consent was mandatory to get here, so its acceptance time is the
    /// submission time.
    pub fn to_row(&self, user_id: i64, submitted_at: DateTime<Utc>) -> Vec<String> {
        let timestamp = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        vec![
            user_id.to_string(),
            timestamp.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.experience_level.as_str().to_string(),
            timestamp,
            self.consent_marketing.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            init_data: None,
            full_name: Some("Test User".to_string()),
            email: Some("user@example.com".to_string()),
            phone: Some("+15551234567".to_string()),
            experience_level: Some("advanced".to_string()),
            consent_pd: Some(true),
            consent_marketing: Some(false),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let registration = valid_request().validate().unwrap();
        assert_eq!(registration.full_name, "Test User");
        assert_eq!(registration.experience_level, ExperienceLevel::Advanced);
        assert!(!registration.consent_marketing);
    }

    #[test]
    fn test_missing_full_name() {
        let mut request = valid_request();
        request.full_name = None;
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_FULL_NAME_REQUIRED.to_string()]);
    }

    #[test]
    fn test_empty_full_name() {
        let mut request = valid_request();
        request.full_name = Some(String::new());
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_FULL_NAME_REQUIRED.to_string()]);
    }

    #[test]
    fn test_invalid_email() {
        let mut request = valid_request();
        request.email = Some("not-an-email".to_string());
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_INVALID_EMAIL.to_string()]);
    }

    #[test]
    fn test_unknown_experience_level() {
        let mut request = valid_request();
        request.experience_level = Some("wizard".to_string());
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_EXPERIENCE_LEVEL.to_string()]);
    }

    #[test]
    fn test_consent_pd_false_rejected() {
        let mut request = valid_request();
        request.consent_pd = Some(false);
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_CONSENT_PD_REQUIRED.to_string()]);
    }

    #[test]
    fn test_consent_pd_missing_rejected() {
        let mut request = valid_request();
        request.consent_pd = None;
        let errors = request.validate().unwrap_err();
        assert_eq!(errors, vec![ERR_CONSENT_PD_REQUIRED.to_string()]);
    }

    #[test]
    fn test_all_violations_collected() {
        let request = RegistrationRequest {
            init_data: None,
            full_name: None,
            email: Some("bad".to_string()),
            phone: Some(String::new()),
            experience_level: Some("guru".to_string()),
            consent_pd: Some(false),
            consent_marketing: None,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                ERR_FULL_NAME_REQUIRED.to_string(),
                ERR_INVALID_EMAIL.to_string(),
                ERR_PHONE_REQUIRED.to_string(),
                ERR_EXPERIENCE_LEVEL.to_string(),
                ERR_CONSENT_PD_REQUIRED.to_string(),
                ERR_CONSENT_MARKETING_REQUIRED.to_string(),
            ]
        );
    }

    #[test]
    fn test_experience_level_round_trip() {
        for name in ["beginner", "intermediate", "advanced", "expert"] {
            let level = ExperienceLevel::parse(name).unwrap();
            assert_eq!(level.as_str(), name);
        }
        assert!(ExperienceLevel::parse("Expert").is_none());
    }

    #[test]
    fn test_row_composition() {
        let mut request = valid_request();
        request.consent_marketing = Some(true);
        let registration = request.validate().unwrap();

        let submitted_at = DateTime::parse_from_rfc3339("2024-06-01T12:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        let row = registration.to_row(123456789, submitted_at);

        assert_eq!(
            row,
            vec![
                "123456789",
                "2024-06-01T12:00:00.000Z",
                "Test User",
                "user@example.com",
                "+15551234567",
                "advanced",
                "2024-06-01T12:00:00.000Z",
                "true",
            ]
        );
    }
}
