//! The shopper profile record and its validation rules.

use bookstore_core::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The shopper's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Given name. Required.
    pub first_name: String,
    /// Family name. Required.
    pub last_name: String,
    /// Contact email. Required, must look like `local@domain.tld`.
    pub email: String,
    /// Optional date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl Profile {
    /// Checks required fields and the email format, reporting the first
    /// failure in form order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the failing field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() {
            return Err(DomainError::validation("First name is required"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DomainError::validation("Last name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        if !is_email(self.email.trim()) {
            return Err(DomainError::validation("Invalid email format"));
        }
        Ok(())
    }

    /// Upper-cased first letters of first and last name, e.g. `"JD"`.
    /// Empty unless both names are present.
    #[must_use]
    pub fn initials(&self) -> String {
        let first = self.first_name.trim().chars().next();
        let last = self.last_name.trim().chars().next();
        match (first, last) {
            (Some(f), Some(l)) => f.to_uppercase().chain(l.to_uppercase()).collect(),
            _ => String::new(),
        }
    }
}

fn is_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || candidate.contains(char::is_whitespace) {
        return false;
    }
    let mut labels = domain.split('.');
    let has_dot = domain.contains('.');
    has_dot && labels.all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Profile {
        Profile {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: "jane@example.com".to_owned(),
            date_of_birth: None,
        }
    }

    fn message(profile: &Profile) -> String {
        match profile.validate().unwrap_err() {
            DomainError::Validation(msg) => msg,
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_profile_is_valid() {
        assert!(jane().validate().is_ok());
    }

    #[test]
    fn test_date_of_birth_is_optional() {
        let mut profile = jane();
        profile.date_of_birth = NaiveDate::from_ymd_opt(1990, 4, 2);

        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_required_fields_are_reported_in_form_order() {
        let blank = Profile::default();
        assert_eq!(message(&blank), "First name is required");

        let mut profile = jane();
        profile.last_name = "   ".to_owned();
        assert_eq!(message(&profile), "Last name is required");

        let mut profile = jane();
        profile.email = String::new();
        assert_eq!(message(&profile), "Email is required");
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for email in [
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@@example.com",
            "jane@example..com",
            "ja ne@example.com",
        ] {
            let mut profile = jane();
            profile.email = email.to_owned();
            assert_eq!(message(&profile), "Invalid email format", "{email}");
        }
    }

    #[test]
    fn test_initials_need_both_names() {
        assert_eq!(jane().initials(), "JD");

        let mut lower = jane();
        lower.first_name = "élodie".to_owned();
        lower.last_name = "moreau".to_owned();
        assert_eq!(lower.initials(), "ÉM");

        let mut missing = jane();
        missing.last_name = String::new();
        assert_eq!(missing.initials(), "");
    }

    #[test]
    fn test_deserializes_without_date_of_birth() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com"
        }))
        .unwrap();

        assert_eq!(profile, jane());
    }
}
