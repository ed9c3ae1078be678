// ── Credential form ──
//
// Raw roll number + date-of-birth input, validated before any request
// leaves the client. Both fields are required.

use chrono::NaiveDate;

use rollbook_api::LoginRequest;
use rollbook_api::birthday::{parse_birthday, password_for};

use crate::error::CoreError;

/// Form fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialForm {
    pub roll_number: String,
    /// `YYYY-MM-DD`.
    pub birthday: String,
}

impl CredentialForm {
    pub fn new(roll_number: impl Into<String>, birthday: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            birthday: birthday.into(),
        }
    }

    /// Check both fields and parse the birthday.
    pub fn validate(&self) -> Result<Credentials, CoreError> {
        let roll_number = self.roll_number.trim();
        if roll_number.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "Roll number is required".into(),
            });
        }
        if self.birthday.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "Date of birth is required".into(),
            });
        }

        let birthday = parse_birthday(&self.birthday).map_err(|_| CoreError::ValidationFailed {
            message: format!(
                "Invalid date of birth '{}' (expected YYYY-MM-DD)",
                self.birthday.trim()
            ),
        })?;

        Ok(Credentials {
            roll_number: roll_number.to_owned(),
            birthday,
        })
    }
}

/// Validated credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub roll_number: String,
    pub birthday: NaiveDate,
}

impl Credentials {
    /// The `/login` body: roll number plus the `DD-Mon-YYYY` password.
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest::new(self.roll_number.clone(), password_for(self.birthday))
    }
}
