// Wire models for the records service.
//
// Parsed once at the network boundary: a response that does not match
// these shapes is an error, never a half-filled value.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

// ── Login ───────────────────────────────────────────────────────────

/// `POST /login` request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Roll number.
    pub login_id: String,
    /// Birthday rendered as `DD-Mon-YYYY`.
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

impl LoginRequest {
    pub fn new(login_id: impl Into<String>, password: SecretString) -> Self {
        Self {
            login_id: login_id.into(),
            password,
        }
    }
}

fn expose_password<S: Serializer>(password: &SecretString, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(password.expose_secret())
}

/// Successful login: the student's summary plus the sessions they are
/// enrolled in, in service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub name: String,
    pub reg_no: String,
    pub session_list: Vec<String>,
}

impl LoginResult {
    /// Whether `session` is one of the sessions returned at login.
    pub fn has_session(&self, session: &str) -> bool {
        self.session_list.iter().any(|s| s == session)
    }
}

/// Failure body for `/login`: `{"detail": "..."}`, every field optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The detail as display text. FastAPI-style validation errors carry
    /// a list here; only plain strings are surfaced.
    pub fn detail_text(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Older deployments answered with `{"student": {"Name as per 10th Document", "Roll Number"}}`.
/// Only used to recognise that shape.
#[derive(Deserialize)]
pub(crate) struct LegacyLoginEnvelope {
    pub student: serde_json::Map<String, serde_json::Value>,
}

// ── Student details ─────────────────────────────────────────────────

/// `GET /student/details` response: the record for one student in one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    pub basic: BasicInfo,
    pub academic: AcademicInfo,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub reg_no: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicInfo {
    pub course: String,
    pub stream: String,
    pub batch: String,
    pub section: String,
    pub session: String,
}

/// One enrolled subject and how it is taken (theory, practical, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub mode: String,
}
