use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/auth/request-otp`
///
/// Missing fields deserialize as empty strings so the handler can answer
/// with its own message instead of a body parse error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestOtpRequest {
    /// Address the code is mailed to
    #[serde(default)]
    #[validate(email)]
    pub email: String,

    /// Name used to greet the recipient
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub username: String,
}

impl RequestOtpRequest {
    /// Both fields present after trimming
    pub fn has_required_fields(&self) -> bool {
        !self.email.trim().is_empty() && !self.username.trim().is_empty()
    }
}

/// Submitted code, accepted as a JSON string or number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OtpInput {
    Number(u64),
    Decimal(f64),
    Text(String),
}

impl OtpInput {
    /// Code as text, in the form the verifier parses
    ///
    /// Zero and blank text count as no code at all. A whole decimal such as
    /// `123456.0` is read as its integer value.
    pub fn as_code(&self) -> Option<String> {
        match self {
            OtpInput::Number(0) => None,
            OtpInput::Number(n) => Some(n.to_string()),
            OtpInput::Decimal(d) if *d == 0.0 => None,
            OtpInput::Decimal(d) if d.fract() == 0.0 && *d > 0.0 && *d <= u64::MAX as f64 => {
                Some((*d as u64).to_string())
            }
            OtpInput::Decimal(d) => Some(d.to_string()),
            OtpInput::Text(s) => {
                let code = s.trim();
                (!code.is_empty()).then(|| code.to_string())
            }
        }
    }
}

/// Body of `POST /api/v1/auth/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// Address the code was sent to (`email` is accepted too)
    #[serde(default, alias = "email")]
    pub mail: Option<String>,

    #[serde(default)]
    pub otp: Option<OtpInput>,
}

impl VerifyOtpRequest {
    /// Non-blank address and code, if both were supplied
    pub fn required_fields(&self) -> Option<(&str, String)> {
        let mail = self.mail.as_deref().map(str::trim).filter(|m| !m.is_empty())?;
        let otp = self.otp.as_ref().and_then(OtpInput::as_code)?;
        Some((mail, otp))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Signed bearer credential
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by a valid bearer credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}
