use serde::{Deserialize, Serialize};
use validator::Validate;

use ea_core::domain::value_objects::Registration;

/// Body of `/signup` and `/signin`
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1))]
    pub name: String,

    /// Address the verification code is sent to
    #[validate(email)]
    pub email: String,

    /// Secret, stored as submitted
    #[validate(length(min = 1))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration::new(request.name, request.email, request.password)
    }
}

/// Session handle returned by `/signup` and `/signin`, and accepted by `/newcode`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionRequest {
    #[validate(length(min = 1))]
    pub id: String,
}

pub type SessionResponse = SessionRequest;

/// Body of `/verify`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Session id
    #[validate(length(min = 1))]
    pub id: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub fa2: String,
}

/// Message returned by `/newcode`
pub const CODE_SENT_MESSAGE: &str = "email sent";
