//! Pending identity entity created by a signup or signin request.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::Registration;

/// Intent a pending identity was created for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    #[default]
    Signup,
    Signin,
    /// Any purpose string this build does not know about
    #[serde(other)]
    Other,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Signup => "signup",
            Purpose::Signin => "signin",
            Purpose::Other => "other",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registration awaiting proof of email ownership
///
/// Stored under `identity:{id}` for the identity TTL. The secret is kept as
/// submitted and never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingIdentity {
    /// Session id, also the suffix of the store key
    pub id: String,

    /// Display name as submitted
    pub name: String,

    /// Email address the code is delivered to
    pub email: String,

    /// Secret as submitted
    pub password: String,

    /// Intent the identity was created for; absent in older records
    #[serde(default)]
    pub purpose: Purpose,
}

impl PendingIdentity {
    pub fn new(id: impl Into<String>, registration: Registration, purpose: Purpose) -> Self {
        Self {
            id: id.into(),
            name: registration.name,
            email: registration.email,
            password: registration.password,
            purpose,
        }
    }
}

impl fmt::Debug for PendingIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingIdentity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("purpose", &self.purpose)
            .finish()
    }
}
