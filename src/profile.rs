//! Signed-in user profile

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback used in greetings when nothing better is known
pub const ANONYMOUS_NAME: &str = "there";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserProfile {
    /// Full name, else the local part of the e-mail, else "there"
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or(ANONYMOUS_NAME)
            .to_string()
    }
}

/// Greeting for an optional user
pub fn display_name(user: Option<&UserProfile>) -> String {
    user.map(UserProfile::display_name)
        .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
}
