use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contributor account.
///
/// Account provisioning and OAuth live in the frontend; the daemon only
/// stores the identity it needs for ownership checks and display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Display name shown next to published stories.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
