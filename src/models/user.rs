use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Closed set, matched exhaustively at every branch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as persisted in the `users` document.
///
/// The digest has to round-trip through storage, so it is serialized
/// here; [`UserView`] is what leaves the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Unique within the store (case-sensitive exact match).
    pub username: String,

    /// Salted one-way digest of the secret. Never exposed to callers.
    pub password_digest: String,

    pub role: Role,

    /// Website ids this user may open. Every id references a Website
    /// that exists at write time.
    pub permissions: Vec<String>,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Public user data (safe to return to callers; no digest field).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
            role: user.role,
            permissions: user.permissions,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}
