//! Persistence Store: single source of truth for User and Website
//! records, the login audit trail, and the one-time seed bootstrap.
//!
//! The store is an explicit object constructed once at application start
//! and passed by reference to every consumer — single-instance semantics
//! without hidden global state.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{digest_secret, verify_secret};
use crate::config::Config;
use crate::error::PorticoError;
use crate::models::website::{logo_url, normalize_url};
use crate::models::{LoginSession, Role, User, UserView, Website};
use crate::storage::{StorageBackend, keys, load_collection, store_collection};

/// Rolled-up view of the login audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOverview {
    pub total_users: u64,
    pub logged_in_users: u64,
    pub login_sessions: Vec<LoginSession>,
}

/// The persistence store. Owns no data itself; every operation is a
/// read-modify-write of the relevant collection document.
pub struct Store {
    storage: Arc<dyn StorageBackend>,
    salt: String,
}

impl Store {
    /// Construct the store and run the seed bootstrap.
    pub fn new(storage: Arc<dyn StorageBackend>, config: &Config) -> Result<Self, PorticoError> {
        let store = Store {
            storage,
            salt: config.digest_salt.clone(),
        };
        store.seed_if_empty()?;
        Ok(store)
    }

    /// Write the default Users and Websites and empty logs, but only if
    /// no User records exist. A no-op once seeded, safe to call again.
    pub fn seed_if_empty(&self) -> Result<bool, PorticoError> {
        if !self.load_users().is_empty() {
            return Ok(false);
        }

        let now = Utc::now();
        let websites = default_websites();
        let all_site_ids: Vec<String> = websites.iter().map(|w| w.id.clone()).collect();

        let users = vec![
            User {
                id: "admin-1".to_string(),
                username: "admin".to_string(),
                password_digest: digest_secret("admin123", &self.salt),
                role: Role::Admin,
                permissions: all_site_ids,
                created_at: now,
                last_login: None,
            },
            User {
                id: "user-1".to_string(),
                username: "user".to_string(),
                password_digest: digest_secret("user123", &self.salt),
                role: Role::User,
                permissions: vec!["github".to_string(), "stackoverflow".to_string()],
                created_at: now,
                last_login: None,
            },
        ];

        store_collection(self.storage.as_ref(), keys::USERS, &users)?;
        store_collection(self.storage.as_ref(), keys::WEBSITES, &websites)?;
        store_collection::<LoginSession>(self.storage.as_ref(), keys::LOGIN_SESSIONS, &[])?;
        store_collection::<crate::models::VisitorSession>(
            self.storage.as_ref(),
            keys::VISIT_LOG,
            &[],
        )?;

        info!(
            users = users.len(),
            websites = websites.len(),
            "seeded default records"
        );
        Ok(true)
    }

    // ── Authentication ─────────────────────────────────────────────

    /// Verify credentials and return the sanitized user.
    ///
    /// On success: sets `last_login`, persists the user, and appends a
    /// [`LoginSession`] audit record. On failure (unknown username and
    /// digest mismatch alike) returns the single undifferentiated
    /// [`PorticoError::InvalidCredentials`].
    pub fn authenticate(
        &self,
        username: &str,
        secret: &str,
        user_agent: &str,
    ) -> Result<UserView, PorticoError> {
        let mut users = self.load_users();

        let Some(user) = users
            .iter_mut()
            .find(|u| u.username == username && verify_secret(secret, &self.salt, &u.password_digest))
        else {
            return Err(PorticoError::InvalidCredentials);
        };

        let now = Utc::now();
        user.last_login = Some(now);
        let authenticated = user.clone();
        store_collection(self.storage.as_ref(), keys::USERS, &users)?;

        let mut sessions: Vec<LoginSession> =
            load_collection(self.storage.as_ref(), keys::LOGIN_SESSIONS);
        sessions.push(LoginSession {
            id: format!("session-{}", Uuid::new_v4()),
            user_id: authenticated.id.clone(),
            username: authenticated.username.clone(),
            login_time: now,
            user_agent: if user_agent.is_empty() {
                "Unknown".to_string()
            } else {
                user_agent.to_string()
            },
        });
        store_collection(self.storage.as_ref(), keys::LOGIN_SESSIONS, &sessions)?;

        Ok(authenticated.into())
    }

    // ── Users ──────────────────────────────────────────────────────

    /// All users, digest field stripped.
    pub fn users(&self) -> Vec<UserView> {
        self.load_users().into_iter().map(UserView::from).collect()
    }

    /// Create a user. Fails with `Conflict` when the username is taken
    /// (case-sensitive exact match) and with `Validation` when a
    /// permission references a Website that does not exist; neither
    /// failure mutates the store.
    pub fn create_user(
        &self,
        username: &str,
        secret: &str,
        role: Role,
        permissions: &[String],
    ) -> Result<UserView, PorticoError> {
        let mut users = self.load_users();

        if users.iter().any(|u| u.username == username) {
            return Err(PorticoError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }
        self.check_permissions(permissions)?;

        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            username: username.to_string(),
            password_digest: digest_secret(secret, &self.salt),
            role,
            permissions: permissions.to_vec(),
            created_at: Utc::now(),
            last_login: None,
        };

        users.push(user.clone());
        store_collection(self.storage.as_ref(), keys::USERS, &users)?;

        Ok(user.into())
    }

    /// Remove a user by id. Returns whether a removal occurred.
    pub fn delete_user(&self, user_id: &str) -> Result<bool, PorticoError> {
        let users = self.load_users();
        let remaining: Vec<User> = users.iter().filter(|u| u.id != user_id).cloned().collect();

        if remaining.len() == users.len() {
            return Ok(false);
        }
        store_collection(self.storage.as_ref(), keys::USERS, &remaining)?;
        Ok(true)
    }

    /// Full replace of a user's permission set. Returns whether the user
    /// was found. Unknown website ids are rejected so that no stale
    /// reference can be written.
    pub fn update_user_permissions(
        &self,
        user_id: &str,
        permissions: &[String],
    ) -> Result<bool, PorticoError> {
        self.check_permissions(permissions)?;

        let mut users = self.load_users();
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };

        user.permissions = permissions.to_vec();
        store_collection(self.storage.as_ref(), keys::USERS, &users)?;
        Ok(true)
    }

    // ── Websites ───────────────────────────────────────────────────

    pub fn websites(&self) -> Vec<Website> {
        load_collection(self.storage.as_ref(), keys::WEBSITES)
    }

    /// Add a website. The URL gets a scheme prefixed when missing; the
    /// logo is derived from the URL's host.
    pub fn add_website(
        &self,
        name: &str,
        url: &str,
        description: &str,
    ) -> Result<Website, PorticoError> {
        let mut websites = self.websites();

        let website = Website {
            id: format!("website-{}", Uuid::new_v4()),
            name: name.to_string(),
            url: normalize_url(url),
            logo: logo_url(url),
            description: description.to_string(),
        };

        websites.push(website.clone());
        store_collection(self.storage.as_ref(), keys::WEBSITES, &websites)?;

        Ok(website)
    }

    /// Remove a website and cascade-strip its id from every user's
    /// permission set. Returns whether a removal occurred.
    pub fn delete_website(&self, website_id: &str) -> Result<bool, PorticoError> {
        let websites = self.websites();
        let remaining: Vec<Website> = websites
            .iter()
            .filter(|w| w.id != website_id)
            .cloned()
            .collect();

        if remaining.len() == websites.len() {
            return Ok(false);
        }
        store_collection(self.storage.as_ref(), keys::WEBSITES, &remaining)?;

        // Cascade: the invariant is that no user keeps a permission for
        // a website that no longer exists.
        let mut users = self.load_users();
        for user in &mut users {
            user.permissions.retain(|p| p != website_id);
        }
        store_collection(self.storage.as_ref(), keys::USERS, &users)?;

        Ok(true)
    }

    // ── Login audit ────────────────────────────────────────────────

    pub fn login_sessions(&self) -> Vec<LoginSession> {
        load_collection(self.storage.as_ref(), keys::LOGIN_SESSIONS)
    }

    /// Summary of accounts and the login audit trail.
    pub fn login_overview(&self) -> LoginOverview {
        let users = self.load_users();
        LoginOverview {
            total_users: users.len() as u64,
            logged_in_users: users.iter().filter(|u| u.last_login.is_some()).count() as u64,
            login_sessions: self.login_sessions(),
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn load_users(&self) -> Vec<User> {
        load_collection(self.storage.as_ref(), keys::USERS)
    }

    fn check_permissions(&self, permissions: &[String]) -> Result<(), PorticoError> {
        let websites = self.websites();
        for id in permissions {
            if !websites.iter().any(|w| &w.id == id) {
                return Err(PorticoError::Validation(format!(
                    "Permission references unknown website '{}'",
                    id
                )));
            }
        }
        Ok(())
    }
}

fn default_websites() -> Vec<Website> {
    vec![
        Website {
            id: "github".to_string(),
            name: "GitHub".to_string(),
            url: "https://github.com".to_string(),
            logo: logo_url("https://github.com"),
            description: "Development platform for code collaboration".to_string(),
        },
        Website {
            id: "stackoverflow".to_string(),
            name: "Stack Overflow".to_string(),
            url: "https://stackoverflow.com".to_string(),
            logo: logo_url("https://stackoverflow.com"),
            description: "Programming Q&A community".to_string(),
        },
        Website {
            id: "google".to_string(),
            name: "Google".to_string(),
            url: "https://google.com".to_string(),
            logo: logo_url("https://google.com"),
            description: "Search engine and web services".to_string(),
        },
        Website {
            id: "youtube".to_string(),
            name: "YouTube".to_string(),
            url: "https://youtube.com".to_string(),
            logo: logo_url("https://youtube.com"),
            description: "Video sharing platform".to_string(),
        },
    ]
}
