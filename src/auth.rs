//! Admin console gate
//!
//! A single "logged in" flag compared against one configured credential
//! pair. It only decides whether the admin console is shown; there are no
//! tokens, hashing or expiry.

use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "najih2025".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    credentials: Credentials,
    authenticated: bool,
}

impl AuthGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            authenticated: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Opens the gate when both values match. A failed attempt leaves the
    /// current state unchanged.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if username == self.credentials.username && password == self.credentials.password {
            self.authenticated = true;
            info!(username, "Admin logged in");
            true
        } else {
            warn!(username, "Rejected admin login");
            false
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        info!("Admin logged out");
    }
}
