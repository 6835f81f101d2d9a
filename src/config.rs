//! Runtime configuration read from the environment.
//!
//! - `PORT` - Server port number (default: 8080)
//! - `DATABASE_URL` - Path to the redb file (default: "storefront.db")
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Admin console credentials
//!
//! Unset or unparseable values fall back to the defaults.

use std::env;

use crate::auth::Credentials;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub admin: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: "storefront.db".to_string(),
            admin: Credentials::default(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the variables above.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            port,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            admin: Credentials {
                username: env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
                password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin.password),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_port_falls_back_to_default() {
        env::set_var("PORT", "eighty");
        let config = Config::from_env();
        env::remove_var("PORT");

        assert_eq!(config.port, 8080);
    }
}
