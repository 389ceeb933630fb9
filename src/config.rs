//! Server configuration read from command line arguments and environment variables.

use std::ops::RangeInclusive;

use clap::Parser;

use crate::PasswordHash;

/// Errors found while checking the [Config].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No secret for signing session tokens was given.
    #[error("a JWT secret must be set with --jwt-secret or the JWT_SECRET environment variable")]
    MissingSecret,

    /// The bcrypt cost is outside the range bcrypt accepts.
    #[error("the password cost must be between 4 and 31, got {0}")]
    InvalidPasswordCost(u32),
}

/// The bcrypt costs that bcrypt can hash with.
const PASSWORD_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// The REST API server for fintrack_rs.
///
/// Every option can also be set with the environment variable named after it,
/// including from a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH")]
    pub db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// The secret used to sign session tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true, default_value = "")]
    pub jwt_secret: String,

    /// The bcrypt cost for hashing new passwords.
    #[arg(long, env = "PASSWORD_COST", default_value_t = PasswordHash::DEFAULT_COST)]
    pub password_cost: u32,
}

impl Config {
    /// Check that the configuration can be used to start the server.
    ///
    /// # Errors
    ///
    /// Returns [ConfigError::MissingSecret] if the JWT secret is empty, or
    /// [ConfigError::InvalidPasswordCost] if bcrypt cannot use the password cost.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        if !PASSWORD_COST_RANGE.contains(&self.password_cost) {
            return Err(ConfigError::InvalidPasswordCost(self.password_cost));
        }

        Ok(())
    }
}
