//! fintrack is a backend for tracking personal income and expenses.
//!
//! This library provides a JSON REST API where users register, log in for a
//! bearer token, record transactions under categories, and query income,
//! expense and per category totals. Every category and transaction belongs to
//! one user and is only visible to and changeable by that user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod analytics;
mod app_state;
mod auth;
mod category;
mod config;
mod database_id;
mod db;
mod endpoints;
mod error;
mod logging;
mod password;
mod response;
mod routing;
pub mod stores;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use analytics::{CategoryTotal, DateRange, IncomeAndExpenses};
pub use app_state::AppState;
pub use auth::{Claims, JwtKeys, TOKEN_DURATION, authorize};
pub use category::{Category, CategoryId, CategoryName};
pub use config::{Config, ConfigError};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorKind};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_SIZE, logging_middleware};
pub use password::PasswordHash;
pub use response::ApiResponse;
pub use routing::build_router;
pub use transaction::{Transaction, TransactionFields, TransactionId};
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
