//! Transactions record money earned (positive amounts) or spent (negative amounts).

mod domain;
mod endpoints;

pub use domain::{Transaction, TransactionFields, TransactionId};
pub use endpoints::{
    create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    update_transaction_endpoint,
};
