//! Transaction domain types and their database mapping.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    UserID,
    category::CategoryId,
    database_id::DatabaseId,
    db::{CreateTable, MapRow},
};

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = DatabaseId;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A positive `amount` is income, a negative `amount` is an expense. Zero is
/// allowed and counts as neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that owns the transaction.
    pub user_id: UserID,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
}

/// The caller supplied fields of a transaction, used for both creating and
/// updating transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    /// The amount of money spent (negative) or earned (positive).
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction is filed under.
    ///
    /// Must refer to an existing category, which is not required to belong to
    /// the same user.
    pub category_id: CategoryId,
}

impl CreateTable for Transaction {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES users(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES categories(id) ON UPDATE CASCADE
            )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for Transaction {
    type ReturnType = Self;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self, rusqlite::Error> {
        let id = row.get(offset)?;
        let raw_user_id = row.get(offset + 1)?;
        let amount = row.get(offset + 2)?;
        let date = row.get(offset + 3)?;
        let description = row.get(offset + 4)?;
        let category_id = row.get(offset + 5)?;

        Ok(Self {
            id,
            user_id: UserID::new(raw_user_id),
            amount,
            date,
            description,
            category_id,
        })
    }
}
