use rusqlite::params;

use crate::{
    Error, UserID,
    db::MapRow,
    stores::{
        TransactionStore,
        sqlite::{SQLiteStore, is_foreign_key_violation},
    },
    transaction::{Transaction, TransactionFields, TransactionId},
};

/// Maps a failed category foreign key check to [Error::InvalidCategory].
fn map_category_error(error: rusqlite::Error) -> Error {
    if is_foreign_key_violation(&error) {
        Error::InvalidCategory
    } else {
        error.into()
    }
}

impl TransactionStore for SQLiteStore {
    fn create_transaction(
        &self,
        user_id: UserID,
        fields: TransactionFields,
    ) -> Result<TransactionId, Error> {
        let connection = self.lock()?;
        connection
            .execute(
                "INSERT INTO transactions (user_id, amount, date, description, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id.as_i64(),
                    fields.amount,
                    fields.date,
                    fields.description,
                    fields.category_id
                ],
            )
            .map_err(map_category_error)?;

        Ok(connection.last_insert_rowid())
    }

    fn list_transactions(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, user_id, amount, date, description, category_id
                 FROM transactions
                 WHERE user_id = ?1
                 ORDER BY id ASC",
            )?
            .query_map([user_id.as_i64()], Transaction::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    fn update_transaction(
        &self,
        user_id: UserID,
        id: TransactionId,
        fields: TransactionFields,
    ) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute(
                "UPDATE transactions
                 SET amount = ?1, date = ?2, description = ?3, category_id = ?4
                 WHERE id = ?5 AND user_id = ?6",
                params![
                    fields.amount,
                    fields.date,
                    fields.description,
                    fields.category_id,
                    id,
                    user_id.as_i64()
                ],
            )
            .map_err(map_category_error)?;

        match rows_affected {
            0 => Err(Error::NotFoundOrForbidden),
            _ => Ok(()),
        }
    }

    fn delete_transaction(&self, user_id: UserID, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            params![id, user_id.as_i64()],
        )?;

        match rows_affected {
            0 => Err(Error::NotFoundOrForbidden),
            _ => Ok(()),
        }
    }
}
