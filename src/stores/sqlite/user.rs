use rusqlite::{OptionalExtension, named_params, params};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash, User, UserID,
    db::MapRow,
    stores::{UserStore, sqlite::SQLiteStore},
};

impl UserStore for SQLiteStore {
    fn create_user(&self, username: &str, password_hash: PasswordHash) -> Result<UserID, Error> {
        let connection = self.lock()?;
        connection.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash.as_ref(), OffsetDateTime::now_utc()],
        )?;

        Ok(UserID::new(connection.last_insert_rowid()))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = :username",
            )?
            .query_row(named_params! {":username": username}, User::map_row)
            .optional()
            .map_err(Error::from)
    }
}
