use rusqlite::params;

use crate::{
    Error, UserID,
    category::{Category, CategoryId, CategoryName},
    db::MapRow,
    stores::{
        CategoryStore,
        sqlite::{SQLiteStore, is_foreign_key_violation},
    },
};

impl CategoryStore for SQLiteStore {
    fn create_category(&self, user_id: UserID, name: CategoryName) -> Result<CategoryId, Error> {
        let connection = self.lock()?;
        connection.execute(
            "INSERT INTO categories (user_id, name) VALUES (?1, ?2)",
            params![user_id.as_i64(), name.as_ref()],
        )?;

        Ok(connection.last_insert_rowid())
    }

    fn list_categories(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.lock()?
            .prepare("SELECT id, user_id, name FROM categories WHERE user_id = ?1 ORDER BY id ASC")?
            .query_map([user_id.as_i64()], Category::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::from))
            .collect()
    }

    fn update_category(
        &self,
        user_id: UserID,
        id: CategoryId,
        name: CategoryName,
    ) -> Result<(), Error> {
        let rows_affected = self.lock()?.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2 AND user_id = ?3",
            params![name.as_ref(), id, user_id.as_i64()],
        )?;

        match rows_affected {
            0 => Err(Error::NotFoundOrForbidden),
            _ => Ok(()),
        }
    }

    fn delete_category(&self, user_id: UserID, id: CategoryId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute(
                "DELETE FROM categories WHERE id = ?1 AND user_id = ?2",
                params![id, user_id.as_i64()],
            )
            .map_err(|error| match error {
                error if is_foreign_key_violation(&error) => Error::CategoryInUse,
                error => error.into(),
            })?;

        match rows_affected {
            0 => Err(Error::NotFoundOrForbidden),
            _ => Ok(()),
        }
    }
}
