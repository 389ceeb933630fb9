//! Contains the traits for objects that persist the domain types, and their
//! SQLite and in-memory implementations.
//!
//! Every category and transaction operation is scoped to the user that owns
//! the rows. An update or delete that names another user's row affects
//! nothing and fails with [Error::NotFoundOrForbidden].

mod memory;

pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SQLiteStore;

use crate::{
    Error, PasswordHash, User, UserID,
    analytics::{CategoryTotal, DateRange, IncomeAndExpenses},
    category::{Category, CategoryId, CategoryName},
    transaction::{Transaction, TransactionFields, TransactionId},
};

/// Creates and retrieves registered users.
pub trait UserStore {
    /// Register a user and return the new user's ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if `username` is taken, or a storage
    /// error if the store fails.
    fn create_user(&self, username: &str, password_hash: PasswordHash) -> Result<UserID, Error>;

    /// Find the user registered as `username`.
    ///
    /// Returns `Ok(None)` if there is no such user.
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error>;
}

/// Creates, lists, updates and deletes a user's categories.
pub trait CategoryStore {
    /// Create a category owned by `user_id` and return its ID.
    fn create_category(&self, user_id: UserID, name: CategoryName) -> Result<CategoryId, Error>;

    /// List the categories owned by `user_id` in order of ID.
    fn list_categories(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Rename the category `id` if it is owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFoundOrForbidden] if no category `id` is owned by `user_id`.
    fn update_category(
        &self,
        user_id: UserID,
        id: CategoryId,
        name: CategoryName,
    ) -> Result<(), Error>;

    /// Delete the category `id` if it is owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFoundOrForbidden] if no category `id` is owned by
    /// `user_id`, or [Error::CategoryInUse] if transactions still refer to it.
    fn delete_category(&self, user_id: UserID, id: CategoryId) -> Result<(), Error>;
}

/// Creates, lists, updates and deletes a user's transactions.
pub trait TransactionStore {
    /// Create a transaction owned by `user_id` and return its ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCategory] if `fields.category_id` does not refer
    /// to an existing category.
    fn create_transaction(
        &self,
        user_id: UserID,
        fields: TransactionFields,
    ) -> Result<TransactionId, Error>;

    /// List the transactions owned by `user_id` in order of ID.
    fn list_transactions(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Overwrite the transaction `id` if it is owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFoundOrForbidden] if no transaction `id` is owned by
    /// `user_id`, or [Error::InvalidCategory] if `fields.category_id` does not
    /// refer to an existing category.
    fn update_transaction(
        &self,
        user_id: UserID,
        id: TransactionId,
        fields: TransactionFields,
    ) -> Result<(), Error>;

    /// Delete the transaction `id` if it is owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFoundOrForbidden] if no transaction `id` is owned by `user_id`.
    fn delete_transaction(&self, user_id: UserID, id: TransactionId) -> Result<(), Error>;
}

/// Computes aggregates over a user's transactions.
pub trait AnalyticsStore {
    /// Sum the user's income and expenses, optionally limited to `date_range`.
    fn income_and_expenses(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<IncomeAndExpenses, Error>;

    /// Sum the user's transactions per category, optionally limited to
    /// `date_range`, largest total first.
    fn category_totals(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>, Error>;
}

/// Everything the HTTP handlers need from a backing store.
pub trait Store:
    UserStore + CategoryStore + TransactionStore + AnalyticsStore + Clone + Send + Sync + 'static
{
}

impl<T> Store for T where
    T: UserStore + CategoryStore + TransactionStore + AnalyticsStore + Clone + Send + Sync + 'static
{
}
