//! Implements the store traits with plain vectors held in memory.

use std::sync::{Arc, Mutex, MutexGuard};

use time::OffsetDateTime;

use crate::{
    Error, PasswordHash, User, UserID,
    analytics::{self, CategoryTotal, DateRange, IncomeAndExpenses},
    category::{Category, CategoryId, CategoryName},
    stores::{AnalyticsStore, CategoryStore, TransactionStore, UserStore},
    transaction::{Transaction, TransactionFields, TransactionId},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    next_user_id: i64,
    next_category_id: CategoryId,
    next_transaction_id: TransactionId,
}

impl Tables {
    fn category_exists(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|category| category.id == id)
    }
}

/// A store that keeps everything in memory and behaves like [SQLiteStore](super::SQLiteStore).
///
/// Rows are appended with increasing IDs, so insertion order is ID order.
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, Error> {
        self.tables.lock().map_err(|_| Error::DatabaseLockError)
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, username: &str, password_hash: PasswordHash) -> Result<UserID, Error> {
        let mut tables = self.lock()?;

        if tables.users.iter().any(|user| user.username == username) {
            return Err(Error::DuplicateUsername);
        }

        tables.next_user_id += 1;
        let id = UserID::new(tables.next_user_id);
        tables.users.push(User {
            id,
            username: username.to_owned(),
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        });

        Ok(id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }
}

impl CategoryStore for MemoryStore {
    fn create_category(&self, user_id: UserID, name: CategoryName) -> Result<CategoryId, Error> {
        let mut tables = self.lock()?;

        tables.next_category_id += 1;
        let id = tables.next_category_id;
        tables.categories.push(Category { id, user_id, name });

        Ok(id)
    }

    fn list_categories(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        Ok(self
            .lock()?
            .categories
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_category(
        &self,
        user_id: UserID,
        id: CategoryId,
        name: CategoryName,
    ) -> Result<(), Error> {
        let mut tables = self.lock()?;

        let category = tables
            .categories
            .iter_mut()
            .find(|category| category.id == id && category.user_id == user_id)
            .ok_or(Error::NotFoundOrForbidden)?;
        category.name = name;

        Ok(())
    }

    fn delete_category(&self, user_id: UserID, id: CategoryId) -> Result<(), Error> {
        let mut tables = self.lock()?;

        let index = tables
            .categories
            .iter()
            .position(|category| category.id == id && category.user_id == user_id)
            .ok_or(Error::NotFoundOrForbidden)?;

        if tables
            .transactions
            .iter()
            .any(|transaction| transaction.category_id == id)
        {
            return Err(Error::CategoryInUse);
        }

        tables.categories.remove(index);

        Ok(())
    }
}

impl TransactionStore for MemoryStore {
    fn create_transaction(
        &self,
        user_id: UserID,
        fields: TransactionFields,
    ) -> Result<TransactionId, Error> {
        let mut tables = self.lock()?;

        if !tables.category_exists(fields.category_id) {
            return Err(Error::InvalidCategory);
        }

        tables.next_transaction_id += 1;
        let id = tables.next_transaction_id;
        tables.transactions.push(Transaction {
            id,
            user_id,
            amount: fields.amount,
            date: fields.date,
            description: fields.description,
            category_id: fields.category_id,
        });

        Ok(id)
    }

    fn list_transactions(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .lock()?
            .transactions
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_transaction(
        &self,
        user_id: UserID,
        id: TransactionId,
        fields: TransactionFields,
    ) -> Result<(), Error> {
        let mut tables = self.lock()?;

        let category_exists = tables.category_exists(fields.category_id);
        let transaction = tables
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id && transaction.user_id == user_id)
            .ok_or(Error::NotFoundOrForbidden)?;

        if !category_exists {
            return Err(Error::InvalidCategory);
        }

        transaction.amount = fields.amount;
        transaction.date = fields.date;
        transaction.description = fields.description;
        transaction.category_id = fields.category_id;

        Ok(())
    }

    fn delete_transaction(&self, user_id: UserID, id: TransactionId) -> Result<(), Error> {
        let mut tables = self.lock()?;

        let index = tables
            .transactions
            .iter()
            .position(|transaction| transaction.id == id && transaction.user_id == user_id)
            .ok_or(Error::NotFoundOrForbidden)?;
        tables.transactions.remove(index);

        Ok(())
    }
}

fn in_scope(transaction: &Transaction, user_id: UserID, date_range: Option<DateRange>) -> bool {
    transaction.user_id == user_id
        && date_range.is_none_or(|range| range.contains(transaction.date))
}

impl AnalyticsStore for MemoryStore {
    fn income_and_expenses(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<IncomeAndExpenses, Error> {
        let tables = self.lock()?;

        Ok(analytics::income_and_expenses(
            tables
                .transactions
                .iter()
                .filter(|transaction| in_scope(transaction, user_id, date_range)),
        ))
    }

    fn category_totals(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let tables = self.lock()?;

        Ok(analytics::category_totals(
            tables
                .transactions
                .iter()
                .filter(|transaction| in_scope(transaction, user_id, date_range)),
            &tables.categories,
        ))
    }
}
