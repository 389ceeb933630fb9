//! The API endpoints URIs.
//!
//! Routes that act on a single row take its ID as the query parameter `?id=`.

/// The route for registering a new user.
pub const REGISTER: &str = "/api/v1/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/v1/auth/login";

/// The route to create a category.
pub const CATEGORIES: &str = "/api/v1/categories";
/// The route to list the user's categories.
pub const LIST_CATEGORIES: &str = "/api/v1/categories/list";
/// The route to rename a category.
pub const UPDATE_CATEGORY: &str = "/api/v1/categories/update";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/v1/categories/delete";

/// The route to create a transaction.
pub const TRANSACTIONS: &str = "/api/v1/transactions";
/// The route to list the user's transactions.
pub const LIST_TRANSACTIONS: &str = "/api/v1/transactions/list";
/// The route to update a transaction.
pub const UPDATE_TRANSACTION: &str = "/api/v1/transactions/update";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/v1/transactions/delete";

/// The route for the user's total income and expenses.
pub const INCOME_EXPENSES: &str = "/api/v1/analytics/income-expenses";
/// The route for the user's per category totals.
pub const CATEGORY_TOTALS: &str = "/api/v1/analytics/categories";
/// The route for the user's total income and expenses between two dates.
pub const INCOME_EXPENSES_FILTERED: &str = "/api/v1/analytics/income-expenses-filtered";
/// The route for the user's per category totals between two dates.
pub const CATEGORY_TOTALS_FILTERED: &str = "/api/v1/analytics/categories-filtered";
