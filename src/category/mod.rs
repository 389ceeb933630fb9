//! Categories group a user's transactions, e.g. "Groceries" or "Salary".

mod domain;
mod endpoints;

pub use domain::{Category, CategoryId, CategoryName};
pub use endpoints::{
    create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
    update_category_endpoint,
};
