//! Aggregates over a user's transactions: income and expense totals and per category totals.

mod domain;
mod endpoints;

pub use domain::{
    CategoryTotal, DateRange, IncomeAndExpenses, category_totals, income_and_expenses,
};
pub use endpoints::{
    get_category_totals, get_category_totals_filtered, get_income_and_expenses,
    get_income_and_expenses_filtered,
};
