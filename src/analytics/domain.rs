//! Types describing aggregates over a user's transactions, and the pure
//! aggregation rules that every store must agree with.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    category::{Category, CategoryId},
    transaction::Transaction,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// An inclusive range of calendar dates used to filter transactions.
///
/// `start` may come after `end`, in which case the range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date included in the range.
    pub start: Date,
    /// The last date included in the range.
    pub end: Date,
}

impl DateRange {
    /// Build an optional date range from the raw `start_date` and `end_date`
    /// query parameters.
    ///
    /// Returns `Ok(None)` when neither bound is given.
    ///
    /// # Errors
    ///
    /// Returns [Error::IncompleteDateRange] if only one bound is given, or
    /// [Error::InvalidDate] if a bound is not a `YYYY-MM-DD` date.
    pub fn from_query(
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Option<Self>, Error> {
        match (start_date, end_date) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Ok(Some(Self {
                start: parse_date(start)?,
                end: parse_date(end)?,
            })),
            _ => Err(Error::IncompleteDateRange),
        }
    }

    /// Whether `date` falls inside the range, bounds included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// The total money earned and spent by a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeAndExpenses {
    /// The sum of all positive amounts.
    pub total_income: f64,
    /// The sum of all negative amounts, so never greater than zero.
    pub total_expense: f64,
}

/// The sum of a user's transaction amounts within one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The name of the category.
    pub category_name: String,
    /// The signed sum of the transaction amounts in the category.
    pub total_amount: f64,
}

/// Split `transactions` into income and expense totals.
///
/// Zero amounts count towards neither total.
pub fn income_and_expenses<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> IncomeAndExpenses {
    transactions.into_iter().fold(
        IncomeAndExpenses {
            total_income: 0.0,
            total_expense: 0.0,
        },
        |mut totals, transaction| {
            if transaction.amount > 0.0 {
                totals.total_income += transaction.amount;
            } else if transaction.amount < 0.0 {
                totals.total_expense += transaction.amount;
            }

            totals
        },
    )
}

/// Sum `transactions` per category.
///
/// Categories without transactions are left out, as are transactions whose
/// category is not in `categories`. The result is sorted by total, largest
/// first, with ties broken by category ID.
pub fn category_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    categories: impl IntoIterator<Item = &'a Category>,
) -> Vec<CategoryTotal> {
    let names: HashMap<CategoryId, &str> = categories
        .into_iter()
        .map(|category| (category.id, category.name.as_ref()))
        .collect();

    let mut sums: HashMap<CategoryId, f64> = HashMap::new();
    for transaction in transactions {
        if names.contains_key(&transaction.category_id) {
            *sums.entry(transaction.category_id).or_default() += transaction.amount;
        }
    }

    let mut sums: Vec<(CategoryId, f64)> = sums.into_iter().collect();
    sums.sort_by(|(lhs_id, lhs_total), (rhs_id, rhs_total)| {
        rhs_total
            .total_cmp(lhs_total)
            .then_with(|| lhs_id.cmp(rhs_id))
    });

    sums.into_iter()
        .map(|(id, total_amount)| CategoryTotal {
            category_name: names[&id].to_owned(),
            total_amount,
        })
        .collect()
}

#[cfg(test)]
mod date_range_tests {
    use time::macros::date;

    use crate::{Error, analytics::DateRange};

    #[test]
    fn no_bounds_means_no_filter() {
        assert_eq!(DateRange::from_query(None, None), Ok(None));
    }

    #[test]
    fn both_bounds_parse() {
        let range = DateRange::from_query(Some("2024-01-01"), Some("2024-01-31"));

        assert_eq!(
            range,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 01),
                end: date!(2024 - 01 - 31),
            }))
        );
    }

    #[test]
    fn only_start_date_is_incomplete() {
        assert_eq!(
            DateRange::from_query(Some("2024-01-01"), None),
            Err(Error::IncompleteDateRange)
        );
    }

    #[test]
    fn only_end_date_is_incomplete() {
        assert_eq!(
            DateRange::from_query(None, Some("2024-01-01")),
            Err(Error::IncompleteDateRange)
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        assert_eq!(
            DateRange::from_query(Some("01/02/2024"), Some("2024-01-31")),
            Err(Error::InvalidDate("01/02/2024".to_owned()))
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange {
            start: date!(2024 - 01 - 01),
            end: date!(2024 - 01 - 31),
        };

        assert!(range.contains(date!(2024 - 01 - 01)));
        assert!(range.contains(date!(2024 - 01 - 31)));
        assert!(!range.contains(date!(2024 - 02 - 01)));
    }

    #[test]
    fn reversed_range_matches_nothing() {
        let range = DateRange {
            start: date!(2024 - 02 - 01),
            end: date!(2024 - 01 - 01),
        };

        assert!(!range.contains(date!(2024 - 01 - 15)));
    }
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::date;

    use crate::{
        UserID,
        analytics::{CategoryTotal, IncomeAndExpenses, category_totals, income_and_expenses},
        category::{Category, CategoryName},
        transaction::Transaction,
    };

    fn transaction(id: i64, amount: f64, category_id: i64) -> Transaction {
        Transaction {
            id,
            user_id: UserID::new(1),
            amount,
            date: date!(2024 - 01 - 01),
            description: String::new(),
            category_id,
        }
    }

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            user_id: UserID::new(1),
            name: CategoryName::new_unchecked(name),
        }
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        assert_eq!(
            income_and_expenses([]),
            IncomeAndExpenses {
                total_income: 0.0,
                total_expense: 0.0
            }
        );
    }

    #[test]
    fn totals_follow_sign_convention() {
        let transactions = [
            transaction(1, 100.0, 1),
            transaction(2, -40.0, 1),
            transaction(3, 0.0, 1),
            transaction(4, 25.5, 1),
            transaction(5, -10.0, 1),
        ];

        let totals = income_and_expenses(&transactions);

        assert_eq!(
            totals,
            IncomeAndExpenses {
                total_income: 125.5,
                total_expense: -50.0
            }
        );
    }

    #[test]
    fn category_totals_sorted_descending_and_skip_empty_categories() {
        let categories = [
            category(1, "Groceries"),
            category(2, "Salary"),
            category(3, "Unused"),
        ];
        let transactions = [
            transaction(1, -50.0, 1),
            transaction(2, -30.0, 1),
            transaction(3, 1000.0, 2),
        ];

        let totals = category_totals(&transactions, &categories);

        assert_eq!(
            totals,
            [
                CategoryTotal {
                    category_name: "Salary".to_owned(),
                    total_amount: 1000.0
                },
                CategoryTotal {
                    category_name: "Groceries".to_owned(),
                    total_amount: -80.0
                },
            ]
        );
    }

    #[test]
    fn category_totals_tie_broken_by_category_id() {
        let categories = [category(2, "B"), category(1, "A")];
        let transactions = [transaction(1, 5.0, 2), transaction(2, 5.0, 1)];

        let totals = category_totals(&transactions, &categories);

        assert_eq!(totals[0].category_name, "A");
        assert_eq!(totals[1].category_name, "B");
    }

    #[test]
    fn categories_with_same_name_are_kept_apart() {
        let categories = [category(1, "Food"), category(2, "Food")];
        let transactions = [transaction(1, -1.0, 1), transaction(2, -2.0, 2)];

        let totals = category_totals(&transactions, &categories);

        assert_eq!(totals.len(), 2);
    }
}
