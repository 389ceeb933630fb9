use rusqlite::params;

use crate::{
    Error, UserID,
    analytics::{CategoryTotal, DateRange, IncomeAndExpenses},
    stores::{AnalyticsStore, sqlite::SQLiteStore},
};

impl AnalyticsStore for SQLiteStore {
    fn income_and_expenses(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<IncomeAndExpenses, Error> {
        let start = date_range.map(|range| range.start);
        let end = date_range.map(|range| range.end);

        self.lock()?
            .prepare(
                "SELECT
                    COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0.0 END), 0.0),
                    COALESCE(SUM(CASE WHEN amount < 0 THEN amount ELSE 0.0 END), 0.0)
                 FROM transactions
                 WHERE user_id = ?1 AND (?2 IS NULL OR date BETWEEN ?2 AND ?3)",
            )?
            .query_row(params![user_id.as_i64(), start, end], |row| {
                Ok(IncomeAndExpenses {
                    total_income: row.get(0)?,
                    total_expense: row.get(1)?,
                })
            })
            .map_err(Error::from)
    }

    fn category_totals(
        &self,
        user_id: UserID,
        date_range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let start = date_range.map(|range| range.start);
        let end = date_range.map(|range| range.end);

        self.lock()?
            .prepare(
                "SELECT c.name, SUM(t.amount) AS total_amount
                 FROM transactions t
                 INNER JOIN categories c ON c.id = t.category_id
                 WHERE t.user_id = ?1 AND (?2 IS NULL OR t.date BETWEEN ?2 AND ?3)
                 GROUP BY c.id, c.name
                 ORDER BY total_amount DESC, c.id ASC",
            )?
            .query_map(params![user_id.as_i64(), start, end], |row| {
                Ok(CategoryTotal {
                    category_name: row.get(0)?,
                    total_amount: row.get(1)?,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        UserID,
        analytics::{CategoryTotal, DateRange, IncomeAndExpenses},
        category::{CategoryId, CategoryName},
        stores::{
            AnalyticsStore, CategoryStore, TransactionStore,
            sqlite::{
                SQLiteStore,
                test_utils::{create_test_user, get_test_store},
            },
        },
        transaction::TransactionFields,
    };

    fn add_transaction(
        store: &SQLiteStore,
        user_id: UserID,
        amount: f64,
        date: Date,
        category_id: CategoryId,
    ) {
        store
            .create_transaction(
                user_id,
                TransactionFields {
                    amount,
                    date,
                    description: String::new(),
                    category_id,
                },
            )
            .unwrap();
    }

    #[test]
    fn income_and_expenses_with_no_transactions_is_zero() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");

        assert_eq!(
            store.income_and_expenses(user_id, None),
            Ok(IncomeAndExpenses {
                total_income: 0.0,
                total_expense: 0.0
            })
        );
    }

    #[test]
    fn groceries_scenario() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");
        let groceries = store
            .create_category(user_id, CategoryName::new_unchecked("Groceries"))
            .unwrap();
        add_transaction(&store, user_id, -42.5, date!(2024 - 03 - 01), groceries);

        assert_eq!(
            store.income_and_expenses(user_id, None),
            Ok(IncomeAndExpenses {
                total_income: 0.0,
                total_expense: -42.5
            })
        );
        assert_eq!(
            store.category_totals(user_id, None),
            Ok(vec![CategoryTotal {
                category_name: "Groceries".to_owned(),
                total_amount: -42.5
            }])
        );
    }

    #[test]
    fn income_and_expenses_ignores_zero_and_other_users() {
        let store = get_test_store();
        let alice = create_test_user(&store, "alice");
        let bob = create_test_user(&store, "bob");
        let category_id = store
            .create_category(alice, CategoryName::new_unchecked("Misc"))
            .unwrap();
        add_transaction(&store, alice, 100.0, date!(2024 - 01 - 01), category_id);
        add_transaction(&store, alice, -30.0, date!(2024 - 01 - 02), category_id);
        add_transaction(&store, alice, 0.0, date!(2024 - 01 - 03), category_id);
        add_transaction(&store, bob, 500.0, date!(2024 - 01 - 01), category_id);

        assert_eq!(
            store.income_and_expenses(alice, None),
            Ok(IncomeAndExpenses {
                total_income: 100.0,
                total_expense: -30.0
            })
        );
    }

    #[test]
    fn date_range_is_inclusive() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");
        let category_id = store
            .create_category(user_id, CategoryName::new_unchecked("Misc"))
            .unwrap();
        add_transaction(&store, user_id, 1.0, date!(2023 - 12 - 31), category_id);
        add_transaction(&store, user_id, 2.0, date!(2024 - 01 - 01), category_id);
        add_transaction(&store, user_id, 4.0, date!(2024 - 01 - 31), category_id);
        add_transaction(&store, user_id, 8.0, date!(2024 - 02 - 01), category_id);
        let january = DateRange {
            start: date!(2024 - 01 - 01),
            end: date!(2024 - 01 - 31),
        };

        let totals = store.income_and_expenses(user_id, Some(january)).unwrap();
        let category_totals = store.category_totals(user_id, Some(january)).unwrap();

        assert_eq!(totals.total_income, 6.0);
        assert_eq!(category_totals[0].total_amount, 6.0);
    }

    #[test]
    fn reversed_date_range_matches_nothing() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");
        let category_id = store
            .create_category(user_id, CategoryName::new_unchecked("Misc"))
            .unwrap();
        add_transaction(&store, user_id, 1.0, date!(2024 - 01 - 15), category_id);
        let reversed = DateRange {
            start: date!(2024 - 02 - 01),
            end: date!(2024 - 01 - 01),
        };

        assert_eq!(
            store.income_and_expenses(user_id, Some(reversed)).unwrap(),
            IncomeAndExpenses {
                total_income: 0.0,
                total_expense: 0.0
            }
        );
        assert!(store.category_totals(user_id, Some(reversed)).unwrap().is_empty());
    }

    #[test]
    fn category_totals_sorted_descending_without_empty_categories() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");
        let food = store
            .create_category(user_id, CategoryName::new_unchecked("Food"))
            .unwrap();
        let salary = store
            .create_category(user_id, CategoryName::new_unchecked("Salary"))
            .unwrap();
        store
            .create_category(user_id, CategoryName::new_unchecked("Unused"))
            .unwrap();
        add_transaction(&store, user_id, -20.0, date!(2024 - 01 - 01), food);
        add_transaction(&store, user_id, -5.0, date!(2024 - 01 - 02), food);
        add_transaction(&store, user_id, 900.0, date!(2024 - 01 - 03), salary);

        assert_eq!(
            store.category_totals(user_id, None),
            Ok(vec![
                CategoryTotal {
                    category_name: "Salary".to_owned(),
                    total_amount: 900.0
                },
                CategoryTotal {
                    category_name: "Food".to_owned(),
                    total_amount: -25.0
                },
            ])
        );
    }

    #[test]
    fn same_named_categories_are_totalled_separately() {
        let store = get_test_store();
        let user_id = create_test_user(&store, "alice");
        let first = store
            .create_category(user_id, CategoryName::new_unchecked("Food"))
            .unwrap();
        let second = store
            .create_category(user_id, CategoryName::new_unchecked("Food"))
            .unwrap();
        add_transaction(&store, user_id, -1.0, date!(2024 - 01 - 01), first);
        add_transaction(&store, user_id, -2.0, date!(2024 - 01 - 01), second);

        assert_eq!(store.category_totals(user_id, None).unwrap().len(), 2);
    }
}
