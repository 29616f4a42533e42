//! Aggregation of an expense list into per-category and per-month totals.
//!
//! Summaries are rebuilt from the full list on every refresh and never
//! patched in place, so they always match the list they came from.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{error::AmountError, Expense, ExpenseId};

/// Insertion-ordered `key -> summed amount` mapping.
///
/// Keys keep the order in which they were first seen; `get` is a hash lookup.
/// Sums are exact decimals, so any grouping of the same amounts adds up to
/// the same total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    entries: Vec<(String, Decimal)>,
    index: HashMap<String, usize>,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the running sum for `key`
    pub fn add(&mut self, key: &str, amount: Decimal) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn sum(&self) -> Decimal {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Entries ordered by key ascending (for `YYYY-MM` keys this is chronological)
    pub fn sorted_by_key(&self) -> Vec<(&str, Decimal)> {
        let mut sorted: Vec<(&str, Decimal)> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

/// A record left out of every sum because its amount could not be used
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedExpense {
    pub id: ExpenseId,
    pub reason: AmountError,
}

/// Everything derived from one expense list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSummary {
    pub category_totals: Totals,
    pub monthly_totals: Totals,
    /// Sum of all accepted amounts
    pub total: Decimal,
    /// Number of records in the list, rejected ones included
    pub record_count: usize,
    pub rejected: Vec<RejectedExpense>,
}

/// Group `expenses` by category and by `YYYY-MM` month.
pub fn summarize(expenses: &[Expense]) -> ExpenseSummary {
    let mut summary = ExpenseSummary {
        record_count: expenses.len(),
        ..ExpenseSummary::default()
    };

    for expense in expenses {
        let amount = match expense.amount.value() {
            Ok(amount) => amount,
            Err(reason) => {
                summary.rejected.push(RejectedExpense {
                    id: expense.id,
                    reason,
                });
                continue;
            }
        };

        summary.category_totals.add(&expense.category, amount);
        summary.monthly_totals.add(expense.month_key(), amount);
        summary.total += amount;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, sample_expenses};
    use crate::Amount;

    fn dec(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn test_summarize_sample() {
        let summary = summarize(&sample_expenses());

        assert_eq!(summary.category_totals.get("Food"), Some(dec(15, 0)));
        assert_eq!(summary.category_totals.get("Transport"), Some(dec(7, 0)));
        assert_eq!(summary.category_totals.len(), 2);

        assert_eq!(summary.monthly_totals.get("2024-01"), Some(dec(15, 0)));
        assert_eq!(summary.monthly_totals.get("2024-02"), Some(dec(7, 0)));
        assert_eq!(summary.monthly_totals.len(), 2);

        assert_eq!(summary.total, dec(22, 0));
        assert_eq!(summary.record_count, 3);
        assert!(summary.rejected.is_empty());
    }

    #[test]
    fn test_both_mappings_partition_the_total() {
        let expenses = vec![
            expense(1, "A", 0.1, "2024-01-03"),
            expense(2, "B", 0.2, "2024-02-11"),
            expense(3, "A", 0.3, "2024-02-19"),
            expense(4, "Rent", 950.0, "2023-12-01"),
            expense(5, "food", 12.25, "2023-12-03"),
            expense(6, "B", 0.0, "2024-02-29"),
        ];
        let summary = summarize(&expenses);

        let direct: Decimal = expenses.iter().map(|e| e.amount.value().unwrap()).sum();
        assert_eq!(direct, dec(96285, 2));
        assert_eq!(summary.category_totals.sum(), direct);
        assert_eq!(summary.monthly_totals.sum(), summary.category_totals.sum());
        assert_eq!(summary.total, direct);

        assert_eq!(summary.category_totals.get("A"), Some(dec(4, 1)));
        assert_eq!(summary.monthly_totals.get("2024-02"), Some(dec(5, 1)));
    }

    #[test]
    fn test_category_keys_are_verbatim() {
        let expenses = vec![
            expense(1, "Food", 1.0, "2024-01-01"),
            expense(2, "food", 2.0, "2024-01-01"),
            expense(3, " Food", 3.0, "2024-01-01"),
        ];
        let summary = summarize(&expenses);

        assert_eq!(summary.category_totals.len(), 3);
        assert_eq!(summary.category_totals.get("food"), Some(dec(2, 0)));
        assert_eq!(summary.category_totals.get(" Food"), Some(dec(3, 0)));
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let expenses = vec![
            expense(1, "Transport", 1.0, "2024-03-01"),
            expense(2, "Food", 1.0, "2024-01-01"),
            expense(3, "Transport", 1.0, "2024-02-01"),
        ];
        let summary = summarize(&expenses);

        let categories: Vec<&str> = summary.category_totals.keys().collect();
        assert_eq!(categories, vec!["Transport", "Food"]);

        let months: Vec<&str> = summary.monthly_totals.keys().collect();
        assert_eq!(months, vec!["2024-03", "2024-01", "2024-02"]);

        let chronological: Vec<&str> = summary
            .monthly_totals
            .sorted_by_key()
            .into_iter()
            .map(|(month, _)| month)
            .collect();
        assert_eq!(chronological, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_malformed_amount_is_rejected_without_touching_other_sums() {
        let mut bad = expense(2, "Food", 0.0, "2024-01-09");
        bad.amount = Amount::Text("twelve".to_string());

        let expenses = vec![
            expense(1, "Food", 10.0, "2024-01-05"),
            bad,
            expense(3, "Transport", 7.0, "2024-02-01"),
        ];
        let summary = summarize(&expenses);

        assert_eq!(summary.category_totals.get("Food"), Some(dec(10, 0)));
        assert_eq!(summary.monthly_totals.get("2024-01"), Some(dec(10, 0)));
        assert_eq!(summary.total, dec(17, 0));
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].id, ExpenseId(2));
        assert!(matches!(summary.rejected[0].reason, AmountError::NotANumber(_)));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let expenses = sample_expenses();
        let first = summarize(&expenses);
        let second = summarize(&expenses);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_list() {
        let summary = summarize(&[]);
        assert!(summary.category_totals.is_empty());
        assert!(summary.monthly_totals.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.record_count, 0);
    }
}
