//! Projection of an expense list and its summary into everything the
//! dashboard shows: list rows, totals and chart series.
//!
//! The projection is rebuilt in full from the list on every refresh; nothing
//! rendered is ever used as a source of data.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{aggregation::ExpenseSummary, Expense, ExpenseId};

/// One rendered expense entry with its edit/delete affordances
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub category: String,
    pub amount_label: String,
    pub description: String,
    pub date: String,
    /// Row is the current edit target
    pub editing: bool,
    /// Amount could not be parsed and is excluded from totals
    pub rejected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub total_label: String,
    pub record_count: usize,
    pub rejected_count: usize,
}

/// Slice of the category proportion chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    pub value: f64,
    /// Percentage of the overall total, 0 to 100
    pub share: f64,
}

/// Point of the monthly trend chart
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// `YYYY-MM` key
    pub month: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<ExpenseRow>,
    pub summary: SummaryView,
    pub category_chart: Vec<CategorySlice>,
    /// Ordered by month ascending
    pub trend_chart: Vec<TrendPoint>,
}

impl DashboardView {
    /// What the dashboard shows with no data (after logout, before first load)
    pub fn empty(currency: &str) -> Self {
        Self {
            rows: Vec::new(),
            summary: SummaryView {
                total_label: format_money(Decimal::ZERO, currency),
                record_count: 0,
                rejected_count: 0,
            },
            category_chart: Vec::new(),
            trend_chart: Vec::new(),
        }
    }

    pub fn project(
        expenses: &[Expense],
        summary: &ExpenseSummary,
        edit_target: Option<ExpenseId>,
        currency: &str,
    ) -> Self {
        let rows = expenses
            .iter()
            .map(|expense| {
                let (amount_label, rejected) = match expense.amount.value() {
                    Ok(value) => (format_money(value, currency), false),
                    Err(_) => (format!("{}{}", currency, expense.amount), true),
                };
                ExpenseRow {
                    id: expense.id,
                    category: expense.category.clone(),
                    amount_label,
                    description: expense.description.clone(),
                    date: expense.expense_date.clone(),
                    editing: edit_target == Some(expense.id),
                    rejected,
                }
            })
            .collect();

        let category_chart = summary
            .category_totals
            .iter()
            .map(|(category, value)| CategorySlice {
                label: category.to_string(),
                value: chart_value(value),
                share: if summary.total > Decimal::ZERO {
                    chart_value(value / summary.total * Decimal::ONE_HUNDRED)
                } else {
                    0.0
                },
            })
            .collect();

        let trend_chart = summary
            .monthly_totals
            .sorted_by_key()
            .into_iter()
            .map(|(month, value)| TrendPoint {
                month: month.to_string(),
                label: month_label(month),
                value: chart_value(value),
            })
            .collect();

        Self {
            rows,
            summary: SummaryView {
                total_label: format_money(summary.total, currency),
                record_count: summary.record_count,
                rejected_count: summary.rejected.len(),
            },
            category_chart,
            trend_chart,
        }
    }
}

/// `₱1234.50` style amount with two decimals, halves rounded away from zero
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", currency, rounded)
}

/// Charts plot in floating point; totals stay exact up to this point
fn chart_value(amount: Decimal) -> f64 {
    f64::try_from(amount).unwrap_or_default()
}

/// `2024-01` -> `Jan 2024`; keys that are not a valid month are returned as-is
pub fn month_label(month_key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month_key), "%Y-%m-%d")
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|_| month_key.to_string())
}
