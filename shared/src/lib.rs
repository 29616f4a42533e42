use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod aggregation;
pub mod commands;
pub mod error;
pub mod export;
pub mod forms;
pub mod refresh;
pub mod session;
pub mod view;

pub use aggregation::{summarize, ExpenseSummary, RejectedExpense, Totals};
pub use commands::{AuthCommand, ExpenseCommand, PendingMutation, Settlement};
pub use error::{AmountError, ClientError, ExportError, ValidationError};
pub use export::{ExportFile, Report, ReportLayout};
pub use forms::{AuthForm, ExpenseForm};
pub use refresh::{Epoch, Generation, RefreshGuard};
pub use session::{AuthMode, SessionEvent, SessionState};
pub use view::{CategorySlice, DashboardView, ExpenseRow, SummaryView, TrendPoint};

/// Server-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated account as returned by login/signup.
///
/// The server echoes the password back in its user documents; it is
/// absent here so it is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

/// Reference to the owning user, embedded in expense bodies as `{"id": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
}

/// Amount exactly as the server sent it.
///
/// Parsing is deferred to aggregation so one malformed record cannot
/// fail the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Exact decimal value of the amount; must be finite and non-negative
    pub fn value(&self) -> Result<Decimal, AmountError> {
        let value = match self {
            Amount::Number(n) => {
                if !n.is_finite() {
                    return Err(AmountError::NotFinite);
                }
                // shortest round-trip text, so 0.1 stays 0.1
                parse_decimal(&n.to_string()).ok_or(AmountError::OutOfRange)?
            }
            Amount::Text(text) => {
                parse_decimal(text.trim()).ok_or_else(|| AmountError::NotANumber(text.clone()))?
            }
        };

        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        Ok(value)
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

/// A single recorded spending entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    /// Short label, used verbatim as the aggregation key
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    pub amount: Amount,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Calendar date in `YYYY-MM-DD` form
    #[serde(default, deserialize_with = "null_as_empty")]
    pub expense_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
}

impl Expense {
    /// `YYYY-MM` bucket: the first seven characters of the date, or the whole
    /// date when it is shorter than that
    pub fn month_key(&self) -> &str {
        match self.expense_date.char_indices().nth(7) {
            Some((cut, _)) => &self.expense_date[..cut],
            None => &self.expense_date,
        }
    }
}

/// Body of `POST /api/users/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/users/signup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/expenses` and `PUT /api/expenses/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub expense_date: String,
    pub user: UserRef,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_deserializes_server_shape() {
        let json = r#"{
            "id": 42,
            "category": "Food",
            "amount": 12.5,
            "description": "Lunch",
            "expenseDate": "2024-03-09",
            "user": {"id": 7, "username": "ana", "email": "ana@example.com", "password": "secret"}
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, ExpenseId(42));
        assert_eq!(expense.amount, Amount::Number(12.5));
        assert_eq!(expense.expense_date, "2024-03-09");
        assert_eq!(expense.user, Some(UserRef { id: UserId(7) }));
    }

    #[test]
    fn test_expense_tolerates_nulls_and_string_amounts() {
        let json = r#"{"id": 1, "category": "Misc", "amount": "3.25", "description": null, "expenseDate": "2024-01-01"}"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.description, "");
        assert_eq!(expense.amount, Amount::Text("3.25".to_string()));
        assert_eq!(expense.amount.value().unwrap(), Decimal::new(325, 2));
        assert!(expense.user.is_none());
    }

    #[test]
    fn test_user_drops_password() {
        let json = r#"{"id": 3, "username": "bo", "email": "bo@example.com", "password": "hunter2"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        let round = serde_json::to_value(&user).unwrap();
        assert!(round.get("password").is_none());
    }

    #[test]
    fn test_amount_value_rejects_bad_input() {
        assert!(matches!(
            Amount::Text("abc".to_string()).value(),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(Amount::Number(-1.0).value(), Err(AmountError::Negative(_))));
        assert_eq!(Amount::Number(f64::INFINITY).value(), Err(AmountError::NotFinite));
        assert_eq!(Amount::Number(f64::NAN).value(), Err(AmountError::NotFinite));
        assert_eq!(Amount::Number(0.0).value().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_value_is_exact() {
        assert_eq!(Amount::Number(0.1).value().unwrap(), Decimal::new(1, 1));
        assert_eq!(Amount::Number(12.5).value().unwrap(), Decimal::new(125, 1));
        assert_eq!(Amount::Text(" 7.05 ".to_string()).value().unwrap(), Decimal::new(705, 2));
        assert_eq!(Amount::Text("1e3".to_string()).value().unwrap(), Decimal::from(1000));
    }

    #[test]
    fn test_month_key_truncates() {
        let expense = test_utils::expense(1, "Food", 1.0, "2024-01-05");
        assert_eq!(expense.month_key(), "2024-01");

        let short = test_utils::expense(2, "Food", 1.0, "2024");
        assert_eq!(short.month_key(), "2024");
    }

    #[test]
    fn test_month_key_counts_characters_not_bytes() {
        let wide = test_utils::expense(1, "Food", 1.0, "２０24-01-05");
        assert_eq!(wide.month_key(), "２０24-01");

        let short_wide = test_utils::expense(2, "Food", 1.0, "２０24");
        assert_eq!(short_wide.month_key(), "２０24");
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let payload = ExpensePayload {
            category: "Food".to_string(),
            amount: 10.0,
            description: "Groceries".to_string(),
            expense_date: "2024-01-05".to_string(),
            user: UserRef { id: UserId(9) },
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["expenseDate"], "2024-01-05");
        assert_eq!(value["user"]["id"], 9);
    }
}
