//! Raw form input and its validation into typed request bodies.

use crate::{
    error::ValidationError, Expense, ExpensePayload, LoginRequest, SignupRequest, UserId, UserRef,
};

/// Fields of the login/signup form as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn login_request(&self) -> Result<LoginRequest, ValidationError> {
        let (email, password) = self.credentials()?;
        Ok(LoginRequest { email, password })
    }

    pub fn signup_request(&self) -> Result<SignupRequest, ValidationError> {
        let (email, password) = self.credentials()?;
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        Ok(SignupRequest {
            username: username.to_string(),
            email,
            password,
        })
    }

    // Email is trimmed, the password is sent exactly as typed.
    fn credentials(&self) -> Result<(String, String), ValidationError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok((email.to_string(), self.password.clone()))
    }
}

/// Fields of the add/edit expense form as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: String,
    pub description: String,
    pub expense_date: String,
}

impl ExpenseForm {
    /// Form pre-filled with an existing record, for editing
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            category: expense.category.clone(),
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            expense_date: expense.expense_date.clone(),
        }
    }

    /// Whether every field has content; drives the submit button state
    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    pub fn to_payload(&self, owner: UserId) -> Result<ExpensePayload, ValidationError> {
        if let Some(field) = self.first_missing() {
            return Err(ValidationError::MissingField(field));
        }

        let amount_text = self.amount.trim();
        let amount = amount_text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidAmount(amount_text.to_string()))?;
        if amount < 0.0 {
            return Err(ValidationError::NegativeAmount);
        }

        Ok(ExpensePayload {
            category: self.category.trim().to_string(),
            amount,
            description: self.description.trim().to_string(),
            expense_date: self.expense_date.trim().to_string(),
            user: UserRef { id: owner },
        })
    }

    fn first_missing(&self) -> Option<&'static str> {
        [
            ("Category", &self.category),
            ("Amount", &self.amount),
            ("Description", &self.description),
            ("Date", &self.expense_date),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::expense;

    fn filled_form() -> ExpenseForm {
        ExpenseForm {
            category: " Food ".to_string(),
            amount: "12.50".to_string(),
            description: "Lunch".to_string(),
            expense_date: "2024-04-02".to_string(),
        }
    }

    #[test]
    fn test_login_requires_email_and_password() {
        let form = AuthForm {
            email: "   ".to_string(),
            password: "pw".to_string(),
            ..AuthForm::default()
        };
        assert_eq!(form.login_request(), Err(ValidationError::MissingCredentials));

        let form = AuthForm {
            email: " a@b.c ".to_string(),
            password: " pw ".to_string(),
            ..AuthForm::default()
        };
        let request = form.login_request().unwrap();
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.password, " pw ");
    }

    #[test]
    fn test_signup_requires_username() {
        let form = AuthForm {
            username: "  ".to_string(),
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(form.signup_request(), Err(ValidationError::MissingUsername));

        let form = AuthForm {
            username: " ana ".to_string(),
            ..form
        };
        assert_eq!(form.signup_request().unwrap().username, "ana");
    }

    #[test]
    fn test_expense_form_completeness() {
        assert!(!ExpenseForm::default().is_complete());
        assert!(filled_form().is_complete());

        let form = ExpenseForm {
            description: " ".to_string(),
            ..filled_form()
        };
        assert!(!form.is_complete());
        assert_eq!(
            form.to_payload(UserId(1)),
            Err(ValidationError::MissingField("Description"))
        );
    }

    #[test]
    fn test_expense_form_payload() {
        let payload = filled_form().to_payload(UserId(5)).unwrap();
        assert_eq!(payload.category, "Food");
        assert_eq!(payload.amount, 12.5);
        assert_eq!(payload.expense_date, "2024-04-02");
        assert_eq!(payload.user.id, UserId(5));
    }

    #[test]
    fn test_expense_form_rejects_bad_amounts() {
        let form = ExpenseForm {
            amount: "12,50".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.to_payload(UserId(1)),
            Err(ValidationError::InvalidAmount("12,50".to_string()))
        );

        let form = ExpenseForm {
            amount: "-3".to_string(),
            ..filled_form()
        };
        assert_eq!(form.to_payload(UserId(1)), Err(ValidationError::NegativeAmount));
    }

    #[test]
    fn test_from_expense_prefills_every_field() {
        let mut record = expense(3, "Transport", 7.0, "2024-02-01");
        record.description = "Bus".to_string();

        let form = ExpenseForm::from_expense(&record);
        assert_eq!(form.category, "Transport");
        assert_eq!(form.amount, "7");
        assert_eq!(form.description, "Bus");
        assert_eq!(form.expense_date, "2024-02-01");
    }
}
