//! Error taxonomy for the expense tracker client.
//!
//! Every error is handled at the action that triggered it and shown to the
//! user, so each variant's `Display` text is the message the user sees.

/// Input problems caught before any network call is made
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error("Username is required.")]
    MissingUsername,
    #[error("{0} is required.")]
    MissingField(&'static str),
    #[error("Amount must be a number, got \"{0}\".")]
    InvalidAmount(String),
    #[error("Amount cannot be negative.")]
    NegativeAmount,
    #[error("Please login first")]
    NotLoggedIn,
}

/// Why a stored amount could not be used in a sum
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("amount \"{0}\" is not a number")]
    NotANumber(String),
    #[error("amount is not finite")]
    NotFinite,
    #[error("amount {0} is negative")]
    Negative(rust_decimal::Decimal),
    #[error("amount is too large to total exactly")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("No expenses to export.")]
    Empty,
}

/// Failures of a gateway call or of the action wrapped around it
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Authentication(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ClientError {
    pub fn invalid_login() -> Self {
        ClientError::Authentication("Invalid email or password.".to_string())
    }

    pub fn signup_rejected() -> Self {
        ClientError::Authentication("Email might already exist".to_string())
    }
}
