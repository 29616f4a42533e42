pub mod use_backend_status;
pub mod use_expense_editor;
pub mod use_expenses;
pub mod use_session;
