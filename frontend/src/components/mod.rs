pub mod auth_form;
pub mod charts;
pub mod expense_form;
pub mod expense_list;
pub mod export_panel;
pub mod header;
pub mod summary;

pub use auth_form::AuthScreen;
pub use expense_form::ExpenseFormPanel;
pub use expense_list::ExpenseList;
pub use export_panel::ExportPanel;
pub use header::Header;
pub use summary::SummaryCards;
