pub mod api;
pub mod download;
pub mod logging;
