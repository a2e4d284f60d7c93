// Library surface for integration tests and headless use.
// The ui module stays out of here: it renders the App owned by main.rs.
pub mod app_dirs;
pub mod config;
pub mod history;
pub mod paragraph;
pub mod report;
pub mod runtime;
pub mod session;
pub mod source;
pub mod stats;
