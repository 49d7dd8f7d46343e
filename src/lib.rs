pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod router;
pub mod state;
pub mod store;
pub mod templates;
