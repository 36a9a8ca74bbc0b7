//! Accounts, cookie sessions, and per-user wallpaper favorites behind a
//! small JSON API.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod favorites;
pub mod sessions;
pub mod state;

pub use app::build_app;
pub use config::AppConfig;
pub use state::AppState;
