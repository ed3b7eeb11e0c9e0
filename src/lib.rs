pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use client::HttpApi;
pub use config::Config;
pub use controller::{MemoryView, SubmitKind, UiController};
pub use state::AppState;
pub use storage::load_data;
