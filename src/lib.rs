pub mod client;
pub mod config;
pub mod fetch;
pub mod models;
pub mod search;
pub mod session;
pub mod state;

pub use client::{ApiClient, ApiError};
pub use search::{dedupe_by_id, match_results, SearchResult};
pub use session::Session;
pub use state::AppState;
