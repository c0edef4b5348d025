//! Quizrank - Quiz Leaderboard Backend
//!
//! This library provides the core functionality for the Quizrank service,
//! which keeps a dense, score-ordered ranking of quiz contestants.
//!
//! # Features
//!
//! - Ranked insertion with stable tie ordering
//! - Position, identifier and filtered range lookups
//! - Postgres or in-memory ranking stores
//! - Token-protected writes
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Ranking engine and token keys
//! - **Stores**: Transactional ranking storage
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod reply;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use reply::{Reply, ReplyBody};
pub use state::AppState;
