//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod ranking_repo;

pub use ranking_repo::RankingRepository;
