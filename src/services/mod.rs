//! Business logic services

pub mod key_manager;
pub mod ranking_service;

pub use key_manager::KeyManager;
pub use ranking_service::RankingService;
