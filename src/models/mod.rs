//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod ranking;

pub use ranking::*;
