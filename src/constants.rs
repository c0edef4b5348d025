//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "quizrank=info,tower_http=info";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Length in bytes of a generated signing key
pub const GENERATED_KEY_LENGTH: usize = 32;

// =============================================================================
// RANKING
// =============================================================================

/// Ranking entry limits
pub mod ranking {
    /// Maximum contestant name length
    pub const MAX_NAME_LENGTH: usize = 64;

    /// Accepted grade digits
    pub const GRADES: &[char] = &['1', '2', '3'];

    /// Accepted class sections (upper-case)
    pub const CLASSES: &[char] = &['A', 'B', 'C'];

    /// Largest score that every JSON number can carry exactly (2^53 - 1)
    pub const MAX_SCORE: i64 = 9_007_199_254_740_991;

    /// Whole-insert attempts when the store reports a concurrent modification
    pub const INSERT_ATTEMPTS: usize = 2;
}

/// Client-facing error messages
pub mod messages {
    pub const INVALID_NAME: &str = "Invalid name";
    pub const INVALID_GRADE_AND_CLASS: &str = "Invalid grade and class";
    pub const INVALID_SCORE: &str = "Invalid score";
    pub const INVALID_POSITION: &str = "Invalid position";
    pub const INVALID_RANGE: &str = "Invalid range";
    pub const INVALID_ID: &str = "Invalid ID";
    pub const RANKING_NOT_FOUND: &str = "Ranking not found";
    pub const CONCURRENT_MODIFICATION: &str = "Ranking was modified concurrently, try again";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
