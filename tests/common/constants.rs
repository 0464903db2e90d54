//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (credentials, catalog titles, etc.),
//! update only this file.

// ============================================================================
// Test Credentials
// ============================================================================

/// Email used by the default test visitor
pub const TEST_EMAIL: &str = "a@b.com";

/// Password used by the default test visitor (any non-empty value works)
pub const TEST_PASS: &str = "x";

// ============================================================================
// Test Profile
// ============================================================================

pub const TEST_NAME: &str = "Dana";

pub const TEST_AGE: u32 = 30;

pub const TEST_MOOD: &str = "happy";

pub const TEST_FEELINGS: &str = "great day";

// ============================================================================
// Built-in Catalog Titles
// ============================================================================

pub const HAPPY_VIDEO_TITLE: &str = "Positive Vibes Meditation";

pub const HAPPY_PODCAST_TITLE: &str = "Joy and Gratitude";

pub const NEUTRAL_VIDEO_TITLE: &str = "Mindfulness Practice";

pub const NEUTRAL_PODCAST_TITLE: &str = "Daily Wellness";

pub const SAD_VIDEO_TITLE: &str = "Calming Nature Sounds";

pub const SAD_PODCAST_TITLE: &str = "Overcoming Challenges";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
