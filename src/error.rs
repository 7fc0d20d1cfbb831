//! Error types for the harness.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use screenkit::{By, Result};
//!
//! async fn example(screen: &Screen) -> Result<()> {
//!     screen.click(&By::test_id("login-button")).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Navigation | [`Error::Navigation`] |
//! | Interaction | [`Error::Interaction`] |
//! | Waiting | [`Error::Timeout`] |
//! | Verification | [`Error::Assertion`] |
//! | External | [`Error::Driver`], [`Error::Io`] |
//!
//! Propagation policy: the base screen abstraction wraps driver-level failures
//! into the variants above and lets them propagate to the scenario uncaught.
//! There is no retry or recovery in the core; scenarios fail fast. The single
//! exception is diagnostic capture, whose failures are logged and swallowed.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Navigation did not settle.
    ///
    /// Returned when the driver reports no settlement (network-idle
    /// equivalent) within the configured timeout, or when a navigating
    /// action leaves the page in a partial state.
    #[error("Navigation failed for {url}: {message}")]
    Navigation {
        /// URL or path that was being navigated to.
        url: String,
        /// Description of the navigation failure.
        message: String,
    },

    // ========================================================================
    // Interaction Errors
    // ========================================================================
    /// Element not actionable.
    ///
    /// Returned when a click or fill target does not resolve to an
    /// actionable element within the timeout.
    #[error("Interaction failed on {selector}: {message}")]
    Interaction {
        /// Selector of the element that could not be interacted with.
        selector: String,
        /// Description of the interaction failure.
        message: String,
    },

    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// A wait condition never became true.
    ///
    /// Returned when a bounded wait or poll exceeds its timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Verification Errors
    // ========================================================================
    /// A verification predicate evaluated to false.
    ///
    /// Reported to the scenario, never retried.
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Description of the failed predicate.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// Driver-level fault that maps to no specific category.
    ///
    /// Returned when the underlying driver misbehaves in a way the
    /// harness cannot classify (lost session, protocol fault).
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the driver fault.
        message: String,
    },

    /// IO error (diagnostic artifact writing).
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an interaction error.
    #[inline]
    pub fn interaction(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Interaction {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates an assertion error.
    #[inline]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a navigation error.
    #[inline]
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(self, Self::Navigation { .. })
    }

    /// Returns `true` if this is an interaction error.
    #[inline]
    #[must_use]
    pub fn is_interaction_error(&self) -> bool {
        matches!(self, Self::Interaction { .. })
    }

    /// Returns `true` if this is an assertion failure.
    #[inline]
    #[must_use]
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::navigation("/settings", "network idle never reached");
        assert_eq!(
            err.to_string(),
            "Navigation failed for /settings: network idle never reached"
        );
    }

    #[test]
    fn test_interaction_error_display() {
        let err = Error::interaction("[data-test=\"login-button\"]", "element not actionable");
        assert_eq!(
            err.to_string(),
            "Interaction failed on [data-test=\"login-button\"]: element not actionable"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::timeout("wait_for_visible", 5000);
        assert_eq!(err.to_string(), "Timeout after 5000ms: wait_for_visible");
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("poll_until", 1000);
        let other_err = Error::driver("session lost");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_assertion_failure() {
        let assert_err = Error::assertion("price list is empty");
        let nav_err = Error::navigation("/results", "settle timeout");

        assert!(assert_err.is_assertion_failure());
        assert!(!nav_err.is_assertion_failure());
        assert!(nav_err.is_navigation_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "artifact dir missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
