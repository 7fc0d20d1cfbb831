//! Element reference strategies.
//!
//! Screen objects key their elements by stable attributes, never by visual
//! position or generated class names. The preferred strategy is [`By::TestId`],
//! which lowers to a `[data-test="..."]` attribute selector.
//!
//! # Example
//!
//! ```ignore
//! use screenkit::By;
//!
//! // Stable data-test attribute (preferred)
//! let login = By::test_id("login-button");
//!
//! // Raw CSS selector
//! let prices = By::css("[data-test=\"accommodation-price\"] span");
//!
//! // Exact text content (currency option labels)
//! let option = By::text("EUR 978 Euro");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy.
///
/// One reference resolves to zero-or-one element within a screen's lifetime
/// ([`resolve_all`](crate::driver::Driver::resolve_all) is the explicit
/// multi-element exception for list reads). References are plain data: screens
/// declare them once and never share them across unrelated screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// Stable test attribute (lowered to `[data-test="..."]`).
    ///
    /// # Example
    /// ```ignore
    /// By::TestId("currency-selector".into())
    /// ```
    #[serde(rename = "testId")]
    TestId(String),

    /// CSS selector.
    ///
    /// # Example
    /// ```ignore
    /// By::Css("[data-test=\"currency-option\"]".into())
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// Exact text content match.
    ///
    /// Finds the element whose trimmed text content equals the value.
    /// Used for option labels where an exact match is required (a prefix
    /// or fuzzy match could select a wrong adjacent option).
    #[serde(rename = "text")]
    Text(String),
}

impl By {
    /// Creates a stable test-attribute selector.
    #[inline]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an exact text content selector.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::TestId(_) => "testId",
            Self::Css(_) => "css",
            Self::Text(_) => "text",
        }
    }

    /// Returns the raw selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::TestId(v) | Self::Css(v) | Self::Text(v) => v,
        }
    }

    /// Lowers the reference to a CSS selector where the strategy permits.
    ///
    /// [`By::Text`] has no CSS equivalent and returns `None`; drivers match
    /// it against element text content directly.
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::TestId(id) => Some(format!("[data-test=\"{id}\"]")),
            Self::Css(css) => Some(css.clone()),
            Self::Text(_) => None,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_css() {
            Some(css) => write!(f, "{css}"),
            None => write!(f, "text={}", self.value()),
        }
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to a test-id selector (default strategy).
    fn from(s: &str) -> Self {
        Self::TestId(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to a test-id selector (default strategy).
    fn from(s: String) -> Self {
        Self::TestId(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
