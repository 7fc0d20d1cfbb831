//! Driver capability boundary.
//!
//! The harness does not implement element location, event dispatch, or
//! network interception itself; it consumes them through the [`Driver`]
//! trait. Any automation backend (CDP, WebDriver, an in-memory fake) can
//! sit behind it. Screen objects never call a driver directly; they go
//! through the base [`Screen`](crate::screen::Screen) abstraction, which
//! owns timeout policy and error wrapping.
//!
//! # Contract
//!
//! - [`Driver::resolve`] returns `None` (not an error) when nothing matches.
//! - [`Driver::wait_for`] blocks until the element reaches the requested
//!   state or the timeout elapses, returning [`Error::Timeout`].
//! - [`Driver::wait_for_network_idle`] is the navigation settlement signal.
//! - [`Driver::route`] installs a stub response for matching requests; used
//!   only by error-injection scenarios.
//! - [`Driver::screenshot`] is best-effort; callers treat failures as
//!   non-fatal.
//!
//! [`Error::Timeout`]: crate::error::Error::Timeout

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::selector::By;

pub mod mock;

pub use mock::MockDriver;

// ============================================================================
// ElementHandle
// ============================================================================

/// Opaque, stable handle to a UI control.
///
/// A handle is valid for the lifetime of the screen it was resolved on.
/// Screens must not reuse a handle across unrelated screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Driver-assigned element id.
    pub id: String,

    /// The reference this handle was resolved from.
    pub resolved_from: By,
}

impl ElementHandle {
    /// Creates a new element handle.
    #[inline]
    pub fn new(id: impl Into<String>, resolved_from: By) -> Self {
        Self {
            id: id.into(),
            resolved_from,
        }
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.resolved_from)
    }
}

// ============================================================================
// ElementState
// ============================================================================

/// Target state for [`Driver::wait_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    /// Element is present in the DOM (may be hidden).
    Attached,

    /// Element is present and visible.
    Visible,

    /// Element is absent or hidden.
    Hidden,
}

// ============================================================================
// RouteResponse
// ============================================================================

/// Stub response installed by [`Driver::route`].
///
/// Error-injection scenarios use this to simulate backend failures
/// (e.g. a conversion service returning HTTP 500).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// HTTP status code to fulfill matching requests with.
    pub status: u16,

    /// Response body (JSON text).
    pub body: String,
}

impl RouteResponse {
    /// Creates a stub response.
    #[inline]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates an HTTP 500 response with a JSON error body.
    #[must_use]
    pub fn service_unavailable(error: &str) -> Self {
        Self::new(500, serde_json::json!({ "error": error }).to_string())
    }
}

// ============================================================================
// Driver Trait
// ============================================================================

/// Abstract browser-automation capability consumed by the harness.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Resolves a reference to zero-or-one element.
    ///
    /// Returns `Ok(None)` when nothing matches; absence is a legitimate
    /// observed state, not an error.
    async fn resolve(&self, by: &By) -> Result<Option<ElementHandle>>;

    /// Resolves a reference to all matching elements, in document order.
    async fn resolve_all(&self, by: &By) -> Result<Vec<ElementHandle>>;

    /// Clicks an element.
    async fn click(&self, handle: &ElementHandle) -> Result<()>;

    /// Fills an input element with a value.
    async fn fill(&self, handle: &ElementHandle, value: &str) -> Result<()>;

    /// Reads an element's text content.
    ///
    /// Returns `Ok(None)` when the element has no text content.
    async fn read_text(&self, handle: &ElementHandle) -> Result<Option<String>>;

    /// Probes an element's visibility.
    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool>;

    /// Waits until the reference resolves to an element in `state`.
    ///
    /// # Errors
    ///
    /// Returns a timeout error if the state is not reached within `timeout`.
    async fn wait_for(&self, by: &By, state: ElementState, timeout: Duration)
    -> Result<ElementHandle>;

    /// Requests navigation to an absolute URL.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Waits until the driver reports network idle (navigation settled).
    ///
    /// # Errors
    ///
    /// Returns a timeout error if the network does not settle.
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<()>;

    /// Installs a stub response for requests matching `pattern`.
    async fn route(&self, pattern: &str, response: RouteResponse) -> Result<()>;

    /// Captures a screenshot, returning the raw image bytes.
    async fn screenshot(&self, name: &str) -> Result<Vec<u8>>;
}

// ============================================================================
// Tests
// ============================================================================
