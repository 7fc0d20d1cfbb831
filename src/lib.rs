//! Screenkit - Screen-object UI test harness.
//!
//! This library provides the page-object layer for UI test scenarios:
//! authentication flows (login, biometric enrollment, device trust) and
//! accommodation search/pricing (currency selection, price-format
//! verification).
//!
//! # Architecture
//!
//! Screen objects never drive the browser directly. Everything goes through
//! two seams:
//!
//! - **[`Driver`]**: the automation capability (element resolution, events,
//!   network stubs). Any backend can implement it; [`MockDriver`] is the
//!   in-memory one used by this crate's own tests.
//! - **[`Screen`]**: the base abstraction owning timeout policy, error
//!   wrapping, and diagnostic capture, shared by every screen object.
//!
//! Verification logic is pure: screen objects extract data, the [`verify`]
//! functions judge it. A [`Session`] ties one driver and configuration to
//! the full set of screens.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use screenkit::{HarnessConfig, MockDriver, Result, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = HarnessConfig::new("https://app.example.test")?;
//!     let session = Session::new(Arc::new(MockDriver::new()), config);
//!
//!     let login = session.login();
//!     login.open().await?;
//!     let credentials = session.config().credentials.clone();
//!     login.login(&credentials.identity, &credentials.secret).await?;
//!     assert!(login.is_logged_in().await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Harness configuration and test credentials |
//! | [`currency`] | Canonical currency descriptors |
//! | [`driver`] | Driver capability trait and [`MockDriver`] |
//! | [`error`] | Error taxonomy and [`Result`] alias |
//! | [`screen`] | Base screen abstraction |
//! | [`screens`] | Page objects for each application screen |
//! | [`selector`] | Element reference strategies |
//! | [`session`] | Session facade over driver + screens |
//! | [`verify`] | Pure verification predicates |

// ============================================================================
// Modules
// ============================================================================

/// Harness configuration and test credentials.
///
/// Read-only after initialization; shared by reference across a session.
pub mod config;

/// Canonical currency descriptors.
///
/// The fixed list the application's currency filter must offer, with the
/// exact display labels and marker logic.
pub mod currency;

/// Driver capability boundary.
///
/// The [`Driver`] trait plus the scriptable in-memory [`MockDriver`].
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Base screen abstraction.
///
/// Uniform timeout policy, error wrapping, polling, and diagnostics.
pub mod screen;

/// Page objects for each application screen.
pub mod screens;

/// Element reference strategies.
///
/// [`By`] names controls by test id, CSS, or exact text.
pub mod selector;

/// Session facade.
///
/// Binds one driver and configuration to the screen objects.
pub mod session;

/// Pure verification predicates.
///
/// Currency-format, filter completeness, switch consistency, trust.
pub mod verify;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::{Credentials, HarnessConfig};

// Currency
pub use currency::{by_code, CurrencyDescriptor, SUPPORTED_CURRENCIES};

// Driver types
pub use driver::{Driver, ElementHandle, ElementState, MockDriver, RouteResponse};

// Error types
pub use error::{Error, Result};

// Screen layer
pub use screen::Screen;
pub use screens::{
    AdvancedFiltersPanel, BiometricScreen, EnrollmentState, LoginScreen, NotificationsScreen,
    ResultsScreen, SearchScreen, ToggleState, TrustSettingsScreen,
};
pub use selector::By;
pub use session::Session;

// Verification
pub use verify::TrustEvidence;
