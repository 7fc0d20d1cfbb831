//! Screen objects.
//!
//! One object per application screen. Each owns a fixed element map (plain
//! [`By`](crate::selector::By) data, keyed by stable `data-test` attributes)
//! and a base [`Screen`](crate::screen::Screen), and exposes
//! intention-revealing operations built only from the base primitives.
//!
//! Screen objects hold no other state: no read value is cached across
//! calls, and the only branching on environment state is the idempotency
//! guard ("act only if the observed state differs from the desired one").
//! They are constructed per scenario (or per navigation) and discarded at
//! scenario end.

/// Biometric enrollment flow and its state machine.
pub mod biometric;

/// Advanced-filters panel (currency selection).
pub mod filters;

/// Login screen.
pub mod login;

/// Notifications settings (toggle with idempotency guard).
pub mod notifications;

/// Accommodation search results (price list, conversion errors).
pub mod results;

/// Accommodation search entry screen.
pub mod search;

/// Authentication/trust settings.
pub mod trust;

pub use biometric::{BiometricScreen, EnrollmentState};
pub use filters::AdvancedFiltersPanel;
pub use login::LoginScreen;
pub use notifications::{NotificationsScreen, ToggleState};
pub use results::ResultsScreen;
pub use search::SearchScreen;
pub use trust::TrustSettingsScreen;
