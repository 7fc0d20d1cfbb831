//! Session facade.
//!
//! A [`Session`] binds one driver and one configuration, and hands out the
//! screen objects over that shared base abstraction. Scenario code composes
//! screens through it instead of wiring each screen by hand:
//!
//! ```ignore
//! let session = Session::new(driver, config);
//! session.login().open().await?;
//! session.login().login(&identity, &secret).await?;
//! let state = session.biometric().enroll().await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::config::HarnessConfig;
use crate::driver::Driver;
use crate::screen::Screen;
use crate::screens::{
    AdvancedFiltersPanel, BiometricScreen, LoginScreen, NotificationsScreen, ResultsScreen,
    SearchScreen, TrustSettingsScreen,
};

// ============================================================================
// Session
// ============================================================================

/// Entry point tying a driver and configuration to the screen objects.
pub struct Session {
    screen: Screen,
}

impl Session {
    /// Creates a session over a driver and configuration.
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, config: HarnessConfig) -> Self {
        Self {
            screen: Screen::new(driver, Arc::new(config)),
        }
    }

    /// The shared base abstraction.
    #[inline]
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The harness configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        self.screen.config()
    }

    /// Login screen object.
    #[must_use]
    pub fn login(&self) -> LoginScreen {
        LoginScreen::new(self.screen.clone())
    }

    /// Biometric setup screen object.
    #[must_use]
    pub fn biometric(&self) -> BiometricScreen {
        BiometricScreen::new(self.screen.clone())
    }

    /// Authentication/trust settings screen object.
    #[must_use]
    pub fn trust_settings(&self) -> TrustSettingsScreen {
        TrustSettingsScreen::new(self.screen.clone())
    }

    /// Notifications settings screen object.
    #[must_use]
    pub fn notifications(&self) -> NotificationsScreen {
        NotificationsScreen::new(self.screen.clone())
    }

    /// Accommodation search screen object.
    #[must_use]
    pub fn search(&self) -> SearchScreen {
        SearchScreen::new(self.screen.clone())
    }

    /// Advanced filters panel object.
    #[must_use]
    pub fn filters(&self) -> AdvancedFiltersPanel {
        AdvancedFiltersPanel::new(self.screen.clone())
    }

    /// Accommodation results screen object.
    #[must_use]
    pub fn results(&self) -> ResultsScreen {
        ResultsScreen::new(self.screen.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
