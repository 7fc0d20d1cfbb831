//! Login screen object.
//!
//! Post-condition of [`LoginScreen::login`]: either an authenticated landing
//! state ([`LoginScreen::is_logged_in`]) or a visible error message
//! ([`LoginScreen::error_message`]). Callers must check one or the other,
//! never assume success.

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::error::Result;
use crate::screen::Screen;
use crate::selector::By;

// ============================================================================
// Element Map
// ============================================================================

struct LoginElements {
    username: By,
    password: By,
    login_button: By,
    error_message: By,
    user_profile: By,
    biometric_option: By,
    sms_code_input: By,
    reenrollment_message: By,
}

impl LoginElements {
    fn new() -> Self {
        Self {
            username: By::test_id("username"),
            password: By::test_id("password"),
            login_button: By::test_id("login-button"),
            error_message: By::test_id("error-message"),
            user_profile: By::test_id("user-profile"),
            biometric_option: By::test_id("biometric-login-option"),
            sms_code_input: By::test_id("sms-code-input"),
            reenrollment_message: By::test_id("biometric-reenrollment-message"),
        }
    }
}

// ============================================================================
// LoginScreen
// ============================================================================

/// Page object for the login screen.
pub struct LoginScreen {
    screen: Screen,
    elements: LoginElements,
}

impl LoginScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: LoginElements::new(),
        }
    }

    /// Navigates to the login screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/login").await
    }

    /// Fills identity and secret and performs the navigating login click.
    ///
    /// Does not assert success; check [`LoginScreen::is_logged_in`] or
    /// [`LoginScreen::error_message`] afterwards.
    pub async fn login(&self, identity: &str, secret: &str) -> Result<()> {
        debug!(identity = %identity, "Logging in");
        self.screen.fill(&self.elements.username, identity).await?;
        self.screen.fill(&self.elements.password, secret).await?;
        self.screen
            .with_navigation(|| async { self.screen.click(&self.elements.login_button).await })
            .await
    }

    /// Whether the authenticated landing state is visible.
    pub async fn is_logged_in(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.user_profile).await
    }

    /// The login error message, if one is displayed.
    pub async fn error_message(&self) -> Result<Option<String>> {
        if !self.screen.is_visible(&self.elements.error_message).await? {
            return Ok(None);
        }
        self.screen.read_text(&self.elements.error_message).await
    }

    /// Whether the biometric login shortcut is offered.
    pub async fn is_biometric_login_available(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.biometric_option).await
    }

    /// Logs in through the biometric shortcut.
    ///
    /// The biometric accept is simulated by the environment (real biometric
    /// hardware is out of scope); this only drives the UI side and waits
    /// for the resulting navigation.
    pub async fn login_with_biometrics(&self) -> Result<()> {
        debug!("Logging in with biometrics");
        self.screen
            .with_navigation(|| async { self.screen.click(&self.elements.biometric_option).await })
            .await
    }

    /// Whether an SMS code challenge is being requested.
    pub async fn is_sms_code_requested(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.sms_code_input).await
    }

    /// Whether a password is being requested (fallback from biometrics).
    pub async fn is_password_requested(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.password).await
    }

    /// Whether the biometric re-enrollment notice is shown.
    pub async fn is_reenrollment_message_shown(&self) -> Result<bool> {
        self.screen
            .is_visible(&self.elements.reenrollment_message)
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use crate::config::HarnessConfig;
    use crate::driver::mock::{Effect, MockDriver, Node};

    fn login_screen(driver: &MockDriver) -> LoginScreen {
        let config = HarnessConfig::new("https://app.example.test")
            .unwrap()
            .with_default_timeout(Duration::from_millis(500));
        LoginScreen::new(Screen::new(Arc::new(driver.clone()), Arc::new(config)))
    }

    fn install_login_form(driver: &MockDriver) {
        driver.install(&By::test_id("username"), Node::visible(""));
        driver.install(&By::test_id("password"), Node::visible(""));
        driver.install(&By::test_id("login-button"), Node::visible("Log in"));
        driver.install(&By::test_id("user-profile"), Node::hidden("test-user"));
        driver.install(&By::test_id("error-message"), Node::hidden(""));
    }

    #[tokio::test]
    async fn test_login_fills_credentials_and_clicks() {
        let driver = MockDriver::new();
        install_login_form(&driver);
        driver.on_click(
            MockDriver::trigger(&By::test_id("login-button"), Some("Log in")),
            vec![Effect::Show(By::test_id("user-profile"))],
        );
        let login = login_screen(&driver);

        login.login("test-user", "test-password").await.unwrap();

        assert_eq!(
            driver.value_of(&By::test_id("username")).as_deref(),
            Some("test-user")
        );
        assert_eq!(
            driver.value_of(&By::test_id("password")).as_deref(),
            Some("test-password")
        );
        assert!(login.is_logged_in().await.unwrap());
        assert!(login.error_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_surfaces_error_message() {
        let driver = MockDriver::new();
        install_login_form(&driver);
        driver.on_click(
            MockDriver::trigger(&By::test_id("login-button"), Some("Log in")),
            vec![
                Effect::SetText(By::test_id("error-message"), "Invalid credentials".into()),
                Effect::Show(By::test_id("error-message")),
            ],
        );
        let login = login_screen(&driver);

        login.login("test-user", "wrong").await.unwrap();

        assert!(!login.is_logged_in().await.unwrap());
        assert_eq!(
            login.error_message().await.unwrap().as_deref(),
            Some("Invalid credentials")
        );
    }

    #[tokio::test]
    async fn test_biometric_shortcut_probe_and_login() {
        let driver = MockDriver::new();
        install_login_form(&driver);
        let login = login_screen(&driver);
        assert!(!login.is_biometric_login_available().await.unwrap());

        driver.install(
            &By::test_id("biometric-login-option"),
            Node::visible("Use biometrics"),
        );
        assert!(login.is_biometric_login_available().await.unwrap());

        driver.on_click(
            MockDriver::trigger(
                &By::test_id("biometric-login-option"),
                Some("Use biometrics"),
            ),
            vec![Effect::Show(By::test_id("user-profile"))],
        );
        login.login_with_biometrics().await.unwrap();
        assert!(login.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_challenge_probes_never_error_on_absence() {
        let driver = MockDriver::new();
        let login = login_screen(&driver);

        assert!(!login.is_sms_code_requested().await.unwrap());
        assert!(!login.is_password_requested().await.unwrap());
        assert!(!login.is_reenrollment_message_shown().await.unwrap());
    }
}
