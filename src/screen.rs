//! Base screen abstraction.
//!
//! Every screen object routes all driver interaction through [`Screen`], so
//! timeout policy, error wrapping, and diagnostic capture stay uniform.
//! Screen objects never talk to the [`Driver`] directly.
//!
//! # Guarantees
//!
//! | Operation | Failure mode |
//! |-----------|--------------|
//! | [`Screen::navigate`] | [`Error::Navigation`] if settlement never comes |
//! | [`Screen::click`], [`Screen::fill`] | [`Error::Interaction`] if the target is not actionable in time |
//! | [`Screen::wait_for_visible`] | [`Error::Timeout`] |
//! | [`Screen::is_visible`], [`Screen::read_text`] | never fail on absence |
//! | [`Screen::with_navigation`] | completed navigation or [`Error::Navigation`], never silent partial state |
//! | [`Screen::capture_diagnostic`] | never fails the caller; errors are logged and swallowed |
//!
//! [`Error::Navigation`]: crate::error::Error::Navigation
//! [`Error::Interaction`]: crate::error::Error::Interaction
//! [`Error::Timeout`]: crate::error::Error::Timeout

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::driver::{Driver, ElementHandle, ElementState};
use crate::error::{Error, Result};
use crate::selector::By;

// ============================================================================
// Screen
// ============================================================================

/// Shared primitive operation set over the driver capability.
///
/// Cheap to clone: screen objects hold it by value. Stateless beyond the
/// driver and configuration references; no read value is ever cached.
#[derive(Clone)]
pub struct Screen {
    /// Underlying automation driver.
    driver: Arc<dyn Driver>,

    /// Process-wide read-only configuration.
    config: Arc<HarnessConfig>,
}

// ============================================================================
// Construction
// ============================================================================

impl Screen {
    /// Creates the base abstraction over a driver and configuration.
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, config: Arc<HarnessConfig>) -> Self {
        Self { driver, config }
    }

    /// Returns the harness configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the underlying driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }
}

// ============================================================================
// Navigation
// ============================================================================

impl Screen {
    /// Navigates to a path relative to the configured base URL.
    ///
    /// Returns once the driver reports the navigation settled
    /// (network-idle equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Navigation`] if the driver reports no settlement
    /// within the configured timeout.
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let url = self.config.join_url(path)?;
        debug!(url = %url, "Navigating");

        self.driver.navigate(url.as_str()).await?;
        self.settle(path).await
    }

    /// Performs `action` and guarantees the caller observes either a
    /// completed navigation or a surfaced [`Error::Navigation`].
    ///
    /// # Errors
    ///
    /// Propagates the action's error, or [`Error::Navigation`] if the
    /// triggered navigation never settles.
    pub async fn with_navigation<F, Fut, T>(&self, action: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = action().await?;
        self.settle("current page").await?;
        Ok(value)
    }

    async fn settle(&self, context: &str) -> Result<()> {
        self.driver
            .wait_for_network_idle(self.config.default_timeout)
            .await
            .map_err(|e| {
                Error::navigation(context, format!("navigation did not settle: {e}"))
            })
    }
}

// ============================================================================
// Interaction
// ============================================================================

impl Screen {
    /// Clicks the element the reference resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interaction`] if the reference does not resolve to
    /// an actionable element within the default timeout.
    pub async fn click(&self, by: &By) -> Result<()> {
        debug!(selector = %by, "Clicking");
        let handle = self.actionable(by).await?;
        self.driver.click(&handle).await
    }

    /// Fills the element the reference resolves to with a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interaction`] if the reference does not resolve to
    /// an actionable element within the default timeout.
    pub async fn fill(&self, by: &By, value: &str) -> Result<()> {
        debug!(selector = %by, value_len = value.len(), "Filling");
        let handle = self.actionable(by).await?;
        self.driver.fill(&handle, value).await
    }

    async fn actionable(&self, by: &By) -> Result<ElementHandle> {
        self.driver
            .wait_for(by, ElementState::Visible, self.config.default_timeout)
            .await
            .map_err(|e| {
                Error::interaction(by.to_string(), format!("not actionable: {e}"))
            })
    }
}

// ============================================================================
// Observation
// ============================================================================

impl Screen {
    /// Suspends until the reference resolves and is visible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] after `timeout` (or the configured
    /// default when `None`).
    pub async fn wait_for_visible(&self, by: &By, timeout: Option<Duration>) -> Result<ElementHandle> {
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        debug!(selector = %by, timeout_ms = timeout.as_millis() as u64, "Waiting for visible");
        self.driver.wait_for(by, ElementState::Visible, timeout).await
    }

    /// Non-blocking visibility probe.
    ///
    /// An unresolved reference yields `false`; visibility absence is a
    /// legitimate observed state, not an error.
    pub async fn is_visible(&self, by: &By) -> Result<bool> {
        match self.driver.resolve(by).await? {
            Some(handle) => self.driver.is_visible(&handle).await,
            None => Ok(false),
        }
    }

    /// Reads an element's text content.
    ///
    /// An unresolved reference or absent content yields `None`; this never
    /// fails on missing content.
    pub async fn read_text(&self, by: &By) -> Result<Option<String>> {
        match self.driver.resolve(by).await? {
            Some(handle) => self.driver.read_text(&handle).await,
            None => Ok(None),
        }
    }

    /// Reads the trimmed, non-empty texts of every element the reference
    /// resolves to, preserving document order.
    pub async fn read_texts(&self, by: &By) -> Result<Vec<String>> {
        let handles = self.driver.resolve_all(by).await?;
        let mut texts = Vec::with_capacity(handles.len());
        for handle in &handles {
            if let Some(text) = self.driver.read_text(handle).await? {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed.to_string());
                }
            }
        }
        Ok(texts)
    }
}

// ============================================================================
// Polling
// ============================================================================

impl Screen {
    /// Bounded poll-until-predicate combinator.
    ///
    /// Evaluates `predicate` every poll interval until it yields `true` or
    /// the timeout elapses. This is the eventual-consistency wait shared by
    /// any screen that needs one; screens must not hand-roll poll loops.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] carrying `operation` if the predicate
    /// never becomes true, and propagates predicate errors immediately.
    pub async fn poll_until<F, Fut>(
        &self,
        operation: &str,
        timeout: Option<Duration>,
        mut predicate: F,
    ) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if predicate().await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::timeout(operation, timeout.as_millis() as u64));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

impl Screen {
    /// Best-effort diagnostic capture.
    ///
    /// Writes a screenshot named `name` into the configured artifact
    /// directory. Capture failure must never fail the calling operation:
    /// errors are logged and swallowed.
    pub async fn capture_diagnostic(&self, name: &str) {
        if let Err(e) = self.try_capture(name).await {
            warn!(name = %name, error = %e, "Diagnostic capture failed");
        }
    }

    async fn try_capture(&self, name: &str) -> Result<()> {
        let bytes = self.driver.screenshot(name).await?;
        let dir = &self.config.artifact_dir;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{name}.png"));
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "Diagnostic captured");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::mock::{Effect, MockDriver, Node};

    fn screen_with(driver: &MockDriver) -> Screen {
        let config = HarnessConfig::new("https://app.example.test")
            .unwrap()
            .with_default_timeout(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(20));
        Screen::new(Arc::new(driver.clone()), Arc::new(config))
    }

    #[tokio::test]
    async fn test_navigate_joins_base_url_and_settles() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        screen.navigate("/settings/authentication").await.unwrap();
        assert_eq!(
            driver.navigations(),
            vec!["https://app.example.test/settings/authentication".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_without_settlement_is_navigation_error() {
        let driver = MockDriver::new();
        driver.set_never_idle();
        let screen = screen_with(&driver);

        let err = screen.navigate("/results").await.unwrap_err();
        assert!(err.is_navigation_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_unresolvable_is_interaction_error() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        let err = screen.click(&By::test_id("missing")).await.unwrap_err();
        assert!(err.is_interaction_error());
    }

    #[tokio::test]
    async fn test_fill_sets_value() {
        let driver = MockDriver::new();
        driver.install(&By::test_id("username"), Node::visible(""));
        let screen = screen_with(&driver);

        screen
            .fill(&By::test_id("username"), "test-user")
            .await
            .unwrap();
        assert_eq!(
            driver.value_of(&By::test_id("username")).as_deref(),
            Some("test-user")
        );
    }

    #[tokio::test]
    async fn test_is_visible_absent_is_false_not_error() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        assert!(!screen.is_visible(&By::test_id("ghost")).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_text_absent_is_none() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        assert!(screen.read_text(&By::test_id("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_texts_preserves_order_and_trims() {
        let driver = MockDriver::new();
        let price = By::test_id("accommodation-price");
        driver.install_many(&price, &["  EUR 978 Euro 92  ", "EUR 978 Euro 455", "   "]);
        let screen = screen_with(&driver);

        let texts = screen.read_texts(&price).await.unwrap();
        assert_eq!(texts, vec!["EUR 978 Euro 92", "EUR 978 Euro 455"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_visible_times_out() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        let err = screen
            .wait_for_visible(&By::test_id("never"), Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_sees_delayed_update() {
        let driver = MockDriver::new();
        let status = By::test_id("status");
        driver.install(&By::test_id("refresh"), Node::visible("refresh"));
        driver.install(&status, Node::visible("stale"));
        driver.on_click(
            MockDriver::trigger(&By::test_id("refresh"), Some("refresh")),
            vec![Effect::Delayed(
                Duration::from_millis(150),
                Box::new(Effect::SetText(status.clone(), "fresh".into())),
            )],
        );
        let screen = screen_with(&driver);

        screen.click(&By::test_id("refresh")).await.unwrap();
        screen
            .poll_until("status refresh", None, || async {
                Ok(screen.read_text(&status).await?.as_deref() == Some("fresh"))
            })
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_timeout_names_operation() {
        let driver = MockDriver::new();
        let screen = screen_with(&driver);

        let err = screen
            .poll_until("prices updated", Some(Duration::from_millis(80)), || async {
                Ok(false)
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Timeout after 80ms: prices updated");
    }

    #[tokio::test]
    async fn test_capture_diagnostic_failure_is_swallowed() {
        let driver = MockDriver::new();
        driver.fail_screenshots();
        let screen = screen_with(&driver);

        // Must not panic or propagate.
        screen.capture_diagnostic("login-failure").await;
    }

    #[tokio::test]
    async fn test_capture_diagnostic_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let driver = MockDriver::new();
        let config = HarnessConfig::new("https://app.example.test")
            .unwrap()
            .with_artifact_dir(dir.path());
        let screen = Screen::new(Arc::new(driver), Arc::new(config));

        screen.capture_diagnostic("trust-status").await;
        let written = std::fs::read(dir.path().join("trust-status.png")).unwrap();
        assert_eq!(written, b"PNG:trust-status");
    }

    #[tokio::test]
    async fn test_with_navigation_runs_action_then_settles() {
        let driver = MockDriver::new();
        driver.install(&By::test_id("login-button"), Node::visible("Log in"));
        let screen = screen_with(&driver);

        screen
            .with_navigation(|| async { screen.click(&By::test_id("login-button")).await })
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_navigation_surfaces_unsettled_navigation() {
        let driver = MockDriver::new();
        driver.set_never_idle();
        let screen = screen_with(&driver);

        let err = screen
            .with_navigation(|| async { Ok(()) })
            .await
            .unwrap_err();
        assert!(err.is_navigation_error());
    }
}
