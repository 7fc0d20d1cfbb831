//! Notifications settings screen object.
//!
//! The push-notifications toggle is a two-state control, modeled as an
//! explicit [`ToggleState`] read-then-branch rather than ad hoc boolean
//! checks. Enable/disable are idempotent: the toggle is only clicked when
//! the observed state differs from the desired one, so an already-correct
//! control is never flipped.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::screen::Screen;
use crate::selector::By;

/// Bounded wait for the system permission dialog (shorter than the default
/// element timeout; absence of the dialog is an expected outcome).
const PERMISSION_DIALOG_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// ToggleState
// ============================================================================

/// Observed state of a two-state toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    /// The control reports itself on.
    Enabled,

    /// The control reports itself off (or its status is unreadable).
    Disabled,
}

impl ToggleState {
    /// Derives the state from the rendered status text (`ON` / `OFF`).
    #[must_use]
    pub fn from_status_text(text: Option<&str>) -> Self {
        match text {
            Some(text) if text.trim().eq_ignore_ascii_case("on") => Self::Enabled,
            _ => Self::Disabled,
        }
    }
}

// ============================================================================
// Element Map
// ============================================================================

struct NotificationsElements {
    header: By,
    toggle: By,
    status: By,
    permission_dialog: By,
    allow_button: By,
}

impl NotificationsElements {
    fn new() -> Self {
        Self {
            header: By::test_id("notifications-header"),
            toggle: By::test_id("notifications-toggle"),
            status: By::test_id("notifications-status"),
            permission_dialog: By::test_id("system-permission-dialog"),
            allow_button: By::test_id("allow-button"),
        }
    }
}

// ============================================================================
// NotificationsScreen
// ============================================================================

/// Page object for Settings > Notifications.
pub struct NotificationsScreen {
    screen: Screen,
    elements: NotificationsElements,
}

impl NotificationsScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: NotificationsElements::new(),
        }
    }

    /// Navigates to the notifications settings screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/settings/notifications").await?;
        self.screen
            .wait_for_visible(&self.elements.header, None)
            .await?;
        Ok(())
    }

    /// Whether the screen's header is visible.
    pub async fn is_loaded(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.header).await
    }

    /// Reads the toggle state from the rendered status text.
    pub async fn toggle_state(&self) -> Result<ToggleState> {
        let text = self.screen.read_text(&self.elements.status).await?;
        Ok(ToggleState::from_status_text(text.as_deref()))
    }

    /// The rendered status text (`ON` / `OFF`), if present.
    pub async fn status_text(&self) -> Result<Option<String>> {
        self.screen.read_text(&self.elements.status).await
    }

    /// Enables push notifications, clicking only if currently disabled.
    pub async fn enable_push_notifications(&self) -> Result<()> {
        self.set_toggle(ToggleState::Enabled).await
    }

    /// Disables push notifications, clicking only if currently enabled.
    pub async fn disable_push_notifications(&self) -> Result<()> {
        self.set_toggle(ToggleState::Disabled).await
    }

    async fn set_toggle(&self, desired: ToggleState) -> Result<()> {
        let current = self.toggle_state().await?;
        if current == desired {
            debug!(state = ?desired, "Toggle already in desired state");
            return Ok(());
        }

        debug!(from = ?current, to = ?desired, "Flipping notifications toggle");
        self.screen.click(&self.elements.toggle).await?;
        self.screen
            .poll_until("notifications toggle update", None, || async {
                Ok(self.toggle_state().await? == desired)
            })
            .await
    }

    /// Accepts the system-level permission prompt if it appears.
    ///
    /// Returns whether a dialog was handled. Dialog absence (already
    /// granted, or the platform shows none) is an expected outcome, not an
    /// error.
    pub async fn allow_system_permission(&self) -> Result<bool> {
        match self
            .screen
            .wait_for_visible(&self.elements.permission_dialog, Some(PERMISSION_DIALOG_TIMEOUT))
            .await
        {
            Ok(_) => {
                self.screen.click(&self.elements.allow_button).await?;
                debug!("System permission allowed");
                Ok(true)
            }
            Err(e) if e.is_timeout() => {
                debug!("No system permission dialog appeared");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
