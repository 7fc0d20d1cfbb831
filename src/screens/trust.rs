//! Authentication/trust settings screen object.
//!
//! Exposes the trust predicate reads and the composite accuracy check.
//! "Trusted" is asserted only when the indicator is visible AND the status
//! label matches the trusted-state vocabulary AND the displayed
//! device/account text contains the expected identity; partial matches
//! never count (see [`TrustEvidence`]).

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::error::{Error, Result};
use crate::screen::Screen;
use crate::selector::By;
use crate::verify::TrustEvidence;

// ============================================================================
// Element Map
// ============================================================================

struct TrustElements {
    indicator: By,
    status_label: By,
    device_name: By,
    account_name: By,
}

impl TrustElements {
    fn new() -> Self {
        Self {
            indicator: By::test_id("device-trust-status"),
            status_label: By::test_id("trust-status-label"),
            device_name: By::test_id("trusted-device-name"),
            account_name: By::test_id("trusted-account-name"),
        }
    }
}

// ============================================================================
// TrustSettingsScreen
// ============================================================================

/// Page object for Settings > Authentication.
pub struct TrustSettingsScreen {
    screen: Screen,
    elements: TrustElements,
}

impl TrustSettingsScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: TrustElements::new(),
        }
    }

    /// Navigates to the authentication settings screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/settings/authentication").await
    }

    /// Whether the trust indicator element is visible.
    pub async fn is_trust_indicator_visible(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.indicator).await
    }

    /// The trust status label text, if present.
    pub async fn trust_status_label(&self) -> Result<Option<String>> {
        self.screen.read_text(&self.elements.status_label).await
    }

    /// The displayed device name, if present.
    pub async fn device_name(&self) -> Result<Option<String>> {
        self.screen.read_text(&self.elements.device_name).await
    }

    /// The displayed account name, if present.
    pub async fn account_name(&self) -> Result<Option<String>> {
        self.screen.read_text(&self.elements.account_name).await
    }

    /// Whether the device is marked as trusted: indicator visible and
    /// status label in the trusted-state vocabulary.
    ///
    /// Identity accuracy is checked separately by
    /// [`TrustSettingsScreen::verify_trust_status_accuracy`].
    pub async fn is_device_trusted(&self) -> Result<bool> {
        let evidence = self.collect_evidence().await?;
        Ok(evidence.indicator_visible && evidence.label_in_vocabulary())
    }

    /// Collects the raw observations backing a trust decision.
    pub async fn collect_evidence(&self) -> Result<TrustEvidence> {
        let evidence = TrustEvidence {
            indicator_visible: self.is_trust_indicator_visible().await?,
            status_label: self.trust_status_label().await?,
            device_name: self.device_name().await?,
            account_name: self.account_name().await?,
        };
        debug!(?evidence, "Collected trust evidence");
        Ok(evidence)
    }

    /// Applies the full trust-status invariant for the expected
    /// device/account pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Assertion`] with the collected evidence when any
    /// condition fails; a diagnostic is captured before returning.
    pub async fn verify_trust_status_accuracy(
        &self,
        expected_device: &str,
        expected_account: &str,
    ) -> Result<()> {
        let evidence = self.collect_evidence().await?;
        if evidence.is_trusted(expected_device, expected_account) {
            return Ok(());
        }

        self.screen.capture_diagnostic("trust-status-mismatch").await;
        Err(Error::assertion(format!(
            "trust status inaccurate for device {expected_device:?} / account \
             {expected_account:?}: {evidence:?}"
        )))
    }
}

// ============================================================================
// Tests
// ============================================================================
