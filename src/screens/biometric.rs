//! Biometric setup screen object.
//!
//! Enrollment is the one genuine multi-step flow in the application, so its
//! progress is modeled as an explicit state machine:
//!
//! ```text
//! NotEnrolled → EnablingRequested → PromptShown → VerificationSubmitted → Complete
//!                      │                 │                  │
//!                      └────────────── timeout ─────────────┴──→ Abandoned
//! ```
//!
//! No transition skips a state, and [`EnrollmentState::Complete`] is the
//! only state from which trust status may be asserted true. The
//! verification prompt is auto-confirmed by a simulated biometric accept
//! (real biometric hardware is out of scope), so the flow never blocks
//! indefinitely: every wait is bounded by the configured timeout and a
//! timed-out wait lands in the terminal [`EnrollmentState::Abandoned`].

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::error::Result;
use crate::screen::Screen;
use crate::selector::By;

// ============================================================================
// EnrollmentState
// ============================================================================

/// Progress of the biometric enrollment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentState {
    /// No enrollment has been requested.
    NotEnrolled,

    /// The enable control has been activated.
    EnablingRequested,

    /// The verification prompt is on screen.
    PromptShown,

    /// The verification has been confirmed.
    VerificationSubmitted,

    /// Enrollment finished; the success indicator is visible.
    Complete,

    /// Terminal failure: a wait step timed out.
    Abandoned,
}

impl EnrollmentState {
    /// Whether this state ends the flow.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Abandoned)
    }

    /// Whether trust status may be asserted from this state.
    #[inline]
    #[must_use]
    pub const fn permits_trust_assertion(self) -> bool {
        matches!(self, Self::Complete)
    }
}

// ============================================================================
// Element Map
// ============================================================================

struct BiometricElements {
    enable_button: By,
    verification_prompt: By,
    confirm_button: By,
    success_banner: By,
}

impl BiometricElements {
    fn new() -> Self {
        Self {
            enable_button: By::test_id("enable-biometrics"),
            verification_prompt: By::test_id("biometric-verification-prompt"),
            confirm_button: By::test_id("confirm-biometric-button"),
            success_banner: By::test_id("biometric-setup-success"),
        }
    }
}

// ============================================================================
// BiometricScreen
// ============================================================================

/// Page object for the biometric setup flow.
pub struct BiometricScreen {
    screen: Screen,
    elements: BiometricElements,
}

impl BiometricScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: BiometricElements::new(),
        }
    }

    /// Navigates to the biometric setup screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/settings/authentication/biometrics").await
    }

    /// Drives the full enrollment flow and returns the terminal state.
    ///
    /// Idempotency guard: if the success indicator is already visible the
    /// flow is not re-driven and [`EnrollmentState::Complete`] is returned
    /// directly. Wait timeouts land in [`EnrollmentState::Abandoned`] (with
    /// a diagnostic captured); every other failure propagates.
    pub async fn enroll(&self) -> Result<EnrollmentState> {
        if self.is_setup_complete().await? {
            debug!("Biometrics already enrolled");
            return Ok(EnrollmentState::Complete);
        }

        let mut state = EnrollmentState::NotEnrolled;
        debug!(state = ?state, "Starting biometric enrollment");

        self.screen.click(&self.elements.enable_button).await?;
        state = EnrollmentState::EnablingRequested;

        match self
            .screen
            .wait_for_visible(&self.elements.verification_prompt, None)
            .await
        {
            Ok(_) => state = EnrollmentState::PromptShown,
            Err(e) if e.is_timeout() => return self.abandon(state, &e).await,
            Err(e) => return Err(e),
        }

        self.screen.click(&self.elements.confirm_button).await?;
        state = EnrollmentState::VerificationSubmitted;

        match self
            .screen
            .wait_for_visible(&self.elements.success_banner, None)
            .await
        {
            Ok(_) => {
                debug!("Biometric enrollment complete");
                Ok(EnrollmentState::Complete)
            }
            Err(e) if e.is_timeout() => self.abandon(state, &e).await,
            Err(e) => Err(e),
        }
    }

    /// Whether the setup success indicator is visible.
    pub async fn is_setup_complete(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.success_banner).await
    }

    async fn abandon(
        &self,
        from: EnrollmentState,
        cause: &crate::error::Error,
    ) -> Result<EnrollmentState> {
        warn!(from = ?from, cause = %cause, "Biometric enrollment abandoned");
        self.screen.capture_diagnostic("biometric-abandoned").await;
        Ok(EnrollmentState::Abandoned)
    }
}

// ============================================================================
// Tests
// ============================================================================
