//! Advanced filters panel object.
//!
//! Currency selection clicks the option whose label exactly equals the
//! requested descriptor's display text. Never a prefix or fuzzy match: an
//! approximate match could land on a wrong adjacent currency.

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::currency::CurrencyDescriptor;
use crate::error::Result;
use crate::screen::Screen;
use crate::selector::By;

// ============================================================================
// Element Map
// ============================================================================

struct FiltersElements {
    panel: By,
    currency_selector: By,
    currency_option: By,
    apply_button: By,
}

impl FiltersElements {
    fn new() -> Self {
        Self {
            panel: By::test_id("advanced-filters-panel"),
            currency_selector: By::test_id("currency-selector"),
            currency_option: By::test_id("currency-option"),
            apply_button: By::test_id("apply-filters-button"),
        }
    }
}

// ============================================================================
// AdvancedFiltersPanel
// ============================================================================

/// Component object for the advanced filters panel.
pub struct AdvancedFiltersPanel {
    screen: Screen,
    elements: FiltersElements,
}

impl AdvancedFiltersPanel {
    /// Creates the panel object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: FiltersElements::new(),
        }
    }

    /// Waits for the panel container to be visible.
    pub async fn wait_until_open(&self) -> Result<()> {
        self.screen
            .wait_for_visible(&self.elements.panel, None)
            .await?;
        Ok(())
    }

    /// Selects a currency by its exact option label.
    ///
    /// Opens the selector, waits for the option list to materialize, then
    /// clicks the option whose label exactly matches the descriptor's
    /// display text.
    pub async fn select_currency(&self, currency: &CurrencyDescriptor) -> Result<()> {
        let label = currency.label();
        debug!(currency = %label, "Selecting currency");

        self.screen.click(&self.elements.currency_selector).await?;
        self.screen
            .wait_for_visible(&self.elements.currency_option, None)
            .await?;

        let option = By::text(&label);
        self.screen.wait_for_visible(&option, None).await?;
        self.screen.click(&option).await
    }

    /// Applies the selected filters (navigating action).
    pub async fn apply(&self) -> Result<()> {
        debug!("Applying filters");
        self.screen
            .with_navigation(|| async { self.screen.click(&self.elements.apply_button).await })
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================
