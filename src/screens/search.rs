//! Accommodation search screen object.

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

struct SearchElements {
    advanced_filters_button: By,
    filters_panel: By,
    currency_option: By,
}

impl SearchElements {
    fn new() -> Self {
        Self {
            advanced_filters_button: By::test_id("advanced-filters-button"),
            filters_panel: By::test_id("advanced-filters-panel"),
            currency_option: By::test_id("currency-option"),
        }
    }
}

// ============================================================================
// SearchScreen
// ============================================================================

/// Page object for the accommodation search screen.
pub struct SearchScreen {
    screen: Screen,
    elements: SearchElements,
}

impl SearchScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: SearchElements::new(),
        }
    }

    /// Navigates to the accommodation search screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/accommodation/search").await
    }

    /// Opens the advanced filters panel and waits for it to materialize.
    pub async fn open_advanced_filters(&self) -> Result<()> {
        debug!("Opening advanced filters");
        self.screen
            .click(&self.elements.advanced_filters_button)
            .await?;
        self.screen
            .wait_for_visible(&self.elements.filters_panel, None)
            .await?;
        Ok(())
    }

    /// Returns the currency option labels currently offered, in document
    /// order.
    ///
    /// Labels are read raw; completeness against the canonical list is
    /// checked by
    /// [`verify_filter_list_complete`](crate::verify::verify_filter_list_complete).
    pub async fn available_currencies(&self) -> Result<Vec<String>> {
        debug!("Reading available currencies");
        self.screen.read_texts(&self.elements.currency_option).await
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
    use crate::currency::SUPPORTED_CURRENCIES;
    use crate::driver::mock::{Effect, MockDriver, Node};
    use crate::verify::verify_filter_list_complete;

    fn search_screen(driver: &MockDriver) -> SearchScreen {
        let config = HarnessConfig::new("https://app.example.test")
            .unwrap()
            .with_default_timeout(Duration::from_millis(400))
            .with_poll_interval(Duration::from_millis(20));
        SearchScreen::new(Screen::new(Arc::new(driver.clone()), Arc::new(config)))
    }

    fn install_search(driver: &MockDriver) {
        driver.install(
            &By::test_id("advanced-filters-button"),
            Node::visible("Filters"),
        );
        driver.install(&By::test_id("advanced-filters-panel"), Node::hidden(""));
        driver.on_click(
            MockDriver::trigger(&By::test_id("advanced-filters-button"), Some("Filters")),
            vec![Effect::Show(By::test_id("advanced-filters-panel"))],
        );

        let labels: Vec<String> = SUPPORTED_CURRENCIES.iter().map(|c| c.label()).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        driver.install_many(&By::test_id("currency-option"), &labels);
    }

    #[tokio::test]
    async fn test_open_advanced_filters_waits_for_panel() {
        let driver = MockDriver::new();
        install_search(&driver);
        let search = search_screen(&driver);

        search.open().await.unwrap();
        search.open_advanced_filters().await.unwrap();
        assert_eq!(
            driver.navigations(),
            vec!["https://app.example.test/accommodation/search".to_string()]
        );
    }

    #[tokio::test]
    async fn test_available_currencies_match_canonical_list() {
        let driver = MockDriver::new();
        install_search(&driver);
        let search = search_screen(&driver);

        search.open_advanced_filters().await.unwrap();
        let currencies = search.available_currencies().await.unwrap();
        assert_eq!(currencies.len(), 8);
        verify_filter_list_complete(&currencies).unwrap();
    }

    #[tokio::test]
    async fn test_missing_option_fails_completeness() {
        let driver = MockDriver::new();
        driver.install_many(
            &By::test_id("currency-option"),
            &["EUR 978 Euro", "USD 840 United States dollar"],
        );
        let search = search_screen(&driver);

        let currencies = search.available_currencies().await.unwrap();
        assert!(verify_filter_list_complete(&currencies).is_err());
    }
}
