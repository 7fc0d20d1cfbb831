//! Accommodation results screen object.
//!
//! Price reads are order-preserving and never cached. An empty price list
//! is a failing precondition for format verification, never vacuously
//! correct; scenarios additionally assert the list is non-empty.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tracing::debug;

use crate::currency::CurrencyDescriptor;
use crate::error::Result;
use crate::screen::Screen;
use crate::selector::By;
use crate::verify;

// ============================================================================
// Element Map
// ============================================================================

struct ResultsElements {
    price: By,
    conversion_error: By,
}

impl ResultsElements {
    fn new() -> Self {
        Self {
            price: By::test_id("accommodation-price"),
            conversion_error: By::test_id("conversion-error"),
        }
    }
}

// ============================================================================
// ResultsScreen
// ============================================================================

/// Page object for the accommodation results screen.
pub struct ResultsScreen {
    screen: Screen,
    elements: ResultsElements,
}

impl ResultsScreen {
    /// Creates the screen object over the base abstraction.
    #[must_use]
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            elements: ResultsElements::new(),
        }
    }

    /// Navigates to the results screen.
    pub async fn open(&self) -> Result<()> {
        self.screen.navigate("/accommodation/results").await
    }

    /// Returns the full, order-preserving list of currently rendered
    /// price strings (trimmed).
    pub async fn accommodation_prices(&self) -> Result<Vec<String>> {
        debug!("Reading accommodation prices");
        self.screen.read_texts(&self.elements.price).await
    }

    /// Whether any price is currently rendered.
    pub async fn has_prices(&self) -> Result<bool> {
        Ok(!self.accommodation_prices().await?.is_empty())
    }

    /// Applies the currency-format invariant to every rendered price.
    ///
    /// # Errors
    ///
    /// Returns an assertion failure if the list is empty or any price does
    /// not carry the descriptor's exact currency segment. A diagnostic is
    /// captured before a failure is returned.
    pub async fn verify_prices_have_currency_format(
        &self,
        currency: &CurrencyDescriptor,
    ) -> Result<()> {
        let prices = self.accommodation_prices().await?;
        debug!(count = prices.len(), currency = %currency.code, "Verifying price formats");

        if let Err(e) = verify::verify_prices_have_currency_format(currency, &prices) {
            self.screen.capture_diagnostic("price-format-mismatch").await;
            return Err(e);
        }
        Ok(())
    }

    /// Eventual-consistency wait: polls the rendered prices until every
    /// one carries the descriptor's marker (and at least one is rendered).
    ///
    /// # Errors
    ///
    /// Returns a timeout error if the prices never converge.
    pub async fn wait_for_prices_in(
        &self,
        currency: &CurrencyDescriptor,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let operation = format!("prices updated to {}", currency.code);
        self.screen
            .poll_until(&operation, timeout, || async {
                let prices = self.accommodation_prices().await?;
                Ok(!prices.is_empty() && prices.iter().all(|p| currency.marks(p)))
            })
            .await
    }

    /// Whether the conversion error indicator is visible.
    pub async fn is_conversion_error_visible(&self) -> Result<bool> {
        self.screen.is_visible(&self.elements.conversion_error).await
    }

    /// The conversion error text, if displayed.
    pub async fn conversion_error_text(&self) -> Result<Option<String>> {
        self.screen.read_text(&self.elements.conversion_error).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::config::HarnessConfig;
    use crate::currency::by_code;
    use crate::driver::mock::{Effect, MockDriver, Node};

    fn results_screen(driver: &MockDriver) -> ResultsScreen {
        let config = HarnessConfig::new("https://app.example.test")
            .unwrap()
            .with_default_timeout(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(20))
            .with_artifact_dir(std::env::temp_dir().join("screenkit-tests"));
        ResultsScreen::new(Screen::new(Arc::new(driver.clone()), Arc::new(config)))
    }

    #[tokio::test]
    async fn test_prices_are_order_preserving() {
        let driver = MockDriver::new();
        driver.install_many(
            &By::test_id("accommodation-price"),
            &["EUR 978 Euro 92", "EUR 978 Euro 455.10", "EUR 978 Euro 7"],
        );
        let results = results_screen(&driver);

        let prices = results.accommodation_prices().await.unwrap();
        assert_eq!(
            prices,
            vec!["EUR 978 Euro 92", "EUR 978 Euro 455.10", "EUR 978 Euro 7"]
        );
        assert!(results.has_prices().await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_formats_passes_for_exact_segments() {
        let driver = MockDriver::new();
        driver.install_many(
            &By::test_id("accommodation-price"),
            &["EUR 978 Euro 92", "EUR 978 Euro 455.10"],
        );
        let results = results_screen(&driver);

        results
            .verify_prices_have_currency_format(by_code("EUR").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_formats_fails_on_empty_list() {
        let driver = MockDriver::new();
        let results = results_screen(&driver);

        let err = results
            .verify_prices_have_currency_format(by_code("EUR").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_assertion_failure());
    }

    #[tokio::test]
    async fn test_verify_formats_rejects_foreign_segment() {
        let driver = MockDriver::new();
        driver.install_many(
            &By::test_id("accommodation-price"),
            &["EUR 978 Euro 92", "USD 840 United States dollar 100"],
        );
        let results = results_screen(&driver);

        let err = results
            .verify_prices_have_currency_format(by_code("EUR").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_assertion_failure());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_prices_sees_delayed_rerender() {
        let driver = MockDriver::new();
        let price = By::test_id("accommodation-price");
        driver.install_many(&price, &["USD 840 United States dollar 100"]);
        driver.install(&By::test_id("switch"), Node::visible("switch"));
        driver.on_click(
            MockDriver::trigger(&By::test_id("switch"), Some("switch")),
            vec![Effect::Delayed(
                Duration::from_millis(200),
                Box::new(Effect::ReplaceAll(
                    price.clone(),
                    vec!["EUR 978 Euro 92".into(), "EUR 978 Euro 455".into()],
                )),
            )],
        );
        let results = results_screen(&driver);

        results.screen.click(&By::test_id("switch")).await.unwrap();
        results
            .wait_for_prices_in(by_code("EUR").unwrap(), None)
            .await
            .unwrap();

        let prices = results.accommodation_prices().await.unwrap();
        assert_eq!(prices.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_prices_times_out_when_stale() {
        let driver = MockDriver::new();
        driver.install_many(
            &By::test_id("accommodation-price"),
            &["USD 840 United States dollar 100"],
        );
        let results = results_screen(&driver);

        let err = results
            .wait_for_prices_in(by_code("EUR").unwrap(), Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_conversion_error_probe() {
        let driver = MockDriver::new();
        let results = results_screen(&driver);
        assert!(!results.is_conversion_error_visible().await.unwrap());

        driver.install(
            &By::test_id("conversion-error"),
            Node::visible("Unable to convert prices: currency service unavailable"),
        );
        assert!(results.is_conversion_error_visible().await.unwrap());
        let text = results.conversion_error_text().await.unwrap().unwrap();
        assert!(text.contains("currency"));
    }
}
