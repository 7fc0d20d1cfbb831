//! Verification helpers.
//!
//! Pure functions evaluating invariants over data extracted by screen
//! objects: currency-format matching, filter-list completeness, price-set
//! consistency across a currency switch, and the trust-status predicate.
//!
//! Matching policy is exact throughout: a price passes only when its
//! currency segment equals the descriptor's `CODE NUMERIC NAME` fields,
//! anchored, exactly once. Substring containment is insufficient; the
//! representation must correspond to a single unambiguous currency.
//! Leading/trailing whitespace is trimmed and internal whitespace variance
//! is normalized to single spaces before comparison.

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeSet;

use regex::Regex;

use crate::currency::{CurrencyDescriptor, SUPPORTED_CURRENCIES};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Status-label vocabulary that counts as a trusted state (matched
/// case-insensitively).
pub const TRUSTED_VOCABULARY: [&str; 2] = ["trusted", "verified"];

// ============================================================================
// Whitespace Normalization
// ============================================================================

/// Trims and collapses internal whitespace runs to single spaces.
#[must_use]
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Currency Format
// ============================================================================

/// Whether a rendered price carries the descriptor's exact currency
/// segment plus one interpolated numeric amount.
///
/// The normalized string must be the descriptor's `CODE NUMERIC NAME`
/// label with the amount adjacent to it (before or after), nothing else:
/// `EUR 978 Euro 120.50` and `120.50 EUR 978 Euro` pass for EUR;
/// `EUR 120.50` and `cheap EUR 978 Euro 120.50!` do not.
#[must_use]
pub fn price_has_currency_format(currency: &CurrencyDescriptor, raw: &str) -> bool {
    price_format_regex(currency).is_match(&normalize_whitespace(raw))
}

fn price_format_regex(currency: &CurrencyDescriptor) -> Regex {
    let label = regex::escape(&currency.label());
    let amount = r"\d+(?:\.\d+)?";
    let pattern = format!("^(?:{label} {amount}|{amount} {label})$");
    // The pattern is built from escaped canonical fields; it always parses.
    Regex::new(&pattern).unwrap_or_else(|_| unreachable!("canonical price pattern"))
}

/// Applies the price-format invariant to every rendered price.
///
/// # Errors
///
/// Returns [`Error::Assertion`] if the list is empty (absence of prices is
/// a failing precondition, never vacuously correct) or if any price does
/// not carry the expected currency segment.
pub fn verify_prices_have_currency_format(
    currency: &CurrencyDescriptor,
    prices: &[String],
) -> Result<()> {
    if prices.is_empty() {
        return Err(Error::assertion(format!(
            "no rendered prices to verify for {}",
            currency.code
        )));
    }

    let format = price_format_regex(currency);
    for price in prices {
        if !format.is_match(&normalize_whitespace(price)) {
            return Err(Error::assertion(format!(
                "price {price:?} does not match {} format",
                currency.label()
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Filter List Completeness
// ============================================================================

/// Checks the filter panel's available options against the canonical
/// currency list: set equality, count-exact, order-independent.
///
/// # Errors
///
/// Returns [`Error::Assertion`] naming the omissions and extras.
pub fn verify_filter_list_complete(observed: &[String]) -> Result<()> {
    let observed: BTreeSet<String> = observed.iter().map(|s| normalize_whitespace(s)).collect();
    let expected: BTreeSet<String> = SUPPORTED_CURRENCIES.iter().map(|c| c.label()).collect();

    if observed == expected {
        return Ok(());
    }

    let missing: Vec<_> = expected.difference(&observed).cloned().collect();
    let extra: Vec<_> = observed.difference(&expected).cloned().collect();
    Err(Error::assertion(format!(
        "currency filter list mismatch: missing {missing:?}, unexpected {extra:?}"
    )))
}

// ============================================================================
// Currency Switch Consistency
// ============================================================================

/// Verifies a before/after price diff across a currency switch.
///
/// Asserts that neither snapshot is empty, that no price in `after`
/// carries the prior currency's marker, and that every price in `after`
/// carries the new currency's marker. This is a 2-step format/marker
/// diff; amount conversion correctness is out of scope.
///
/// # Errors
///
/// Returns [`Error::Assertion`] describing the first violated condition.
pub fn verify_currency_switch(
    before: &[String],
    after: &[String],
    prior: &CurrencyDescriptor,
    new: &CurrencyDescriptor,
) -> Result<()> {
    if before.is_empty() {
        return Err(Error::assertion("price snapshot before switch is empty"));
    }
    if after.is_empty() {
        return Err(Error::assertion("price snapshot after switch is empty"));
    }

    for price in after {
        if prior.marks(price) {
            return Err(Error::assertion(format!(
                "stale {} marker survived the switch to {}: {price:?}",
                prior.code, new.code
            )));
        }
        if !new.marks(price) {
            return Err(Error::assertion(format!(
                "price missing {} marker after switch: {price:?}",
                new.code
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Trust Predicate
// ============================================================================

/// Observations backing a trust-status decision.
///
/// Collected by the trust-settings screen object; evaluated here as a pure
/// predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustEvidence {
    /// Whether the trust indicator element is visible.
    pub indicator_visible: bool,

    /// Text of the trust status label, if present.
    pub status_label: Option<String>,

    /// Displayed device name, if present.
    pub device_name: Option<String>,

    /// Displayed account name, if present.
    pub account_name: Option<String>,
}

impl TrustEvidence {
    /// Whether the status label contains a trusted-state word
    /// (case-insensitive).
    #[must_use]
    pub fn label_in_vocabulary(&self) -> bool {
        let Some(label) = self.status_label.as_deref() else {
            return false;
        };
        let label = label.to_lowercase();
        TRUSTED_VOCABULARY.iter().any(|word| label.contains(word))
    }

    /// Full trust predicate: indicator visible AND label in vocabulary AND
    /// displayed device/account text contains the expected identities.
    ///
    /// All conditions must hold; a partial match never counts as trusted.
    #[must_use]
    pub fn is_trusted(&self, expected_device: &str, expected_account: &str) -> bool {
        self.indicator_visible
            && self.label_in_vocabulary()
            && self
                .device_name
                .as_deref()
                .is_some_and(|d| d.contains(expected_device))
            && self
                .account_name
                .as_deref()
                .is_some_and(|a| a.contains(expected_account))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::currency::by_code;

    fn eur() -> &'static CurrencyDescriptor {
        by_code("EUR").unwrap()
    }

    fn usd() -> &'static CurrencyDescriptor {
        by_code("USD").unwrap()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  EUR   978\tEuro  "), "EUR 978 Euro");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_price_format_exact_match() {
        assert!(price_has_currency_format(eur(), "EUR 978 Euro 120.50"));
        assert!(price_has_currency_format(eur(), "120.50 EUR 978 Euro"));
        assert!(price_has_currency_format(eur(), "  EUR  978  Euro  92 "));
    }

    #[test]
    fn test_price_format_rejects_partial_segments() {
        // Substring containment is insufficient.
        assert!(!price_has_currency_format(eur(), "cheap EUR 978 Euro 120.50!"));
        assert!(!price_has_currency_format(eur(), "EUR 120.50"));
        assert!(!price_has_currency_format(eur(), "EUR 978 120.50"));
        // Wrong descriptor fields never pass.
        assert!(!price_has_currency_format(eur(), "USD 840 United States dollar 120.50"));
        // One unambiguous currency per price.
        assert!(!price_has_currency_format(
            eur(),
            "EUR 978 Euro 120.50 USD 840 United States dollar"
        ));
    }

    #[test]
    fn test_verify_prices_empty_list_fails() {
        let err = verify_prices_have_currency_format(eur(), &[]).unwrap_err();
        assert!(err.is_assertion_failure());
    }

    #[test]
    fn test_verify_prices_all_must_match() {
        let prices = vec![
            "EUR 978 Euro 92".to_string(),
            "EUR 978 Euro 455.10".to_string(),
        ];
        verify_prices_have_currency_format(eur(), &prices).unwrap();

        let mixed = vec![
            "EUR 978 Euro 92".to_string(),
            "USD 840 United States dollar 100".to_string(),
        ];
        assert!(verify_prices_have_currency_format(eur(), &mixed).is_err());
    }

    #[test]
    fn test_filter_list_complete() {
        let observed: Vec<String> = SUPPORTED_CURRENCIES.iter().map(|c| c.label()).collect();
        verify_filter_list_complete(&observed).unwrap();

        // Order-independent.
        let mut reversed = observed.clone();
        reversed.reverse();
        verify_filter_list_complete(&reversed).unwrap();
    }

    #[test]
    fn test_filter_list_omission_and_extra_reported() {
        let mut observed: Vec<String> = SUPPORTED_CURRENCIES.iter().map(|c| c.label()).collect();
        observed.pop();
        observed.push("SEK 752 Swedish krona".to_string());

        let err = verify_filter_list_complete(&observed).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("CNY 156 Renminbi"));
        assert!(message.contains("SEK 752 Swedish krona"));
    }

    #[test]
    fn test_filter_list_count_exact() {
        let mut observed: Vec<String> = SUPPORTED_CURRENCIES.iter().map(|c| c.label()).collect();
        observed.push("BTC 0 Bitcoin".to_string());
        assert!(verify_filter_list_complete(&observed).is_err());
    }

    #[test]
    fn test_currency_switch_happy_path() {
        let before = vec!["USD 840 United States dollar 100".to_string()];
        let after = vec![
            "EUR 978 Euro 92".to_string(),
            "EUR 978 Euro 455".to_string(),
        ];
        verify_currency_switch(&before, &after, usd(), eur()).unwrap();
    }

    #[test]
    fn test_currency_switch_rejects_stale_marker() {
        let before = vec!["USD 840 United States dollar 100".to_string()];
        let after = vec![
            "EUR 978 Euro 92".to_string(),
            "$100.00".to_string(), // stale symbol
        ];
        let err = verify_currency_switch(&before, &after, usd(), eur()).unwrap_err();
        assert!(err.to_string().contains("stale"));
    }

    #[test]
    fn test_currency_switch_rejects_empty_snapshots() {
        let prices = vec!["EUR 978 Euro 92".to_string()];
        assert!(verify_currency_switch(&[], &prices, usd(), eur()).is_err());
        assert!(verify_currency_switch(&prices, &[], eur(), usd()).is_err());
    }

    #[test]
    fn test_trust_predicate_requires_all_conditions() {
        let full = TrustEvidence {
            indicator_visible: true,
            status_label: Some("Device Trusted".to_string()),
            device_name: Some("Pixel 9".to_string()),
            account_name: Some("test-user@example.test".to_string()),
        };
        assert!(full.is_trusted("Pixel 9", "test-user"));

        // Each missing condition flips the result.
        let mut hidden = full.clone();
        hidden.indicator_visible = false;
        assert!(!hidden.is_trusted("Pixel 9", "test-user"));

        let mut wrong_label = full.clone();
        wrong_label.status_label = Some("Pending review".to_string());
        assert!(!wrong_label.is_trusted("Pixel 9", "test-user"));

        let mut wrong_account = full.clone();
        wrong_account.account_name = Some("someone-else".to_string());
        assert!(!wrong_account.is_trusted("Pixel 9", "test-user"));

        let mut no_device = full;
        no_device.device_name = None;
        assert!(!no_device.is_trusted("Pixel 9", "test-user"));
    }

    #[test]
    fn test_trust_vocabulary_is_case_insensitive() {
        let verified = TrustEvidence {
            indicator_visible: true,
            status_label: Some("VERIFIED device".to_string()),
            device_name: Some("iPhone 17".to_string()),
            account_name: Some("test-user".to_string()),
        };
        assert!(verified.label_in_vocabulary());
        assert!(verified.is_trusted("iPhone", "test-user"));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "\\PC{0,64}") {
            let once = normalize_whitespace(&s);
            prop_assert_eq!(normalize_whitespace(&once), once);
        }

        #[test]
        fn prop_amount_after_label_always_matches(amount in 0u64..1_000_000, cents in proptest::option::of(0u8..100)) {
            let rendered = match cents {
                Some(c) => format!("EUR 978 Euro {amount}.{c:02}"),
                None => format!("EUR 978 Euro {amount}"),
            };
            prop_assert!(price_has_currency_format(eur(), &rendered));
        }

        #[test]
        fn prop_trailing_junk_never_matches(junk in "[a-z!]{1,8}") {
            let rendered = format!("EUR 978 Euro 100 {junk}");
            prop_assert!(!price_has_currency_format(eur(), &rendered));
        }
    }
}
