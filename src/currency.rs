//! Canonical currency descriptors.
//!
//! The application's currency filter offers exactly eight currencies. The
//! list here is the ground truth the filter-list completeness check compares
//! against: order-independent, count-exact, no extras, no omissions.
//!
//! Option labels and price currency segments both use the descriptor's
//! `CODE NUMERIC NAME` form, e.g. `EUR 978 Euro`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CurrencyDescriptor
// ============================================================================

/// Canonical (code, numeric-code, display-name) triple for a supported
/// currency.
///
/// Immutable: descriptors are only ever the entries of
/// [`SUPPORTED_CURRENCIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    /// Three-letter currency code (ISO 4217 alpha).
    pub code: &'static str,

    /// Numeric code as rendered by the application (no leading zeros).
    pub numeric_code: &'static str,

    /// Human-readable display name.
    pub display_name: &'static str,
}

impl CurrencyDescriptor {
    const fn new(code: &'static str, numeric_code: &'static str, display_name: &'static str) -> Self {
        Self {
            code,
            numeric_code,
            display_name,
        }
    }

    /// The label rendered in the filter option list and in price currency
    /// segments: `CODE NUMERIC NAME`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}", self.code, self.numeric_code, self.display_name)
    }

    /// Conventional currency symbol.
    ///
    /// Symbols may be shared across currencies (yen and renminbi both
    /// render `¥`); the code is the authoritative marker, the symbol only
    /// widens [`CurrencyDescriptor::marks`].
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self.code {
            "USD" => "$",
            "EUR" => "\u{20ac}",
            "JPY" | "CNY" => "\u{a5}",
            "GBP" => "\u{a3}",
            "CHF" => "Fr",
            "CAD" => "CA$",
            "AUD" => "A$",
            _ => "",
        }
    }

    /// Whether `text` carries this currency's marker (code or symbol).
    #[must_use]
    pub fn marks(&self, text: &str) -> bool {
        text.contains(self.code) || (!self.symbol().is_empty() && text.contains(self.symbol()))
    }
}

impl fmt::Display for CurrencyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.code, self.numeric_code, self.display_name)
    }
}

// ============================================================================
// Canonical List
// ============================================================================

/// The exact set of supported currencies (source of truth for the
/// filter-list completeness check).
pub const SUPPORTED_CURRENCIES: [CurrencyDescriptor; 8] = [
    CurrencyDescriptor::new("USD", "840", "United States dollar"),
    CurrencyDescriptor::new("EUR", "978", "Euro"),
    CurrencyDescriptor::new("JPY", "392", "Japanese yen"),
    CurrencyDescriptor::new("GBP", "826", "Pound sterling"),
    CurrencyDescriptor::new("CHF", "756", "Swiss franc"),
    CurrencyDescriptor::new("CAD", "124", "Canadian dollar"),
    CurrencyDescriptor::new("AUD", "36", "Australian dollar"),
    CurrencyDescriptor::new("CNY", "156", "Renminbi"),
];

/// Looks up a supported currency by its three-letter code.
#[must_use]
pub fn by_code(code: &str) -> Option<&'static CurrencyDescriptor> {
    SUPPORTED_CURRENCIES.iter().find(|c| c.code == code)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_eight_supported() {
        assert_eq!(SUPPORTED_CURRENCIES.len(), 8);
    }

    #[test]
    fn test_labels_match_application_rendering() {
        assert_eq!(by_code("EUR").unwrap().label(), "EUR 978 Euro");
        assert_eq!(by_code("USD").unwrap().label(), "USD 840 United States dollar");
        assert_eq!(by_code("AUD").unwrap().label(), "AUD 36 Australian dollar");
        assert_eq!(by_code("CNY").unwrap().label(), "CNY 156 Renminbi");
    }

    #[test]
    fn test_by_code_unknown_is_none() {
        assert!(by_code("SEK").is_none());
    }

    #[test]
    fn test_marks_by_code_or_symbol() {
        let usd = by_code("USD").unwrap();
        assert!(usd.marks("USD 840 United States dollar 120"));
        assert!(usd.marks("$120.00"));
        assert!(!usd.marks("EUR 978 Euro 92"));
    }

    #[test]
    fn test_shared_symbol_is_not_authoritative() {
        let jpy = by_code("JPY").unwrap();
        let cny = by_code("CNY").unwrap();
        // Both mark a bare yen sign; the code disambiguates.
        assert!(jpy.marks("\u{a5}1000"));
        assert!(cny.marks("\u{a5}1000"));
        assert!(!cny.marks("GBP 826 Pound sterling 12"));
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in SUPPORTED_CURRENCIES.iter().enumerate() {
            for b in &SUPPORTED_CURRENCIES[i + 1..] {
                assert_ne!(a.code, b.code);
                assert_ne!(a.numeric_code, b.numeric_code);
            }
        }
    }
}
