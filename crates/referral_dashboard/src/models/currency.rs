use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Locale used when a requested locale has no table entry.
pub const DEFAULT_LOCALE: &str = "canada";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    /// ISO 4217 code.
    pub code: String,
    pub symbol: String,
    pub name: String,
    /// Exchange rate to the base currency.
    pub rate: Decimal,
}

static CANADIAN_DOLLAR: Lazy<Currency> = Lazy::new(|| Currency {
    code: "CAD".to_string(),
    symbol: "C$".to_string(),
    name: "Canadian Dollar".to_string(),
    rate: Decimal::ONE,
});

static CURRENCIES: Lazy<HashMap<&'static str, &'static Currency>> =
    Lazy::new(|| HashMap::from([(DEFAULT_LOCALE, &*CANADIAN_DOLLAR)]));

/// Looks up the currency for a locale code, falling back to [`DEFAULT_LOCALE`].
pub fn currency_for_locale(locale: &str) -> &'static Currency {
    CURRENCIES
        .get(locale.to_lowercase().as_str())
        .copied()
        .unwrap_or(&*CANADIAN_DOLLAR)
}

impl Currency {
    /// Formats an amount with the currency symbol, thousands separators and
    /// at most two fraction digits.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2).normalize();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = rounded.abs().to_string();
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match fraction {
            Some(fraction) => format!("{}{}{}.{}", sign, self.symbol, grouped, fraction),
            None => format!("{}{}{}", sign, self.symbol, grouped),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn unknown_locales_fall_back_to_canada() {
        assert_eq!(currency_for_locale("brazil").code, "CAD");
        assert_eq!(currency_for_locale("Canada").symbol, "C$");
    }

    #[rstest]
    #[case(Decimal::from(34000), "C$34,000")]
    #[case(Decimal::ZERO, "C$0")]
    #[case(Decimal::from(999), "C$999")]
    #[case(Decimal::new(12345, 1), "C$1,234.5")]
    #[case(Decimal::new(1234567891, 3), "C$1,234,567.89")]
    #[case(Decimal::from(-2500), "-C$2,500")]
    fn formats_amounts(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(currency_for_locale(DEFAULT_LOCALE).format_amount(amount), expected);
    }
}
