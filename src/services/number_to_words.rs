//! Amount in words
//!
//! English rendering of invoice totals: "Two Thousand Five Hundred Dollars
//! And Fifty Cents". Amounts are rounded to two decimals first.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::utils::errors::AppError;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [&str; 4] = ["", "Thousand", "Million", "Billion"];

/// One trillion; the largest scale word is "Billion"
const LIMIT: u64 = 1_000_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordsError {
    #[error("amount must not be negative")]
    Negative,
    #[error("amount is too large to write in words")]
    TooLarge,
}

impl From<WordsError> for AppError {
    fn from(e: WordsError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Major and minor unit names for a currency code
pub fn currency_units(currency: &str) -> (String, &'static str) {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => ("Dollars".to_string(), "Cents"),
        "EUR" => ("Euros".to_string(), "Cents"),
        "GBP" => ("Pounds".to_string(), "Pence"),
        "TZS" | "KES" | "UGX" => ("Shillings".to_string(), "Cents"),
        other => (other.to_string(), "Cents"),
    }
}

/// Render `amount` followed by the currency's unit names.
///
/// Zero renders as `Zero <CODE>`; the cents clause only appears when the
/// rounded amount has a fractional part.
pub fn number_to_words(amount: Decimal, currency: &str) -> Result<String, WordsError> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if rounded.is_zero() {
        return Ok(format!("Zero {}", currency.to_ascii_uppercase()));
    }
    if rounded.is_sign_negative() {
        return Err(WordsError::Negative);
    }

    let whole = rounded.trunc();
    let units = whole.to_u64().filter(|n| *n < LIMIT).ok_or(WordsError::TooLarge)?;
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or(0);

    let (major, minor) = currency_units(currency);
    let mut words = format!("{} {}", integer_to_words(units), major);
    if cents > 0 {
        words.push_str(&format!(" And {} {}", integer_to_words(cents), minor));
    }
    Ok(words)
}

/// Words for a whole number below one trillion; `0` is "Zero"
pub fn integer_to_words(mut n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut groups = Vec::new();
    let mut scale = 0;
    while n > 0 && scale < SCALES.len() {
        let group = n % 1000;
        if group > 0 {
            let mut part = below_thousand(group);
            if !SCALES[scale].is_empty() {
                part.push(' ');
                part.push_str(SCALES[scale]);
            }
            groups.push(part);
        }
        n /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

fn below_thousand(n: u64) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        parts.push(ONES[hundreds]);
        parts.push("Hundred");
    }
    if rest >= 20 {
        parts.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            parts.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        parts.push(ONES[rest]);
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_uses_currency_code() {
        assert_eq!(number_to_words(Decimal::ZERO, "USD").unwrap(), "Zero USD");
        assert_eq!(number_to_words(dec("0.001"), "tzs").unwrap(), "Zero TZS");
    }

    #[test]
    fn test_whole_amount_has_no_cents_clause() {
        assert_eq!(number_to_words(dec("100"), "USD").unwrap(), "One Hundred Dollars");
        assert_eq!(number_to_words(dec("100.00"), "USD").unwrap(), "One Hundred Dollars");
    }

    #[test]
    fn test_amount_with_cents() {
        assert_eq!(
            number_to_words(dec("2500.50"), "USD").unwrap(),
            "Two Thousand Five Hundred Dollars And Fifty Cents"
        );
    }

    #[test]
    fn test_millions_and_teens() {
        assert_eq!(
            number_to_words(dec("1234567.89"), "TZS").unwrap(),
            "One Million Two Hundred Thirty Four Thousand Five Hundred Sixty Seven Shillings And Eighty Nine Cents"
        );
        assert_eq!(number_to_words(dec("15"), "GBP").unwrap(), "Fifteen Pounds");
    }

    #[test]
    fn test_billions_skip_empty_groups() {
        assert_eq!(
            number_to_words(dec("3000000005"), "EUR").unwrap(),
            "Three Billion Five Euros"
        );
    }

    #[test]
    fn test_rounding_to_cents() {
        assert_eq!(
            number_to_words(dec("10.005"), "USD").unwrap(),
            "Ten Dollars And One Cents"
        );
        assert_eq!(
            number_to_words(dec("0.5"), "USD").unwrap(),
            "Zero Dollars And Fifty Cents"
        );
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(number_to_words(dec("7"), "ZAR").unwrap(), "Seven ZAR");
    }

    #[test]
    fn test_rejects_negative_and_huge() {
        assert_eq!(number_to_words(dec("-1"), "USD"), Err(WordsError::Negative));
        assert_eq!(
            number_to_words(dec("1000000000000"), "USD"),
            Err(WordsError::TooLarge)
        );
    }
}
