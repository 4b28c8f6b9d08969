//! Currency
//!
//! Amounts are whole cents. Text is parsed leniently and rendered as
//! two decimals with comma thousands-grouping, without a symbol.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Parse free text as a number, ignoring everything except digits, `.` and `-`
///
/// `"R 1,234.50"` parses to `1234.5`. Only the leading `-digits.digits` run
/// counts, so `"12.50."` is `12.5`. Returns `None` when nothing numeric remains.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric_prefix(&cleaned).parse::<f64>().ok().filter(|v| v.is_finite())
}

fn numeric_prefix(cleaned: &str) -> &str {
    let bytes = cleaned.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = if bytes.first() == Some(&b'-') { 1 } else { 0 };
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    &cleaned[..end]
}

/// A monetary amount in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Round a float amount to the nearest cent, halves away from zero
    ///
    /// Out-of-range amounts clamp to the `i64` cent range.
    pub fn from_f64(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    /// Lenient parse; unparseable text is worth zero
    pub fn parse(text: &str) -> Self {
        parse_number(text).map(Self::from_f64).unwrap_or(Self::ZERO)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a factor, rounding the result to the nearest cent; clamps like `from_f64`
    pub fn scaled(&self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    /// Render with a fixed symbol prefix, e.g. `R 1,234.50`
    pub fn with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", symbol, self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let whole = (cents / 100).to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}{}.{:02}", sign, grouped, cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}
