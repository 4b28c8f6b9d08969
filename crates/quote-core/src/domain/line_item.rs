//! Line Items
//!
//! Ephemeral table rows plus the totals derived from them.

use serde::{Deserialize, Serialize};

use super::currency::{parse_number, Money};

/// Editable cell of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineField {
    Label,
    Description,
    Quantity,
    Rate,
}

/// One row of the item table, held as the text the user sees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Session-local row id
    pub id: u32,
    pub label: String,
    pub description: String,
    /// Free-text quantity
    pub quantity: String,
    /// Currency-formatted rate text
    pub rate: String,
}

impl LineItem {
    /// A fresh row: one unit at zero
    pub fn placeholder(id: u32, currency_symbol: &str) -> Self {
        Self {
            id,
            label: "Item".to_string(),
            description: "Description...".to_string(),
            quantity: "1".to_string(),
            rate: Money::ZERO.with_symbol(currency_symbol),
        }
    }

    pub fn set(&mut self, field: LineField, text: String) {
        match field {
            LineField::Label => self.label = text,
            LineField::Description => self.description = text,
            LineField::Quantity => self.quantity = text,
            LineField::Rate => self.rate = text,
        }
    }

    pub fn quantity_value(&self) -> f64 {
        parse_number(&self.quantity).unwrap_or(0.0)
    }

    pub fn rate_value(&self) -> Money {
        Money::parse(&self.rate)
    }

    pub fn line_total(&self) -> Money {
        self.rate_value().scaled(self.quantity_value())
    }

    /// Rewrite the rate text into canonical form; returns true if it changed
    pub fn normalize_rate(&mut self, currency_symbol: &str) -> bool {
        let canonical = self.rate_value().with_symbol(currency_symbol);
        if self.rate == canonical {
            return false;
        }
        self.rate = canonical;
        true
    }
}

/// Document totals, always derived from the current rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Money,
    pub vat: Money,
    pub grand_total: Money,
}

impl Totals {
    pub fn compute(items: &[LineItem], vat_rate: f64) -> Self {
        let subtotal: Money = items.iter().map(LineItem::line_total).sum();
        let vat = subtotal.scaled(vat_rate);
        Self {
            subtotal,
            vat,
            grand_total: subtotal + vat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(id: u32, quantity: &str, rate: &str) -> LineItem {
        LineItem {
            quantity: quantity.to_string(),
            rate: rate.to_string(),
            ..LineItem::placeholder(id, "R")
        }
    }

    #[test]
    fn test_placeholder_row() {
        let item = LineItem::placeholder(7, "R");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.rate, "R 0.00");
        assert_eq!(item.line_total(), Money::ZERO);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(row(1, "3", "R 12.50").line_total().to_string(), "37.50");
        assert_eq!(row(1, "1.5", "1,000").line_total().to_string(), "1,500.00");
        assert_eq!(row(1, "abc", "R 10.00").line_total(), Money::ZERO);
    }

    #[test]
    fn test_normalize_rate() {
        let mut item = row(1, "1", "12.5");
        assert!(item.normalize_rate("R"));
        assert_eq!(item.rate, "R 12.50");
        assert!(!item.normalize_rate("R"));
    }

    #[test]
    fn test_totals() {
        let items = vec![row(1, "2", "R 250.00"), row(2, "1", "R 500.00")];
        let totals = Totals::compute(&items, 0.15);
        assert_eq!(totals.subtotal, Money::from_cents(100000));
        assert_eq!(totals.vat, Money::from_cents(15000));
        assert_eq!(totals.grand_total, Money::from_cents(115000));
    }

    #[test]
    fn test_totals_of_empty_table() {
        assert_eq!(Totals::compute(&[], 0.15), Totals::default());
    }

    proptest! {
        #[test]
        fn prop_line_total_is_exact(q in 0u32..10_000, rate_cents in 0i64..10_000_000) {
            let rate = Money::from_cents(rate_cents);
            let item = row(1, &q.to_string(), &rate.with_symbol("R"));
            prop_assert_eq!(item.line_total().cents(), q as i64 * rate_cents);
        }

        #[test]
        fn prop_totals_add_up(cents in prop::collection::vec(0i64..1_000_000, 0..12)) {
            let items: Vec<LineItem> = cents
                .iter()
                .enumerate()
                .map(|(i, c)| row(i as u32, "1", &Money::from_cents(*c).to_string()))
                .collect();
            let totals = Totals::compute(&items, 0.15);
            let expected: i64 = cents.iter().sum();
            prop_assert_eq!(totals.subtotal.cents(), expected);
            prop_assert_eq!(totals.vat, totals.subtotal.scaled(0.15));
            prop_assert_eq!(totals.grand_total, totals.subtotal + totals.vat);
        }
    }
}
