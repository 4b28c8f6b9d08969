//! Controller Configuration
//!
//! Tunables for numbering, currency, tax and autosave timing.
//! Every field has a default, so a partial JSON object is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Flat VAT applied to the subtotal
    pub vat_rate: f64,
    /// Fixed symbol shown in front of amounts
    pub currency_symbol: String,
    /// Literal prefix of invoice numbers
    pub invoice_prefix: String,
    pub default_quote_number: String,
    pub default_invoice_number: String,
    /// Quiet period before typed client info is saved
    pub client_save_delay_ms: u64,
    /// Quiet period before a hand-edited number is saved
    pub number_save_delay_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            vat_rate: 0.15,
            currency_symbol: "R".to_string(),
            invoice_prefix: "INV-".to_string(),
            default_quote_number: "2508".to_string(),
            default_invoice_number: "INV-2508".to_string(),
            client_save_delay_ms: 1000,
            number_save_delay_ms: 500,
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn client_save_delay(&self) -> Duration {
        Duration::from_millis(self.client_save_delay_ms)
    }

    pub fn number_save_delay(&self) -> Duration {
        Duration::from_millis(self.number_save_delay_ms)
    }
}
