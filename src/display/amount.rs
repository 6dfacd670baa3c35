//! Amount formatting with optional masking

use crate::config::Settings;
use crate::models::{Money, Profile, TransactionKind};

/// Shown instead of digits while amounts are hidden
pub const HIDDEN_AMOUNT: &str = "••••";

/// Formats money for terminal output
///
/// Honors the profile's hide-amounts preference so every view masks the same
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormatter {
    symbol: String,
    hidden: bool,
}

impl AmountFormatter {
    pub fn new(symbol: impl Into<String>, hidden: bool) -> Self {
        Self {
            symbol: symbol.into(),
            hidden,
        }
    }

    pub fn from_settings(settings: &Settings, profile: &Profile) -> Self {
        Self::new(&settings.currency_symbol, profile.settings.hide_amounts)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// `€1234.50`, `-€12.00`, or the mask
    pub fn format(&self, amount: Money) -> String {
        if self.hidden {
            let sign = if amount.is_negative() { "-" } else { "" };
            return format!("{}{}{}", sign, self.symbol, HIDDEN_AMOUNT);
        }
        amount.format_with_symbol(&self.symbol)
    }

    /// Amount prefixed with `+` for income and `-` for expense
    pub fn format_transaction(&self, kind: TransactionKind, amount: Money) -> String {
        let sign = match kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        format!("{}{}", sign, self.format(amount.abs()))
    }
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new(crate::models::money::DEFAULT_CURRENCY_SYMBOL, false)
    }
}
