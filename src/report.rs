//! Human-readable rendering of a ledger and its settlements.
//!
//! Users are shown as `Name (id)` and amounts carry the configured
//! currency symbol.

use crate::config::SettlementConfig;
use crate::core::ledger::Ledger;
use crate::core::user::UserId;
use crate::settlement::engine::SettlementPlan;
use rust_decimal::Decimal;
use std::fmt;

/// A snapshot of a ledger ready for display.
pub struct LedgerReport<'a> {
    ledger: &'a Ledger,
    plan: SettlementPlan,
    config: &'a SettlementConfig,
}

impl<'a> LedgerReport<'a> {
    pub fn new(ledger: &'a Ledger, config: &'a SettlementConfig) -> Self {
        Self {
            ledger,
            plan: ledger.settlements_with(config),
            config,
        }
    }

    pub fn plan(&self) -> &SettlementPlan {
        &self.plan
    }

    /// `Name (id)` for a registered user, `Unknown` otherwise.
    fn label(&self, id: &UserId) -> String {
        self.ledger
            .user(id)
            .map(|u| u.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn money(&self, amount: Decimal) -> String {
        format!(
            "{}{:.*}",
            self.config.currency_symbol, self.config.decimal_places as usize, amount
        )
    }

    /// One line per settlement, or a status line when there is nothing to pay.
    pub fn settlement_lines(&self) -> Vec<String> {
        if self.ledger.expenses().is_empty() {
            return vec!["No expenses to calculate".to_string()];
        }
        if self.plan.is_empty() {
            return vec!["All settled up!".to_string()];
        }
        self.plan
            .iter()
            .map(|s| {
                format!(
                    "{} owes {} {}",
                    self.label(&s.from),
                    self.label(&s.to),
                    self.money(s.amount)
                )
            })
            .collect()
    }
}

impl fmt::Display for LedgerReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Users ===")?;
        for user in self.ledger.users() {
            writeln!(f, "  {}", user)?;
        }

        writeln!(f, "\n=== Expenses ===")?;
        if self.ledger.expenses().is_empty() {
            writeln!(f, "  No expenses added yet")?;
        }
        for expense in self.ledger.expenses() {
            writeln!(f, "  {}", expense.description())?;
            writeln!(f, "    Amount:  {}", self.money(expense.total_amount()))?;
            writeln!(f, "    Paid by: {}", self.label(expense.paid_by()))?;
        }

        writeln!(f, "\n=== Balances ===")?;
        for line in self.settlement_lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
