use crate::core::ledger::Ledger;
use crate::core::user::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What one user paid, consumed and nets out to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSpending {
    pub user: UserId,
    /// Sum of expenses this user paid for.
    pub paid: Decimal,
    /// Sum of this user's shares across the expenses they took part in.
    pub share: Decimal,
    /// `paid - share`.
    pub net: Decimal,
}

/// Per-user breakdown of a ledger's spending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// Gross value of all recorded expenses.
    pub total_spent: Decimal,
    /// One row per registered user, in registration order.
    pub users: Vec<UserSpending>,
}

impl SpendingSummary {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let users = ledger
            .users()
            .iter()
            .map(|u| {
                let id = u.id();
                let paid: Decimal = ledger
                    .expenses()
                    .iter()
                    .filter(|e| e.paid_by() == id)
                    .map(|e| e.total_amount())
                    .sum();
                let share: Decimal = ledger
                    .expenses()
                    .iter()
                    .filter(|e| e.involves(id))
                    .map(|e| e.share())
                    .sum();
                UserSpending {
                    user: id.clone(),
                    paid,
                    share,
                    net: paid - share,
                }
            })
            .collect();

        SpendingSummary {
            total_spent: ledger.total_spent(),
            users,
        }
    }

    pub fn for_user(&self, user: &UserId) -> Option<&UserSpending> {
        self.users.iter().find(|s| &s.user == user)
    }
}

impl std::fmt::Display for SpendingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Spending Summary ===")?;
        writeln!(f, "Total Spent: {}", self.total_spent)?;
        for row in &self.users {
            writeln!(
                f,
                "  {:<12} paid {:>10}  share {:>10}  net {:>10}",
                row.user,
                row.paid.round_dp(2),
                row.share.round_dp(2),
                row.net.round_dp(2)
            )?;
        }
        Ok(())
    }
}
