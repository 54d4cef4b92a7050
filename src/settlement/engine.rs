use crate::config::SettlementConfig;
use crate::core::balance::NetBalances;
use crate::core::user::UserId;
use log::{debug, trace, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single payment instruction: `from` pays `to` the given `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: UserId,
    pub to: UserId,
    /// Positive, rounded to the configured decimal places.
    pub amount: Decimal,
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} owes {} {}", self.from, self.to, self.amount)
    }
}

/// Ordered list of settlements produced by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    settlements: Vec<Settlement>,
}

impl SettlementPlan {
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Settlement> {
        self.settlements.iter()
    }

    pub fn len(&self) -> usize {
        self.settlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Total amount moved by all transfers.
    pub fn total_transferred(&self) -> Decimal {
        self.settlements.iter().map(|s| s.amount).sum()
    }

    /// Balances left over after every transfer in the plan is paid.
    ///
    /// A payer's balance rises by the amount paid and the receiver's
    /// drops by the same amount.
    pub fn apply_to(&self, balances: &NetBalances) -> NetBalances {
        let mut residual = balances.clone();
        for s in &self.settlements {
            residual.adjust(&s.from, s.amount);
            residual.adjust(&s.to, -s.amount);
        }
        residual
    }
}

impl<'a> IntoIterator for &'a SettlementPlan {
    type Item = &'a Settlement;
    type IntoIter = std::slice::Iter<'a, Settlement>;

    fn into_iter(self) -> Self::IntoIter {
        self.settlements.iter()
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlements ===")?;
        if self.settlements.is_empty() {
            return writeln!(f, "All settled up!");
        }
        for s in &self.settlements {
            writeln!(f, "  {}", s)?;
        }
        writeln!(f, "Transfers:   {}", self.len())?;
        writeln!(f, "Total moved: {}", self.total_transferred())
    }
}

/// Outstanding amount of one side of a match.
#[derive(Debug)]
struct Position<'a> {
    user: &'a UserId,
    remaining: Decimal,
}

/// Turns net balances into payment instructions.
///
/// # Algorithm
///
/// 1. Users owing more than epsilon become debtors, users owed more
///    than epsilon become creditors; everyone else is settled.
/// 2. Both sides are sorted by amount, largest first. The sort is
///    stable, so equal amounts keep user registration order.
/// 3. The largest remaining debtor pays the largest remaining creditor
///    the smaller of the two outstanding amounts. Whichever side drops
///    below epsilon is retired; both may retire in one step.
/// 4. Matching stops when either side runs out.
///
/// This runs in O(D + C) steps after sorting and emits at most
/// D + C - 1 transfers. It does not always find the smallest possible
/// number of transfers; that is a subset-sum style problem.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Compute the transfers that bring every balance to zero.
    pub fn settle(&self, balances: &NetBalances) -> SettlementPlan {
        let epsilon = self.config.epsilon.max(Decimal::ZERO);

        let mut debtors: Vec<Position<'_>> = Vec::new();
        let mut creditors: Vec<Position<'_>> = Vec::new();
        for (user, balance) in balances.iter() {
            if balance < -epsilon {
                debtors.push(Position {
                    user,
                    remaining: -balance,
                });
            } else if balance > epsilon {
                creditors.push(Position {
                    user,
                    remaining: balance,
                });
            }
        }

        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debug!(
            "settling {} debtor(s) against {} creditor(s)",
            debtors.len(),
            creditors.len()
        );

        let mut settlements = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let amount = debtors[i].remaining.min(creditors[j].remaining);

            let mut rounded = amount.round_dp_with_strategy(
                self.config.decimal_places,
                RoundingStrategy::MidpointAwayFromZero,
            );
            rounded.rescale(self.config.decimal_places);
            if amount > epsilon && rounded > Decimal::ZERO {
                trace!(
                    "{} pays {} {} (exact {})",
                    debtors[i].user,
                    creditors[j].user,
                    rounded,
                    amount
                );
                settlements.push(Settlement {
                    from: debtors[i].user.clone(),
                    to: creditors[j].user.clone(),
                    amount: rounded,
                });
            }

            debtors[i].remaining -= amount;
            creditors[j].remaining -= amount;

            if is_settled(debtors[i].remaining, epsilon) {
                i += 1;
            }
            if is_settled(creditors[j].remaining, epsilon) {
                j += 1;
            }
        }

        let unmatched: Decimal = debtors[i..]
            .iter()
            .chain(creditors[j..].iter())
            .map(|p| p.remaining)
            .filter(|r| !is_settled(*r, epsilon))
            .sum();
        if unmatched > Decimal::ZERO {
            warn!(
                "{} left unmatched after settlement (balances do not net to zero)",
                unmatched
            );
        }

        debug!("produced {} settlement(s)", settlements.len());
        SettlementPlan { settlements }
    }
}

fn is_settled(remaining: Decimal, epsilon: Decimal) -> bool {
    remaining <= Decimal::ZERO || remaining < epsilon
}
