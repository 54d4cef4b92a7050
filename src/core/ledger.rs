use crate::config::SettlementConfig;
use crate::core::balance::NetBalances;
use crate::core::error::LedgerError;
use crate::core::expense::Expense;
use crate::core::user::{User, UserId};
use crate::settlement::engine::{SettlementEngine, SettlementPlan};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// In-memory store of users and shared expenses for one session.
///
/// The ledger owns both collections exclusively. Balances and
/// settlements are never stored; they are recomputed from the full
/// expense list on each query.
///
/// # Examples
///
/// ```
/// use split_ledger::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut ledger = Ledger::new();
/// ledger.add_user("A", "Alice").unwrap();
/// ledger.add_user("B", "Bob").unwrap();
/// ledger
///     .add_expense("lunch", dec!(40), "A", ["A", "B"])
///     .unwrap();
///
/// let plan = ledger.settlements();
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.settlements()[0].amount, dec!(20));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    users: Vec<User>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// Both fields are trimmed. Fails with [`LedgerError::InvalidInput`]
    /// on an empty or malformed id or an empty name, and with
    /// [`LedgerError::DuplicateId`] if the id is taken.
    pub fn add_user(&mut self, id: &str, name: &str) -> Result<User, LedgerError> {
        let id = UserId::parse(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput(
                "user name must not be empty".to_string(),
            ));
        }
        if self.contains_user(&id) {
            return Err(LedgerError::DuplicateId(id));
        }

        let user = User::new(id, name.to_string());
        debug!("registered user {}", user);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Record an expense paid by `paid_by` and split evenly across
    /// `participants`.
    ///
    /// Repeated participant ids count once. Fails with
    /// [`LedgerError::InvalidInput`] on an empty description, a
    /// non-positive amount, an empty payer or no participants, and with
    /// [`LedgerError::UnknownUser`] if any referenced id is not registered.
    pub fn add_expense<I, P>(
        &mut self,
        description: &str,
        total_amount: Decimal,
        paid_by: &str,
        participants: I,
    ) -> Result<Expense, LedgerError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::InvalidInput(
                "expense description must not be empty".to_string(),
            ));
        }
        if total_amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "expense amount must be positive, got {}",
                total_amount
            )));
        }
        let paid_by = UserId::new(paid_by.trim());
        if paid_by.is_empty() {
            return Err(LedgerError::InvalidInput(
                "expense payer must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let participants: Vec<UserId> = participants
            .into_iter()
            .map(|p| UserId::new(p.as_ref().trim()))
            .filter(|p| seen.insert(p.clone()))
            .collect();
        if participants.is_empty() {
            return Err(LedgerError::InvalidInput(
                "expense needs at least one participant".to_string(),
            ));
        }

        if !self.contains_user(&paid_by) {
            return Err(LedgerError::UnknownUser(paid_by));
        }
        if let Some(unknown) = participants.iter().find(|p| !self.contains_user(p)) {
            return Err(LedgerError::UnknownUser(unknown.clone()));
        }

        // Balances and their partial sums are bounded by the total spend.
        if self.total_spent().checked_add(total_amount).is_none() {
            return Err(LedgerError::InvalidInput(
                "expense total exceeds the supported range".to_string(),
            ));
        }

        let expense = Expense::new(
            description.to_string(),
            total_amount,
            paid_by,
            participants,
        );
        debug!(
            "recorded expense {} '{}': {} paid by {} for {} participant(s)",
            expense.id(),
            expense.description(),
            expense.total_amount(),
            expense.paid_by(),
            expense.participants().len()
        );
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Net balance of every registered user.
    pub fn net_balances(&self) -> NetBalances {
        NetBalances::compute(&self.users, &self.expenses)
    }

    /// Settle all balances with the default tolerance and rounding.
    pub fn settlements(&self) -> SettlementPlan {
        self.settlements_with(&SettlementConfig::default())
    }

    /// Settle all balances with explicit settings.
    pub fn settlements_with(&self, config: &SettlementConfig) -> SettlementPlan {
        SettlementEngine::new(config.clone()).settle(&self.net_balances())
    }

    /// Drop every user and expense, returning to an empty session.
    pub fn clear(&mut self) {
        debug!(
            "resetting ledger ({} users, {} expenses)",
            self.users.len(),
            self.expenses.len()
        );
        self.users.clear();
        self.expenses.clear();
    }

    // --- Accessors ---

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    pub fn contains_user(&self, id: &UserId) -> bool {
        self.user(id).is_some()
    }

    /// All registered ids in registration order.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.users.iter().map(|u| u.id().clone()).collect()
    }

    /// Total amount of all recorded expenses.
    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.total_amount()).sum()
    }
}
