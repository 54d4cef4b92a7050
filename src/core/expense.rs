use crate::core::user::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared expense: one user paid `total_amount` on behalf of the
/// `participants`, who split it evenly.
///
/// Expenses are append-only. They are created through
/// [`Ledger::add_expense`](crate::core::ledger::Ledger::add_expense),
/// which validates the fields and assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier assigned on creation.
    id: Uuid,
    description: String,
    /// Always positive.
    total_amount: Decimal,
    paid_by: UserId,
    /// Non-empty, without duplicates, in the order given by the caller.
    participants: Vec<UserId>,
    created_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn new(
        description: String,
        total_amount: Decimal,
        paid_by: UserId,
        participants: Vec<UserId>,
    ) -> Self {
        debug_assert!(total_amount > Decimal::ZERO);
        debug_assert!(!participants.is_empty());
        Self {
            id: Uuid::new_v4(),
            description,
            total_amount,
            paid_by,
            participants,
            created_at: Utc::now(),
        }
    }

    /// The amount each participant owes for this expense.
    ///
    /// Full-precision division; no rounding is applied here.
    pub fn share(&self) -> Decimal {
        self.total_amount / Decimal::from(self.participants.len())
    }

    /// Whether `user` is one of the participants splitting this expense.
    pub fn involves(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn paid_by(&self) -> &UserId {
        &self.paid_by
    }

    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }
}
