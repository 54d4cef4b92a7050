use crate::core::expense::Expense;
use crate::core::user::{User, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Net position of every user, derived from the full expense list.
///
/// A positive balance means the user is owed money (net creditor).
/// A negative balance means the user owes money (net debtor).
///
/// Entries keep user registration order, which is also the tie-break
/// order used by the settlement engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetBalances {
    #[serde(with = "entries_serde")]
    entries: Vec<(UserId, Decimal)>,
}

// Serialized as a JSON object `{ "user": "amount" }`, preserving order.
mod entries_serde {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S: serde::Serializer>(
        entries: &[(UserId, Decimal)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (user, amount) in entries {
            map.serialize_entry(user, amount)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(UserId, Decimal)>, D::Error> {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Vec<(UserId, Decimal)>;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of user id to balance")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((user, amount)) = access.next_entry::<UserId, Decimal>()? {
                    entries.push((user, amount));
                }
                Ok(entries)
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl NetBalances {
    /// Recompute balances from scratch.
    ///
    /// Every user starts at zero. For each expense the payer is credited
    /// the full amount and each participant is debited an equal share.
    /// References to ids missing from `users` get their own entry after
    /// the registered users.
    pub fn compute(users: &[User], expenses: &[Expense]) -> Self {
        let mut entries: Vec<(UserId, Decimal)> = users
            .iter()
            .map(|u| (u.id().clone(), Decimal::ZERO))
            .collect();
        let mut index: HashMap<UserId, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();

        let mut slot = |id: &UserId, entries: &mut Vec<(UserId, Decimal)>| -> usize {
            *index.entry(id.clone()).or_insert_with(|| {
                entries.push((id.clone(), Decimal::ZERO));
                entries.len() - 1
            })
        };

        for expense in expenses {
            let payer = slot(expense.paid_by(), &mut entries);
            entries[payer].1 += expense.total_amount();

            let share = expense.share();
            for participant in expense.participants() {
                let i = slot(participant, &mut entries);
                entries[i].1 -= share;
            }
        }

        Self { entries }
    }

    /// Build balances from explicit entries, in the given order.
    pub fn from_entries(entries: impl IntoIterator<Item = (UserId, Decimal)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Balance of a user, or `None` if the user has no entry.
    pub fn get(&self, user: &UserId) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(id, _)| id == user)
            .map(|(_, amount)| *amount)
    }

    /// Balance of a user, zero if absent.
    pub fn balance(&self, user: &UserId) -> Decimal {
        self.get(user).unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, Decimal)> + '_ {
        self.entries.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero up to division noise.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    /// Whether the balances sum to zero within `tolerance`.
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.total().abs() <= tolerance
    }

    /// Total owed to net creditors (sum of positive balances).
    pub fn total_owed(&self) -> Decimal {
        self.entries
            .iter()
            .map(|(_, amount)| *amount)
            .filter(|amount| *amount > Decimal::ZERO)
            .sum()
    }

    /// Adjust a user's balance in place, adding an entry if needed.
    pub(crate) fn adjust(&mut self, user: &UserId, delta: Decimal) {
        match self.entries.iter_mut().find(|(id, _)| id == user) {
            Some((_, amount)) => *amount += delta,
            None => self.entries.push((user.clone(), delta)),
        }
    }
}
