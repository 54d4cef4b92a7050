use crate::core::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user sharing expenses in a ledger.
///
/// Identifiers are caller-assigned and restricted to ASCII letters,
/// digits, underscore and hyphen. Use [`UserId::parse`] at input
/// boundaries; [`UserId::new`] is for lookups of ids already known.
///
/// # Examples
///
/// ```
/// use split_ledger::core::user::UserId;
///
/// let alice = UserId::parse("alice_01").unwrap();
/// assert_eq!(alice.as_str(), "alice_01");
/// assert!(UserId::parse("bob smith").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Trim and validate a raw identifier.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(LedgerError::InvalidInput(
                "user id must not be empty".to_string(),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(LedgerError::InvalidInput(format!(
                "user id '{}' may only contain letters, digits, '_' and '-'",
                id
            )));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A registered participant of the ledger.
///
/// Users are immutable once created and never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    pub(crate) fn new(id: UserId, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Renders as `Name (id)`.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
