//! # split-ledger
//!
//! Shared expense ledger with greedy debt settlement.
//!
//! Users record who paid for what and who took part; the ledger derives
//! each user's net balance and turns those balances into a short list of
//! payments that leaves everyone square.
//!
//! ## Architecture
//!
//! - **core** — Users, expenses, the ledger that owns them, net balances
//! - **settlement** — Greedy largest-debtor/largest-creditor matching, spending summary
//! - **report** — Text rendering with `Name (id)` labels
//! - **simulation** — Random ledger generation for stress tests
//! - **config** — Settlement tolerance, rounding and display settings

pub mod config;
pub mod core;
pub mod report;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::SettlementConfig;
    pub use crate::core::balance::NetBalances;
    pub use crate::core::error::LedgerError;
    pub use crate::core::expense::Expense;
    pub use crate::core::ledger::Ledger;
    pub use crate::core::user::{User, UserId};
    pub use crate::report::LedgerReport;
    pub use crate::settlement::engine::{Settlement, SettlementEngine, SettlementPlan};
    pub use crate::settlement::summary::SpendingSummary;
}
