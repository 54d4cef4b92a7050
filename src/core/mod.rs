pub mod balance;
pub mod error;
pub mod expense;
pub mod ledger;
pub mod user;
