//! Dinner for three, paid by one.
//!
//! Shows the ledger, net balances and the resulting settlements.

use split_ledger::prelude::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), LedgerError> {
    println!("╔════════════════════════════════════╗");
    println!("║  split-ledger: Dinner Split Demo   ║");
    println!("╚════════════════════════════════════╝\n");

    let mut ledger = Ledger::new();
    ledger.add_user("A", "Alice")?;
    ledger.add_user("B", "Bob")?;
    ledger.add_user("C", "Carol")?;

    ledger.add_expense("dinner", dec!(300), "A", ["A", "B", "C"])?;
    ledger.add_expense("dessert", dec!(45), "B", ["A", "B", "C"])?;

    println!("━━━ Net Balances ━━━\n");
    for (id, amount) in ledger.net_balances().iter() {
        let status = if amount > dec!(0) {
            "IS OWED"
        } else if amount < dec!(0) {
            "OWES"
        } else {
            "SETTLED"
        };
        println!("  {:<6} {:>10}  [{}]", id, amount.round_dp(2), status);
    }
    println!();

    let config = SettlementConfig::default();
    println!("{}", LedgerReport::new(&ledger, &config));
    Ok(())
}
