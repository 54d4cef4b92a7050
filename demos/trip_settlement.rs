//! A week-long trip with many small expenses.
//!
//! Compares how much money changed hands during the trip with how much
//! has to move to settle up afterwards.

use split_ledger::prelude::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), LedgerError> {
    println!("╔═══════════════════════════════════════╗");
    println!("║  split-ledger: Trip Settlement Demo   ║");
    println!("╚═══════════════════════════════════════╝\n");

    let mut ledger = Ledger::new();
    for (id, name) in [("ana", "Ana"), ("ben", "Ben"), ("cy", "Cy"), ("dee", "Dee"), ("eli", "Eli")] {
        ledger.add_user(id, name)?;
    }
    let everyone: Vec<String> = ledger.user_ids().iter().map(|u| u.to_string()).collect();

    ledger.add_expense("cabin", dec!(1250), "ana", &everyone)?;
    ledger.add_expense("groceries", dec!(187.40), "ben", &everyone)?;
    ledger.add_expense("fuel", dec!(96.15), "cy", ["ana", "cy", "eli"])?;
    ledger.add_expense("kayaks", dec!(140), "dee", ["ben", "dee", "eli"])?;
    ledger.add_expense("pizza night", dec!(73.50), "eli", &everyone)?;
    ledger.add_expense("museum", dec!(48), "ben", ["ben", "cy"])?;

    println!("{}", SpendingSummary::from_ledger(&ledger));

    let plan = ledger.settlements();
    println!("{}", plan);

    println!("━━━ Summary ━━━\n");
    println!("  Expenses recorded: {}", ledger.expenses().len());
    println!("  Money spent:       {}", ledger.total_spent());
    println!("  Money to move:     {}", plan.total_transferred());
    println!("  Transfers:         {}", plan.len());
    Ok(())
}
