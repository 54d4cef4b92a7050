//! split-ledger CLI
//!
//! Settle shared expenses from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Who pays whom
//! split-ledger settle --input trip.json
//!
//! # Net balances and spending breakdown as JSON
//! split-ledger balances --input trip.json --format json
//!
//! # Generate a random ledger for testing
//! split-ledger generate --users 6 --expenses 40
//! ```

use rust_decimal::Decimal;
use split_ledger::config::SettlementConfig;
use split_ledger::core::ledger::Ledger;
use split_ledger::report::LedgerReport;
use split_ledger::settlement::summary::SpendingSummary;
use split_ledger::simulation::generator::{generate_random_ledger, LedgerGenConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-ledger — shared expense ledger with debt settlement

USAGE:
    split-ledger <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute who pays whom to settle every balance
    balances    Show net balances and what each user paid and consumed
    generate    Generate a random ledger file (for testing)
    help        Show this message

OPTIONS (settle, balances):
    --input <FILE>      Path to JSON ledger file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --users <N>         Number of users (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --output <FILE>     Write to file instead of stdout

ENVIRONMENT:
    RUST_LOG            Log filter, e.g. debug (default: warn)

EXAMPLES:
    split-ledger settle --input trip.json
    split-ledger balances --input trip.json --format json
    split-ledger generate --users 8 --expenses 50 --output trip.json"#
    );
}

/// JSON schema for a registered user.
#[derive(serde::Deserialize, serde::Serialize)]
struct UserInput {
    id: String,
    name: String,
}

/// JSON schema for a recorded expense.
#[derive(serde::Deserialize, serde::Serialize)]
struct ExpenseInput {
    description: String,
    amount: String,
    paid_by: String,
    participants: Vec<String>,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct LedgerFile {
    users: Vec<UserInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<SettlementConfig>,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    from: String,
    from_name: String,
    to: String,
    to_name: String,
    amount: String,
}

#[derive(serde::Serialize)]
struct SettleOutput {
    transfers: usize,
    total_transferred: String,
    settlements: Vec<SettlementOutput>,
}

#[derive(serde::Serialize)]
struct BalancesOutput {
    balances: split_ledger::core::balance::NetBalances,
    summary: SpendingSummary,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn load_ledger(path: &str) -> (Ledger, SettlementConfig) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Error reading file '{}': {}", path, e)));

    let file: LedgerFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "users": [ {{ "id": "A", "name": "Alice" }}, {{ "id": "B", "name": "Bob" }} ],
  "expenses": [
    {{ "description": "dinner", "amount": "300", "paid_by": "A", "participants": ["A", "B"] }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut ledger = Ledger::new();
    for (i, user) in file.users.iter().enumerate() {
        if let Err(e) = ledger.add_user(&user.id, &user.name) {
            fail(format!("users[{}]: {}", i, e));
        }
    }
    for (i, ex) in file.expenses.iter().enumerate() {
        let amount: Decimal = ex.amount.trim().parse().unwrap_or_else(|e| {
            fail(format!("expenses[{}]: invalid amount '{}': {}", i, ex.amount, e))
        });
        if let Err(e) = ledger.add_expense(&ex.description, amount, &ex.paid_by, &ex.participants)
        {
            fail(format!("expenses[{}]: {}", i, e));
        }
    }
    log::info!(
        "loaded {} users and {} expenses from {}",
        ledger.users().len(),
        ledger.expenses().len(),
        path
    );

    (ledger, file.settings.unwrap_or_default())
}

/// Parse `--input` and `--format`, shared by `settle` and `balances`.
fn parse_input_args(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--input requires a file path")),
                );
            }
            "--format" => {
                i += 1;
                format = args
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| fail("--format requires 'text' or 'json'"));
            }
            _ => fail(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if format != "text" && format != "json" {
        fail(format!("Unknown format '{}': use 'text' or 'json'", format));
    }
    let path = input_path.unwrap_or_else(|| fail("Error: --input <FILE> is required"));
    (path, format)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("Error serializing output: {}", e)))
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_input_args(args);
    let (ledger, config) = load_ledger(&path);
    let report = LedgerReport::new(&ledger, &config);

    if format == "json" {
        let name_of = |id: &split_ledger::core::user::UserId| {
            ledger
                .user(id)
                .map(|u| u.name().to_string())
                .unwrap_or_default()
        };
        let plan = report.plan();
        let output = SettleOutput {
            transfers: plan.len(),
            total_transferred: plan.total_transferred().to_string(),
            settlements: plan
                .iter()
                .map(|s| SettlementOutput {
                    from: s.from.to_string(),
                    from_name: name_of(&s.from),
                    to: s.to.to_string(),
                    to_name: name_of(&s.to),
                    amount: s.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", to_json(&output));
    } else {
        println!("{}", report);
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_input_args(args);
    let (ledger, _config) = load_ledger(&path);
    let balances = ledger.net_balances();
    let summary = SpendingSummary::from_ledger(&ledger);

    if format == "json" {
        println!("{}", to_json(&BalancesOutput { balances, summary }));
    } else {
        println!("=== Net Balances ===");
        for (id, amount) in balances.iter() {
            let status = if amount > Decimal::ZERO {
                "IS OWED"
            } else if amount < Decimal::ZERO {
                "OWES"
            } else {
                "SETTLED"
            };
            let label = ledger
                .user(id)
                .map(|u| u.to_string())
                .unwrap_or_else(|| id.to_string());
            println!("  {:<24} {:>12}  [{}]", label, amount.round_dp(2), status);
        }
        println!();
        println!("{}", summary);
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = LedgerGenConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--users" => {
                i += 1;
                config.user_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--users requires a number"));
            }
            "--expenses" => {
                i += 1;
                config.expense_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| fail("--expenses requires a number"));
            }
            "--output" => {
                i += 1;
                output_path = Some(
                    args.get(i)
                        .cloned()
                        .unwrap_or_else(|| fail("--output requires a file path")),
                );
            }
            _ => fail(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }
    config.max_participants = config.user_count;

    let ledger = generate_random_ledger(&config);
    let output = LedgerFile {
        users: ledger
            .users()
            .iter()
            .map(|u| UserInput {
                id: u.id().to_string(),
                name: u.name().to_string(),
            })
            .collect(),
        expenses: ledger
            .expenses()
            .iter()
            .map(|e| ExpenseInput {
                description: e.description().to_string(),
                amount: e.total_amount().to_string(),
                paid_by: e.paid_by().to_string(),
                participants: e.participants().iter().map(|p| p.to_string()).collect(),
            })
            .collect(),
        settings: None,
    };
    let json = to_json(&output);

    if let Some(path) = output_path {
        fs::write(&path, &json)
            .unwrap_or_else(|e| fail(format!("Error writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} expenses across {} users → {}",
            ledger.expenses().len(),
            ledger.users().len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "balances" => cmd_balances(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
