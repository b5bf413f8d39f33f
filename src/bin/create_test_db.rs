use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_flow::{
    Category, Email, PasswordHash, Transaction, TransactionKind, ValidatedPassword, create_transaction,
    create_user, initialize_db,
};

/// A utility for creating a test database for the FinanceFlow server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample transactions as (days ago, kind, amount, category, description).
const SAMPLE_TRANSACTIONS: [(i64, TransactionKind, f64, &str, &str); 12] = [
    (2, TransactionKind::Expense, 42.50, "Food", "Groceries"),
    (5, TransactionKind::Expense, 18.00, "Transport", "Bus pass top up"),
    (9, TransactionKind::Income, 3200.00, "Salary", "Monthly salary"),
    (12, TransactionKind::Expense, 1400.00, "Housing", "Rent"),
    (20, TransactionKind::Expense, 65.99, "Leisure", "Concert tickets"),
    (33, TransactionKind::Expense, 120.00, "Health", "Dentist"),
    (40, TransactionKind::Income, 3200.00, "Salary", "Monthly salary"),
    (42, TransactionKind::Expense, 1400.00, "Housing", "Rent"),
    (55, TransactionKind::Income, 450.00, "Freelance", "Logo design"),
    (71, TransactionKind::Income, 3200.00, "Salary", "Monthly salary"),
    (73, TransactionKind::Expense, 1400.00, "Housing", "Rent"),
    (90, TransactionKind::Expense, 89.90, "Shopping", "Running shoes"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user demo@example.com with the password \"password\"...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("password"),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(Email::new("demo@example.com")?, password_hash, &conn)?;

    println!("Creating sample transactions...");

    let today = OffsetDateTime::now_utc().date();

    for (days_ago, kind, amount, category, description) in SAMPLE_TRANSACTIONS {
        create_transaction(
            Transaction::build(
                user.id,
                kind,
                amount,
                Category::new(category)?,
                today - Duration::days(days_ago),
            )
            .description(Some(description)),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
