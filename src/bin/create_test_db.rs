use std::{error::Error, path::Path, process::exit, str::FromStr};

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use fintrack_rs::{
    PasswordHash, ValidatedPassword,
    auth::{NewUser, create_user},
    initialize_db,
    transaction::{Transaction, TransactionType, create_transaction},
};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password-for-testing";

/// A utility for creating a test database for the REST API server of fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating demo user {DEMO_EMAIL}...");

    let user = create_user(
        NewUser {
            name: "Demo".to_owned(),
            email: EmailAddress::from_str(DEMO_EMAIL)?,
            password_hash: PasswordHash::new(
                ValidatedPassword::new_unchecked(DEMO_PASSWORD),
                PasswordHash::DEFAULT_COST,
            )?,
        },
        &connection,
    )?;

    println!("Creating sample transactions...");

    let now = OffsetDateTime::now_utc();
    let samples = [
        (TransactionType::Income, "Salary", 4200.0, 30, "Monthly salary"),
        (TransactionType::Expense, "Rent", 1500.0, 28, "Apartment rent"),
        (TransactionType::Expense, "Food", 86.4, 21, "Groceries"),
        (TransactionType::Expense, "Transport", 45.0, 14, "Bus pass"),
        (TransactionType::Income, "Freelance", 650.0, 10, "Logo design"),
        (TransactionType::Expense, "Entertainment", 32.5, 3, "Cinema"),
    ];

    for (transaction_type, category, amount, days_ago, description) in samples {
        create_transaction(
            user.id,
            Transaction::build(transaction_type, category, amount)
                .date(now - Duration::days(days_ago))
                .description(description),
            &connection,
        )?;
    }

    println!("Success! Log in as {DEMO_EMAIL} with the password {DEMO_PASSWORD:?}.");

    Ok(())
}
