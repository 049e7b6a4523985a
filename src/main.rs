//! Clientbook CLI
//!
//! Command-line demo for the client/renewal engine: loads a book (or seeds a
//! sample one), runs the renewal-window report, and prints the results.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Days;
use clap::Parser;

use clientbook::{
    ClientRecord, ClientStore, Clock, CommandRunner, Policy, PolicyKind, PolicyNumber,
    RenewalDate, SortKey, StoreSnapshot, SystemClock,
};

#[derive(Parser)]
#[command(name = "clientbook", version, about = "Client and policy renewal tracking")]
struct Cli {
    /// Load the book from a snapshot JSON file instead of the built-in sample
    #[arg(long)]
    load: Option<PathBuf>,

    /// Renewal window in days (1-365)
    #[arg(long, default_value_t = 30)]
    days: u16,

    /// Report order: "date" or "name"
    #[arg(long, default_value = "date", value_parser = SortKey::parse)]
    sort: SortKey,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Clientbook v0.1.0");
    println!("=================\n");

    let clock = SystemClock;
    let mut store = match &cli.load {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("unable to read snapshot {}", path.display()))?;
            let snapshot: StoreSnapshot =
                serde_json::from_str(&text).context("snapshot is not valid JSON")?;
            ClientStore::from_snapshot(snapshot)
        }
        None => sample_book(&clock)?,
    };

    println!(
        "Book: {} clients, last modified {}",
        store.len(),
        store.last_modified().format("%d-%m-%Y %H:%M")
    );

    let runner = CommandRunner::new(&clock);
    let outcome = runner.upcoming_renewals(&mut store, Some(cli.days), Some(cli.sort))?;

    println!("\nRenewals due within {} days:", cli.days);
    println!(
        "{:<20} {:>10} {:>10} {:>12} {:>6}",
        "Name", "Policy", "Kind", "Renews", "Days"
    );
    println!("{}", "-".repeat(64));

    let today = clock.today();
    for record in store.renewals_view() {
        let renewal = record.policy().renewal_date();
        println!(
            "{:<20} {:>10} {:>10} {:>12} {:>6}",
            record.name(),
            record.policy().number().as_str(),
            record.policy().kind().as_str(),
            renewal.to_string(),
            renewal.days_until(today),
        );
    }
    println!("\n{}", outcome.summary);

    // Detail projection for the most urgent renewal
    if let Some(first) = store.renewals_view().first() {
        let detail = first.detail();
        println!("\nNext up: {}", first.name());
        println!("  Policy:  {}", detail.policy_number);
        println!("  Renews:  {}", detail.renewal_date);
        println!("  Phone:   {}", first.phone());
        println!("  Email:   {}", first.email());
    }

    Ok(())
}

/// Small seeded book with renewals spread around the current date
fn sample_book(clock: &dyn Clock) -> anyhow::Result<ClientStore> {
    let today = clock.today();
    let mut store = ClientStore::new();

    let clients = [
        ("Alice Tan", "91234567", "alice.tan@example.com", "12 Harbour Road", "100001", PolicyKind::Life, 12u64),
        ("Bob Lee", "87654321", "bob.lee@example.com", "31 Clementi Ave 2", "100002", PolicyKind::Vehicle, 25),
        ("Carol Ng", "81112222", "carol.ng@example.com", "8 Bedok North St 1", "100003", PolicyKind::Health, 48),
        ("Dan Koh", "80001111", "dan.koh@example.com", "5 Telok Blangah Way", "100004", PolicyKind::Travel, 9),
        ("Elena Lim", "93334444", "elena.lim@example.com", "20 Anson Road", "100005", PolicyKind::Property, 180),
    ];

    for (name, phone, email, address, number, kind, days_out) in clients {
        let renewal = RenewalDate::new(today + Days::new(days_out), today)?;
        let policy = Policy::new(PolicyNumber::new(number)?, renewal, kind);
        let record = ClientRecord::new(
            name.to_string(),
            phone.to_string(),
            email.to_string(),
            address.to_string(),
            policy,
        )?;
        store.add(record)?;
    }

    Ok(store)
}
