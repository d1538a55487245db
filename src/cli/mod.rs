use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::application::{LedgerService, PaymentRequest, SecurityService};
use crate::domain::{ACCOUNT_HOLDER, BANKS, bank_by_id, format_rupees, parse_rupees};

/// Paisa - Mobile Wallet Ledger
#[derive(Parser)]
#[command(name = "paisa")]
#[command(about = "An in-memory mobile wallet ledger with simulated settlement")]
#[command(version)]
pub struct Cli {
    /// Start from an empty ledger with this opening balance instead of the
    /// seeded demo account
    #[arg(long, global = true)]
    pub opening_balance: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current balance
    Balance,

    /// List transaction history, newest first
    History {
        /// Maximum number of records to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List supported banks
    Banks,

    /// Check whether an amount is covered by the current balance
    Check {
        /// Amount to check (e.g., "5000" or "5,000")
        amount: String,
    },

    /// Send money to a recipient account
    Send {
        /// Amount to send (e.g., "5000" or "5,000")
        amount: String,

        /// Recipient account number, IBAN, or phone
        #[arg(long)]
        to: String,

        /// Recipient bank id (see `banks`)
        #[arg(long)]
        bank: String,

        /// Recipient display name
        #[arg(short, long)]
        name: Option<String>,

        /// Purpose of payment, shown on the receipt
        #[arg(long)]
        purpose: Option<String>,

        /// Personal note, shown on the receipt
        #[arg(long)]
        note: Option<String>,

        /// Reference number to reuse (generated when omitted or malformed)
        #[arg(short, long)]
        reference: Option<String>,

        /// Confirmation PIN
        #[arg(long)]
        pin: String,
    },

    /// Export the ledger to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv (history rows) or json (full snapshot)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    fn build_service(&self) -> Result<LedgerService> {
        match &self.opening_balance {
            Some(amount) => {
                let paisa = parse_rupees(amount)
                    .context("Invalid opening balance. Use '25000' or '25,000'")?;
                Ok(LedgerService::with_opening_balance(paisa))
            }
            None => Ok(LedgerService::new()),
        }
    }

    pub async fn run(self) -> Result<()> {
        let service = self.build_service()?;

        match self.command {
            Commands::Balance => {
                println!("Current balance: {}", format_rupees(service.get_balance()));
            }

            Commands::History { limit, format } => {
                run_history_command(&service, limit, &format)?;
            }

            Commands::Banks => {
                run_banks_command();
            }

            Commands::Check { amount } => {
                run_check_command(&service, &amount).await?;
            }

            Commands::Send {
                amount,
                to,
                bank,
                name,
                purpose,
                note,
                reference,
                pin,
            } => {
                run_send_command(
                    &service, &amount, &to, &bank, name, purpose, note, reference, &pin,
                )
                .await?;
            }

            Commands::Export { output, format } => {
                run_export_command(&service, output.as_deref(), &format)?;
            }
        }

        Ok(())
    }
}

fn run_history_command(service: &LedgerService, limit: Option<usize>, format: &str) -> Result<()> {
    let mut records = service.get_history();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        "table" => {
            if records.is_empty() {
                println!("No transactions found.");
                return Ok(());
            }

            let today = Utc::now().date_naive();
            println!(
                "{:<18} {:<9} {:<9} {:>12} {:<22} {:<14} REFERENCE",
                "DATE", "TIME", "TYPE", "AMOUNT", "COUNTERPARTY", "BANK"
            );
            println!("{}", "-".repeat(100));
            for record in &records {
                println!(
                    "{:<18} {:<9} {:<9} {:>12} {:<22} {:<14} {}",
                    record.display_date(today),
                    record.display_time(),
                    record.direction,
                    format_rupees(record.amount),
                    truncate(&record.name, 22),
                    truncate(record.bank_name.as_deref().unwrap_or(""), 14),
                    record.reference_number.as_deref().unwrap_or("-"),
                );
            }
        }
        _ => {
            anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format);
        }
    }

    Ok(())
}

fn run_banks_command() {
    println!("{:<12} NAME", "ID");
    println!("{}", "-".repeat(26));
    for bank in BANKS {
        println!("{:<12} {}", bank.id, bank.name);
    }
}

async fn run_check_command(service: &LedgerService, amount: &str) -> Result<()> {
    let amount = parse_rupees(amount).context("Invalid amount format. Use '5000' or '5,000'")?;

    let check = service.check_balance(amount).await;
    if check.is_valid {
        println!(
            "{} is covered by the current balance ({}).",
            format_rupees(amount),
            format_rupees(check.current_balance)
        );
        return Ok(());
    }

    let message = check
        .error
        .unwrap_or_else(|| "Insufficient balance".to_string());
    anyhow::bail!(message);
}

#[allow(clippy::too_many_arguments)]
async fn run_send_command(
    service: &LedgerService,
    amount: &str,
    to: &str,
    bank_id: &str,
    name: Option<String>,
    purpose: Option<String>,
    note: Option<String>,
    reference: Option<String>,
    pin: &str,
) -> Result<()> {
    let amount = parse_rupees(amount).context("Invalid amount format. Use '5000' or '5,000'")?;
    let bank = bank_by_id(bank_id);

    let security = SecurityService::new();
    if !security.validate_pin(pin) {
        service.report_failure("Incorrect PIN. Please try again.");
        anyhow::bail!("Incorrect PIN. Please try again.");
    }
    security.set_authenticated(true);

    let check = service.check_balance(amount).await;
    if !check.is_valid {
        let message = check
            .error
            .unwrap_or_else(|| "Insufficient balance".to_string());
        service.report_failure(&message);
        anyhow::bail!(message);
    }

    let subscription = service.subscribe(|| tracing::debug!("ledger updated"));

    let result = service
        .process_transaction(PaymentRequest {
            amount,
            recipient_name: name,
            recipient_account: to.to_string(),
            recipient_bank: bank.name.to_string(),
            bank_id: Some(bank.id.to_string()),
            reference_number: reference,
        })
        .await;
    subscription.unsubscribe();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(error) => {
            service.report_failure(&error.to_string());
            return Err(error.into());
        }
    };

    let today = Utc::now().date_naive();
    println!("Payment sent");
    println!("  Amount:    {}", format_rupees(receipt.record.amount));
    println!("  To:        {}", receipt.record.name);
    println!("  Bank:      {}", bank.name);
    println!("  Account:   {}", to);
    println!("  Reference: {}", receipt.reference_number);
    println!(
        "  Date:      {}, {}",
        receipt.record.display_date(today),
        receipt.record.display_time()
    );
    if let Some(purpose) = purpose {
        println!("  Purpose:   {}", purpose);
    }
    if let Some(note) = note {
        println!("  Note:      {}", note);
    }
    println!(
        "  From:      {} ({} {})",
        ACCOUNT_HOLDER.name,
        ACCOUNT_HOLDER.bank_name,
        ACCOUNT_HOLDER.masked_account()
    );
    println!();
    println!("New balance: {}", format_rupees(receipt.new_balance));

    Ok(())
}

fn run_export_command(service: &LedgerService, output: Option<&str>, format: &str) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_history_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} records", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_snapshot_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported snapshot: {} records, balance {}",
                    snapshot.records.len(),
                    format_rupees(snapshot.balance)
                );
            }
        }
        _ => {
            anyhow::bail!("Invalid format '{}'. Valid formats: csv, json", format);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
