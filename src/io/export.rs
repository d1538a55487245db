use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{Paisa, TransactionRecord};

/// Ledger snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub balance: Paisa,
    /// Newest first, matching history ordering
    pub records: Vec<TransactionRecord>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export the transaction history to CSV format, newest first
    pub fn export_history_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let records = self.service.get_history();
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(&[
            "id",
            "sequence",
            "timestamp",
            "direction",
            "amount_paisa",
            "counterparty",
            "bank_name",
            "bank_id",
            "account_info",
            "reference_number",
            "sender_name",
            "sender_bank",
        ])?;

        let mut count = 0;
        for record in &records {
            csv_writer.write_record(&[
                record.id.to_string(),
                record.sequence.to_string(),
                record.created_at.to_rfc3339(),
                record.direction.to_string(),
                record.amount.to_string(),
                record.name.clone(),
                record.bank_name.clone().unwrap_or_default(),
                record.bank_id.clone().unwrap_or_default(),
                record.account_info.clone().unwrap_or_default(),
                record.reference_number.clone().unwrap_or_default(),
                record.sender_name.clone(),
                record.sender_bank.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            balance: self.service.get_balance(),
            records: self.service.get_history(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
