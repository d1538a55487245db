use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ACCOUNT_HOLDER, Paisa};

pub type TransactionId = Uuid;

/// Prefix stamped on every payment reference number.
pub const REFERENCE_PREFIX: &str = "Raast-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money leaving the account
    Sent,
    /// Money arriving into the account
    Received,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sent" => Some(Direction::Sent),
            "received" => Some(Direction::Received),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A settled movement of money on the account ledger.
/// Records are immutable once applied - the history only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    /// Monotonically increasing sequence number for ordering
    pub sequence: u64,
    /// Counterparty display name (the recipient for sent records)
    pub name: String,
    pub direction: Direction,
    /// Amount in paisa (always positive; direction carries the sign)
    pub amount: Paisa,
    /// When the movement settled
    pub created_at: DateTime<Utc>,
    /// Counterparty's bank display name
    pub bank_name: Option<String>,
    /// Counterparty's bank id in the bank directory
    pub bank_id: Option<String>,
    /// Counterparty's account number, IBAN, or phone
    pub account_info: Option<String>,
    /// Payment network reference
    pub reference_number: Option<String>,
    /// Denormalized sender identity, stamped at settlement time
    pub sender_name: String,
    pub sender_bank: String,
}

impl TransactionRecord {
    /// Create a new record. Sequence number must be assigned by the ledger.
    /// The sender identity defaults to the account holder.
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        amount: Paisa,
        created_at: DateTime<Utc>,
    ) -> Self {
        assert!(amount > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            sequence: 0, // Will be set by the ledger
            name: name.into(),
            direction,
            amount,
            created_at,
            bank_name: None,
            bank_id: None,
            account_info: None,
            reference_number: None,
            sender_name: ACCOUNT_HOLDER.name.to_string(),
            sender_bank: ACCOUNT_HOLDER.bank_name.to_string(),
        }
    }

    pub fn with_bank(mut self, bank_name: impl Into<String>) -> Self {
        self.bank_name = Some(bank_name.into());
        self
    }

    pub fn with_bank_id(mut self, bank_id: impl Into<String>) -> Self {
        self.bank_id = Some(bank_id.into());
        self
    }

    pub fn with_account(mut self, account_info: impl Into<String>) -> Self {
        self.account_info = Some(account_info.into());
        self
    }

    pub fn with_reference(mut self, reference_number: impl Into<String>) -> Self {
        self.reference_number = Some(reference_number.into());
        self
    }

    pub fn with_sender(mut self, name: impl Into<String>, bank: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self.sender_bank = bank.into();
        self
    }

    /// Clock-time label in the 12-hour form used on receipts.
    /// Example: "10:30 AM", "02:15 PM"
    pub fn display_time(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }

    /// Calendar label used in history listings: "Today" for the given date,
    /// otherwise the long form like "09 February 2026".
    pub fn display_date(&self, today: NaiveDate) -> String {
        let date = self.created_at.date_naive();
        if date == today {
            "Today".to_string()
        } else {
            date.format("%d %B %Y").to_string()
        }
    }
}

/// Generate a fresh payment reference: the Raast prefix followed by ten
/// random decimal digits (the leading digit is never zero).
pub fn generate_reference_number() -> String {
    let digits = rand::thread_rng().gen_range(1_000_000_000u64..=9_999_999_999);
    format!("{REFERENCE_PREFIX}{digits}")
}

/// Whether a caller-supplied reference may be kept as-is. References built
/// from unvalidated numeric input can carry a literal "NaN" where a parse
/// failed; those are discarded and regenerated.
pub fn is_usable_reference(reference: &str) -> bool {
    !reference.contains("NaN")
}
