// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use paisa::application::{LedgerService, PaymentRequest};
use paisa::domain::{Paisa, rupees};

/// Helper to create the seeded demo ledger (Rs. 25,000 and two records)
pub fn demo_ledger() -> LedgerService {
    LedgerService::new()
}

/// Helper to create an empty ledger with an opening balance in whole rupees
pub fn ledger_with_rupees(amount: i64) -> LedgerService {
    LedgerService::with_opening_balance(rupees(amount))
}

/// Standard payment request aimed at a known recipient
pub fn payment(amount: Paisa) -> PaymentRequest {
    PaymentRequest {
        amount,
        recipient_name: Some("SARA AHMED".to_string()),
        recipient_account: "03001234567".to_string(),
        recipient_bank: "Easypaisa".to_string(),
        bank_id: Some("easypaisa".to_string()),
        reference_number: None,
    }
}
