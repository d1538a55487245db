use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::domain::{
    Direction, Paisa, TransactionRecord, format_rupees, generate_reference_number,
    is_usable_reference, rupees,
};

use super::LedgerError;

/// Simulated round-trip to the balance authority.
pub const BALANCE_CHECK_DELAY: Duration = Duration::from_millis(500);
/// Simulated settlement round-trip on the payment network.
pub const SETTLEMENT_DELAY: Duration = Duration::from_millis(1500);

/// Opening balance of the demo account.
pub const OPENING_BALANCE: Paisa = rupees(25_000);

type ListenerCallback = Arc<dyn Fn() + Send + Sync>;

struct ListenerEntry {
    id: u64,
    callback: ListenerCallback,
}

/// Mutable ledger state. Validation and mutation always happen under one
/// lock acquisition so a debit can never race a stale balance check.
struct LedgerState {
    balance: Paisa,
    records: Vec<TransactionRecord>,
    next_sequence: u64,
}

impl LedgerState {
    /// Append a record as the newest entry, assigning its sequence number.
    fn apply(&mut self, mut record: TransactionRecord) -> TransactionRecord {
        record.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.records.push(record.clone());
        record
    }
}

/// Sole authority over the account balance and transaction history.
/// All mutation goes through `process_transaction`; reads hand out copies.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct LedgerService {
    state: Mutex<LedgerState>,
    listeners: Arc<Mutex<Vec<ListenerEntry>>>,
    next_listener_id: AtomicU64,
}

/// A payment instruction submitted for settlement.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequest {
    /// Amount to send, in paisa
    pub amount: Paisa,
    /// Recipient display name; missing names are recorded as "Unknown Recipient"
    pub recipient_name: Option<String>,
    /// Recipient account number, IBAN, or phone
    pub recipient_account: String,
    /// Recipient bank display name
    pub recipient_bank: String,
    /// Recipient bank id in the bank directory, when known
    pub bank_id: Option<String>,
    /// Caller-supplied reference number; replaced when unusable
    pub reference_number: Option<String>,
}

/// Outcome of a balance check.
#[derive(Debug, Clone)]
pub struct BalanceCheck {
    pub is_valid: bool,
    pub current_balance: Paisa,
    pub error: Option<String>,
}

/// Outcome of a settled payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference_number: String,
    pub record: TransactionRecord,
    pub new_balance: Paisa,
}

/// Handle returned by `subscribe`. Dropping it does not unsubscribe;
/// removal only happens through an explicit `unsubscribe` call.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Vec<ListenerEntry>>>,
}

impl Subscription {
    /// Remove exactly this handle's observer. Calling it again is a no-op
    /// and never affects other observers.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().retain(|entry| entry.id != self.id);
        }
    }
}

impl LedgerService {
    /// Create the demo ledger: Rs. 25,000 opening balance and two seeded
    /// history records.
    pub fn new() -> Self {
        let service = Self::with_opening_balance(OPENING_BALANCE);
        {
            // Seeds are ordered by creation sequence, not display date:
            // the sent record is the newer entry.
            let mut state = service.state.lock();
            state.apply(
                TransactionRecord::new(
                    "MUHAMMAD HAMMAD",
                    Direction::Received,
                    rupees(5_000),
                    Utc.with_ymd_and_hms(2026, 2, 10, 10, 30, 0).unwrap(),
                )
                .with_bank("SadaPay")
                .with_bank_id("sadapay")
                .with_account("3187606497")
                .with_sender("External", "Bank"),
            );
            state.apply(
                TransactionRecord::new(
                    "ALI KHAN",
                    Direction::Sent,
                    rupees(1_200),
                    Utc.with_ymd_and_hms(2026, 2, 9, 14, 15, 0).unwrap(),
                )
                .with_bank("Meezan Bank")
                .with_bank_id("meezan")
                .with_account("PK20MEZN0098830110909230"),
            );
        }
        service
    }

    /// Create an empty ledger with the given opening balance.
    pub fn with_opening_balance(balance: Paisa) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                balance,
                records: Vec::new(),
                next_sequence: 1,
            }),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(1),
        }
    }

    // ========================
    // Balance & history
    // ========================

    /// Current balance in paisa. No side effects.
    pub fn get_balance(&self) -> Paisa {
        self.state.lock().balance
    }

    /// Snapshot of the transaction history, newest first by creation
    /// sequence. Display dates play no part in the ordering.
    pub fn get_history(&self) -> Vec<TransactionRecord> {
        self.state.lock().records.iter().rev().cloned().collect()
    }

    /// Validate that `amount` can be covered by the current balance,
    /// after a simulated round-trip to the balance authority. Pure
    /// validation: no mutation, no notification.
    pub async fn check_balance(&self, amount: Paisa) -> BalanceCheck {
        tokio::time::sleep(BALANCE_CHECK_DELAY).await;

        let balance = self.get_balance();
        if amount > balance {
            return BalanceCheck {
                is_valid: false,
                current_balance: balance,
                error: Some(format!(
                    "Insufficient balance. Your current balance is {}",
                    format_rupees(balance)
                )),
            };
        }

        BalanceCheck {
            is_valid: true,
            current_balance: balance,
            error: None,
        }
    }

    // ========================
    // Settlement
    // ========================

    /// Apply an outgoing payment: validate, debit the balance, and record
    /// the movement as the newest history entry, then notify observers.
    ///
    /// The simulated settlement delay elapses before the ledger is
    /// touched. Validation and mutation run inside a single critical
    /// section, so concurrent submissions serialize and can never debit
    /// past the balance. Observers fire exactly once per settled payment,
    /// strictly after the full mutation is visible.
    pub async fn process_transaction(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, LedgerError> {
        tokio::time::sleep(SETTLEMENT_DELAY).await;

        let (record, reference_number, new_balance) = {
            let mut state = self.state.lock();

            if request.amount <= 0 {
                return Err(LedgerError::InvalidAmount);
            }
            if request.amount > state.balance {
                return Err(LedgerError::InsufficientBalance {
                    balance: state.balance,
                    requested: request.amount,
                });
            }

            state.balance -= request.amount;

            let reference_number = match request.reference_number {
                Some(reference) if is_usable_reference(&reference) => reference,
                _ => generate_reference_number(),
            };

            let mut record = TransactionRecord::new(
                request
                    .recipient_name
                    .unwrap_or_else(|| "Unknown Recipient".to_string()),
                Direction::Sent,
                request.amount,
                Utc::now(),
            )
            .with_bank(request.recipient_bank)
            .with_account(request.recipient_account)
            .with_reference(reference_number.clone());
            if let Some(bank_id) = request.bank_id {
                record = record.with_bank_id(bank_id);
            }

            let record = state.apply(record);
            (record, reference_number, state.balance)
        };

        self.notify_listeners();

        info!(
            reference = %reference_number,
            amount = record.amount,
            new_balance,
            "payment settled"
        );

        Ok(PaymentReceipt {
            reference_number,
            record,
            new_balance,
        })
    }

    /// One-way sink for reporting a failed transaction outcome. Logs the
    /// message and touches no ledger state.
    pub fn report_failure(&self, message: &str) {
        error!(error = %message, "transaction error reported");
    }

    // ========================
    // Observers
    // ========================

    /// Register an observer invoked with no arguments after every
    /// successful mutation. Notification order follows registration order.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push(ListenerEntry {
            id,
            callback: Arc::new(callback),
        });
        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Invoke the observers registered at the start of the round. The
    /// registry lock is not held during the calls, so an observer may
    /// subscribe or unsubscribe without deadlocking. A panicking observer
    /// is contained and later observers still run.
    fn notify_listeners(&self) {
        let callbacks: Vec<(u64, ListenerCallback)> = self
            .listeners
            .lock()
            .iter()
            .map(|entry| (entry.id, Arc::clone(&entry.callback)))
            .collect();

        for (id, callback) in callbacks {
            if panic::catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                warn!(listener = id, "observer panicked during notification");
            }
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
