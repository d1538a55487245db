use serde::Serialize;

/// The account holder whose identity is stamped on outgoing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountHolder {
    pub name: &'static str,
    pub bank_name: &'static str,
    /// Last digits of the funding account, shown masked on receipts
    pub account_mask: &'static str,
}

impl AccountHolder {
    /// Masked account rendering shown on receipts.
    /// Example: "*6497"
    pub fn masked_account(&self) -> String {
        format!("*{}", self.account_mask)
    }
}

pub const ACCOUNT_HOLDER: AccountHolder = AccountHolder {
    name: "Muhammad Hammad",
    bank_name: "SadaPay",
    account_mask: "6497",
};
