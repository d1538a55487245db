use serde::Serialize;

/// A supported receiving bank or wallet provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub id: &'static str,
    pub name: &'static str,
}

/// The supported-bank directory. Order matters: unknown ids resolve to the
/// first entry.
pub const BANKS: [Bank; 7] = [
    Bank { id: "easypaisa", name: "Easypaisa" },
    Bank { id: "nayapay", name: "NayaPay" },
    Bank { id: "jazzcash", name: "JazzCash" },
    Bank { id: "meezan", name: "Meezan Bank" },
    Bank { id: "hbl", name: "HBL Bank" },
    Bank { id: "askari", name: "Askari Bank" },
    Bank { id: "sadapay", name: "SadaPay" },
];

/// Look up a bank by directory id, falling back to the first entry for
/// unknown ids.
pub fn bank_by_id(id: &str) -> Bank {
    BANKS
        .iter()
        .find(|bank| bank.id == id)
        .copied()
        .unwrap_or(BANKS[0])
}
