use std::sync::atomic::{AtomicBool, Ordering};

/// The PIN accepted by the confirmation gate.
pub const AUTHORIZED_PIN: &str = "76064";

/// Demo confirmation gate: a fixed-PIN comparison plus a session flag.
/// Not real authentication.
#[derive(Debug, Default)]
pub struct SecurityService {
    authenticated: AtomicBool,
}

impl SecurityService {
    pub fn new() -> Self {
        Self {
            authenticated: AtomicBool::new(false),
        }
    }

    /// Compare an entered PIN against the authorized PIN.
    pub fn validate_pin(&self, pin: &str) -> bool {
        pin == AUTHORIZED_PIN
    }

    /// Record the outcome of a confirmation attempt.
    pub fn set_authenticated(&self, value: bool) {
        self.authenticated.store(value, Ordering::Relaxed);
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Relaxed)
    }
}
