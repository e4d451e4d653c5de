//! Session gate.
//!
//! A `SessionContext` is created locked at the start of every session and
//! unlocked by entering the shared passphrase. It only decides whether the
//! interactive loop runs; the store and summary code never see it.

pub const DEFAULT_PASSPHRASE: &str = "2227";

/// Failed passphrase entries tolerated before the session ends.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Default)]
pub struct SessionContext {
    authenticated: bool,
    failed_attempts: u32,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Compare an entered passphrase with the configured one.
    pub fn unlock(&mut self, attempt: &str, passphrase: &str) -> bool {
        if attempt.trim() == passphrase {
            self.authenticated = true;
        } else {
            self.failed_attempts += 1;
        }
        self.authenticated
    }

    pub fn attempts_left(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.failed_attempts)
    }
}
