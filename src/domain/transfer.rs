use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Amount;

pub type TransferId = Uuid;

/// A completed movement of money from one user to another.
/// Transfers are immutable and only ever appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub id: TransferId,
    /// Position in the log, starting at 1
    pub sequence: u64,
    /// Sender (balance decreased)
    pub from_name: String,
    /// Recipient (balance increased)
    pub to_name: String,
    /// Always positive
    pub amount: Amount,
    pub recorded_at: DateTime<Utc>,
}

impl Transfer {
    /// Create a new transfer. Sequence number must be assigned by the ledger.
    pub fn new(from_name: impl Into<String>, to_name: impl Into<String>, amount: Amount) -> Self {
        assert!(amount > 0, "Transfer amount must be positive");
        Self {
            id: Uuid::new_v4(),
            sequence: 0,
            from_name: from_name.into(),
            to_name: to_name.into(),
            amount,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Returns true if `name` is the sender or the recipient.
    pub fn involves(&self, name: &str) -> bool {
        self.from_name == name || self.to_name == name
    }

    pub fn direction_for(&self, name: &str) -> Option<Direction> {
        if self.from_name == name {
            Some(Direction::Outgoing)
        } else if self.to_name == name {
            Some(Direction::Incoming)
        } else {
            None
        }
    }
}

/// Which side of a transfer a given user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
}
