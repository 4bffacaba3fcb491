use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Amount;

/// Sequential user identifier. The first registered user gets 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub const FIRST: UserId = UserId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id handed out after this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Stored and compared as plain text. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub balance: Amount,
    /// Balance at registration, used to verify that transfers conserve money.
    pub opening_balance: Amount,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: String, password: String, balance: Amount) -> Self {
        Self {
            id,
            name,
            password,
            balance,
            opening_balance: balance,
            registered_at: Utc::now(),
        }
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn can_afford(&self, amount: Amount) -> bool {
        self.balance >= amount
    }
}

/// Name and balance of a user, as shown to other users picking a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub balance: Amount,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            balance: user.balance,
        }
    }
}
