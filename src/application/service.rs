use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    build_integrity_report, transfers_involving, Amount, IntegrityReport, Transfer, User, UserId,
    UserSummary,
};

use super::{AppError, Session};

/// In-memory ledger of users and the transfers between them.
/// This is the primary interface for any client (the interactive shell, tests, etc.).
#[derive(Debug)]
pub struct Ledger {
    users: HashMap<UserId, User>,
    transfers: Vec<Transfer>,
    active_session: Option<Session>,
    next_id: UserId,
}

/// Serializable view of the whole ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    /// Ordered by id
    pub users: Vec<User>,
    pub transfers: Vec<Transfer>,
    pub integrity: IntegrityReport,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger. The first registered user gets id 1.
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            transfers: Vec::new(),
            active_session: None,
            next_id: UserId::FIRST,
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Register a new user with an opening balance.
    pub fn register(
        &mut self,
        name: &str,
        password: &str,
        balance: Amount,
    ) -> Result<UserId, AppError> {
        let result = self.try_register(name, password, balance);
        match &result {
            Ok(id) => info!(user_id = %id, name, balance, "registered user"),
            Err(err) => warn!(name, error = %err, "registration rejected"),
        }
        result
    }

    fn try_register(
        &mut self,
        name: &str,
        password: &str,
        balance: Amount,
    ) -> Result<UserId, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::EmptyField("Name"));
        }
        if password.trim().is_empty() {
            return Err(AppError::EmptyField("Password"));
        }
        if balance < 0 {
            return Err(AppError::NegativeBalance(balance));
        }
        if self.find_by_name(name).is_some() {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let id = self.next_id;
        self.users.insert(
            id,
            User::new(id, name.to_string(), password.to_string(), balance),
        );
        self.next_id = id.next();
        Ok(id)
    }

    /// Authenticate and make the returned session the active one.
    /// Any previous session is replaced.
    pub fn login(&mut self, name: &str, password: &str) -> Result<Session, AppError> {
        let user = match self.find_by_name(name) {
            Some(user) => user,
            None => {
                warn!(name, "login for unknown user");
                return Err(AppError::NotFound(name.to_string()));
            }
        };
        if !user.password_matches(password) {
            warn!(name, "login with wrong password");
            return Err(AppError::InvalidCredentials(name.to_string()));
        }

        let session = Session::new(user.id);
        if let Some(previous) = self.active_session.replace(session.clone()) {
            debug!(replaced_user_id = %previous.user_id(), "previous session replaced");
        }
        info!(user_id = %session.user_id(), name, "logged in");
        Ok(session)
    }

    /// End the active session, if any.
    pub fn logout(&mut self) {
        if let Some(session) = self.active_session.take() {
            info!(user_id = %session.user_id(), "logged out");
        }
    }

    /// Returns true if `session` is the ledger's active session.
    pub fn is_active(&self, session: &Session) -> bool {
        self.active_session.as_ref() == Some(session)
    }

    /// The user behind the active session, if someone is logged in.
    pub fn active_user(&self) -> Option<&User> {
        self.active_session
            .as_ref()
            .and_then(|session| self.users.get(&session.user_id()))
    }

    /// Resolve a session to its user.
    pub fn current_user(&self, session: &Session) -> Result<&User, AppError> {
        if !self.is_active(session) {
            return Err(AppError::Unauthenticated);
        }
        self.users
            .get(&session.user_id())
            .ok_or(AppError::Unauthenticated)
    }

    /// Balance of the logged-in user.
    pub fn balance_of(&self, session: &Session) -> Result<Amount, AppError> {
        self.current_user(session).map(|user| user.balance)
    }

    /// Look up a user by name.
    pub fn user(&self, name: &str) -> Result<&User, AppError> {
        self.find_by_name(name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Name and balance of every user except `exclude_name`.
    ///
    /// The order is unspecified. Sort the result if you need a stable order.
    pub fn list_other_users(&self, exclude_name: &str) -> Vec<UserSummary> {
        self.users
            .values()
            .filter(|user| user.name != exclude_name)
            .map(UserSummary::from)
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|user| user.name == name)
    }

    // ========================
    // Transfer operations
    // ========================

    /// Move `amount` from the session user to `to_name`.
    ///
    /// Every check runs before any balance changes, so a failed transfer
    /// leaves the ledger untouched.
    pub fn transfer(
        &mut self,
        session: &Session,
        to_name: &str,
        amount: Amount,
    ) -> Result<Transfer, AppError> {
        let result = self.try_transfer(session, to_name, amount);
        match &result {
            Ok(transfer) => info!(
                sequence = transfer.sequence,
                from = %transfer.from_name,
                to = %transfer.to_name,
                amount,
                "transfer recorded"
            ),
            Err(err) => warn!(to = to_name, amount, error = %err, "transfer rejected"),
        }
        result
    }

    fn try_transfer(
        &mut self,
        session: &Session,
        to_name: &str,
        amount: Amount,
    ) -> Result<Transfer, AppError> {
        let sender = self.current_user(session)?;
        if amount <= 0 {
            return Err(AppError::InvalidAmount(amount));
        }
        if sender.name == to_name {
            return Err(AppError::SelfTransfer);
        }
        let recipient = self.user(to_name)?;
        if !sender.can_afford(amount) {
            return Err(AppError::InsufficientFunds {
                user_name: sender.name.clone(),
                balance: sender.balance,
                required: amount,
            });
        }
        let recipient_balance =
            recipient
                .balance
                .checked_add(amount)
                .ok_or_else(|| AppError::BalanceOverflow {
                    user_name: recipient.name.clone(),
                    amount,
                })?;

        let sender_id = sender.id;
        let recipient_id = recipient.id;
        let transfer = Transfer::new(sender.name.clone(), recipient.name.clone(), amount)
            .with_sequence(self.transfers.len() as u64 + 1);

        if let Some(sender) = self.users.get_mut(&sender_id) {
            sender.balance -= amount;
        }
        if let Some(recipient) = self.users.get_mut(&recipient_id) {
            recipient.balance = recipient_balance;
        }
        self.transfers.push(transfer.clone());

        Ok(transfer)
    }

    /// Transfers sent or received by `user_name`, oldest first.
    pub fn transfers_for(&self, user_name: &str) -> Vec<Transfer> {
        let history = transfers_involving(user_name, &self.transfers);
        debug!(user = user_name, count = history.len(), "transfer history");
        history
    }

    /// The whole transfer log, oldest first.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    // ========================
    // Integrity operations
    // ========================

    /// Check the ledger invariants and return a report.
    pub fn check_integrity(&self) -> IntegrityReport {
        build_integrity_report(self.users.values(), &self.transfers)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);

        LedgerSnapshot {
            users,
            transfers: self.transfers.clone(),
            integrity: self.check_integrity(),
        }
    }
}
