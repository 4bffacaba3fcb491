use serde::Serialize;

use super::{Amount, Transfer, User};

/// All transfers where `name` is the sender or the recipient, in log order.
pub fn transfers_involving(name: &str, transfers: &[Transfer]) -> Vec<Transfer> {
    transfers
        .iter()
        .filter(|t| t.involves(name))
        .cloned()
        .collect()
}

/// Net effect of the log on one user's balance.
/// Incoming transfers add, outgoing transfers subtract.
/// The result is `i128`: it can exceed the range of [`Amount`].
pub fn net_flow(name: &str, transfers: &[Transfer]) -> i128 {
    transfers.iter().fold(0, |net, transfer| {
        if transfer.to_name == name {
            net + i128::from(transfer.amount)
        } else if transfer.from_name == name {
            net - i128::from(transfer.amount)
        } else {
            net
        }
    })
}

/// Outcome of checking a ledger against its invariants.
/// Totals are `i128`: each balance fits in an [`Amount`], their sum may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub user_count: usize,
    pub transfer_count: usize,
    pub total_balance: i128,
    pub total_opening_balance: i128,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_balanced(&self) -> bool {
        self.total_balance == self.total_opening_balance
    }

    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn build_integrity_report<'a>(
    users: impl IntoIterator<Item = &'a User>,
    transfers: &[Transfer],
) -> IntegrityReport {
    let mut issues = Vec::new();
    let mut user_count = 0;
    let mut total_balance: i128 = 0;
    let mut total_opening_balance: i128 = 0;

    for user in users {
        user_count += 1;
        total_balance += i128::from(user.balance);
        total_opening_balance += i128::from(user.opening_balance);

        if user.balance < 0 {
            issues.push(format!("{} has a negative balance ({})", user.name, user.balance));
        }
        let expected = i128::from(user.opening_balance) + net_flow(&user.name, transfers);
        if i128::from(user.balance) != expected {
            issues.push(format!(
                "{} has balance {} but the log implies {}",
                user.name, user.balance, expected
            ));
        }
    }

    if total_balance != total_opening_balance {
        issues.push(format!(
            "Total balance {} differs from total opening balance {}",
            total_balance, total_opening_balance
        ));
    }

    for (index, transfer) in transfers.iter().enumerate() {
        let expected_sequence = index as u64 + 1;
        if transfer.sequence != expected_sequence {
            issues.push(format!(
                "Transfer {} has sequence {}, expected {}",
                transfer.id, transfer.sequence, expected_sequence
            ));
        }
        if transfer.amount <= 0 {
            issues.push(format!(
                "Transfer {} has non-positive amount {}",
                transfer.id, transfer.amount
            ));
        }
    }

    IntegrityReport {
        user_count,
        transfer_count: transfers.len(),
        total_balance,
        total_opening_balance,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn make_transfer(from: &str, to: &str, amount: Amount, sequence: u64) -> Transfer {
        Transfer::new(from, to, amount).with_sequence(sequence)
    }

    fn make_user(id: u64, name: &str, opening: Amount, balance: Amount) -> User {
        let mut user = User::new(UserId::new(id), name.into(), "pw".into(), opening);
        user.balance = balance;
        user
    }

    #[test]
    fn test_transfers_involving_keeps_log_order() {
        let transfers = vec![
            make_transfer("alice", "bob", 10, 1),
            make_transfer("bob", "carol", 5, 2),
            make_transfer("carol", "alice", 3, 3),
        ];

        let history = transfers_involving("alice", &transfers);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence, 1);
        assert_eq!(history[1].sequence, 3);

        assert!(transfers_involving("dave", &transfers).is_empty());
    }

    #[test]
    fn test_net_flow() {
        let transfers = vec![
            make_transfer("alice", "bob", 10, 1),
            make_transfer("bob", "alice", 4, 2),
            make_transfer("bob", "carol", 1, 3),
        ];

        assert_eq!(net_flow("alice", &transfers), -6);
        assert_eq!(net_flow("bob", &transfers), 5);
        assert_eq!(net_flow("carol", &transfers), 1);
        assert_eq!(net_flow("dave", &transfers), 0);
    }

    #[test]
    fn test_consistent_ledger_is_healthy() {
        let users = vec![make_user(1, "alice", 100, 70), make_user(2, "bob", 50, 80)];
        let transfers = vec![make_transfer("alice", "bob", 30, 1)];

        let report = build_integrity_report(&users, &transfers);

        assert!(report.is_healthy(), "{:?}", report.issues);
        assert!(report.is_balanced());
        assert_eq!(report.user_count, 2);
        assert_eq!(report.transfer_count, 1);
        assert_eq!(report.total_balance, 150);
    }

    #[test]
    fn test_balance_drift_is_reported() {
        let users = vec![make_user(1, "alice", 100, 90), make_user(2, "bob", 50, 50)];

        let report = build_integrity_report(&users, &[]);

        assert!(!report.is_balanced());
        assert!(!report.is_healthy());
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn test_totals_beyond_amount_range() {
        let users = vec![
            make_user(1, "whale", Amount::MAX, Amount::MAX - 10),
            make_user(2, "alice", Amount::MAX, 10),
            make_user(3, "bob", 0, Amount::MAX),
        ];
        let transfers = vec![
            make_transfer("whale", "alice", 10, 1),
            make_transfer("alice", "bob", Amount::MAX, 2),
        ];

        let report = build_integrity_report(&users, &transfers);

        assert!(report.is_healthy(), "{:?}", report.issues);
        assert_eq!(report.total_balance, 2 * i128::from(Amount::MAX));
        assert!(report.is_balanced());
    }

    #[test]
    fn test_sequence_gap_is_reported() {
        let users = vec![make_user(1, "alice", 100, 90), make_user(2, "bob", 0, 10)];
        let transfers = vec![make_transfer("alice", "bob", 10, 2)];

        let report = build_integrity_report(&users, &transfers);

        assert!(report.is_balanced());
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("expected 1"));
    }
}
