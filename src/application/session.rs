use uuid::Uuid;

use crate::domain::UserId;

/// Handle returned by a successful login.
///
/// The ledger keeps at most one active session. A handle stops working once
/// the ledger logs out or another login replaces it, so holding on to an old
/// `Session` never grants access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Uuid,
    user_id: UserId,
}

impl Session {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self {
            token: Uuid::new_v4(),
            user_id,
        }
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
