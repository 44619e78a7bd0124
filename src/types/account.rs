use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of the stored account. Serialized as `"PENDING"` / `"APPROVED"`;
/// any other string fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Pending,
    Approved,
}

impl AccountStatus {
    pub fn is_approved(self) -> bool {
        matches!(self, AccountStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Pending => "PENDING",
            AccountStatus::Approved => "APPROVED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single account record kept under the `user` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub status: AccountStatus,
}

impl Account {
    pub fn pending() -> Self {
        Self {
            status: AccountStatus::Pending,
        }
    }
}
