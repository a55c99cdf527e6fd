//! Status records and the status store trait.

use crate::StoreError;
use agora_types::{Name, Timestamp};
use serde::{Deserialize, Serialize};

/// A free-form status line, one per account, global scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub account: Name,
    pub content: String,
    pub updated_at: Timestamp,
}

/// Trait for storing per-account status records.
pub trait StatusStore {
    /// Point lookup by account.
    fn get_status(&self, account: Name) -> Result<Option<StatusRecord>, StoreError>;

    /// Insert or overwrite the account's status.
    fn put_status(&self, record: &StatusRecord) -> Result<(), StoreError>;

    /// Delete the account's status. Deleting an absent record is not an
    /// error; existence policy lives in the engine.
    fn delete_status(&self, account: Name) -> Result<(), StoreError>;
}
