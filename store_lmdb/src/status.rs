//! LMDB implementation of StatusStore.
//!
//! Key format: `account_be_u64(8)`. Statuses are global — one record per
//! account, no scope prefix.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use agora_store::status::{StatusRecord, StatusStore};
use agora_store::StoreError;
use agora_types::Name;

use crate::LmdbError;

pub struct LmdbStatusStore {
    pub(crate) env: Arc<Env>,
    pub(crate) statuses_db: Database<Bytes, Bytes>,
}

impl StatusStore for LmdbStatusStore {
    fn get_status(&self, account: Name) -> Result<Option<StatusRecord>, StoreError> {
        let key = account.as_u64().to_be_bytes();
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .statuses_db
            .get(&rtxn, &key[..])
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let record: StatusRecord = bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_status(&self, record: &StatusRecord) -> Result<(), StoreError> {
        let key = record.account.as_u64().to_be_bytes();
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.statuses_db
            .put(&mut wtxn, &key[..], &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete_status(&self, account: Name) -> Result<(), StoreError> {
        let key = account.as_u64().to_be_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.statuses_db
            .delete(&mut wtxn, &key[..])
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
