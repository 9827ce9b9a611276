//! Account records and the inventory store
//!
//! Each account owns its inventory exclusively; the trade service borrows
//! accounts, mutates them, and writes them back through this store. Records
//! live under `account/<address>` with a `handle/<handle>` index row so both
//! login-by-handle and trade-by-address lookups are one read.

use crate::auth;
use crate::error::AccountError;
use crate::item::Inventory;
use crate::utils::{self, TimeStamp};
use chrono::Utc;
use sled::Batch;
use std::sync::Arc;
use tracing::debug;

/// Coins seeded into every new account.
pub const STARTING_COINS: u64 = 100;

const ACCOUNT_PREFIX: &str = "account/";
const HANDLE_PREFIX: &str = "handle/";

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct Account {
    #[n(0)]
    pub address: String,
    #[n(1)]
    pub handle: String,
    #[n(2)]
    pub pass_salt: String,
    #[n(3)]
    pub pass_digest: String,
    #[n(4)]
    pub coins: u64,
    #[n(5)]
    pub inventory: Inventory,
    #[n(6)]
    pub opened_at: TimeStamp<Utc>,
}

pub struct AccountStore {
    instance: Arc<sled::Db>,
}

impl AccountStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }

    /// Register a new account: fresh address, salted digest, starting coins,
    /// empty inventory. The account row and its handle index row land in one
    /// batch.
    pub fn create(&self, handle: &str, password: &str) -> anyhow::Result<Account> {
        if handle.is_empty() {
            return Err(AccountError::EmptyHandle.into());
        }
        if password.is_empty() {
            return Err(AccountError::EmptyPassword.into());
        }
        if self
            .instance
            .contains_key(handle_key(handle).as_bytes())?
        {
            return Err(AccountError::HandleTaken(handle.to_string()).into());
        }

        let address = utils::new_uuid_to_bech32("user_")?;
        let pass_salt = auth::new_salt();
        let pass_digest = auth::digest_password(&pass_salt, password);
        let account = Account {
            address: address.clone(),
            handle: handle.to_string(),
            pass_salt,
            pass_digest,
            coins: STARTING_COINS,
            inventory: Inventory::new(),
            opened_at: TimeStamp::now(),
        };

        let mut batch = Batch::default();
        batch.insert(
            account_key(&address).as_bytes(),
            minicbor::to_vec(&account)?,
        );
        batch.insert(handle_key(handle).as_bytes(), address.as_bytes());
        self.instance.apply_batch(batch)?;

        debug!(handle, %address, "account registered");
        Ok(account)
    }

    pub fn by_address(&self, address: &str) -> anyhow::Result<Account> {
        let bytes = self
            .instance
            .get(account_key(address).as_bytes())?
            .ok_or_else(|| AccountError::UnknownUser(address.to_string()))?;

        Ok(minicbor::decode(&bytes)?)
    }

    pub fn by_handle(&self, handle: &str) -> anyhow::Result<Account> {
        let address = self
            .instance
            .get(handle_key(handle).as_bytes())?
            .ok_or_else(|| AccountError::UnknownUser(handle.to_string()))?;
        let address = String::from_utf8(address.to_vec())?;

        self.by_address(&address)
    }

    pub fn contains(&self, address: &str) -> anyhow::Result<bool> {
        Ok(self.instance.contains_key(account_key(address).as_bytes())?)
    }

    /// Write one account back.
    pub fn save(&self, account: &Account) -> anyhow::Result<()> {
        self.instance.insert(
            account_key(&account.address).as_bytes(),
            minicbor::to_vec(account)?,
        )?;
        debug!(address = %account.address, "account saved");
        Ok(())
    }

    /// Add this account's write to a caller-owned batch, for commits that
    /// must land together with other records.
    pub fn stage(&self, batch: &mut Batch, account: &Account) -> anyhow::Result<()> {
        batch.insert(
            account_key(&account.address).as_bytes(),
            minicbor::to_vec(account)?,
        );
        Ok(())
    }
}

fn account_key(address: &str) -> String {
    format!("{ACCOUNT_PREFIX}{address}")
}

fn handle_key(handle: &str) -> String {
    format!("{HANDLE_PREFIX}{handle}")
}
