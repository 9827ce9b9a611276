//! Trade ledger
//!
//! Append-only history of every trade, keyed `trade/<id>` with the id in
//! big-endian bytes so sled's key order is numeric order. Ids are assigned
//! as last-id-plus-one (1 for an empty ledger) and never reused; declined
//! and completed trades stay in the ledger permanently.

use crate::error::TradeError;
use crate::trade::{Status, Trade};
use sled::Batch;
use std::sync::Arc;
use tracing::debug;

const TRADE_PREFIX: &[u8] = b"trade/";

pub struct TradeLedger {
    instance: Arc<sled::Db>,
}

impl TradeLedger {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }

    /// The id the next created trade will carry.
    pub fn next_id(&self) -> anyhow::Result<u64> {
        let last = self.instance.scan_prefix(TRADE_PREFIX).next_back();
        match last {
            Some(entry) => {
                let (key, _) = entry?;
                Ok(id_from_key(&key)? + 1)
            }
            None => Ok(1),
        }
    }

    /// Append a freshly opened trade.
    pub fn append(&self, trade: &Trade) -> anyhow::Result<()> {
        self.instance
            .insert(trade_key(trade.id), minicbor::to_vec(trade)?)?;
        debug!(id = trade.id, "trade appended to ledger");
        Ok(())
    }

    pub fn find(&self, id: u64) -> anyhow::Result<Trade> {
        let bytes = self
            .instance
            .get(trade_key(id))?
            .ok_or(TradeError::UnknownTrade(id))?;

        Ok(minicbor::decode(&bytes)?)
    }

    /// Write a mutated trade back under its existing id.
    pub fn save(&self, trade: &Trade) -> anyhow::Result<()> {
        self.instance
            .insert(trade_key(trade.id), minicbor::to_vec(trade)?)?;
        debug!(id = trade.id, "trade saved");
        Ok(())
    }

    /// Add this trade's write to a caller-owned batch.
    pub fn stage(&self, batch: &mut Batch, trade: &Trade) -> anyhow::Result<()> {
        batch.insert(trade_key(trade.id).as_slice(), minicbor::to_vec(trade)?);
        Ok(())
    }

    /// Open trades addressed to this user.
    pub fn open_incoming(&self, address: &str) -> anyhow::Result<Vec<Trade>> {
        self.filtered(|t| t.status == Status::Open && t.to == address)
    }

    /// Open trades this user proposed.
    pub fn open_outgoing(&self, address: &str) -> anyhow::Result<Vec<Trade>> {
        self.filtered(|t| t.status == Status::Open && t.from == address)
    }

    fn filtered(&self, predicate: impl Fn(&Trade) -> bool) -> anyhow::Result<Vec<Trade>> {
        let mut trades = Vec::new();
        for entry in self.instance.scan_prefix(TRADE_PREFIX) {
            let (_, bytes) = entry?;
            let trade: Trade = minicbor::decode(&bytes)?;
            if predicate(&trade) {
                trades.push(trade);
            }
        }
        Ok(trades)
    }
}

fn trade_key(id: u64) -> Vec<u8> {
    let mut key = TRADE_PREFIX.to_vec();
    key.extend_from_slice(&id.to_be_bytes());
    key
}

fn id_from_key(key: &[u8]) -> anyhow::Result<u64> {
    let suffix = key
        .strip_prefix(TRADE_PREFIX)
        .ok_or_else(|| anyhow::anyhow!("ledger key missing trade prefix"))?;
    let bytes: [u8; 8] = suffix
        .try_into()
        .map_err(|_| anyhow::anyhow!("ledger key is not a u64 id"))?;
    Ok(u64::from_be_bytes(bytes))
}
