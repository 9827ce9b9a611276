//! Service layer API for exchange workflow operations

use crate::account::{Account, AccountStore};
use crate::auth::{self, Authenticator};
use crate::error::{AccountError, TradeError};
use crate::item::{Card, Inventory};
use crate::ledger::TradeLedger;
use crate::pack::{PackCatalog, PackDefinition};
use crate::trade::{Offer, Trade, TradeAction};
use crate::transfer;
use sled::Batch;
use std::sync::Arc;
use tracing::info;

/// Open trades touching one user, split by direction.
#[derive(Debug)]
pub struct TradeRequests {
    pub incoming: Vec<Trade>,
    pub outgoing: Vec<Trade>,
}

pub struct ExchangeService {
    instance: Arc<sled::Db>,
    accounts: AccountStore,
    ledger: TradeLedger,
    catalog: PackCatalog,
    auth: Authenticator,
}

impl ExchangeService {
    pub fn new(instance: Arc<sled::Db>, catalog: PackCatalog, auth: Authenticator) -> Self {
        let accounts = AccountStore::new(Arc::clone(&instance));
        let ledger = TradeLedger::new(Arc::clone(&instance));
        Self {
            instance,
            accounts,
            ledger,
            catalog,
            auth,
        }
    }

    // ACCOUNT OPERATIONS

    /// Register an account and log it straight in.
    pub fn signup(&self, handle: &str, password: &str) -> anyhow::Result<(Account, String)> {
        let account = self.accounts.create(handle, password)?;
        let token = self.auth.issue(&account.address);

        info!(handle, address = %account.address, "signup complete");
        Ok((account, token))
    }

    /// Exchange credentials for a bearer token.
    pub fn login(&self, handle: &str, password: &str) -> anyhow::Result<String> {
        let Ok(account) = self.accounts.by_handle(handle) else {
            // unknown handle and wrong password are indistinguishable to callers
            return Err(AccountError::BadCredentials.into());
        };
        if auth::digest_password(&account.pass_salt, password) != account.pass_digest {
            return Err(AccountError::BadCredentials.into());
        }

        Ok(self.auth.issue(&account.address))
    }

    /// Verify a token and load the account it vouches for.
    pub fn authenticate(&self, token: &str) -> anyhow::Result<Account> {
        let address = self.auth.verify(token)?;
        self.accounts.by_address(&address)
    }

    pub fn profile(&self, address: &str) -> anyhow::Result<Account> {
        self.accounts.by_address(address)
    }

    /// The clicking game: one coin per tap. Returns the new balance.
    pub fn tap_coin(&self, address: &str) -> anyhow::Result<u64> {
        let mut account = self.accounts.by_address(address)?;
        account.coins += 1;
        self.accounts.save(&account)?;
        Ok(account.coins)
    }

    // PACK OPERATIONS

    pub fn pack_catalog(&self) -> &[PackDefinition] {
        self.catalog.packs()
    }

    /// Buy a pack from the catalog into the buyer's inventory.
    pub fn buy_pack(&self, address: &str, pack_name: &str) -> anyhow::Result<Account> {
        let mut account = self.accounts.by_address(address)?;
        let def = self
            .catalog
            .find(pack_name)
            .ok_or_else(|| AccountError::UnknownPack(pack_name.to_string()))?;

        if account.coins < def.cost {
            return Err(AccountError::InsufficientCoins {
                cost: def.cost,
                held: account.coins,
            }
            .into());
        }

        account.coins -= def.cost;
        account.inventory.packs.push(def.entry());
        self.accounts.save(&account)?;

        info!(address, pack = pack_name, coins = account.coins, "pack bought");
        Ok(account)
    }

    /// Open a held pack: the entry is consumed and the rolled cards join the
    /// collection.
    pub fn open_pack(&self, address: &str, pack_name: &str) -> anyhow::Result<Vec<Card>> {
        let mut account = self.accounts.by_address(address)?;
        let slot = account
            .inventory
            .packs
            .iter()
            .position(|p| p.name == pack_name)
            .ok_or_else(|| AccountError::PackNotHeld(pack_name.to_string()))?;
        let def = self
            .catalog
            .find(pack_name)
            .ok_or_else(|| AccountError::UnknownPack(pack_name.to_string()))?;

        let new_cards = self.catalog.open(def);
        account.inventory.packs.remove(slot);
        account.inventory.cards.extend(new_cards.iter().cloned());
        self.accounts.save(&account)?;

        info!(address, pack = pack_name, cards = new_cards.len(), "pack opened");
        Ok(new_cards)
    }

    pub fn collection(&self, address: &str) -> anyhow::Result<Inventory> {
        Ok(self.accounts.by_address(address)?.inventory)
    }

    // TRADE OPERATIONS

    /// Open a negotiation: `from` proposes to give `from_offer` in exchange
    /// for `to`'s `to_offer`. The offers may be empty bundles; the recipient
    /// must exist.
    pub fn request_trade(
        &self,
        from: &str,
        to: &str,
        from_offer: Offer,
        to_offer: Offer,
    ) -> anyhow::Result<Trade> {
        if from == to {
            return Err(TradeError::SelfTrade.into());
        }
        if !self.accounts.contains(to)? {
            return Err(AccountError::UnknownUser(to.to_string()).into());
        }

        let id = self.ledger.next_id()?;
        let trade = Trade::open(id, from.to_string(), to.to_string(), from_offer, to_offer);
        self.ledger.append(&trade)?;

        info!(id, from, to, "trade requested");
        Ok(trade)
    }

    /// Open trades touching this user, incoming and outgoing.
    pub fn trade_requests(&self, address: &str) -> anyhow::Result<TradeRequests> {
        Ok(TradeRequests {
            incoming: self.ledger.open_incoming(address)?,
            outgoing: self.ledger.open_outgoing(address)?,
        })
    }

    /// Respond to an open trade as the party whose turn it is.
    ///
    /// Turn-taking: in phase `Offer` only `to` may act, in phase `Counter`
    /// only `from`. Decline and counter touch nothing but the trade record;
    /// accept swaps both bundles and commits both inventories and the trade
    /// in a single batch, or fails leaving everything as it was.
    pub fn respond_trade(
        &self,
        id: u64,
        actor: &str,
        action: TradeAction,
    ) -> anyhow::Result<Trade> {
        let mut trade = self.ledger.find(id)?;
        trade.ensure_open()?;
        trade.ensure_turn(actor)?;

        match action {
            TradeAction::Decline => {
                trade.decline();
                self.ledger.save(&trade)?;
                info!(id, actor, "trade declined");
            }
            TradeAction::Counter {
                from_offer,
                to_offer,
            } => {
                trade.counter(from_offer, to_offer);
                self.ledger.save(&trade)?;
                info!(id, actor, phase = ?trade.phase, "counter-offer made");
            }
            TradeAction::Accept => {
                let mut from_account = self.accounts.by_address(&trade.from)?;
                let mut to_account = self.accounts.by_address(&trade.to)?;

                transfer::swap(
                    &mut from_account.inventory,
                    &mut to_account.inventory,
                    &trade.from_offer,
                    &trade.to_offer,
                    &trade.from,
                    &trade.to,
                )?;
                trade.complete();

                let mut batch = Batch::default();
                self.accounts.stage(&mut batch, &from_account)?;
                self.accounts.stage(&mut batch, &to_account)?;
                self.ledger.stage(&mut batch, &trade)?;
                self.instance.apply_batch(batch)?;

                info!(id, actor, "trade completed");
            }
        }

        Ok(trade)
    }
}
