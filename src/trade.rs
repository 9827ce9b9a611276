//! Trade records and the negotiation rules
//!
//! A trade is a two-party negotiation. `from` opened it; `to` received it.
//! While the trade is open the phase says whose response is awaited:
//! phase `Offer` waits on `to`, phase `Counter` waits on `from`. Each
//! counter replaces both offers wholesale and flips the phase, so control
//! alternates strictly until someone accepts or declines.

use crate::error::TradeError;
use crate::item::{Card, PackEntry};
use crate::utils::TimeStamp;
use chrono::Utc;
use std::fmt;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    #[n(0)]
    Offer,
    #[n(1)]
    Counter,
}

impl Phase {
    pub fn toggled(self) -> Self {
        match self {
            Phase::Offer => Phase::Counter,
            Phase::Counter => Phase::Offer,
        }
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    #[n(0)]
    Open,
    #[n(1)]
    Declined,
    #[n(2)]
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Open => "open",
            Status::Declined => "declined",
            Status::Completed => "completed",
        };
        write!(f, "{name}")
    }
}

/// One side's bundle: the packs and cards a party proposes to give.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, Eq, PartialEq)]
pub struct Offer {
    #[n(0)]
    pub packs: Vec<PackEntry>,
    #[n(1)]
    pub cards: Vec<Card>,
}

impl Offer {
    pub fn new(packs: Vec<PackEntry>, cards: Vec<Card>) -> Self {
        Self { packs, cards }
    }
}

/// A response to an open trade. Counter carries the full replacement
/// proposal; there is no partial merge.
#[derive(Debug, Clone)]
pub enum TradeAction {
    Accept,
    Decline,
    Counter { from_offer: Offer, to_offer: Offer },
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct Trade {
    #[n(0)]
    pub id: u64,
    #[n(1)]
    pub from: String,
    #[n(2)]
    pub to: String,
    #[n(3)]
    pub phase: Phase,
    #[n(4)]
    pub status: Status,
    #[n(5)]
    pub from_offer: Offer,
    #[n(6)]
    pub to_offer: Offer,
    #[n(7)]
    pub opened_at: TimeStamp<Utc>,
}

impl Trade {
    /// A freshly requested trade: open, awaiting the recipient's response.
    pub fn open(id: u64, from: String, to: String, from_offer: Offer, to_offer: Offer) -> Self {
        Self {
            id,
            from,
            to,
            phase: Phase::Offer,
            status: Status::Open,
            from_offer,
            to_offer,
            opened_at: TimeStamp::now(),
        }
    }

    /// The party whose response is awaited in the current phase.
    pub fn responder(&self) -> &str {
        match self.phase {
            Phase::Offer => &self.to,
            Phase::Counter => &self.from,
        }
    }

    pub fn ensure_open(&self) -> Result<(), TradeError> {
        match self.status {
            Status::Open => Ok(()),
            status => Err(TradeError::NotOpen(status)),
        }
    }

    pub fn ensure_turn(&self, actor: &str) -> Result<(), TradeError> {
        if actor == self.responder() {
            Ok(())
        } else {
            Err(TradeError::NotYourTurn(actor.to_string()))
        }
    }

    /// Replace both offers with the counter-proposal and hand the turn to
    /// the other party. The trade stays open.
    pub fn counter(&mut self, from_offer: Offer, to_offer: Offer) {
        self.from_offer = from_offer;
        self.to_offer = to_offer;
        self.phase = self.phase.toggled();
    }

    pub fn decline(&mut self) {
        self.status = Status::Declined;
    }

    pub fn complete(&mut self) {
        self.status = Status::Completed;
    }
}
