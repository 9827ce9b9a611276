//! Inventory item types: cards, unopened packs and the per-account inventory

use std::fmt;

/// Rarity tier assigned to a card when its pack is opened.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rarity {
    #[n(0)]
    Common,
    #[n(1)]
    Uncommon,
    #[n(2)]
    Rare,
    #[n(3)]
    Epic,
    #[n(4)]
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        };
        write!(f, "{name}")
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct Card {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub rarity: Rarity,
}

impl Card {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
        }
    }
}

/// An unopened pack sitting in an inventory.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct PackEntry {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub items_per_pack: u8,
}

impl PackEntry {
    pub fn new(name: impl Into<String>, items_per_pack: u8) -> Self {
        Self {
            name: name.into(),
            items_per_pack,
        }
    }
}

/// Everything one account owns. Ordered; trades remove and append in place.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, Eq, PartialEq)]
pub struct Inventory {
    #[n(0)]
    pub packs: Vec<PackEntry>,
    #[n(1)]
    pub cards: Vec<Card>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_count(&self) -> usize {
        self.packs.len() + self.cards.len()
    }
}
