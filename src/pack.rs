//! Pack catalog and pack opening
//!
//! The catalog is the game's static data: which packs exist, what they cost,
//! and the roster of card names their contents are drawn from. It is owned
//! data handed to the service at construction, not read from disk.

use crate::item::{Card, PackEntry, Rarity};
use crate::utils;

/// A purchasable pack as listed in the catalog.
#[derive(Debug, Clone)]
pub struct PackDefinition {
    pub name: String,
    pub cost: u64,
    pub items_per_pack: u8,
    /// Ordered `(rarity, percent)` weights walked cumulatively by a d100 roll.
    pub rarity_weights: Vec<(Rarity, u8)>,
}

impl PackDefinition {
    /// The inventory entry a purchase of this pack produces.
    pub fn entry(&self) -> PackEntry {
        PackEntry::new(self.name.clone(), self.items_per_pack)
    }
}

#[derive(Debug, Clone)]
pub struct PackCatalog {
    packs: Vec<PackDefinition>,
    roster: Vec<String>,
}

impl PackCatalog {
    pub fn new(packs: Vec<PackDefinition>, roster: Vec<String>) -> Self {
        Self { packs, roster }
    }

    /// The stock catalog: a cheap starter pack and a rarer premium pack.
    pub fn standard() -> Self {
        let packs = vec![
            PackDefinition {
                name: "Starter".into(),
                cost: 50,
                items_per_pack: 3,
                rarity_weights: vec![
                    (Rarity::Common, 70),
                    (Rarity::Uncommon, 20),
                    (Rarity::Rare, 10),
                ],
            },
            PackDefinition {
                name: "Premium".into(),
                cost: 150,
                items_per_pack: 5,
                rarity_weights: vec![
                    (Rarity::Common, 40),
                    (Rarity::Uncommon, 30),
                    (Rarity::Rare, 20),
                    (Rarity::Epic, 8),
                    (Rarity::Legendary, 2),
                ],
            },
        ];
        let roster = [
            "Aurora", "Basalt", "Cinder", "Drift", "Ember", "Fable", "Gale", "Harrow", "Iris",
            "Juniper",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self::new(packs, roster)
    }

    pub fn packs(&self) -> &[PackDefinition] {
        &self.packs
    }

    pub fn find(&self, name: &str) -> Option<&PackDefinition> {
        self.packs.iter().find(|p| p.name == name)
    }

    /// Roll the contents of one pack: `items_per_pack` cards, each a random
    /// roster name with a rolled rarity.
    pub fn open(&self, def: &PackDefinition) -> Vec<Card> {
        (0..def.items_per_pack)
            .map(|_| {
                let rarity = select_rarity(&def.rarity_weights, utils::random_percent());
                let name = self.roster[utils::random_index(self.roster.len())].clone();
                Card::new(name, rarity)
            })
            .collect()
    }
}

/// Walk the weights cumulatively; a roll past the listed weights falls back
/// to `Common`.
pub fn select_rarity(weights: &[(Rarity, u8)], roll: u8) -> Rarity {
    let mut cumulative = 0u16;
    for (rarity, chance) in weights {
        cumulative += u16::from(*chance);
        if u16::from(roll) < cumulative {
            return *rarity;
        }
    }
    Rarity::Common
}
