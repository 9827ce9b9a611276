//! Item transfer engine
//!
//! Finalizing a trade moves two bundles in opposite directions. Both legs
//! are planned against the pre-trade inventories before either is mutated,
//! so a missing item on one side leaves both inventories untouched.
//!
//! Matching rules: an offered pack claims the first structurally equal pack
//! entry the giver holds; an offered card claims the first card whose name
//! matches, whatever its rarity. Claimed items land in the taker's inventory
//! in the order the offer listed them, and a moved card keeps the rarity it
//! was opened with.

use crate::error::TradeError;
use crate::item::Inventory;
use crate::trade::Offer;

/// One direction of a finalization: indices into the giver's inventory,
/// in offer order, each claimed at most once.
#[derive(Debug)]
pub struct Leg {
    pack_claims: Vec<usize>,
    card_claims: Vec<usize>,
}

/// Validate that the giver holds everything the offer lists. Claims nothing
/// on failure.
pub fn plan(giver: &Inventory, offer: &Offer, owner: &str) -> Result<Leg, TradeError> {
    let mut pack_taken = vec![false; giver.packs.len()];
    let mut pack_claims = Vec::with_capacity(offer.packs.len());
    for want in &offer.packs {
        let slot = (0..giver.packs.len())
            .find(|&i| !pack_taken[i] && giver.packs[i] == *want)
            .ok_or_else(|| TradeError::ItemMissing {
                owner: owner.to_string(),
                item: want.name.clone(),
            })?;
        pack_taken[slot] = true;
        pack_claims.push(slot);
    }

    let mut card_taken = vec![false; giver.cards.len()];
    let mut card_claims = Vec::with_capacity(offer.cards.len());
    for want in &offer.cards {
        let slot = (0..giver.cards.len())
            .find(|&i| !card_taken[i] && giver.cards[i].name == want.name)
            .ok_or_else(|| TradeError::ItemMissing {
                owner: owner.to_string(),
                item: want.name.clone(),
            })?;
        card_taken[slot] = true;
        card_claims.push(slot);
    }

    Ok(Leg {
        pack_claims,
        card_claims,
    })
}

/// Move a planned leg: append the claimed items to the taker in offer order,
/// then drop them from the giver.
pub fn apply(giver: &mut Inventory, taker: &mut Inventory, leg: &Leg) {
    for &i in &leg.pack_claims {
        taker.packs.push(giver.packs[i].clone());
    }
    for &i in &leg.card_claims {
        taker.cards.push(giver.cards[i].clone());
    }
    remove_claimed(&mut giver.packs, &leg.pack_claims);
    remove_claimed(&mut giver.cards, &leg.card_claims);
}

/// Finalize a trade: both legs planned up front, then both applied.
pub fn swap(
    from_inventory: &mut Inventory,
    to_inventory: &mut Inventory,
    from_gives: &Offer,
    to_gives: &Offer,
    from_owner: &str,
    to_owner: &str,
) -> Result<(), TradeError> {
    let from_leg = plan(from_inventory, from_gives, from_owner)?;
    let to_leg = plan(to_inventory, to_gives, to_owner)?;

    apply(from_inventory, to_inventory, &from_leg);
    apply(to_inventory, from_inventory, &to_leg);

    Ok(())
}

fn remove_claimed<T>(items: &mut Vec<T>, claims: &[usize]) {
    let mut keep = vec![true; items.len()];
    for &i in claims {
        keep[i] = false;
    }
    let mut index = 0;
    items.retain(|_| {
        let kept = keep[index];
        index += 1;
        kept
    });
}
