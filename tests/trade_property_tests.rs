//! Property-based tests for the trade core
//!
//! These run over the pure pieces of the crate (no sled): the negotiation
//! rules on `Trade`, the transfer engine, and the rarity roll. Each property
//! is an invariant that must hold for all inputs, not just scripted cases.

use proptest::prelude::*;

use card_exchange::item::{Card, Inventory, PackEntry, Rarity};
use card_exchange::pack::select_rarity;
use card_exchange::trade::{Offer, Phase, Status, Trade};
use card_exchange::transfer;

// PROPERTY TEST STRATEGIES

fn rarity_strategy() -> impl Strategy<Value = Rarity> {
    (0u8..=4).prop_map(|i| match i {
        0 => Rarity::Common,
        1 => Rarity::Uncommon,
        2 => Rarity::Rare,
        3 => Rarity::Epic,
        _ => Rarity::Legendary,
    })
}

/// Card names drawn from a tiny alphabet so duplicates are common.
fn card_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("Aurora"), Just("Basalt"), Just("Cinder"), Just("Drift")]
        .prop_map(String::from)
}

fn card_strategy() -> impl Strategy<Value = Card> {
    (card_name_strategy(), rarity_strategy()).prop_map(|(name, rarity)| Card::new(name, rarity))
}

fn pack_entry_strategy() -> impl Strategy<Value = PackEntry> {
    (prop_oneof![Just("Starter"), Just("Premium")], 1u8..=8)
        .prop_map(|(name, count)| PackEntry::new(name, count))
}

fn inventory_strategy() -> impl Strategy<Value = Inventory> {
    (
        prop::collection::vec(pack_entry_strategy(), 0..4),
        prop::collection::vec(card_strategy(), 0..6),
    )
        .prop_map(|(packs, cards)| Inventory { packs, cards })
}

/// A giver inventory together with an ask for a distinct subset of its
/// cards, named with a placeholder rarity the way real offers are.
fn giver_and_asks_strategy() -> impl Strategy<Value = (Inventory, Vec<Card>)> {
    inventory_strategy().prop_flat_map(|inventory| {
        let held = inventory.cards.clone();
        let len = held.len();
        (
            Just(inventory),
            prop::sample::subsequence(held, 0..=len).prop_map(|chosen| {
                chosen
                    .into_iter()
                    .map(|card| Card::new(card.name, Rarity::Common))
                    .collect()
            }),
        )
    })
}

/// Weights that may or may not cover the full d100.
fn weights_strategy() -> impl Strategy<Value = Vec<(Rarity, u8)>> {
    prop::collection::vec((rarity_strategy(), 0u8..=40), 0..5)
}

fn count_by_name(inventory: &Inventory, name: &str) -> usize {
    inventory.cards.iter().filter(|c| c.name == name).count()
        + inventory.packs.iter().filter(|p| p.name == name).count()
}

// PROPERTY TESTS
proptest! {
    /// Property: the rarity roll is total — every roll maps to a listed
    /// rarity or falls back to Common, for any weight table.
    #[test]
    fn prop_rarity_roll_is_total(weights in weights_strategy(), roll in 0u8..100) {
        let rolled = select_rarity(&weights, roll);

        let listed = weights.iter().any(|(r, _)| *r == rolled);
        prop_assert!(
            listed || rolled == Rarity::Common,
            "roll {} produced {:?} which is neither listed nor the fallback",
            roll, rolled
        );
    }

    /// Property: n counters flip the phase n times and never close the trade.
    #[test]
    fn prop_counters_alternate_the_phase(counters in 0usize..16) {
        let mut trade = Trade::open(
            1,
            "user_a".into(),
            "user_b".into(),
            Offer::default(),
            Offer::default(),
        );

        for _ in 0..counters {
            // each counter comes from the current responder
            let responder = trade.responder().to_string();
            prop_assert!(trade.ensure_turn(&responder).is_ok());
            trade.counter(Offer::default(), Offer::default());
        }

        let expected = if counters % 2 == 0 { Phase::Offer } else { Phase::Counter };
        prop_assert_eq!(trade.phase, expected);
        prop_assert_eq!(trade.status, Status::Open);
    }

    /// Property: whatever the phase, exactly one of the two parties may act
    /// and any third name is turned away.
    #[test]
    fn prop_turn_taking_is_exclusive(flips in 0usize..4, stranger in "[a-z]{4,10}") {
        let mut trade = Trade::open(
            1,
            "user_a".into(),
            "user_b".into(),
            Offer::default(),
            Offer::default(),
        );
        for _ in 0..flips {
            trade.counter(Offer::default(), Offer::default());
        }

        let responder = trade.responder().to_string();
        let other = if responder == "user_a" { "user_b" } else { "user_a" };

        prop_assert!(trade.ensure_turn(&responder).is_ok());
        prop_assert!(trade.ensure_turn(other).is_err());
        prop_assert!(trade.ensure_turn(&stranger).is_err());
    }

    /// Property: a successful swap conserves every item name count across
    /// the pair of inventories.
    #[test]
    fn prop_swap_conserves_items(
        (mut giver, asks) in giver_and_asks_strategy(),
        mut taker in inventory_strategy(),
    ) {
        let offer = Offer::new(vec![], asks.clone());
        let names: Vec<String> = asks.iter().map(|c| c.name.clone()).collect();

        let total_before: usize = giver.item_count() + taker.item_count();
        let per_name_before: Vec<usize> = names
            .iter()
            .map(|n| count_by_name(&giver, n) + count_by_name(&taker, n))
            .collect();

        let result = transfer::swap(&mut giver, &mut taker, &offer, &Offer::default(), "a", "b");
        prop_assert!(result.is_ok(), "subset of held cards must transfer: {:?}", result);

        prop_assert_eq!(giver.item_count() + taker.item_count(), total_before);
        for (name, before) in names.iter().zip(per_name_before) {
            prop_assert_eq!(count_by_name(&giver, name) + count_by_name(&taker, name), before);
        }
    }

    /// Property: a failed plan never mutates either inventory.
    #[test]
    fn prop_failed_swaps_change_nothing(
        mut giver in inventory_strategy(),
        mut taker in inventory_strategy(),
    ) {
        let giver_before = giver.clone();
        let taker_before = taker.clone();

        // "Gale" is outside the generated alphabet, so this leg cannot plan
        let impossible = Offer::new(vec![], vec![Card::new("Gale", Rarity::Common)]);

        let result = transfer::swap(&mut giver, &mut taker, &impossible, &Offer::default(), "a", "b");

        prop_assert!(result.is_err());
        prop_assert_eq!(giver, giver_before);
        prop_assert_eq!(taker, taker_before);
    }
}
