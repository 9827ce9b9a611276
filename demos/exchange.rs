#![allow(warnings)]

use card_exchange::auth::Authenticator;
use card_exchange::pack::PackCatalog;
use card_exchange::service::ExchangeService;
use card_exchange::trade::{Offer, TradeAction};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let db = sled::open("exchange")?;

    if !db.is_empty() {
        db.clear();
    }

    let service = ExchangeService::new(
        Arc::new(db),
        PackCatalog::standard(),
        Authenticator::new("secret123"),
    );

    // two players sign up and get their starting coins
    let (alice, alice_token) = service.signup("alice", "hunter2")?;
    let (bob, _bob_token) = service.signup("bob", "swordfish")?;
    println!("alice starts with {} coins", alice.coins);

    // alice buys and opens a starter pack
    let alice = service.buy_pack(&alice.address, "Starter")?;
    let pulled = service.open_pack(&alice.address, "Starter")?;
    println!("alice pulled: {:#?}", pulled);

    // bob buys a pack he is willing to trade away
    let bob = service.buy_pack(&bob.address, "Starter")?;

    // alice offers her first pull for bob's unopened pack
    let trade = service.request_trade(
        &alice.address,
        &bob.address,
        Offer::new(vec![], vec![pulled[0].clone()]),
        Offer::new(bob.inventory.packs.clone(), vec![]),
    )?;
    println!("trade #{} opened, phase {:?}", trade.id, trade.phase);

    // bob counters: he wants a sweeter deal, two cards for the pack
    let counter = Offer::new(vec![], pulled[..2].to_vec());
    let trade = service.respond_trade(
        trade.id,
        &bob.address,
        TradeAction::Counter {
            from_offer: counter,
            to_offer: Offer::new(bob.inventory.packs.clone(), vec![]),
        },
    )?;
    println!("bob countered, phase {:?}", trade.phase);

    // alice accepts the counter and both inventories move atomically
    let trade = service.respond_trade(trade.id, &alice.address, TradeAction::Accept)?;
    println!("trade #{} is {:?}", trade.id, trade.status);

    let collection = service.collection(&alice.address)?;
    println!("alice now holds {} packs and {} cards", collection.packs.len(), collection.cards.len());

    // tokens verify back to the account that minted them
    let me = service.authenticate(&alice_token)?;
    assert_eq!(me.address, alice.address);

    Ok(())
}
