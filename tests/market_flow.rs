//! End-to-end matching behavior over in-memory worlds.

mod common;

use common::{bread, chain_world};
use ecotransport::config::Config;
use ecotransport::commands::CommandProcessor;
use ecotransport::market::MarketService;
use ecotransport::stats::UsageStats;
use ecotransport::world::memory::{MemoryEntity, MemoryShop, MemoryStorage, MemoryWorld};
use ecotransport::world::{ProductInfo, Slot};

fn two_stand_world(balance: Option<f32>, storage: MemoryStorage) -> MemoryWorld {
    let mut world = MemoryWorld::new();
    world.add_product(ProductInfo::new("stone", "Stone", 100));
    world.add_entity(
        MemoryEntity::new("a", "Store A", "alice")
            .at(0, 0, 0)
            .with_shop(MemoryShop::new("coin").selling("stone", 10.0, 100)),
    );
    let mut shop = MemoryShop::new("coin").buying("stone", 15.0, 50);
    shop.balance = balance;
    world.add_entity(
        MemoryEntity::new("b", "Store B", "bob")
            .at(0, 0, 0)
            .with_shop(shop)
            .with_storage(storage),
    );
    world
}

#[test]
fn plain_arbitrage_scenario() {
    // price 10 x100 at A; price 15 x50 at B; balance 1000; ample storage.
    let world = two_stand_world(Some(1000.0), MemoryStorage::with_empty_slots(10));
    let service = MarketService::new(world);
    let opps = service.opportunities("carol");

    assert_eq!(opps.len(), 1);
    assert_eq!(opps[0].margin(), 5.0);
    assert_eq!(opps[0].max_quantity, 50);
    assert_eq!(opps[0].total_profit(), 250.0);
}

#[test]
fn storage_capacity_caps_the_scenario() {
    // Same trade, but B can only absorb 20 units.
    let mut storage = MemoryStorage::default();
    storage.slots = vec![Slot::stack("stone", 80)];
    let world = two_stand_world(Some(1000.0), storage);
    let service = MarketService::new(world);
    let opps = service.opportunities("carol");

    assert_eq!(opps[0].storage_capacity, 20);
    assert_eq!(opps[0].max_quantity, 20);
    assert_eq!(opps[0].total_profit(), 100.0);
}

#[test]
fn balance_caps_the_scenario() {
    // Balance 100 at price 15 floors to 6 affordable units.
    let world = two_stand_world(Some(100.0), MemoryStorage::with_empty_slots(10));
    let service = MarketService::new(world);
    let opps = service.opportunities("carol");

    assert_eq!(opps[0].max_quantity, 6);
    assert_eq!(opps[0].total_profit(), 30.0);
}

#[test]
fn restricted_storage_blocks_the_trade_but_keeps_the_listing() {
    use ecotransport::world::StorageRestriction;

    let mut world = MemoryWorld::new();
    world.add_product(bread());
    world.add_entity(
        MemoryEntity::new("farm", "Farm Stand", "alice")
            .with_shop(MemoryShop::new("coin").selling("bread", 2.0, 40)),
    );
    // Buyer's only storage is tool-only: bread cannot land anywhere.
    world.add_entity(
        MemoryEntity::new("smith", "Smithy Stand", "bob")
            .with_shop(MemoryShop::new("coin").with_balance(500.0).buying("bread", 4.0, 40))
            .with_storage(
                MemoryStorage::with_empty_slots(6).restricted(StorageRestriction::ClothingOrToolOnly),
            ),
    );

    let service = MarketService::new(world);
    let opps = service.opportunities("carol");
    assert_eq!(opps.len(), 1);
    assert_eq!(opps[0].storage_capacity, 0);
    assert_eq!(opps[0].max_quantity, 0);
}

#[test]
fn requester_never_sees_their_own_destination() {
    let service = MarketService::new(chain_world());
    for opp in service.opportunities("bob") {
        assert_ne!(opp.sell_to.owner_name, "bob");
    }
    // bob owns the mason stand, so only the plank trade remains.
    assert_eq!(service.opportunities("bob").len(), 1);
    assert_eq!(service.opportunities("analyst").len(), 2);
}

#[test]
fn refresh_is_idempotent_without_world_changes() {
    let service = MarketService::new(chain_world());
    let first = service.snapshot();
    service.refresh();
    let second = service.snapshot();

    assert_eq!(first.offers.len(), second.offers.len());
    assert_eq!(first.offers, second.offers);
}

#[tokio::test]
async fn command_surface_reports_and_counts_usage() {
    let service = MarketService::new(chain_world());
    let stats = UsageStats::new();
    let config = Config::default();
    let processor = CommandProcessor::new(&service, &stats, &config);

    let overview = processor.process("analyst", "overview").await.unwrap();
    assert!(overview.contains("Trade opportunities: 2"));
    assert!(overview.contains("Stone"));
    assert!(overview.contains("Quarry Stand -> Mason Stand"));

    let found = processor.process("analyst", "find plank").await.unwrap();
    assert!(found.contains("Wooden Plank"));
    assert!(!found.contains("Stone\n"));

    let detail = processor.process("analyst", "detail stone").await.unwrap();
    assert!(detail.contains("margin per unit: 5.0"));
    assert!(detail.contains("max tradeable: 50 units"));

    let missing = processor.process("analyst", "find").await.unwrap();
    assert!(missing.starts_with("Usage:"));

    let unknown = processor.process("analyst", "frobnicate").await.unwrap();
    assert!(unknown.contains("Unknown command"));

    let stats_reply = processor.process("analyst", "stats").await.unwrap();
    assert!(stats_reply.contains("overview: 1 total"));
    assert!(stats_reply.contains("find: 2 total"));
    assert_eq!(stats.total("detail"), 1);
    assert_eq!(stats.total("unknown"), 1);
}

#[tokio::test]
async fn refresh_command_reports_opportunity_count() {
    let service = MarketService::new(chain_world());
    let stats = UsageStats::new();
    let config = Config::default();
    let processor = CommandProcessor::new(&service, &stats, &config);

    let reply = processor.process("analyst", "refresh").await.unwrap();
    assert_eq!(reply, "Market data refreshed. 2 trade opportunities found.");
}
