//! Route chaining over worlds where one stop's destination feeds the next.

mod common;

use std::collections::HashSet;

use common::chain_world;
use ecotransport::config::Config;
use ecotransport::commands::CommandProcessor;
use ecotransport::market::MarketService;
use ecotransport::stats::UsageStats;
use ecotransport::world::memory::{MemoryEntity, MemoryShop, MemoryStorage, MemoryWorld};
use ecotransport::world::ProductInfo;

#[test]
fn chained_stops_accumulate_profit_and_distance() {
    let service = MarketService::new(chain_world());
    let routes = service.routes("analyst", 10);

    // Best route: stone quarry->mason (profit 250, 50m), then plank
    // mason->carpenter (profit 80, 60m).
    let best = &routes[0];
    assert_eq!(best.stops.len(), 2);
    assert_eq!(best.total_profit, 330.0);
    assert_eq!(best.total_distance, 110.0);
    assert_eq!(best.stops[0].opportunity.product_name(), "Stone");
    assert_eq!(best.stops[1].opportunity.product_name(), "Wooden Plank");
    assert_eq!(best.stops[0].leg_distance, 50.0);
    assert_eq!(best.stops[1].leg_distance, 60.0);
}

#[test]
fn no_route_revisits_a_destination_store() {
    // Dense world: four stands all cross-trading stone.
    let mut world = MemoryWorld::new();
    world.add_product(ProductInfo::new("stone", "Stone", 20));
    let stands = ["n", "e", "s", "w"];
    for (i, id) in stands.iter().enumerate() {
        let mut shop = MemoryShop::new("coin").with_balance(10_000.0);
        // Each stand sells at 10+i and buys at 14-i, creating many pairs.
        shop = shop.selling("stone", 10.0 + i as f32, 50);
        shop = shop.buying("stone", 14.0 - i as f32, 50);
        world.add_entity(
            MemoryEntity::new(id, id, "owner")
                .at(i as i32 * 10, 0, 0)
                .with_shop(shop)
                .with_storage(MemoryStorage::with_empty_slots(10)),
        );
    }

    let service = MarketService::new(world);
    for route in service.routes("analyst", 50) {
        let mut destinations = HashSet::new();
        for stop in &route.stops {
            assert!(
                destinations.insert(stop.opportunity.sell_to.store.clone()),
                "destination visited twice in one route"
            );
        }
    }
}

#[test]
fn isolated_opportunities_yield_single_stop_routes() {
    let mut world = MemoryWorld::new();
    world.add_product(ProductInfo::new("stone", "Stone", 20));
    world.add_entity(
        MemoryEntity::new("a", "A", "alice")
            .with_shop(MemoryShop::new("coin").selling("stone", 10.0, 10)),
    );
    world.add_entity(
        MemoryEntity::new("b", "B", "bob")
            .with_shop(MemoryShop::new("coin").with_balance(500.0).buying("stone", 12.0, 10))
            .with_storage(MemoryStorage::with_empty_slots(4)),
    );

    let service = MarketService::new(world);
    let routes = service.routes("carol", 10);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].stops.len(), 1);
}

#[test]
fn max_results_bounds_route_count() {
    let service = MarketService::new(chain_world());
    assert_eq!(service.routes("analyst", 1).len(), 1);
}

#[tokio::test]
async fn routes_command_renders_ranked_listing() {
    let service = MarketService::new(chain_world());
    let stats = UsageStats::new();
    let config = Config::default();
    let processor = CommandProcessor::new(&service, &stats, &config);

    let reply = processor.process("analyst", "routes").await.unwrap();
    assert!(reply.contains("Route 1: 2 stops, profit 330.0, distance 110m"));
    assert!(reply.contains("1. Stone: Quarry Stand -> Mason Stand"));
    assert!(reply.contains("2. Wooden Plank: Mason Stand -> Carpenter Stand"));
}
