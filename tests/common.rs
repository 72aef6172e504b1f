//! Shared world fixtures for the integration suite.

use ecotransport::world::memory::{MemoryEntity, MemoryShop, MemoryStorage, MemoryWorld};
use ecotransport::world::{ProductClass, ProductInfo};

/// A three-town world with one clean arbitrage chain:
/// quarry (sells stone cheap) -> mason (buys stone, sells planks cheap)
/// -> carpenter (buys planks). All stands trade in "coin" and have roomy
/// storage.
pub fn chain_world() -> MemoryWorld {
    let mut world = MemoryWorld::new();
    world.add_product(ProductInfo::new("stone", "Stone", 20));
    world.add_product(ProductInfo::new("plank", "Wooden Plank", 50));

    world.add_entity(
        MemoryEntity::new("quarry", "Quarry Stand", "alice")
            .at(0, 0, 0)
            .with_shop(MemoryShop::new("coin").selling("stone", 10.0, 100)),
    );
    world.add_entity(
        MemoryEntity::new("mason", "Mason Stand", "bob")
            .at(30, 0, 40)
            .with_shop(
                MemoryShop::new("coin")
                    .with_balance(1000.0)
                    .buying("stone", 15.0, 50)
                    .selling("plank", 4.0, 200),
            )
            .with_storage(MemoryStorage::with_empty_slots(20)),
    );
    world.add_entity(
        MemoryEntity::new("carpenter", "Carpenter Stand", "carol")
            .at(30, 0, 100)
            .with_shop(MemoryShop::new("coin").with_balance(800.0).buying("plank", 5.0, 80))
            .with_storage(MemoryStorage::with_empty_slots(20)),
    );
    world
}

/// Product classified as food, for restriction fixtures.
#[allow(dead_code)] // Not every test crate pulls this in.
pub fn bread() -> ProductInfo {
    ProductInfo::new("bread", "Bread", 10).with_class(ProductClass {
        food: true,
        ..Default::default()
    })
}
