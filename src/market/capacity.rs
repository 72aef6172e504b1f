//! Storage absorption evaluator.
//!
//! Answers one question for the matcher: how many more units of a product can
//! a destination store's storage network physically accept right now?
//!
//! The walk covers the store's own storage plus every storage reachable
//! through link capabilities, deduplicated. Per storage node the rules are:
//!
//! - disabled storages contribute nothing
//! - storages that do not permit deposits contribute nothing
//! - an active content restriction that rejects the product's class excludes
//!   the whole node
//! - partial stacks of the same product contribute their remaining headroom
//! - empty slots contribute one full stack each, but only when the storage
//!   already holds the product or is entirely empty; empty slots inside a
//!   storage dedicated to other goods are not counted
//!
//! No reachable storage means capacity 0: absorbing capacity must be proven,
//! never assumed. (Shop balances default the other way; see
//! `market::opportunity`.)

use std::collections::HashSet;

use crate::world::{ProductInfo, StorageCapability, WorldProvider};

/// Units of `product` the storage network rooted at `store_id` can absorb.
pub fn absorbable_units<W: WorldProvider + ?Sized>(
    world: &W,
    store_id: &str,
    product: &ProductInfo,
) -> u32 {
    let mut seen: HashSet<String> = HashSet::new();
    let mut frontier: Vec<String> = vec![store_id.to_string()];
    let mut total: u32 = 0;

    while let Some(id) = frontier.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        let entity = match world.entity(&id) {
            Some(entity) => entity,
            // Dangling link: the node was destroyed or never existed.
            None => continue,
        };

        if let Some(links) = entity.links() {
            frontier.extend(links.linked_storages());
        }

        if let Some(storage) = entity.storage() {
            total = total.saturating_add(node_capacity(storage, product));
        }
    }

    total
}

/// Capacity contributed by a single storage node, after permission and
/// restriction checks.
fn node_capacity(storage: &dyn StorageCapability, product: &ProductInfo) -> u32 {
    if !storage.enabled() || !storage.deposit_allowed() {
        return 0;
    }
    if storage
        .restrictions()
        .iter()
        .any(|r| !r.admits(&product.class))
    {
        return 0;
    }

    let slots = storage.slots();
    if slots.is_empty() {
        return 0;
    }

    let stack_size = product.max_stack_size.max(1);
    let mut headroom: u32 = 0;
    let mut empty_slots: u32 = 0;
    let mut holds_product = false;
    let mut entirely_empty = true;

    for slot in &slots {
        match &slot.product {
            None => empty_slots += 1,
            Some(id) => {
                entirely_empty = false;
                if *id == product.id {
                    holds_product = true;
                    headroom += stack_size.saturating_sub(slot.quantity);
                }
            }
        }
    }

    if holds_product || entirely_empty {
        headroom = headroom.saturating_add(empty_slots.saturating_mul(stack_size));
    }

    headroom
}
