//! Opportunity matching.
//!
//! Pairs selling offers against buying offers per product and currency,
//! filters out self-dealing and inaccessible destinations, and bounds the
//! tradeable quantity by what the destination can pay for and physically
//! store. Results are ranked by total profit; ties keep input order so the
//! output is reproducible for a given snapshot.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::capacity::absorbable_units;
use super::offer::{Offer, OfferDirection, OfferSnapshot};
use crate::world::WorldProvider;

/// A profitable matched pair: buy at the source store, sell at the
/// destination store.
#[derive(Debug, Clone)]
pub struct Opportunity {
    /// The source side: a shop selling the product.
    pub buy_from: Offer,
    /// The destination side: a shop buying the product.
    pub sell_to: Offer,
    /// Units actually tradeable, bounded by stock, demand, the destination's
    /// funds, and its storage capacity. Zero when the destination cannot
    /// absorb the product at all.
    pub max_quantity: u32,
    /// Units the destination's storage network can still absorb.
    pub storage_capacity: u32,
    /// Straight-line distance between the two stores, 0 when either store
    /// has no position.
    pub distance: f32,
}

impl Opportunity {
    pub fn margin(&self) -> f32 {
        self.sell_to.price - self.buy_from.price
    }

    pub fn total_cost(&self) -> f32 {
        self.buy_from.price * self.max_quantity as f32
    }

    pub fn total_profit(&self) -> f32 {
        self.margin() * self.max_quantity as f32
    }

    pub fn profit_percent(&self) -> f32 {
        if self.buy_from.price > 0.0 {
            self.margin() / self.buy_from.price * 100.0
        } else {
            0.0
        }
    }

    pub fn product_name(&self) -> &str {
        &self.buy_from.product_name
    }
}

/// Match every profitable (selling, buying) pair visible to `actor`.
///
/// Destinations the actor owns are excluded, as are destinations whose
/// access control denies the actor consumer access. A destination with no
/// access capability at all is treated as open.
pub fn find_opportunities<W: WorldProvider + ?Sized>(
    world: &W,
    snapshot: &OfferSnapshot,
    actor: &str,
) -> Vec<Opportunity> {
    // Group by product, preserving first-seen order for reproducible output.
    let mut product_order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (Vec<&Offer>, Vec<&Offer>)> = HashMap::new();
    for offer in &snapshot.offers {
        let entry = groups.entry(offer.product.as_str()).or_insert_with(|| {
            product_order.push(offer.product.as_str());
            (Vec::new(), Vec::new())
        });
        match offer.direction {
            OfferDirection::Selling => entry.0.push(offer),
            OfferDirection::Buying => entry.1.push(offer),
        }
    }

    let mut opportunities = Vec::new();
    for product in product_order {
        let (sells, buys) = &groups[product];
        for &source in sells {
            for &destination in buys {
                if source.currency != destination.currency {
                    continue;
                }
                if destination.price <= source.price {
                    continue;
                }
                if let Some(opp) = evaluate_pair(world, source, destination, actor) {
                    opportunities.push(opp);
                }
            }
        }
    }

    // Stable sort: equal-profit pairs keep their pairing order.
    opportunities.sort_by(|a, b| {
        b.total_profit()
            .partial_cmp(&a.total_profit())
            .unwrap_or(Ordering::Equal)
    });
    opportunities
}

/// Apply destination filters and quantity bounds to one candidate pair.
fn evaluate_pair<W: WorldProvider + ?Sized>(
    world: &W,
    source: &Offer,
    destination: &Offer,
    actor: &str,
) -> Option<Opportunity> {
    let dest_entity = world.entity(&destination.store);

    if dest_entity.is_some_and(|e| e.owned_by(actor)) {
        return None;
    }
    // No access capability means the store predates access control: open.
    let allowed = match dest_entity.and_then(|e| e.access()) {
        None => true,
        Some(access) => access.is_public() || access.grants_consumer(actor),
    };
    if !allowed {
        return None;
    }

    let mut limit = source.quantity.min(destination.quantity);
    if let Some(balance) = dest_entity.and_then(|e| e.shop()).and_then(|s| s.balance()) {
        if destination.price > 0.0 {
            limit = limit.min((balance / destination.price) as u32);
        }
    }

    let storage_capacity = match world.product(&destination.product) {
        Some(product) => absorbable_units(world, &destination.store, product),
        None => 0,
    };
    let max_quantity = limit.min(storage_capacity);

    let src_pos = world.entity(&source.store).and_then(|e| e.position());
    let dst_pos = dest_entity.and_then(|e| e.position());
    let distance = match (src_pos, dst_pos) {
        (Some(a), Some(b)) => a.distance_to(&b),
        _ => 0.0,
    };

    Some(Opportunity {
        buy_from: source.clone(),
        sell_to: destination.clone(),
        max_quantity,
        storage_capacity,
        distance,
    })
}

/// Case-insensitive filter over product and store names.
pub fn search_opportunities(opportunities: &[Opportunity], term: &str) -> Vec<Opportunity> {
    let needle = term.to_lowercase();
    opportunities
        .iter()
        .filter(|o| {
            o.buy_from.product_name.to_lowercase().contains(&needle)
                || o.buy_from.store_name.to_lowercase().contains(&needle)
                || o.sell_to.store_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
