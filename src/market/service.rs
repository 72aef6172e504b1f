//! Market data service: snapshot ownership and the query surface.
//!
//! One service instance is constructed at startup and handed by reference to
//! whatever frontend drives it (command processor, host UI glue, tests).
//! The offer snapshot is immutable once built; `refresh` publishes a complete
//! replacement with a single swap under the write lock, so readers always see
//! a consistent offer set and are never starved by a long scan.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use log::info;

use super::offer::{build_snapshot, OfferSnapshot};
use super::opportunity::{find_opportunities, search_opportunities, Opportunity};
use super::route::{build_routes, TradeRoute};
use crate::world::WorldProvider;

pub struct MarketService<W: WorldProvider> {
    world: W,
    snapshot: RwLock<Arc<OfferSnapshot>>,
}

impl<W: WorldProvider> MarketService<W> {
    /// Create the service and take an initial snapshot of `world`.
    pub fn new(world: W) -> Self {
        let snapshot = Arc::new(build_snapshot(&world));
        info!("market service started with {} offers", snapshot.offers.len());
        Self {
            world,
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Rescan the world and publish a fresh snapshot. Returns the offer count.
    pub fn refresh(&self) -> usize {
        let fresh = Arc::new(build_snapshot(&self.world));
        let count = fresh.offers.len();
        *self.snapshot.write().expect("snapshot lock poisoned") = fresh;
        info!("market snapshot refreshed: {} offers", count);
        count
    }

    /// The currently published snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<OfferSnapshot> {
        self.snapshot.read().expect("snapshot lock poisoned").clone()
    }

    pub fn last_refresh(&self) -> DateTime<Utc> {
        self.snapshot().taken_at
    }

    /// All profitable opportunities visible to `actor`, best first.
    pub fn opportunities(&self, actor: &str) -> Vec<Opportunity> {
        let snapshot = self.snapshot();
        find_opportunities(&self.world, &snapshot, actor)
    }

    /// Opportunities whose product or store names match `term`.
    pub fn search(&self, term: &str, actor: &str) -> Vec<Opportunity> {
        search_opportunities(&self.opportunities(actor), term)
    }

    /// Multi-stop routes chained from the actor's opportunities.
    pub fn routes(&self, actor: &str, max_results: usize) -> Vec<TradeRoute> {
        build_routes(&self.opportunities(actor), max_results)
    }
}
