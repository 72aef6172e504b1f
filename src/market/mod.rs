//! Trade-opportunity discovery over a world snapshot.
//!
//! Pipeline: `offer::build_snapshot` collects normalized offers from every
//! enabled shop; `opportunity::find_opportunities` pairs them into profitable
//! trades (consulting `capacity` for what the destination can absorb);
//! `route::build_routes` chains trades into multi-stop delivery runs.
//! `service::MarketService` owns the published snapshot and exposes the
//! query surface.

pub mod capacity;
pub mod errors;
pub mod offer;
pub mod opportunity;
pub mod route;
pub mod service;

pub use capacity::absorbable_units;
pub use errors::MarketError;
pub use offer::{build_snapshot, Offer, OfferDirection, OfferSnapshot};
pub use opportunity::{find_opportunities, search_opportunities, Opportunity};
pub use route::{build_routes, RouteStop, TradeRoute};
pub use service::MarketService;
