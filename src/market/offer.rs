//! Offer records and the snapshot builder.
//!
//! A snapshot is the full set of normalized offers collected from every
//! enabled shop in the world at one instant. Snapshots are immutable; a
//! refresh builds a complete new one and the service publishes it wholesale
//! (see `market::service`).

use chrono::{DateTime, Utc};
use log::debug;

use crate::logutil::escape_log;
use crate::world::WorldProvider;

/// Which side of a trade a shop posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDirection {
    /// The shop sells the product; players buy from it.
    Selling,
    /// The shop buys the product; players sell to it.
    Buying,
}

/// One normalized buy or sell line from a shop, frozen at snapshot time.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub product: String,
    pub product_name: String,
    pub price: f32,
    pub quantity: u32,
    pub direction: OfferDirection,
    /// Id of the world entity carrying the shop.
    pub store: String,
    pub store_name: String,
    pub owner_name: String,
    pub currency: String,
}

/// The complete offer set collected at one refresh instant.
#[derive(Debug, Clone)]
pub struct OfferSnapshot {
    pub offers: Vec<Offer>,
    pub taken_at: DateTime<Utc>,
}

/// Scan every world entity with a shop capability and collect its offers.
///
/// Disabled shops are skipped entirely. A shop whose offer data cannot be
/// inspected is skipped without aborting the scan. Offers with an unknown
/// product or a non-positive quantity are discarded.
pub fn build_snapshot<W: WorldProvider + ?Sized>(world: &W) -> OfferSnapshot {
    let mut offers = Vec::new();

    for entity in world.entities() {
        let shop = match entity.shop() {
            Some(shop) => shop,
            None => continue,
        };
        if !shop.enabled() {
            debug!("snapshot: shop '{}' disabled, skipping", escape_log(entity.name()));
            continue;
        }

        let posted = match shop.offers() {
            Ok(posted) => posted,
            Err(e) => {
                debug!(
                    "snapshot: shop '{}' unreadable ({}), skipping",
                    escape_log(entity.name()),
                    e
                );
                continue;
            }
        };

        for line in posted {
            if line.quantity == 0 {
                continue;
            }
            let product = match world.product(&line.product) {
                Some(product) => product,
                None => {
                    debug!(
                        "snapshot: shop '{}' offers unknown product '{}', dropping line",
                        escape_log(entity.name()),
                        escape_log(&line.product)
                    );
                    continue;
                }
            };

            offers.push(Offer {
                product: product.id.clone(),
                product_name: product.display_name.clone(),
                price: line.price,
                quantity: line.quantity,
                direction: if line.buying {
                    OfferDirection::Buying
                } else {
                    OfferDirection::Selling
                },
                store: entity.id().to_string(),
                store_name: entity.name().to_string(),
                owner_name: entity.owner_name().to_string(),
                currency: shop.currency().to_string(),
            });
        }
    }

    OfferSnapshot {
        offers,
        taken_at: Utc::now(),
    }
}
