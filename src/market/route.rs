//! Multi-stop route chaining.
//!
//! Chains opportunities into delivery runs: after selling at one stop, the
//! hauler buys again at that same store and carries on. Chain growth is
//! greedy - from the current stop's destination, the single
//! highest-total-profit continuation wins, first one on ties - with no
//! backtracking or global optimization. The point is a reproducible, cheap
//! heuristic over a snapshot, not optimal routing.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::opportunity::Opportunity;

/// One leg of a route.
#[derive(Debug, Clone)]
pub struct RouteStop {
    pub opportunity: Opportunity,
    /// Span of this leg: source store to destination store.
    pub leg_distance: f32,
}

/// An ordered chain of opportunities where each stop's destination store is
/// the next stop's source store.
#[derive(Debug, Clone)]
pub struct TradeRoute {
    pub stops: Vec<RouteStop>,
    pub total_distance: f32,
    pub total_profit: f32,
}

impl TradeRoute {
    fn from_stops(stops: Vec<RouteStop>) -> Self {
        let total_distance = stops.iter().map(|s| s.leg_distance).sum();
        let total_profit = stops.iter().map(|s| s.opportunity.total_profit()).sum();
        Self {
            stops,
            total_distance,
            total_profit,
        }
    }

    /// Profit per block travelled; routes with no travel rank above any
    /// travelled route of equal profit.
    pub fn efficiency(&self) -> f32 {
        if self.total_distance > 0.0 {
            self.total_profit / self.total_distance
        } else {
            f32::INFINITY
        }
    }
}

/// Build candidate routes from matched opportunities.
///
/// Every opportunity seeds at most one route, keyed by its (source store,
/// destination store, product) triple. Chains never revisit a destination
/// store and never switch currency mid-route. Ranking: total profit, then
/// efficiency, then stop count (longer wins); truncated to `max_results`.
pub fn build_routes(opportunities: &[Opportunity], max_results: usize) -> Vec<TradeRoute> {
    let mut started: HashSet<(String, String, String)> = HashSet::new();
    let mut routes = Vec::new();

    for opportunity in opportunities {
        let key = (
            opportunity.buy_from.store.clone(),
            opportunity.sell_to.store.clone(),
            opportunity.buy_from.product.clone(),
        );
        if !started.insert(key) {
            continue;
        }
        routes.push(TradeRoute::from_stops(extend_chain(opportunity, opportunities)));
    }

    routes.sort_by(|a, b| {
        b.total_profit
            .partial_cmp(&a.total_profit)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.efficiency()
                    .partial_cmp(&a.efficiency())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.stops.len().cmp(&a.stops.len()))
    });
    routes.truncate(max_results);
    routes
}

/// Grow one chain from `start` by the greedy rule until no continuation is
/// valid. Iterative frontier walk with an explicit visited set; no recursion.
fn extend_chain(start: &Opportunity, opportunities: &[Opportunity]) -> Vec<RouteStop> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start.buy_from.store.as_str());
    visited.insert(start.sell_to.store.as_str());

    let mut stops = vec![RouteStop {
        opportunity: start.clone(),
        leg_distance: start.distance,
    }];
    let mut current = start;

    loop {
        let mut next: Option<&Opportunity> = None;
        for candidate in opportunities {
            if candidate.buy_from.store != current.sell_to.store {
                continue;
            }
            if candidate.sell_to.currency != current.sell_to.currency {
                continue;
            }
            if visited.contains(candidate.sell_to.store.as_str()) {
                continue;
            }
            // Strict comparison keeps the first of equally good candidates.
            if next.is_none_or(|best| candidate.total_profit() > best.total_profit()) {
                next = Some(candidate);
            }
        }

        match next {
            Some(continuation) => {
                visited.insert(continuation.sell_to.store.as_str());
                stops.push(RouteStop {
                    opportunity: continuation.clone(),
                    leg_distance: continuation.distance,
                });
                current = continuation;
            }
            None => break,
        }
    }

    stops
}
