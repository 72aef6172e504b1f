//! Plain-text report builders for the chat surface.
//!
//! Every builder returns lines; the caller joins or pages them however its
//! transport needs. Formatting stays ASCII so reports survive any client
//! font.

use chrono::{DateTime, Utc};

use crate::market::{Opportunity, TradeRoute};

/// Lookup for the requesting actor's bank balance in a given currency.
/// `None` means the balance is unknowable; affordability is then not shown.
pub type BalanceLookup<'a> = &'a dyn Fn(&str) -> Option<f32>;

/// Market overview: summary header plus opportunities grouped by product.
pub fn format_overview(
    title: &str,
    opportunities: &[Opportunity],
    last_refresh: DateTime<Utc>,
    max_products: usize,
    balance_of: BalanceLookup,
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("=== {} ===", title));

    if opportunities.is_empty() {
        lines.push("No profitable opportunities found.".to_string());
        return lines;
    }

    let total_profit: f32 = opportunities.iter().map(|o| o.total_profit()).sum();
    lines.push(format!(
        "Trade opportunities: {}   Updated: {}",
        opportunities.len(),
        last_refresh.format("%H:%M:%S")
    ));
    lines.push(format!("Total potential profit: {:.1}", total_profit));
    lines.push(String::new());

    append_product_groups(&mut lines, opportunities, max_products, balance_of);
    lines
}

/// Search results for one term.
pub fn format_search_results(
    term: &str,
    opportunities: &[Opportunity],
    max_products: usize,
    balance_of: BalanceLookup,
) -> Vec<String> {
    let mut lines = Vec::new();

    if opportunities.is_empty() {
        lines.push(format!("No opportunities found matching '{}'.", term));
        lines.push("Try a different term, or 'overview' for everything.".to_string());
        return lines;
    }

    lines.push(format!(
        "Found {} opportunities matching '{}':",
        opportunities.len(),
        term
    ));
    lines.push(String::new());
    append_product_groups(&mut lines, opportunities, max_products, balance_of);
    lines
}

/// Group opportunities by product in first-seen order (the input is already
/// profit-sorted, so groups lead with their best trade) and render each.
fn append_product_groups(
    lines: &mut Vec<String>,
    opportunities: &[Opportunity],
    max_products: usize,
    balance_of: BalanceLookup,
) {
    let mut product_order: Vec<&str> = Vec::new();
    for opportunity in opportunities {
        let product = opportunity.buy_from.product.as_str();
        if !product_order.contains(&product) {
            product_order.push(product);
        }
    }

    for product in product_order.iter().take(max_products) {
        let group: Vec<&Opportunity> = opportunities
            .iter()
            .filter(|o| o.buy_from.product == *product)
            .collect();
        lines.push(group[0].product_name().to_string());
        for opportunity in group {
            append_opportunity(lines, opportunity, balance_of);
        }
        lines.push(String::new());
    }

    if product_order.len() > max_products {
        lines.push(format!(
            "... and {} more products.",
            product_order.len() - max_products
        ));
    }
}

fn append_opportunity(lines: &mut Vec<String>, opportunity: &Opportunity, balance_of: BalanceLookup) {
    let currency = &opportunity.buy_from.currency;
    lines.push(format!(
        "  {} -> {}",
        opportunity.buy_from.store_name, opportunity.sell_to.store_name
    ));
    lines.push(format!(
        "    buy {} @ {:.1} {} -> sell @ {:.1} {}",
        opportunity.max_quantity, opportunity.buy_from.price, currency, opportunity.sell_to.price, currency
    ));

    let mut investment = format!("    investment: {:.1} {}", opportunity.total_cost(), currency);
    if let Some(balance) = balance_of(currency) {
        if balance < opportunity.total_cost() {
            investment.push_str(&format!(" (you only have {:.1})", balance));
        }
    }
    lines.push(investment);
    lines.push(format!("    storage: {}", storage_status(opportunity)));
    lines.push(format!(
        "    distance: {:.0}m   margin: {:.1}   profit: {:.1} {}",
        opportunity.distance,
        opportunity.margin(),
        opportunity.total_profit(),
        currency
    ));
}

fn storage_status(opportunity: &Opportunity) -> String {
    if opportunity.storage_capacity == 0 {
        "FULL - cannot accept items".to_string()
    } else if opportunity.storage_capacity < opportunity.sell_to.quantity {
        format!("limited ({} items can fit)", opportunity.storage_capacity)
    } else {
        "ok".to_string()
    }
}

/// Full breakdown of a single opportunity.
pub fn format_opportunity_detail(opportunity: &Opportunity, balance_of: BalanceLookup) -> Vec<String> {
    let currency = &opportunity.buy_from.currency;
    let mut lines = vec![
        format!("=== Trade: {} ===", opportunity.product_name()),
        String::new(),
        "Buy from:".to_string(),
        format!("  store: {}", opportunity.buy_from.store_name),
        format!("  owner: {}", opportunity.buy_from.owner_name),
        format!("  price: {:.1} {}", opportunity.buy_from.price, currency),
        format!("  available: {}", opportunity.buy_from.quantity),
        String::new(),
        "Sell to:".to_string(),
        format!("  store: {}", opportunity.sell_to.store_name),
        format!("  owner: {}", opportunity.sell_to.owner_name),
        format!("  price: {:.1} {}", opportunity.sell_to.price, currency),
        format!("  wants: {}", opportunity.sell_to.quantity),
        format!("  storage: {}", storage_status(opportunity)),
        String::new(),
        "Profit analysis:".to_string(),
        format!("  margin per unit: {:.1} {}", opportunity.margin(), currency),
        format!("  profit percent: {:.1}%", opportunity.profit_percent()),
        format!("  max tradeable: {} units", opportunity.max_quantity),
        format!("  distance: {:.0}m", opportunity.distance),
    ];

    let mut investment = format!("  total investment: {:.1} {}", opportunity.total_cost(), currency);
    if let Some(balance) = balance_of(currency) {
        if balance < opportunity.total_cost() {
            investment.push_str(&format!(" (you only have {:.1})", balance));
        }
    }
    lines.push(investment);
    lines.push(format!(
        "  total profit: {:.1} {}",
        opportunity.total_profit(),
        currency
    ));
    lines
}

/// Ranked route listing with per-stop legs.
pub fn format_routes(routes: &[TradeRoute]) -> Vec<String> {
    if routes.is_empty() {
        return vec!["No routes available.".to_string()];
    }

    let mut lines = Vec::new();
    for (index, route) in routes.iter().enumerate() {
        lines.push(format!(
            "Route {}: {} stops, profit {:.1}, distance {:.0}m",
            index + 1,
            route.stops.len(),
            route.total_profit,
            route.total_distance
        ));
        for (stop_index, stop) in route.stops.iter().enumerate() {
            let opportunity = &stop.opportunity;
            lines.push(format!(
                "  {}. {}: {} -> {} x{} profit {:.1} ({:.0}m)",
                stop_index + 1,
                opportunity.product_name(),
                opportunity.buy_from.store_name,
                opportunity.sell_to.store_name,
                opportunity.max_quantity,
                opportunity.total_profit(),
                stop.leg_distance
            ));
        }
        lines.push(String::new());
    }
    lines.pop();
    lines
}
