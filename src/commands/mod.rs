//! Chat-command parsing and dispatch.
//!
//! The host forwards raw command text (everything after its own command
//! prefix) together with the acting player's name; the processor parses the
//! verb, runs a refresh-then-query cycle against the market service, and
//! returns the response as plain text. Bad input comes back as a usage
//! message, never an error.

pub mod report;

use anyhow::Result;
use chrono::Duration;
use log::{debug, info};

use crate::config::{Config, MAX_REPORT_ITEMS};
use crate::export;
use crate::logutil::escape_log;
use crate::market::MarketService;
use crate::stats::UsageStats;
use crate::validation::{clamp_limit, normalize_search_term};
use crate::world::WorldProvider;

/// Parsed command verbs of the transport surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    /// `overview [n]` - ranked opportunities, grouped by product
    Overview { limit: Option<usize> },
    /// `find <term>` - opportunities filtered by product or store name
    Find { term: String },
    /// `detail <term>` - full breakdown of the best match
    Detail { term: String },
    /// `routes [n]` - chained multi-stop delivery runs
    Routes { limit: Option<usize> },
    /// `refresh` - rescan the world
    Refresh,
    /// `export` - write opportunities to a JSON file
    Export,
    /// `stats` - command usage summary
    Stats,
    Help,
    Unknown(String),
}

impl TransportCommand {
    /// Parse raw command text. Verbs are case-insensitive; arguments keep
    /// their original form.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (trimmed, ""),
        };

        match verb.to_lowercase().as_str() {
            "" | "help" | "info" => TransportCommand::Help,
            "overview" | "panel" => TransportCommand::Overview {
                limit: rest.parse().ok(),
            },
            "find" | "search" => TransportCommand::Find {
                term: rest.to_string(),
            },
            "detail" => TransportCommand::Detail {
                term: rest.to_string(),
            },
            "routes" => TransportCommand::Routes {
                limit: rest.parse().ok(),
            },
            "refresh" => TransportCommand::Refresh,
            "export" => TransportCommand::Export,
            "stats" => TransportCommand::Stats,
            other => TransportCommand::Unknown(other.to_string()),
        }
    }

    /// Canonical verb used for usage statistics.
    fn verb(&self) -> &'static str {
        match self {
            TransportCommand::Overview { .. } => "overview",
            TransportCommand::Find { .. } => "find",
            TransportCommand::Detail { .. } => "detail",
            TransportCommand::Routes { .. } => "routes",
            TransportCommand::Refresh => "refresh",
            TransportCommand::Export => "export",
            TransportCommand::Stats => "stats",
            TransportCommand::Help => "help",
            TransportCommand::Unknown(_) => "unknown",
        }
    }
}

const HELP_TEXT: &str = "\
=== Transport commands ===
  overview [n]   - show profitable trade opportunities (n products, max 200)
  find <term>    - search opportunities by product or store name
  detail <term>  - detailed breakdown of the best match
  routes [n]     - multi-stop delivery routes
  refresh        - rescan all shops
  export         - write opportunities to a JSON file
  stats          - command usage statistics
  help           - this text";

/// Stateless dispatcher tying the market service, usage statistics and
/// configuration together. Constructed once and shared by reference.
pub struct CommandProcessor<'a, W: WorldProvider> {
    service: &'a MarketService<W>,
    stats: &'a UsageStats,
    config: &'a Config,
}

impl<'a, W: WorldProvider> CommandProcessor<'a, W> {
    pub fn new(service: &'a MarketService<W>, stats: &'a UsageStats, config: &'a Config) -> Self {
        Self {
            service,
            stats,
            config,
        }
    }

    /// Handle one command invocation by `actor` and produce the reply text.
    pub async fn process(&self, actor: &str, input: &str) -> Result<String> {
        let command = TransportCommand::parse(input);
        debug!(
            "command '{}' from '{}'",
            escape_log(input),
            escape_log(actor)
        );
        self.stats.record(command.verb(), actor);

        let reply = match command {
            TransportCommand::Help => HELP_TEXT.to_string(),
            TransportCommand::Unknown(verb) => format!(
                "Unknown command '{}'. Type 'help' for available commands.",
                escape_log(&verb)
            ),
            TransportCommand::Refresh => {
                self.service.refresh();
                let count = self.service.opportunities(actor).len();
                format!("Market data refreshed. {} trade opportunities found.", count)
            }
            TransportCommand::Overview { limit } => {
                self.service.refresh();
                let opportunities = self.service.opportunities(actor);
                let max = clamp_limit(limit, self.config.market.max_report_items, MAX_REPORT_ITEMS);
                report::format_overview(
                    &self.config.general.name,
                    &opportunities,
                    self.service.last_refresh(),
                    max,
                    &self.balance_lookup(actor),
                )
                .join("\n")
            }
            TransportCommand::Find { term } => match normalize_search_term(&term) {
                None => "Usage: find <product or store name>".to_string(),
                Some(term) => {
                    self.service.refresh();
                    let matches = self.service.search(&term, actor);
                    let max = clamp_limit(None, self.config.market.max_report_items, MAX_REPORT_ITEMS);
                    report::format_search_results(&term, &matches, max, &self.balance_lookup(actor))
                        .join("\n")
                }
            },
            TransportCommand::Detail { term } => match normalize_search_term(&term) {
                None => "Usage: detail <product or store name>".to_string(),
                Some(term) => {
                    self.service.refresh();
                    let matches = self.service.search(&term, actor);
                    match matches.first() {
                        None => format!("No opportunities found matching '{}'.", term),
                        Some(best) => {
                            report::format_opportunity_detail(best, &self.balance_lookup(actor))
                                .join("\n")
                        }
                    }
                }
            },
            TransportCommand::Routes { limit } => {
                self.service.refresh();
                let max = clamp_limit(limit, self.config.market.max_routes, MAX_REPORT_ITEMS);
                report::format_routes(&self.service.routes(actor, max)).join("\n")
            }
            TransportCommand::Export => {
                self.service.refresh();
                let opportunities = self.service.opportunities(actor);
                let directory = std::path::Path::new(&self.config.export.directory);
                let path = export::write_export(directory, &opportunities).await?;
                info!("'{}' exported {} opportunities", escape_log(actor), opportunities.len());
                format!(
                    "Exported {} opportunities to {}",
                    opportunities.len(),
                    path.display()
                )
            }
            TransportCommand::Stats => {
                let window = Duration::hours(self.config.market.stats_window_hours);
                let lines = self.stats.summary_lines(window);
                if lines.is_empty() {
                    "No command usage recorded yet.".to_string()
                } else {
                    lines.join("\n")
                }
            }
        };
        Ok(reply)
    }

    fn balance_lookup<'b>(&'b self, actor: &str) -> impl Fn(&str) -> Option<f32> + 'b {
        let actor = actor.to_string();
        move |currency: &str| self.service.world().actor_balance(&actor, currency)
    }
}
