//! # Ecotransport - Cross-Store Trade Analysis
//!
//! Ecotransport finds arbitrage opportunities across player-run shops in a
//! survival-economy game world: shops that sell a product cheaper than
//! another shop buys it back. It matches complementary offers, bounds each
//! trade by what the destination can pay for and physically store, and chains
//! trades into multi-stop delivery routes.
//!
//! The crate is the portable core of a game mod. The host adapts its object
//! model to the capability traits in [`world`]; everything else is pure
//! computation over read-only snapshots, so the same code runs inside the
//! game server, in tests, or behind the bundled CLI with a world loaded from
//! JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use ecotransport::config::Config;
//! use ecotransport::market::MarketService;
//! use ecotransport::world::memory::MemoryWorld;
//!
//! let world = MemoryWorld::new();
//! let service = MarketService::new(world);
//! let opportunities = service.opportunities("some-player");
//! assert!(opportunities.is_empty());
//! let _ = Config::default();
//! ```
//!
//! ## Module Organization
//!
//! - [`world`] - capability interfaces the host implements, plus an
//!   in-memory world for tests and the CLI
//! - [`market`] - snapshot builder, opportunity matcher, storage capacity
//!   evaluator, route builder, and the owning service
//! - [`commands`] - chat-command parsing, dispatch and text reports
//! - [`export`] - timestamped JSON export of matched opportunities
//! - [`stats`] - append-only command usage statistics
//! - [`config`] - TOML configuration with defaults and clamping
//! - [`validation`] - user-input normalization
//! - [`logutil`] - log-line sanitization for world-supplied strings
//!
//! ## Data Flow
//!
//! ```text
//! world scan -> offer snapshot -> opportunity matching -> route chaining
//!                     |                   |
//!                (atomic swap)     (capacity + balance checks)
//! ```

pub mod commands;
pub mod config;
pub mod export;
pub mod logutil;
pub mod market;
pub mod stats;
pub mod validation;
pub mod world;
