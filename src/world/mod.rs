//! Host-world capability interfaces.
//!
//! The market core never talks to the game engine directly. The host layer
//! adapts its object model to the traits in this module, and everything the
//! core does is a read-only walk over them:
//!
//! - [`WorldProvider`] - entity enumeration, product catalog, bank balances
//! - [`WorldEntity`] - one placed object plus its optional capabilities
//! - [`ShopCapability`] - posted offers, currency, enable flag, account balance
//! - [`StorageCapability`] - slots, deposit permission, content restrictions
//! - [`LinkCapability`] - which storages an object is network-linked to
//! - [`AccessCapability`] - public flag and per-actor consumer grants
//!
//! An entity without a given capability simply returns `None` for it; the
//! core chooses a safe default per call site (see `market::capacity` and
//! `market::opportunity`).
//!
//! [`memory::MemoryWorld`] is a complete in-memory implementation used by the
//! CLI and the test suite.

pub mod memory;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 3-D block position of a placed world object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to `other` in blocks.
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        let dz = (other.z - self.z) as f32;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Classification flags for a product, consulted by storage restrictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductClass {
    /// Bulky goods that must be carried by hand rather than pocketed.
    pub carried: bool,
    pub food: bool,
    pub clothing: bool,
    pub tool: bool,
    pub fuel: bool,
    pub seed: bool,
}

fn default_stack_size() -> u32 {
    1
}

/// Catalog entry for a tradeable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub class: ProductClass,
    /// Units a single storage slot can hold.
    #[serde(default = "default_stack_size")]
    pub max_stack_size: u32,
}

impl ProductInfo {
    pub fn new(id: &str, display_name: &str, max_stack_size: u32) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            class: ProductClass::default(),
            max_stack_size,
        }
    }

    pub fn with_class(mut self, class: ProductClass) -> Self {
        self.class = class;
        self
    }
}

/// One buy or sell line as posted on a shop, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedOffer {
    pub product: String,
    pub price: f32,
    pub quantity: u32,
    /// `true` when the shop wants to acquire the product (players sell to it).
    pub buying: bool,
}

/// Content restrictions a storage may enforce on incoming deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageRestriction {
    /// Rejects carried (hand-hauled) goods.
    NotCarried,
    FoodOnly,
    ClothingOrToolOnly,
    FuelOnly,
    SeedOnly,
    /// Weight-budgeted storage; treated as unusable for carried goods because
    /// remaining weight headroom cannot be read through this interface.
    WeightLimited,
}

impl StorageRestriction {
    /// Whether a product of `class` may be deposited past this restriction.
    pub fn admits(&self, class: &ProductClass) -> bool {
        match self {
            StorageRestriction::NotCarried => !class.carried,
            StorageRestriction::FoodOnly => class.food,
            StorageRestriction::ClothingOrToolOnly => class.clothing || class.tool,
            StorageRestriction::FuelOnly => class.fuel,
            StorageRestriction::SeedOnly => class.seed,
            StorageRestriction::WeightLimited => !class.carried,
        }
    }
}

/// One storage slot: empty, or a stack of a single product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: u32,
}

impl Slot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stack(product: &str, quantity: u32) -> Self {
        Self {
            product: Some(product.to_string()),
            quantity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product.is_none()
    }
}

/// Shop capability: a world object posting buy/sell offers in one currency.
pub trait ShopCapability {
    /// Administrative on/off toggle. Disabled shops are invisible to scans.
    fn enabled(&self) -> bool;

    fn currency(&self) -> &str;

    /// Every posted offer line. Fallible: a shop with corrupt or unreadable
    /// offer data returns an error and the scan skips the whole shop.
    fn offers(&self) -> Result<Vec<PostedOffer>>;

    /// Funds the shop can spend on its buy orders, in its own currency.
    /// `None` when the backing account cannot be read.
    fn balance(&self) -> Option<f32>;
}

/// Storage capability: slot-level contents plus deposit rules.
pub trait StorageCapability {
    fn enabled(&self) -> bool;

    /// Whether outside parties may deposit into this storage at all.
    fn deposit_allowed(&self) -> bool;

    fn restrictions(&self) -> Vec<StorageRestriction>;

    fn slots(&self) -> Vec<Slot>;
}

/// Link capability: storage network membership.
pub trait LinkCapability {
    /// Ids of storages this object is network-linked to. Dangling ids are
    /// tolerated; the capacity walk skips them.
    fn linked_storages(&self) -> Vec<String>;
}

/// Access-control capability for consumer-facing interactions.
pub trait AccessCapability {
    fn is_public(&self) -> bool;

    fn grants_consumer(&self, actor: &str) -> bool;
}

/// One placed world object and its optional capabilities.
pub trait WorldEntity {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn position(&self) -> Option<Position>;

    fn owner_name(&self) -> &str;

    /// Ownership test. Covers group deeds: an actor "owns" the entity when
    /// the owning alias contains them, not only when the names match.
    fn owned_by(&self, actor: &str) -> bool;

    fn shop(&self) -> Option<&dyn ShopCapability>;

    fn storage(&self) -> Option<&dyn StorageCapability>;

    fn links(&self) -> Option<&dyn LinkCapability>;

    fn access(&self) -> Option<&dyn AccessCapability>;
}

/// The queryable world: entities, product catalog, and bank balances.
pub trait WorldProvider {
    fn entities(&self) -> Vec<&dyn WorldEntity>;

    fn entity(&self, id: &str) -> Option<&dyn WorldEntity>;

    fn product(&self, id: &str) -> Option<&ProductInfo>;

    /// An actor's personal bank balance in `currency`, when knowable.
    fn actor_balance(&self, actor: &str, currency: &str) -> Option<f32>;
}
