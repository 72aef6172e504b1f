//! In-memory [`WorldProvider`] implementation.
//!
//! Backs the test suite and the CLI binary. A whole world can be described in
//! JSON (products, entities with their capabilities, actor balances) and
//! loaded with [`MemoryWorld::from_json`], or assembled programmatically with
//! the builder-style helpers.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::{
    AccessCapability, LinkCapability, Position, PostedOffer, ProductInfo, ShopCapability, Slot,
    StorageCapability, StorageRestriction, WorldEntity, WorldProvider,
};

/// Shop state for a [`MemoryEntity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryShop {
    pub enabled: bool,
    pub currency: String,
    pub offers: Vec<PostedOffer>,
    /// `None` models an unreadable bank account.
    pub balance: Option<f32>,
    /// Test hook: when set, offer inspection fails as if the shop data were
    /// corrupt, exercising the skip-and-continue path of the scanner.
    #[serde(skip)]
    pub fail_inspection: bool,
}

impl Default for MemoryShop {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryShop {
    pub fn new(currency: &str) -> Self {
        Self {
            enabled: true,
            currency: currency.to_string(),
            offers: Vec::new(),
            balance: None,
            fail_inspection: false,
        }
    }

    pub fn with_balance(mut self, balance: f32) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn selling(mut self, product: &str, price: f32, quantity: u32) -> Self {
        self.offers.push(PostedOffer {
            product: product.to_string(),
            price,
            quantity,
            buying: false,
        });
        self
    }

    pub fn buying(mut self, product: &str, price: f32, quantity: u32) -> Self {
        self.offers.push(PostedOffer {
            product: product.to_string(),
            price,
            quantity,
            buying: true,
        });
        self
    }
}

impl ShopCapability for MemoryShop {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn offers(&self) -> Result<Vec<PostedOffer>> {
        if self.fail_inspection {
            return Err(anyhow!("offer table unreadable"));
        }
        Ok(self.offers.clone())
    }

    fn balance(&self) -> Option<f32> {
        self.balance
    }
}

/// Storage state for a [`MemoryEntity`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStorage {
    pub enabled: bool,
    pub deposit_allowed: bool,
    pub restrictions: Vec<StorageRestriction>,
    pub slots: Vec<Slot>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            enabled: true,
            deposit_allowed: true,
            restrictions: Vec::new(),
            slots: Vec::new(),
        }
    }
}

impl MemoryStorage {
    /// A storage with `count` empty slots.
    pub fn with_empty_slots(count: usize) -> Self {
        Self {
            slots: vec![Slot::empty(); count],
            ..Default::default()
        }
    }

    pub fn restricted(mut self, restriction: StorageRestriction) -> Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn no_deposit(mut self) -> Self {
        self.deposit_allowed = false;
        self
    }
}

impl StorageCapability for MemoryStorage {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn deposit_allowed(&self) -> bool {
        self.deposit_allowed
    }

    fn restrictions(&self) -> Vec<StorageRestriction> {
        self.restrictions.clone()
    }

    fn slots(&self) -> Vec<Slot> {
        self.slots.clone()
    }
}

/// Link state for a [`MemoryEntity`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLinks {
    pub linked: Vec<String>,
}

impl LinkCapability for MemoryLinks {
    fn linked_storages(&self) -> Vec<String> {
        self.linked.clone()
    }
}

/// Access-control state for a [`MemoryEntity`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryAccess {
    pub public: bool,
    pub consumers: Vec<String>,
}

impl AccessCapability for MemoryAccess {
    fn is_public(&self) -> bool {
        self.public
    }

    fn grants_consumer(&self, actor: &str) -> bool {
        self.consumers.iter().any(|c| c == actor)
    }
}

/// One placed object with optional capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryEntity {
    pub id: String,
    pub name: String,
    pub owner: String,
    /// Additional members of the owning alias (group deeds).
    pub co_owners: Vec<String>,
    pub position: Option<Position>,
    pub shop: Option<MemoryShop>,
    pub storage: Option<MemoryStorage>,
    pub links: Option<MemoryLinks>,
    pub access: Option<MemoryAccess>,
}

impl Default for MemoryEntity {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            owner: String::new(),
            co_owners: Vec::new(),
            position: None,
            shop: None,
            storage: None,
            links: None,
            access: None,
        }
    }
}

impl MemoryEntity {
    pub fn new(id: &str, name: &str, owner: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            owner: owner.to_string(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32, z: i32) -> Self {
        self.position = Some(Position::new(x, y, z));
        self
    }

    pub fn with_shop(mut self, shop: MemoryShop) -> Self {
        self.shop = Some(shop);
        self
    }

    pub fn with_storage(mut self, storage: MemoryStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn linked_to(mut self, ids: &[&str]) -> Self {
        self.links = Some(MemoryLinks {
            linked: ids.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn with_access(mut self, access: MemoryAccess) -> Self {
        self.access = Some(access);
        self
    }
}

impl WorldEntity for MemoryEntity {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Option<Position> {
        self.position
    }

    fn owner_name(&self) -> &str {
        &self.owner
    }

    fn owned_by(&self, actor: &str) -> bool {
        self.owner == actor || self.co_owners.iter().any(|c| c == actor)
    }

    fn shop(&self) -> Option<&dyn ShopCapability> {
        self.shop.as_ref().map(|s| s as &dyn ShopCapability)
    }

    fn storage(&self) -> Option<&dyn StorageCapability> {
        self.storage.as_ref().map(|s| s as &dyn StorageCapability)
    }

    fn links(&self) -> Option<&dyn LinkCapability> {
        self.links.as_ref().map(|l| l as &dyn LinkCapability)
    }

    fn access(&self) -> Option<&dyn AccessCapability> {
        self.access.as_ref().map(|a| a as &dyn AccessCapability)
    }
}

/// Whole-world container: product catalog, entities, actor bank balances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryWorld {
    pub products: Vec<ProductInfo>,
    pub entities: Vec<MemoryEntity>,
    /// actor name -> currency -> balance
    pub balances: HashMap<String, HashMap<String, f32>>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a world definition from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn add_product(&mut self, product: ProductInfo) -> &mut Self {
        self.products.push(product);
        self
    }

    pub fn add_entity(&mut self, entity: MemoryEntity) -> &mut Self {
        self.entities.push(entity);
        self
    }

    pub fn set_actor_balance(&mut self, actor: &str, currency: &str, amount: f32) -> &mut Self {
        self.balances
            .entry(actor.to_string())
            .or_default()
            .insert(currency.to_string(), amount);
        self
    }
}

impl WorldProvider for MemoryWorld {
    fn entities(&self) -> Vec<&dyn WorldEntity> {
        self.entities.iter().map(|e| e as &dyn WorldEntity).collect()
    }

    fn entity(&self, id: &str) -> Option<&dyn WorldEntity> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .map(|e| e as &dyn WorldEntity)
    }

    fn product(&self, id: &str) -> Option<&ProductInfo> {
        self.products.iter().find(|p| p.id == id)
    }

    fn actor_balance(&self, actor: &str, currency: &str) -> Option<f32> {
        self.balances.get(actor).and_then(|by_currency| by_currency.get(currency)).copied()
    }
}
