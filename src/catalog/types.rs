use serde::{Deserialize, Serialize};

/// Number of slots in a table built with `ProductTable::new`.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// A single product stored in the catalog.
///
/// The `id` doubles as the product's slot in the table and never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    /// Display name. Empty means the slot is not populated.
    pub name: String,
    pub price: u32,
    /// Cumulative amount sold, updated independently of name and price.
    pub sold_amount: u32,
}

impl Product {
    /// Creates the default record installed on the first write to an empty slot.
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether this record counts towards `count`, listings and backups.
    pub fn is_populated(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A partial update applied to a product under the table's write lock.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub sold_amount: Option<u32>,
}

impl ProductPatch {
    pub fn listing(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            sold_amount: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.sold_amount.is_none()
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(sold_amount) = self.sold_amount {
            product.sold_amount = sold_amount;
        }
    }
}
