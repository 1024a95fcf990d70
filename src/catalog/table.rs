//! Fixed-Capacity Product Table
//!
//! A pre-sized slot array indexed by product id, guarded by a single reader/writer lock.
//!
//! ## Locking
//! - `get`, `count`, `list_populated` and `populated_records` take the shared lock and
//!   never block each other.
//! - `update` and `restore` take the exclusive lock, excluding readers and writers alike.
//!
//! Mutation closures passed to `update` only ever see a `&mut Product`, never the table,
//! so they cannot try to re-acquire the lock they are running under.

use super::error::{StorageError, StorageResult};
use super::types::{DEFAULT_CAPACITY, Product};

use parking_lot::RwLock;

pub struct ProductTable {
    slots: RwLock<Vec<Option<Box<Product>>>>,
    capacity: usize,
}

impl ProductTable {
    /// Creates a table with `DEFAULT_CAPACITY` slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots: RwLock::new(slots),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot_index(&self, id: u32) -> Option<usize> {
        let index = id as usize;
        (index < self.capacity).then_some(index)
    }

    /// Returns a copy of the product stored in slot `id`.
    ///
    /// `None` when the id is outside the table or the slot was never written.
    /// Unlike `count`, this returns products whose name is empty.
    pub fn get(&self, id: u32) -> Option<Product> {
        let index = self.slot_index(id)?;
        let slots = self.slots.read();
        slots[index].as_deref().cloned()
    }

    /// Counts populated slots. Scans the whole table, so the cost is O(capacity).
    pub fn count(&self) -> usize {
        let slots = self.slots.read();
        slots
            .iter()
            .filter(|slot| slot.as_deref().is_some_and(Product::is_populated))
            .count()
    }

    /// Applies `mutate` to product `id` under the exclusive lock.
    ///
    /// An empty slot first receives a default product (empty name, zero price and
    /// sold amount). Returns the product as it is after the mutation.
    pub fn update<F>(&self, id: u32, mutate: F) -> StorageResult<Product>
    where
        F: FnOnce(&mut Product),
    {
        let index = self.slot_index(id).ok_or(StorageError::OutOfRange {
            id,
            capacity: self.capacity,
        })?;

        let mut slots = self.slots.write();
        let product = slots[index]
            .get_or_insert_with(|| Box::new(Product::empty(id)))
            .as_mut();
        mutate(&mut *product);
        // The id is the slot position and must survive any mutation.
        product.id = id;

        Ok(product.clone())
    }

    /// Populated products among the first `scan_limit` slots, in id order.
    pub fn list_populated(&self, scan_limit: usize) -> Vec<Product> {
        let slots = self.slots.read();
        slots
            .iter()
            .take(scan_limit)
            .filter_map(|slot| slot.as_deref())
            .filter(|product| product.is_populated())
            .cloned()
            .collect()
    }

    /// Every populated product in id order, collected under one shared lock.
    pub fn populated_records(&self) -> Vec<Product> {
        self.list_populated(self.capacity)
    }

    /// Installs `products` into their slots under the exclusive lock, replacing
    /// whatever the slots held before.
    ///
    /// Products whose id does not fit the table are skipped. Returns how many
    /// were installed and how many were dropped.
    pub fn restore<I>(&self, products: I) -> (usize, usize)
    where
        I: IntoIterator<Item = Product>,
    {
        let mut restored = 0;
        let mut dropped = 0;

        let mut slots = self.slots.write();
        for product in products {
            match self.slot_index(product.id) {
                Some(index) => {
                    slots[index] = Some(Box::new(product));
                    restored += 1;
                }
                None => dropped += 1,
            }
        }

        (restored, dropped)
    }
}

impl Default for ProductTable {
    fn default() -> Self {
        Self::new()
    }
}
