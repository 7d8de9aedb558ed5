use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use smartgrocer_core::{DomainError, DomainResult, ItemId};

use crate::item::{Item, ItemPatch, NewItem};

/// Items at or below this many units count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A filtered view of the inventory together with its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockReport {
    pub count: usize,
    pub items: Vec<Item>,
}

impl StockReport {
    fn from_items(items: Vec<Item>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Aggregate figures over the whole inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_items: usize,
    pub total_units: u64,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    pub expiry_tracked_count: usize,
    pub category_count: usize,
    pub perishable_count: usize,
    pub non_perishable_count: usize,
    pub average_price: Decimal,
}

/// One requested withdrawal of stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockRequest {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Snapshot of an item taken at the moment its stock was withdrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Authoritative in-memory item collection.
///
/// Mutations (`create`, `update`, `delete`, `withdraw`) are serialized behind the
/// write lock; queries take the read lock and hand back clones.
#[derive(Debug, Default)]
pub struct InventoryStore {
    items: RwLock<Vec<Item>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the sample grocery catalog (ids 1..=20).
    pub fn with_sample_catalog() -> Self {
        let store = Self::new();
        for new in crate::seed::sample_catalog() {
            // Catalog entries are static and valid.
            if let Err(e) = store.create(new) {
                tracing::warn!(error = %e, "skipping invalid catalog entry");
            }
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Item>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Item>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn select(&self, pred: impl Fn(&Item) -> bool) -> Vec<Item> {
        self.read().iter().filter(|&i| pred(i)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.read().clone()
    }

    pub fn get(&self, id: ItemId) -> DomainResult<Item> {
        self.read()
            .iter()
            .find(|i| i.id() == id)
            .cloned()
            .ok_or_else(item_not_found)
    }

    /// Validate and append a new item. The id is one past the current maximum.
    pub fn create(&self, new: NewItem) -> DomainResult<Item> {
        let validated = new.validate()?;

        let mut items = self.write();
        let id = items
            .iter()
            .map(Item::id)
            .max()
            .unwrap_or(ItemId::new(0))
            .next();
        let item = Item::from_new(id, validated);
        items.push(item.clone());

        tracing::info!(item_id = %id, name = item.name(), "item created");
        Ok(item)
    }

    /// Apply the fields present in `patch`. Nothing is written if any field is invalid.
    pub fn update(&self, id: ItemId, patch: ItemPatch) -> DomainResult<Item> {
        let mut items = self.write();
        let item = items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(item_not_found)?;

        item.apply(patch.validate()?);

        tracing::info!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    pub fn delete(&self, id: ItemId) -> DomainResult<()> {
        let mut items = self.write();
        let pos = items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(item_not_found)?;
        items.remove(pos);

        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }

    /// Case-insensitive substring match on name.
    pub fn search_by_name(&self, query: &str) -> Vec<Item> {
        let needle = query.to_lowercase();
        self.select(|i| i.name().to_lowercase().contains(&needle))
    }

    /// Case-insensitive exact match on category.
    pub fn search_by_category(&self, category: &str) -> Vec<Item> {
        let wanted = category.to_lowercase();
        self.select(|i| i.category().to_lowercase() == wanted)
    }

    pub fn low_stock(&self, threshold: u32) -> StockReport {
        StockReport::from_items(self.select(|i| i.quantity() <= threshold))
    }

    /// Perishable items whose expiry falls in `[today, today + days]`.
    ///
    /// Items without a parseable expiry are left out.
    pub fn expiring_within(&self, days: u32, today: NaiveDate) -> StockReport {
        let horizon = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        StockReport::from_items(self.select(|i| {
            i.perishable()
                && i
                    .expiry_date()
                    .is_some_and(|d| today <= d && d <= horizon)
        }))
    }

    /// Atomically withdraw stock for every request.
    ///
    /// All requests are checked first, in order: an unknown id fails with
    /// `NotFound`, and a quantity beyond what is on hand (summed over repeated
    /// ids) fails with `InsufficientStock`. `settle` then sees the snapshot of
    /// every line and may still reject it. Quantities are decremented only
    /// after both pass; on any error the inventory is untouched.
    pub fn withdraw<T>(
        &self,
        requests: &[StockRequest],
        settle: impl FnOnce(&[Withdrawal]) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let mut items = self.write();

        let mut positions = Vec::with_capacity(requests.len());
        let mut snapshot = Vec::with_capacity(requests.len());
        let mut demand: HashMap<ItemId, u64> = HashMap::new();
        for req in requests {
            let pos = items
                .iter()
                .position(|i| i.id() == req.item_id)
                .ok_or_else(|| DomainError::not_found(format!("Item {} not found", req.item_id)))?;
            let item = &items[pos];

            let wanted = demand.entry(req.item_id).or_insert(0);
            *wanted += u64::from(req.quantity);
            if *wanted > u64::from(item.quantity()) {
                return Err(DomainError::insufficient_stock(
                    item.name(),
                    *wanted,
                    item.quantity(),
                ));
            }

            positions.push(pos);
            snapshot.push(Withdrawal {
                item_id: item.id(),
                name: item.name().to_string(),
                unit_price: item.price(),
                quantity: req.quantity,
            });
        }

        let settled = settle(snapshot.as_slice())?;

        for (line, pos) in snapshot.iter().zip(positions) {
            let item = &mut items[pos];
            item.withdraw(line.quantity);
            tracing::debug!(item_id = %line.item_id, withdrawn = line.quantity, remaining = item.quantity(), "stock withdrawn");
        }

        Ok(settled)
    }

    /// Aggregate figures. Fails if the summed value does not fit a `Decimal`.
    pub fn stats(&self) -> DomainResult<InventoryStats> {
        let items = self.read();

        let total_items = items.len();
        let total_value = items.iter().try_fold(Decimal::ZERO, |acc, i| {
            i.stock_value()
                .and_then(|v| acc.checked_add(v))
                .ok_or_else(value_out_of_range)
        })?;
        let perishable_count = items.iter().filter(|i| i.perishable()).count();
        let average_price = if total_items == 0 {
            Decimal::ZERO
        } else {
            let sum = items.iter().try_fold(Decimal::ZERO, |acc, i| {
                acc.checked_add(i.price()).ok_or_else(value_out_of_range)
            })?;
            (sum / Decimal::from(total_items)).round_dp(2)
        };

        Ok(InventoryStats {
            total_items,
            total_units: items.iter().map(|i| u64::from(i.quantity())).sum(),
            total_value,
            low_stock_count: items
                .iter()
                .filter(|i| i.quantity() <= LOW_STOCK_THRESHOLD)
                .count(),
            expiry_tracked_count: items
                .iter()
                .filter(|i| i.perishable() && i.expiry().is_some())
                .count(),
            category_count: items
                .iter()
                .map(Item::category)
                .collect::<BTreeSet<_>>()
                .len(),
            perishable_count,
            non_perishable_count: total_items - perishable_count,
            average_price,
        })
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.read()
            .iter()
            .map(|i| i.category().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn item_not_found() -> DomainError {
    DomainError::not_found("Item not found")
}

fn value_out_of_range() -> DomainError {
    DomainError::invalid_argument("Inventory value out of range")
}
