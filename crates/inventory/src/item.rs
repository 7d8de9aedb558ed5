use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use smartgrocer_core::{DomainError, DomainResult, ItemId};

/// Date format accepted for `expiry` (e.g. `2025-11-15`).
const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// A single inventory record.
///
/// Fields are only mutated through [`crate::InventoryStore`], which keeps price
/// and quantity non-negative and the id stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    price: Decimal,
    quantity: u32,
    perishable: bool,
    expiry: Option<String>,
}

impl Item {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Units on hand.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn perishable(&self) -> bool {
        self.perishable
    }

    /// Raw expiry text as supplied by the caller, if any.
    pub fn expiry(&self) -> Option<&str> {
        self.expiry.as_deref()
    }

    /// Parsed expiry date. `None` when absent or not a `YYYY-MM-DD` date.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), EXPIRY_FORMAT).ok())
    }

    /// Stock value of this line (price × quantity). `None` on overflow.
    pub fn stock_value(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    pub(crate) fn from_new(id: ItemId, new: ValidatedItem) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            price: new.price,
            quantity: new.quantity,
            perishable: new.perishable,
            expiry: new.expiry,
        }
    }

    pub(crate) fn apply(&mut self, patch: ValidatedPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(perishable) = patch.perishable {
            self.perishable = perishable;
        }
        if let Some(expiry) = patch.expiry {
            self.expiry = expiry;
        }
    }

    pub(crate) fn withdraw(&mut self, units: u32) {
        self.quantity -= units;
    }
}

/// Fields for a new item, before validation.
///
/// Numeric fields are signed so that negative input can be rejected with a
/// domain error instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
    pub perishable: bool,
    pub expiry: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn perishable_until(mut self, expiry: impl Into<String>) -> Self {
        self.perishable = true;
        self.expiry = Some(expiry.into());
        self
    }

    pub(crate) fn validate(self) -> DomainResult<ValidatedItem> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(DomainError::invalid_argument("Name and category required"));
        }
        ensure_price(self.price)?;
        let quantity = ensure_quantity(self.quantity)?;

        Ok(ValidatedItem {
            name: self.name,
            category: self.category,
            price: self.price,
            quantity,
            perishable: self.perishable,
            expiry: normalize_expiry(self.expiry),
        })
    }
}

/// Partial update: only `Some` fields are applied.
///
/// An `expiry` of `Some("")` clears the stored expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub perishable: Option<bool>,
    pub expiry: Option<String>,
}

impl ItemPatch {
    pub(crate) fn validate(self) -> DomainResult<ValidatedPatch> {
        if let Some(price) = self.price {
            ensure_price(price)?;
        }
        let quantity = self.quantity.map(ensure_quantity).transpose()?;
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::invalid_argument("Name cannot be empty"));
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(DomainError::invalid_argument("Category cannot be empty"));
        }

        Ok(ValidatedPatch {
            name: self.name,
            category: self.category,
            price: self.price,
            quantity,
            perishable: self.perishable,
            expiry: self.expiry.map(|e| normalize_expiry(Some(e))),
        })
    }
}

pub(crate) struct ValidatedItem {
    name: String,
    category: String,
    price: Decimal,
    quantity: u32,
    perishable: bool,
    expiry: Option<String>,
}

pub(crate) struct ValidatedPatch {
    name: Option<String>,
    category: Option<String>,
    price: Option<Decimal>,
    quantity: Option<u32>,
    perishable: Option<bool>,
    expiry: Option<Option<String>>,
}

fn ensure_price(price: Decimal) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::invalid_argument("Price cannot be negative"));
    }
    Ok(())
}

fn ensure_quantity(quantity: i64) -> DomainResult<u32> {
    if quantity < 0 {
        return Err(DomainError::invalid_argument("Quantity cannot be negative"));
    }
    u32::try_from(quantity).map_err(|_| DomainError::invalid_argument("Quantity is too large"))
}

fn normalize_expiry(expiry: Option<String>) -> Option<String> {
    expiry.filter(|e| !e.trim().is_empty())
}
