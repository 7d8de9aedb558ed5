use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use smartgrocer_billing::{Bill, BillRequest, CartLine, DEFAULT_DISCOUNT_PERCENT, DEFAULT_TAX_PERCENT};
use smartgrocer_core::ItemId;
use smartgrocer_inventory::{Item, ItemPatch, NewItem, StockReport};

// -------------------------
// Request DTOs
// -------------------------

/// `POST /api/items`. Every field may be omitted; name and category are
/// checked by the store.
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub perishable: Option<bool>,
    pub expiry: Option<String>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        NewItem {
            name: req.name.unwrap_or_default(),
            category: req.category.unwrap_or_default(),
            price: req.price.unwrap_or_default(),
            quantity: req.quantity.unwrap_or_default(),
            perishable: req.perishable.unwrap_or(false),
            expiry: req.expiry,
        }
    }
}

/// `PUT /api/items/{id}`: any subset of fields.
///
/// `expiry` distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`), which clears the stored date.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub perishable: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub expiry: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(req: UpdateItemRequest) -> Self {
        ItemPatch {
            name: req.name,
            category: req.category,
            price: req.price,
            quantity: req.quantity,
            perishable: req.perishable,
            expiry: req.expiry.map(Option::unwrap_or_default),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CartLineRequest {
    pub id: ItemId,
    pub quantity: i64,
}

/// `POST /api/bill`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateBillRequest {
    #[serde(default)]
    pub cart: Vec<CartLineRequest>,
    pub tax: Option<Decimal>,
    pub discount: Option<Decimal>,
}

impl From<GenerateBillRequest> for BillRequest {
    fn from(req: GenerateBillRequest) -> Self {
        let cart = req
            .cart
            .into_iter()
            .map(|l| CartLine::new(l.id, l.quantity))
            .collect();
        BillRequest::new(cart)
            .tax(req.tax.unwrap_or(DEFAULT_TAX_PERCENT))
            .discount(req.discount.unwrap_or(DEFAULT_DISCOUNT_PERCENT))
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Successful mutation of a single item.
#[derive(Debug, Serialize)]
pub struct ItemMutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub item: Item,
}

impl ItemMutationResponse {
    pub fn new(message: &'static str, item: Item) -> Self {
        Self {
            success: true,
            message,
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExpiryResponse {
    pub days: u32,
    #[serde(flatten)]
    pub report: StockReport,
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub success: bool,
    pub bill: Bill,
}
