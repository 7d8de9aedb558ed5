use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use smartgrocer_core::{DomainError, DomainResult, ItemId};
use smartgrocer_inventory::{InventoryStore, StockRequest, Withdrawal};

/// Tax applied when the caller does not specify one (percent).
pub const DEFAULT_TAX_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Discount applied when the caller does not specify one (percent).
pub const DEFAULT_DISCOUNT_PERCENT: Decimal = Decimal::ZERO;

/// One requested cart position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl CartLine {
    pub fn new(item_id: ItemId, quantity: i64) -> Self {
        Self { item_id, quantity }
    }
}

/// Input to [`generate_bill`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillRequest {
    pub cart: Vec<CartLine>,
    pub tax_percent: Decimal,
    pub discount_percent: Decimal,
}

impl BillRequest {
    /// Cart with the default tax and discount.
    pub fn new(cart: Vec<CartLine>) -> Self {
        Self {
            cart,
            tax_percent: DEFAULT_TAX_PERCENT,
            discount_percent: DEFAULT_DISCOUNT_PERCENT,
        }
    }

    pub fn tax(mut self, percent: Decimal) -> Self {
        self.tax_percent = percent;
        self
    }

    pub fn discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }
}

/// Itemized bill line, priced at the moment of billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillLine {
    pub id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Tax/discount arithmetic over a subtotal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Discount first, then tax on the discounted amount.
    pub fn compute(
        subtotal: Decimal,
        tax_percent: Decimal,
        discount_percent: Decimal,
    ) -> DomainResult<Self> {
        let discount_amount = percent_of(subtotal, discount_percent)?;
        let taxable = subtotal
            .checked_sub(discount_amount)
            .ok_or_else(out_of_range)?;
        let tax_amount = percent_of(taxable, tax_percent)?;
        let total = taxable.checked_add(tax_amount).ok_or_else(out_of_range)?;

        Ok(Self {
            subtotal,
            discount_amount,
            tax_amount,
            total,
        })
    }
}

/// The settled outcome of a billing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub items: Vec<BillLine>,
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Price a cart and withdraw its stock.
///
/// Either the whole cart is billed and every line's stock is decremented, or
/// an error is returned and the inventory is left exactly as it was.
pub fn generate_bill(
    store: &InventoryStore,
    request: &BillRequest,
    generated_at: DateTime<Utc>,
) -> DomainResult<Bill> {
    if request.cart.is_empty() {
        return Err(DomainError::invalid_argument("Cart is empty"));
    }
    if request.tax_percent < Decimal::ZERO {
        return Err(DomainError::invalid_argument("Tax cannot be negative"));
    }
    if request.discount_percent < Decimal::ZERO || request.discount_percent > Decimal::ONE_HUNDRED {
        return Err(DomainError::invalid_argument(
            "Discount must be between 0 and 100",
        ));
    }

    let requests = request
        .cart
        .iter()
        .map(to_stock_request)
        .collect::<DomainResult<Vec<_>>>()?;

    let bill = store.withdraw(&requests, |withdrawn| {
        price_lines(
            withdrawn,
            request.tax_percent,
            request.discount_percent,
            generated_at,
        )
    })?;

    tracing::info!(
        lines = bill.items.len(),
        subtotal = %bill.subtotal,
        total = %bill.total,
        "bill generated"
    );
    Ok(bill)
}

fn to_stock_request(line: &CartLine) -> DomainResult<StockRequest> {
    let quantity = u32::try_from(line.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            DomainError::invalid_argument(format!(
                "Quantity for item {} must be a positive whole number",
                line.item_id
            ))
        })?;
    Ok(StockRequest {
        item_id: line.item_id,
        quantity,
    })
}

fn price_lines(
    withdrawn: &[Withdrawal],
    tax_percent: Decimal,
    discount_percent: Decimal,
    generated_at: DateTime<Utc>,
) -> DomainResult<Bill> {
    let mut items = Vec::with_capacity(withdrawn.len());
    let mut subtotal = Decimal::ZERO;

    for w in withdrawn {
        let amount = w
            .unit_price
            .checked_mul(Decimal::from(w.quantity))
            .ok_or_else(out_of_range)?;
        subtotal = subtotal.checked_add(amount).ok_or_else(out_of_range)?;
        items.push(BillLine {
            id: w.item_id,
            name: w.name.clone(),
            quantity: w.quantity,
            rate: w.unit_price,
            amount,
        });
    }

    let totals = Totals::compute(subtotal, tax_percent, discount_percent)?;

    Ok(Bill {
        items,
        subtotal: totals.subtotal,
        discount_percent,
        discount_amount: totals.discount_amount,
        tax_percent,
        tax_amount: totals.tax_amount,
        total: totals.total,
        timestamp: generated_at,
    })
}

fn percent_of(amount: Decimal, percent: Decimal) -> DomainResult<Decimal> {
    let rate = percent
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(out_of_range)?;
    amount.checked_mul(rate).ok_or_else(out_of_range)
}

fn out_of_range() -> DomainError {
    DomainError::invalid_argument("Bill amount out of range")
}
