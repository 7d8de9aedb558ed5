//! Billing module.
//!
//! Prices a cart against the inventory, applies discount and tax, and withdraws
//! the billed stock in one all-or-nothing step.

pub mod bill;

pub use bill::{
    generate_bill, Bill, BillLine, BillRequest, CartLine, Totals, DEFAULT_DISCOUNT_PERCENT,
    DEFAULT_TAX_PERCENT,
};
