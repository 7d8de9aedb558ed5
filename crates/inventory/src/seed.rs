//! Sample grocery catalog loaded at startup when seeding is enabled.

use rust_decimal::Decimal;

use crate::item::NewItem;

struct CatalogEntry {
    name: &'static str,
    category: &'static str,
    price: i64,
    quantity: i64,
    expiry: Option<&'static str>,
}

const fn perishable(
    name: &'static str,
    category: &'static str,
    price: i64,
    quantity: i64,
    expiry: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        name,
        category,
        price,
        quantity,
        expiry: Some(expiry),
    }
}

const fn shelf_stable(
    name: &'static str,
    category: &'static str,
    price: i64,
    quantity: i64,
) -> CatalogEntry {
    CatalogEntry {
        name,
        category,
        price,
        quantity,
        expiry: None,
    }
}

static CATALOG: [CatalogEntry; 20] = [
    perishable("Alphonso Mangoes (Maharashtra)", "Fruits", 180, 15, "2025-11-15"),
    perishable("Amul Whole Milk", "Dairy", 55, 25, "2025-11-12"),
    shelf_stable("Basmati Rice (Dehra Dun)", "Grains", 180, 30),
    perishable("Fresh Chicken Breast", "Meat", 280, 8, "2025-11-11"),
    shelf_stable("Canned Beans (Indian)", "Canned Goods", 45, 45),
    perishable("Amul Greek Yogurt", "Dairy", 120, 3, "2025-11-14"),
    shelf_stable("Wheat Flour (Aata)", "Grains", 50, 50),
    perishable("Fresh Spinach (Himalayan)", "Vegetables", 50, 4, "2025-11-11"),
    shelf_stable("Sunflower Oil (Refined)", "Oils", 200, 20),
    perishable("Frooti Orange Juice", "Beverages", 40, 2, "2025-11-13"),
    perishable("Multigrain Bread", "Bakery", 60, 15, "2025-11-12"),
    shelf_stable("Assam Tea", "Beverages", 400, 5),
    perishable("Strawberries (Kashmir)", "Fruits", 250, 6, "2025-11-11"),
    shelf_stable("Peanut Butter (Creamy)", "Condiments", 250, 15),
    perishable("Fresh Tomatoes (Nashik)", "Vegetables", 45, 20, "2025-11-15"),
    perishable("Paneer (Amul)", "Dairy", 380, 12, "2025-11-13"),
    shelf_stable("Arhar Dal", "Pulses", 140, 25),
    shelf_stable("Garam Masala", "Spices", 180, 10),
    perishable("Hilsa Fish", "Meat", 500, 5, "2025-11-11"),
    shelf_stable("Coconut Oil (Virgin/Kerala)", "Oils", 280, 18),
];

/// Catalog entries in id order; creating them on an empty store yields ids 1..=20.
pub fn sample_catalog() -> impl Iterator<Item = NewItem> {
    CATALOG.iter().map(|e| {
        let new = NewItem::new(e.name, e.category)
            .price(Decimal::from(e.price))
            .quantity(e.quantity);
        match e.expiry {
            Some(expiry) => new.perishable_until(expiry),
            None => new,
        }
    })
}
