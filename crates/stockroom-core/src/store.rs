//! # Store
//!
//! Product membership, stock totals and multi-line orders.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store::order                                    │
//! │                                                                         │
//! │  [(A, 2), (B, 1), (C, 4)]                                              │
//! │     │                                                                   │
//! │     ▼  for each line, in order                                          │
//! │  member of store? ── no ──► ProductNotFound                            │
//! │     │ yes                                                               │
//! │     ▼                                                                   │
//! │  product.buy(qty) ── err ─► propagate (earlier lines stay applied)     │
//! │     │ ok                                                                │
//! │     ▼                                                                   │
//! │  total += price                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Orders
//! `order` does not roll back: if line 3 of 5 fails, lines 1–2 have already
//! drawn down stock. Callers that need all-or-nothing use
//! [`Store::order_all_or_nothing`], which runs [`Store::validate_order`]
//! first.

use std::collections::HashMap;
use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::product::{Product, ProductId};

// =============================================================================
// Order Line
// =============================================================================

/// One `(product, quantity)` request inside an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product: ProductId, quantity: i64) -> Self {
        OrderLine { product, quantity }
    }
}

impl From<(ProductId, i64)> for OrderLine {
    fn from((product, quantity): (ProductId, i64)) -> Self {
        OrderLine::new(product, quantity)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A priced line of a completed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub product_id: ProductId,
    /// Product name at time of sale.
    pub name: String,
    pub quantity: i64,
    /// What the line cost after any promotion.
    pub line_total: f64,
    /// Promotion applied to the line, if any.
    pub promotion: Option<String>,
}

/// Per-line record of an order returned by [`Store::checkout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub placed_at: DateTime<Utc>,
}

impl Receipt {
    /// Sum of all line totals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.line_total).sum()
    }

    /// Total units across all lines.
    ///
    /// Widened to `i128` so lines for several large-stock products cannot
    /// overflow.
    pub fn item_count(&self) -> i128 {
        self.lines.iter().map(|line| i128::from(line.quantity)).sum()
    }
}

// =============================================================================
// Store
// =============================================================================

/// A collection of products, unique by [`ProductId`], in insertion order.
#[derive(Debug, Default)]
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Store::default()
    }

    /// Creates a store from an initial product list.
    ///
    /// Products sharing an id collapse to the first occurrence.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        products.into_iter().collect()
    }

    // -------------------------------------------------------------------------
    // Membership
    // -------------------------------------------------------------------------

    /// Adds a product and returns its id.
    ///
    /// A product whose id is already a member is dropped and the existing
    /// entry is kept unchanged.
    pub fn add_product(&mut self, product: Product) -> ProductId {
        let id = product.id();
        if !self.contains(id) {
            self.products.push(product);
        }
        id
    }

    /// Removes a product and hands it back; `None` if it was not a member.
    pub fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id() == id)?;
        Some(self.products.remove(index))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id() == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// All members, active or not, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Units on hand across all products. Untracked products count as zero.
    ///
    /// Each product holds at most `i64::MAX` units, so the sum is widened to
    /// `i128` and stays exact.
    pub fn total_quantity(&self) -> i128 {
        self.products.iter().map(|p| i128::from(p.quantity())).sum()
    }

    /// Products currently on sale, in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Buys every line in order and returns the summed price.
    ///
    /// Stops at the first failing line. Lines before it stay applied.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{CoreError, OrderLine, Product, Store};
    ///
    /// let mut store = Store::new();
    /// let a = store.add_product(Product::tracked("A", 10.0, 5).unwrap());
    /// let b = store.add_product(Product::tracked("B", 10.0, 0).unwrap());
    ///
    /// let err = store
    ///     .order(&[OrderLine::new(a, 2), OrderLine::new(b, 1)])
    ///     .unwrap_err();
    /// assert!(matches!(err, CoreError::Inactive { .. }));
    /// assert_eq!(store.product(a).unwrap().quantity(), 3);
    /// ```
    pub fn order(&mut self, lines: &[OrderLine]) -> CoreResult<f64> {
        let mut total = 0.0;
        for line in lines {
            let (_, price) = self.buy_line(line)?;
            total += price;
        }
        Ok(total)
    }

    /// Checks whether `order(lines)` would succeed, without touching stock.
    ///
    /// Repeated lines for the same product are checked against the stock
    /// left over by the earlier lines, so `[(A, 3), (A, 3)]` against a stock
    /// of 5 fails here exactly as it would in `order`.
    pub fn validate_order(&self, lines: &[OrderLine]) -> CoreResult<()> {
        let mut remaining: HashMap<ProductId, (i64, bool)> = HashMap::new();

        for line in lines {
            let product = self
                .product(line.product)
                .ok_or(CoreError::ProductNotFound(line.product))?;

            let (available, active) = remaining
                .entry(line.product)
                .or_insert((product.quantity(), product.is_active()));

            product.check_purchase(line.quantity, *available, *active)?;

            if product.stock_policy().is_tracked() {
                *available -= line.quantity;
                *active = *available > 0;
            }
        }

        Ok(())
    }

    /// Validates the whole order first, then applies it.
    ///
    /// Nothing is bought unless every line would succeed.
    pub fn order_all_or_nothing(&mut self, lines: &[OrderLine]) -> CoreResult<f64> {
        self.validate_order(lines)?;
        self.order(lines)
    }

    /// Like [`Store::order`], but returns a receipt with per-line detail.
    ///
    /// Failure behaviour is identical to `order`: earlier lines stay applied.
    pub fn checkout(&mut self, lines: &[OrderLine]) -> CoreResult<Receipt> {
        let mut receipt_lines = Vec::with_capacity(lines.len());

        for line in lines {
            let (product, line_total) = self.buy_line(line)?;
            receipt_lines.push(ReceiptLine {
                product_id: product.id(),
                name: product.name().to_string(),
                quantity: line.quantity,
                line_total,
                promotion: product.promotion().map(|p| p.name().to_string()),
            });
        }

        Ok(Receipt {
            lines: receipt_lines,
            placed_at: Utc::now(),
        })
    }

    fn buy_line(&mut self, line: &OrderLine) -> CoreResult<(&Product, f64)> {
        let product = self
            .product_mut(line.product)
            .ok_or(CoreError::ProductNotFound(line.product))?;
        let price = product.buy(line.quantity)?;
        Ok((&*product, price))
    }

    // -------------------------------------------------------------------------
    // Combination
    // -------------------------------------------------------------------------

    /// Combines two stores: this store's products first, then any product of
    /// `other` that is not already a member.
    pub fn merge(mut self, other: Store) -> Store {
        for product in other.products {
            self.add_product(product);
        }
        self
    }
}

impl FromIterator<Product> for Store {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut store = Store::new();
        for product in iter {
            store.add_product(product);
        }
        store
    }
}

impl Add for Store {
    type Output = Store;

    fn add(self, other: Store) -> Store {
        self.merge(other)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
