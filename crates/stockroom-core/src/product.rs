//! # Products
//!
//! A sellable item with a price, a stock policy and an optional promotion.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stock Policies                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Tracked      │   │   Untracked     │   │   CappedPerOrder    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  quantity ≥ 0   │   │  no stock       │   │  quantity ≥ 0       │   │
//! │  │  active = q > 0 │   │  always active  │   │  maximum > 0        │   │
//! │  │  e.g. laptops   │   │  e.g. licenses  │   │  e.g. shipping fee  │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every product gets a [`ProductId`] (UUID v4) when it is constructed.
//! Equality and store membership go through that id, never through field
//! values: two "Widget, $100, 10 in stock" products are different entities.
//! `Product` is not `Clone`: a second value with the same id would make
//! store membership ambiguous.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::promotion::Promotion;
use crate::validation::{
    validate_maximum, validate_price, validate_product_name, validate_purchase_quantity,
    validate_stock_quantity,
};

// =============================================================================
// Product Id
// =============================================================================

/// Opaque product identity, minted once per constructed product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    fn new() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// How a product's availability is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockPolicy {
    /// Stock-counted; sold out at zero.
    Tracked { quantity: i64 },
    /// Digital / unlimited; never depletes.
    Untracked,
    /// Stock-counted with a per-order purchase limit.
    CappedPerOrder { quantity: i64, maximum: i64 },
}

impl StockPolicy {
    fn validate(&self) -> CoreResult<()> {
        match *self {
            StockPolicy::Tracked { quantity } => validate_stock_quantity(quantity)?,
            StockPolicy::Untracked => {}
            StockPolicy::CappedPerOrder { quantity, maximum } => {
                validate_stock_quantity(quantity)?;
                validate_maximum(maximum)?;
            }
        }
        Ok(())
    }

    /// Units on hand; `0` for untracked products.
    pub fn quantity(&self) -> i64 {
        match *self {
            StockPolicy::Tracked { quantity } | StockPolicy::CappedPerOrder { quantity, .. } => {
                quantity
            }
            StockPolicy::Untracked => 0,
        }
    }

    /// Whether purchases draw down a stock count.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, StockPolicy::Untracked)
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            StockPolicy::Tracked { .. } => ProductKind::Tracked,
            StockPolicy::Untracked => ProductKind::Untracked,
            StockPolicy::CappedPerOrder { .. } => ProductKind::CappedPerOrder,
        }
    }
}

/// Variant tag of a product, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Tracked,
    Untracked,
    CappedPerOrder,
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by a [`Store`](crate::Store).
#[derive(Debug)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    stock: StockPolicy,
    active: bool,
    promotion: Option<Arc<Promotion>>,
}

impl Product {
    /// Creates a product with any stock policy.
    ///
    /// Tracked and capped products start active only when they have stock;
    /// untracked products always start active.
    ///
    /// ## Errors
    /// `InvalidArgument` for a blank name, a negative price, a negative
    /// quantity or a non-positive maximum.
    pub fn new(name: impl Into<String>, price: f64, stock: StockPolicy) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;
        stock.validate()?;

        let active = !stock.is_tracked() || stock.quantity() > 0;
        Ok(Product {
            id: ProductId::new(),
            name,
            price,
            stock,
            active,
            promotion: None,
        })
    }

    /// Creates a stock-counted product.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::Product;
    ///
    /// let mut mac = Product::tracked("MacBook Air M2", 1450.0, 100).unwrap();
    /// assert_eq!(mac.buy(100).unwrap(), 145000.0);
    /// assert!(!mac.is_active());
    /// ```
    pub fn tracked(name: impl Into<String>, price: f64, quantity: i64) -> CoreResult<Self> {
        Self::new(name, price, StockPolicy::Tracked { quantity })
    }

    /// Creates a digital product that is never out of stock.
    pub fn untracked(name: impl Into<String>, price: f64) -> CoreResult<Self> {
        Self::new(name, price, StockPolicy::Untracked)
    }

    /// Creates a stock-counted product that limits units per order.
    pub fn capped(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        maximum: i64,
    ) -> CoreResult<Self> {
        Self::new(name, price, StockPolicy::CappedPerOrder { quantity, maximum })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units on hand; always `0` for untracked products.
    pub fn quantity(&self) -> i64 {
        self.stock.quantity()
    }

    /// Per-order limit, only for capped products.
    pub fn maximum(&self) -> Option<i64> {
        match self.stock {
            StockPolicy::CappedPerOrder { maximum, .. } => Some(maximum),
            _ => None,
        }
    }

    pub fn kind(&self) -> ProductKind {
        self.stock.kind()
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.stock
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Replaces the unit price. Stock and status are untouched.
    pub fn set_price(&mut self, price: f64) -> CoreResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Attaches, replaces or (with `None`) clears the promotion.
    pub fn set_promotion(&mut self, promotion: Option<Arc<Promotion>>) {
        self.promotion = promotion;
    }

    /// Puts the product back on sale without touching its quantity.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Takes the product off sale without touching its quantity.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    // -------------------------------------------------------------------------
    // Purchase
    // -------------------------------------------------------------------------

    /// Buys `quantity` units and returns the price paid.
    ///
    /// ## Check Order
    /// ```text
    /// quantity <= 0            → InvalidArgument
    /// not active               → Inactive
    /// capped, qty > maximum    → LimitExceeded
    /// tracked, qty > stock     → InsufficientStock
    /// otherwise                → decrement stock, recompute active, price
    /// ```
    ///
    /// Either everything happens or nothing does: a failed purchase leaves
    /// stock and status exactly as they were.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use stockroom_core::{Product, Promotion};
    ///
    /// let mut widget = Product::tracked("Widget", 100.0, 10).unwrap();
    /// widget.set_promotion(Some(Arc::new(Promotion::third_one_free("Third One Free!"))));
    ///
    /// assert_eq!(widget.buy(6).unwrap(), 400.0);
    /// assert_eq!(widget.quantity(), 4);
    /// ```
    pub fn buy(&mut self, quantity: i64) -> CoreResult<f64> {
        self.check_purchase(quantity, self.quantity(), self.active)?;

        if let StockPolicy::Tracked { quantity: stock }
        | StockPolicy::CappedPerOrder {
            quantity: stock, ..
        } = &mut self.stock
        {
            *stock -= quantity;
            self.active = *stock > 0;
        }

        Ok(self.price_for(quantity))
    }

    /// Runs every purchase check against the given stock level and status
    /// without mutating anything.
    pub(crate) fn check_purchase(
        &self,
        quantity: i64,
        available: i64,
        active: bool,
    ) -> CoreResult<()> {
        validate_purchase_quantity(quantity)?;

        if !active {
            return Err(CoreError::Inactive {
                name: self.name.clone(),
            });
        }

        if let StockPolicy::CappedPerOrder { maximum, .. } = self.stock {
            if quantity > maximum {
                return Err(CoreError::LimitExceeded {
                    name: self.name.clone(),
                    maximum,
                    requested: quantity,
                });
            }
        }

        if self.stock.is_tracked() && quantity > available {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available,
                requested: quantity,
            });
        }

        Ok(())
    }

    fn price_for(&self, quantity: i64) -> f64 {
        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, quantity),
            None => self.price * quantity as f64,
        }
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    /// One-line, human-readable summary.
    ///
    /// ```text
    /// MacBook Air M2, Price: $1450, Quantity: 100
    /// Windows License, Price: $125, Quantity: Unlimited (Digital), Promotion: 30% off!
    /// Shipping, Price: $10, Quantity: 250, Maximum: 1 per order
    /// ```
    pub fn show(&self) -> String {
        let mut line = match self.stock {
            StockPolicy::Tracked { quantity } => {
                format!("{}, Price: ${}, Quantity: {}", self.name, self.price, quantity)
            }
            StockPolicy::Untracked => format!(
                "{}, Price: ${}, Quantity: Unlimited (Digital)",
                self.name, self.price
            ),
            StockPolicy::CappedPerOrder { quantity, maximum } => format!(
                "{}, Price: ${}, Quantity: {}, Maximum: {} per order",
                self.name, self.price, quantity, maximum
            ),
        };

        if let Some(promotion) = &self.promotion {
            line.push_str(", Promotion: ");
            line.push_str(promotion.name());
        }

        line
    }

    /// Orders two products by unit price.
    pub fn compare_price(&self, other: &Product) -> Ordering {
        self.price.total_cmp(&other.price)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.show())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
