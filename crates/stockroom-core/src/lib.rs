//! # stockroom-core: Pricing and Order Engine
//!
//! Products, promotions and the store's order transaction, as plain
//! synchronous code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-cli (menu loop)                     │   │
//! │  │    list products ──► show total ──► make order ──► quit        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ promotion │  │  product  │  │   store   │  │ validation│  │   │
//! │  │   │ Percent   │  │ Tracked   │  │ order()   │  │   rules   │  │   │
//! │  │   │ 2nd half  │  │ Untracked │  │ checkout()│  │   checks  │  │   │
//! │  │   │ 3rd free  │  │ Capped    │  │ totals    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO LOCKING                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Product variants and the `buy` operation
//! - [`promotion`] - Pricing rules attachable to products
//! - [`store`] - Membership, aggregates and orders
//! - [`error`] - Domain error types
//! - [`validation`] - Argument validation
//!
//! ## Concurrency
//! Everything is single-threaded and synchronous. Mutating store methods take
//! `&mut self`; a multi-client front end must put the `Store` behind a mutex
//! or a single-writer queue, because `order` reads and then writes stock.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use stockroom_core::{OrderLine, Product, Promotion, Store};
//!
//! let mut store = Store::new();
//!
//! let mut gadget = Product::tracked("Gadget", 250.0, 500).unwrap();
//! gadget.set_promotion(Some(Arc::new(Promotion::second_half_price("Second Half price!"))));
//! let gadget = store.add_product(gadget);
//!
//! let total = store.order(&[OrderLine::new(gadget, 3)]).unwrap();
//! assert_eq!(total, 625.0);
//! assert_eq!(store.total_quantity(), 497);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod product;
pub mod promotion;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use product::{Product, ProductId, ProductKind, StockPolicy};
pub use promotion::{Promotion, PromotionRule};
pub use store::{OrderLine, Receipt, ReceiptLine, Store};
