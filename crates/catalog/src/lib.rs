//! `cafekiosk-catalog` — the product catalog domain.
//!
//! Products are identified by a sequential zero-padded product number; the
//! increment rule for that number lives in [`number`].

pub mod number;
pub mod product;

pub use number::{next_product_number, INITIAL_PRODUCT_NUMBER};
pub use product::{Product, ProductBuilder, ProductSellingStatus, ProductType};
