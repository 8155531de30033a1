//! `cafekiosk-orders` — the order domain.

pub mod order;

pub use order::{Order, OrderStatus};
