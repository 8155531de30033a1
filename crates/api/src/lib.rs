//! `cafekiosk-api` — HTTP surface over the kiosk services.

pub mod app;
