//! `storefront-app`
//!
//! **Responsibility:** terminal shell around the cart and the product catalog.
//!
//! This crate provides:
//! - Configuration (defaults → environment → command line)
//! - Command execution against a mounted cart
//! - Plain-text views: product list, cart, checkout summary, receipt
//!
//! All state lives in `storefront-cart`; this crate only wires and renders.

pub mod cli;
pub mod commands;
pub mod config;
pub mod views;

pub use cli::{Cli, Command};
pub use commands::App;
pub use config::AppConfig;
