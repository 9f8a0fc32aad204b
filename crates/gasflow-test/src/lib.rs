//! Shared test fixtures for gasflow crates.
//!
//! This crate provides problem instances and builders for testing.
//! It depends only on `gasflow-core` so every other crate can use it.
//!
//! - [`reference`] - the eight-furnace reference shop and its variants
//! - [`builder`] - [`UnitBuilder`] for compact one-off furnaces
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! gasflow-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use gasflow_test::{reference_instance, UnitBuilder};
//! ```

pub mod builder;
pub mod reference;

pub use builder::UnitBuilder;
pub use reference::{
    reference_instance, reference_shop, reference_units, single_fixed_unit, unreachable_output,
    with_flat_quality_unit,
};
