//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates a `Record` implementation and field name constants from struct
//! annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
