//! # kaashif-tests
//!
//! Fixture builders and integration tests for kaashif-core.
//!
//! This crate provides:
//! - Synthetic ICC profiles with arbitrary tag tables
//! - `curv` payload builders (gamma, table, legacy 32-byte table)
//! - Metadata records shaped like real reader output
//! - Seeded random byte buffers

pub mod patterns;
pub mod profiles;
pub mod records;

pub use profiles::{ProfileBuilder, curv_gamma, curv_table, legacy_lut};
pub use records::{PLACEHOLDER, reader_record};
