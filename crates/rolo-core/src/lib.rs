//! Core types and trait definitions for the Rolo address book.
//!
//! This crate is deliberately free of terminal and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
