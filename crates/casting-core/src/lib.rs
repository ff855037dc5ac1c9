//! Core types and trait definitions for the casting profile backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// Native `async fn` in traits; the store trait spells out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod image;
pub mod profile;
pub mod reconcile;
pub mod store;
pub mod update;
pub mod user;
pub mod view;

pub use error::{Error, Result};
