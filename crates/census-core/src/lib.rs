//! Core types and trait definitions for the Census record store.
//!
//! No database dependencies live here. The crate holds the domain records,
//! the request and view types that cross the service boundary, validation,
//! and the closed filter/sort dispatch tables.

pub mod country;
pub mod error;
pub mod filter;
pub mod person;
pub mod sort;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
