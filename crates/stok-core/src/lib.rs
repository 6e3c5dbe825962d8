//! # stok-core
//!
//! Core crate for the Stok tenant console. Contains configuration
//! schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other Stok crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
