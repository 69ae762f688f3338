//! Database connectors and utilities.
//!
//! This crate wraps connection management for the stores the workspace
//! talks to. Today that is MongoDB; the `common` module holds the pieces
//! (errors, retry policy) that are store-agnostic.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - load configs from the environment via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//! let collection = db.collection::<Document>("products");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
