//! Database library providing the MongoDB connector and connection utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` (default) - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//! let collection = db.collection::<Document>("users");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
