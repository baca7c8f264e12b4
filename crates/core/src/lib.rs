//! `taskhub-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP or storage
//! concerns): the closed error catalog, the application failure enum,
//! strongly-typed identifiers, and audit timestamps.

pub mod audit;
pub mod error;
pub mod id;

pub use audit::Audit;
pub use error::{AppError, AppResult, CatalogEntry, ErrorKind};
pub use id::TodoId;
