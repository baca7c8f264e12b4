//! `taskhub-etag` — resource-tag (etag) subsystem.
//!
//! Implements the optimistic-concurrency building blocks: the [`EtagSource`]
//! capability, deterministic etag generation, and the presence/equality
//! validators mutating requests must pass.

pub mod generator;
pub mod response;
pub mod source;
pub mod validator;

pub use generator::{Etag, generate};
pub use response::EtagResponse;
pub use source::EtagSource;
pub use validator::{assert_matches, assert_present};
