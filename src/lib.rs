//! Shrinker: a reversible delta + run-length byte transform.
//!
//! The crate provides:
//! - Two byte-level filters (`filter::delta`, `filter::run_length`)
//! - The composed codec (`shrink` / `unshrink`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! let data = b"aaaaaaaabbbbbbbbcdefghij".to_vec();
//!
//! let packed = shrinker::shrink(&data);
//! let restored = shrinker::unshrink(&packed).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! Decoding never panics on bad input: a stream that ends inside a record,
//! or carries a record the encoder cannot produce, yields an [`Error`].

pub mod codec;
pub mod error;
pub mod filter;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use codec::{TransformStats, shrink, shrink_with_stats, unshrink, unshrink_with_stats};
pub use error::{Error, Filter};
