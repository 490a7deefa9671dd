#![forbid(unsafe_code)]

//! Codec: persistence forms of a [`Pattern`](patternlock_core::Pattern).
//!
//! - [`encode`] / [`decode`]: the string form stored by callers.
//! - [`to_ids`] / [`from_ids`]: the id-array form.
//! - [`hash`] / [`digest`]: SHA-1, MD5, or SHA-256 of the string form.
//!
//! Nothing here touches live tracking; the functions work on completed or
//! externally supplied patterns.

pub mod digest;
pub mod text;

pub use digest::{HashAlgorithm, digest, hash};
pub use text::{IdFormat, decode, encode, from_ids, to_ids};
