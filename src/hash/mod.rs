// src/hash/mod.rs

//! Content fingerprinting and checksum persistence.
//!
//! This module is responsible for:
//! - Computing a deterministic hash over a unit's source sub-trees
//!   (`fingerprint.rs`).
//! - Reading/writing the per-unit `.checksum` file that decides
//!   skip-vs-rebuild (`store.rs`).
//!
//! It does **not** know about variants or the compiler; it only answers
//! "what do this unit's sources hash to" and "what did they hash to after
//! the last successful build".

pub mod fingerprint;
pub mod store;

pub use fingerprint::{
    build_ignore_set, fingerprint_unit, GENERATED_IGNORE_PATTERNS,
};
pub use store::{
    clear_checksum, read_checksum, write_checksum, CHECKSUM_FILE_NAME,
};
