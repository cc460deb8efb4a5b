//! Durable storage abstractions for panel collections.
//!
//! # Responsibility
//! - Define the key-value contract the persistence gateway writes through.
//! - Provide SQLite and in-process implementations.
//! - Scope reads/writes to one named collection with seed fallback.
//!
//! # Invariants
//! - A collection is always written whole; there are no partial updates.
//! - Unvalidated stored values never reach a live collection.

pub mod collection_gateway;
pub mod kv_repo;
