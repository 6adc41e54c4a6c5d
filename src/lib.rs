//! chain-table: a single-threaded hash table resolving collisions by
//! separate chaining, keyed by caller-defined integer codes.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a generic key/value table whose only knowledge of a key is the
//!   `u64` it converts to, with growth that relinks entries in place.
//! - Layers:
//!   - BucketArray<T>: owning, index-addressed array of bucket heads. Its
//!     length is the table's capacity.
//!   - Chain<Id>: intrusive singly-linked list of entry ids. Links are
//!     stored inside the arena elements, reached via `LinkArena`.
//!   - ChainTable<K, V>: public API. Entries live in a `SlotMap`; each
//!     bucket is a `Chain` over that arena.
//!
//! Key equality
//! - Keys implement `KeyCode`. Two keys with equal codes are the same key:
//!   the table never compares keys any other way. The conversion must be
//!   injective over the keys a caller stores.
//! - The bucket for a key is `key_code % capacity`.
//!
//! Growth
//! - Before every insert, if `len / capacity >= max_load_factor` (4.0 by
//!   default) the bucket count doubles and every entry is relinked into the
//!   new array, old buckets in index order, each chain head to tail.
//! - Each entry caches its code, so growth never calls `KeyCode` again.
//! - Growth completes inside the insert that triggered it.
//!
//! Updates and removal
//! - Inserting a present key replaces its value and returns the old one;
//!   the stored key object and its chain position are kept.
//! - New entries are linked at the head of their chain.
//! - `remove` returns the removed value, or `None` (a no-op) when absent.
//!
//! Ownership
//! - The table owns its entries and drops them on `remove`, `clear` or drop.
//!   Callers that keep payloads elsewhere store references or `Rc`s; the
//!   table then releases only its handle, never the payload.
//!
//! Notes and non-goals
//! - No iteration and no ordering guarantees.
//! - Not synchronised. Share across threads behind an external lock.

pub mod bucket_array;
pub mod chain;
pub mod config;
mod error;
pub mod key_code;
mod table;
mod table_proptest;
#[cfg(test)]
mod test_support;

// Public surface
pub use config::TableConfig;
pub use error::{ConfigError, InsertError};
pub use key_code::{Hashed, KeyCode};
pub use table::ChainTable;
