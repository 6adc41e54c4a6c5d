//! ChainTable: separately-chained hash table over an entry arena.
//!
//! Entries live in a `SlotMap` and are reached through `EntryId`s. Each
//! bucket is a `Chain` of ids threaded through the entries' `next` links.
//! Growth relinks ids into a fresh bucket array; entries never move and
//! are never copied.

use crate::bucket_array::BucketArray;
use crate::chain::{Chain, LinkArena};
use crate::config::TableConfig;
use crate::error::{ConfigError, InsertError};
use crate::key_code::KeyCode;
use core::borrow::Borrow;
use core::fmt;
use core::mem;
use log::{debug, trace};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational id of a table entry.
    pub(crate) struct EntryId;
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    // Cached at insert; growth reuses it so `KeyCode` runs once per key.
    code: u64,
    next: Option<EntryId>,
}

impl<K, V> LinkArena<EntryId> for SlotMap<EntryId, Entry<K, V>> {
    #[inline]
    fn next_of(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).and_then(|e| e.next)
    }

    #[inline]
    fn set_next(&mut self, id: EntryId, next: Option<EntryId>) {
        if let Some(e) = self.get_mut(id) {
            e.next = next;
        }
    }
}

#[inline]
fn bucket_of(code: u64, capacity: usize) -> usize {
    // capacity >= 1, so the remainder fits back into usize.
    (code % capacity as u64) as usize
}

/// Hash table mapping keys to values by their `KeyCode`.
///
/// Two keys are the same key iff their codes are equal. Lookups accept any
/// borrowed form `Q` of `K` whose code agrees with the owned key's.
pub struct ChainTable<K, V> {
    buckets: BucketArray<Chain<EntryId>>,
    slots: SlotMap<EntryId, Entry<K, V>>,
    max_load_factor: f64,
}

impl<K, V> ChainTable<K, V>
where
    K: KeyCode,
{
    /// Empty table with the default bucket count and growth threshold.
    pub fn new() -> Self {
        Self::from_valid(TableConfig::default())
    }

    /// Empty table with `buckets` buckets (at least one).
    pub fn with_capacity(buckets: usize) -> Self {
        Self::from_valid(TableConfig::new().with_initial_capacity(buckets.max(1)))
    }

    /// Empty table from `config`; `ConfigError` if the config is invalid.
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: TableConfig) -> Self {
        Self {
            buckets: BucketArray::with_len(config.initial_capacity, Chain::new),
            slots: SlotMap::with_key(),
            max_load_factor: config.max_load_factor,
        }
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Bucket a key currently maps to: its code modulo the bucket count.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        bucket_of(q.key_code(), self.capacity())
    }

    fn find_id(&self, code: u64) -> Option<EntryId> {
        let chain = self.buckets.get(bucket_of(code, self.capacity()))?;
        chain.find(&self.slots, |id| {
            self.slots.get(id).map(|e| e.code == code).unwrap_or(false)
        })
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        let id = self.find_id(q.key_code())?;
        self.slots.get(id).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        let id = self.find_id(q.key_code())?;
        self.slots.get_mut(id).map(|e| &mut e.value)
    }

    /// The stored key (the one first inserted) and its value.
    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        let id = self.find_id(q.key_code())?;
        self.slots.get(id).map(|e| (&e.key, &e.value))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        self.find_id(q.key_code()).is_some()
    }

    /// Insert or update. Returns the previous value on update, in which case
    /// the stored key and its chain position are kept and `key` is dropped.
    ///
    /// The growth check runs first, against the size before this insert.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.grow_if_loaded();
        let code = key.key_code();
        if let Some(entry) = self.find_id(code).and_then(|id| self.slots.get_mut(id)) {
            trace!("update in bucket {}", bucket_of(code, self.buckets.len()));
            return Some(mem::replace(&mut entry.value, value));
        }
        self.link_new(code, key, value);
        None
    }

    /// Insert only if the key is absent; otherwise hand the pair back.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, InsertError<K, V>> {
        self.grow_if_loaded();
        let code = key.key_code();
        if self.find_id(code).is_some() {
            return Err(InsertError::DuplicateKey { key, value });
        }
        let id = self.link_new(code, key, value);
        Ok(&mut self.slots[id].value)
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    /// Remove a key, returning the stored key and value if present. Absent
    /// keys leave the table untouched.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + KeyCode,
    {
        let code = q.key_code();
        let id = self.find_id(code)?;
        let index = bucket_of(code, self.capacity());
        let chain = self.buckets.get_mut(index)?;

        // Unlink first so the structure is consistent before K/V leave.
        if !chain.unlink(&mut self.slots, id) {
            return None;
        }
        self.slots.remove(id).map(|e| (e.key, e.value))
    }

    /// Drop every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            let _ = chain.take();
        }
        self.slots.clear();
    }

    fn link_new(&mut self, code: u64, key: K, value: V) -> EntryId {
        let id = self.slots.insert(Entry {
            key,
            value,
            code,
            next: None,
        });
        let index = bucket_of(code, self.buckets.len());
        if let Some(chain) = self.buckets.get_mut(index) {
            chain.push_front(&mut self.slots, id);
        }
        id
    }

    fn grow_if_loaded(&mut self) {
        if self.load_factor() >= self.max_load_factor {
            self.rehash(self.capacity().saturating_mul(2));
        }
    }

    /// Relink every entry into a fresh array of `new_capacity` buckets,
    /// visiting old buckets in index order and each chain head to tail.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let mut fresh = BucketArray::new();
        fresh.reserve_total(new_capacity);
        for _ in 0..new_capacity {
            fresh.push(Chain::new());
        }

        for chain in self.buckets.iter_mut() {
            let mut cursor = chain.take();
            while let Some(id) = cursor {
                // Read the successor before push_front overwrites it.
                cursor = self.slots.next_of(id);
                let Some(code) = self.slots.get(id).map(|e| e.code) else {
                    continue;
                };
                if let Some(target) = fresh.get_mut(bucket_of(code, new_capacity)) {
                    target.push_front(&mut self.slots, id);
                }
            }
        }

        self.buckets = fresh;
        debug!(
            "rehashed {} entries: {} -> {} buckets",
            self.slots.len(),
            old_capacity,
            new_capacity
        );
    }

    /// Lengths of every chain, in bucket order.
    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|c| c.len(&self.slots)).collect()
    }
}

impl<K, V> Default for ChainTable<K, V>
where
    K: KeyCode,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ChainTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainTable")
            .field("len", &self.slots.len())
            .field("capacity", &self.buckets.len())
            .field("max_load_factor", &self.max_load_factor)
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for ChainTable<K, V>
where
    K: KeyCode,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainTable<K, V>
where
    K: KeyCode,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
