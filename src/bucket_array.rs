//! BucketArray: owning, index-addressable backing store for bucket heads.

use core::mem;

/// Growable sequence addressed by bucket index. Its length is the table's
/// capacity; every slot is populated for as long as the array exists.
#[derive(Debug, Clone)]
pub struct BucketArray<T> {
    slots: Vec<T>,
}

impl<T> BucketArray<T> {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Array of `len` slots, each produced by `fill`.
    pub fn with_len<F>(len: usize, fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, fill);
        Self { slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that fit before the next reallocation.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Overwrite slot `index`, handing back the previous occupant. Out of
    /// range writes nothing and returns `None`.
    pub fn set(&mut self, index: usize, value: T) -> Option<T> {
        self.slots
            .get_mut(index)
            .map(|slot| mem::replace(slot, value))
    }

    /// Append a slot and return its index.
    pub fn push(&mut self, value: T) -> usize {
        self.slots.push(value);
        self.slots.len() - 1
    }

    /// Grow storage so at least `total` slots fit without reallocating.
    pub fn reserve_total(&mut self, total: usize) {
        self.slots
            .reserve(total.saturating_sub(self.slots.len()));
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }
}

impl<T> Default for BucketArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for BucketArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::BucketArray;

    #[test]
    fn with_len_fills_every_slot() {
        let a = BucketArray::with_len(4, Vec::<u8>::new);
        assert_eq!(a.len(), 4);
        assert!(a.iter().all(|s| s.is_empty()));
        assert!(a.get(4).is_none());
    }

    #[test]
    fn set_returns_previous_and_ignores_out_of_range() {
        let mut a = BucketArray::with_len(2, || 0u32);
        assert_eq!(a.set(1, 9), Some(0));
        assert_eq!(a.get(1), Some(&9));
        assert_eq!(a.set(2, 5), None);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn push_appends_at_end() {
        let mut a = BucketArray::new();
        assert!(a.is_empty());
        assert_eq!(a.push('x'), 0);
        assert_eq!(a.push('y'), 1);
        assert_eq!(a.into_iter().collect::<Vec<_>>(), vec!['x', 'y']);
    }

    #[test]
    fn reserve_total_grows_capacity_only() {
        let mut a: BucketArray<u64> = BucketArray::new();
        a.reserve_total(32);
        assert!(a.capacity() >= 32);
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut a = BucketArray::with_len(3, || 1i32);
        if let Some(slot) = a.get_mut(2) {
            *slot += 4;
        }
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 1, 5]);
    }
}
