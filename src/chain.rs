//! Chain: intrusive singly-linked list threaded through an entry arena.
//!
//! A chain owns nothing but its head id. The `next` links live inside the
//! arena's elements, reached through `LinkArena`, so moving an element from
//! one chain to another only rewrites ids and never touches its payload.

/// Arena whose elements carry a singly-linked `next` pointer.
pub trait LinkArena<Id> {
    /// Successor of `id`, or `None` at the tail (or if `id` is not live).
    fn next_of(&self, id: Id) -> Option<Id>;

    /// Rewrite the successor of `id`. No-op if `id` is not live.
    fn set_next(&mut self, id: Id, next: Option<Id>);
}

#[derive(Debug)]
pub struct Chain<Id> {
    head: Option<Id>,
}

impl<Id: Copy + Eq> Chain<Id> {
    pub const fn new() -> Self {
        Self { head: None }
    }

    #[inline]
    pub fn head(&self) -> Option<Id> {
        self.head
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// O(chain length).
    pub fn len<A>(&self, arena: &A) -> usize
    where
        A: LinkArena<Id> + ?Sized,
    {
        self.iter(arena).count()
    }

    /// Link `id` in front of the current head. `id` must not already be on
    /// any chain.
    pub fn push_front<A>(&mut self, arena: &mut A, id: Id)
    where
        A: LinkArena<Id> + ?Sized,
    {
        arena.set_next(id, self.head);
        self.head = Some(id);
    }

    pub fn iter<'a, A>(&self, arena: &'a A) -> ChainIter<'a, Id, A>
    where
        A: LinkArena<Id> + ?Sized,
    {
        ChainIter {
            arena,
            cursor: self.head,
        }
    }

    /// First id, walking from the head, for which `pred` holds.
    pub fn find<A, F>(&self, arena: &A, mut pred: F) -> Option<Id>
    where
        A: LinkArena<Id> + ?Sized,
        F: FnMut(Id) -> bool,
    {
        self.iter(arena).find(|&id| pred(id))
    }

    /// Unlink `id` by identity. Returns whether it was on this chain. The
    /// unlinked element's `next` is cleared.
    pub fn unlink<A>(&mut self, arena: &mut A, id: Id) -> bool
    where
        A: LinkArena<Id> + ?Sized,
    {
        let mut prev: Option<Id> = None;
        let mut cursor = self.head;
        while let Some(current) = cursor {
            let next = arena.next_of(current);
            if current == id {
                match prev {
                    None => self.head = next,
                    Some(p) => arena.set_next(p, next),
                }
                arena.set_next(current, None);
                return true;
            }
            prev = Some(current);
            cursor = next;
        }
        false
    }

    /// Detach the whole chain, returning its former head. The links between
    /// the detached elements are left intact for the caller to walk.
    pub fn take(&mut self) -> Option<Id> {
        self.head.take()
    }
}

impl<Id: Copy + Eq> Default for Chain<Id> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail walk over a chain's ids.
pub struct ChainIter<'a, Id, A: ?Sized> {
    arena: &'a A,
    cursor: Option<Id>,
}

impl<'a, Id, A> Iterator for ChainIter<'a, Id, A>
where
    Id: Copy,
    A: LinkArena<Id> + ?Sized,
{
    type Item = Id;

    #[inline]
    fn next(&mut self) -> Option<Id> {
        let id = self.cursor?;
        self.cursor = self.arena.next_of(id);
        Some(id)
    }
}
