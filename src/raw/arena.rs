use alloc::vec::Vec;

use super::handle::Handle;

/// Slot-based allocator for linked tree and list nodes.
///
/// Freed slots are recycled through a free list, so handles stay dense under
/// insert/delete churn. Handles are only invalidated by [`Arena::take`] and
/// [`Arena::clear`]; callers own that discipline.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.index()] = Some(element);
            handle
        } else {
            // Strict less-than keeps every live slot addressable by a Handle.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::new(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns mutable references to two distinct slots at once.
    pub(crate) fn get2_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (ai, bi) = (a.index(), b.index());
        assert!(ai != bi, "`Arena::get2_mut()` - handles must be distinct!");

        let (first, second) = if ai < bi {
            let (head, tail) = self.slots.split_at_mut(bi);
            (&mut head[ai], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(ai);
            (&mut tail[0], &mut head[bi])
        };

        (
            first.as_mut().expect("`Arena::get2_mut()` - `a` is invalid!"),
            second.as_mut().expect("`Arena::get2_mut()` - `b` is invalid!"),
        )
    }

    /// Removes and returns an element, recycling its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
