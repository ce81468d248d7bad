use alloc::vec::Vec;

use super::handle::Handle;

/// Generation counter of a slot. Bumped whenever the slot stops holding the
/// element an outside observer (a cursor) last saw there.
///
/// Generations never wrap: a slot that reaches `Generation::MAX` is retired once it is
/// vacated, so an old stamp can never match a later occupant.
#[cfg(test)]
pub(crate) type Generation = u8;
#[cfg(not(test))]
pub(crate) type Generation = u32;

#[derive(Clone)]
struct Slot<T> {
    generation: Generation,
    element: Option<T>,
}

/// Flat node store addressed by [`Handle`]s, with a free list for slot reuse.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
    /// Vacant slots whose generation is exhausted; they are never reused.
    retired: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            retired: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            retired: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len() + self.retired)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // The generation was already bumped when the slot was vacated.
            self.slots[h.to_index()].element = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns the current generation of an occupied slot.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.slots[handle.to_index()].generation
    }

    /// Checked lookup for handles that come from outside the tree.
    ///
    /// Returns `None` if the slot is out of range, vacant, or has moved on to a
    /// later generation.
    pub(crate) fn get_current(&self, handle: Handle, generation: Generation) -> Option<&T> {
        let slot = self.slots.get(handle.to_index())?;
        if slot.generation == generation { slot.element.as_ref() } else { None }
    }

    /// Marks the element in `handle` as replaced without vacating the slot.
    ///
    /// Returns `false`, leaving the slot untouched, if its generation is exhausted. The
    /// caller must then move the element to a fresh slot instead.
    #[must_use]
    pub(crate) fn bump_generation(&mut self, handle: Handle) -> bool {
        let slot = &mut self.slots[handle.to_index()];
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                true
            }
            None => false,
        }
    }

    /// Vacates `handle`. A slot with an exhausted generation is retired instead of
    /// going back on the free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(handle);
            }
            None => self.retired += 1,
        }
        element
    }
}
