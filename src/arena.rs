//! Slab allocator for tree nodes.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A single-type allocator backed by a `Vec`.
///
/// Freed slots are threaded onto a free list and handed out again by later allocations, so a
/// `Handle` stays valid until the object it refers to is freed. Objects are dropped when the arena
/// is dropped or cleared. The arena uses no unsafe code; handles stand in for pointers so that
/// nodes can refer to their parents without shared ownership.
pub struct Arena<T> {
    head: Option<usize>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Arena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            },
            Some(index) => {
                let vacant_slot = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next) => {
                        self.head = next;
                        Handle(index)
                    },
                    Slot::Occupied(_) => panic!("Expected a vacant slot on the free list."),
                }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to an invalid or vacant slot.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old_slot = mem::replace(&mut self.slots[handle.0], Slot::Vacant(self.head));
        match old_slot {
            Slot::Vacant(next) => {
                self.slots[handle.0] = Slot::Vacant(next);
                panic!("Error: attempting to free vacant slot.");
            },
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle.0);
                value
            },
        }
    }

    /// Returns an immutable reference to an object, or `None` if the handle is invalid or vacant.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if the handle is invalid or vacant.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct objects at once.
    ///
    /// # Panics
    ///
    /// Panics if the handles are equal or either one is invalid or vacant.
    pub fn pair_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        assert_ne!(a, b, "Expected two distinct handles.");
        let (lo, hi, flipped) = if a.0 < b.0 { (a.0, b.0, false) } else { (b.0, a.0, true) };
        let (head, tail) = self.slots.split_at_mut(hi);
        match (&mut head[lo], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => {
                if flipped {
                    (y, x)
                } else {
                    (x, y)
                }
            },
            _ => panic!("Error: handle refers to a vacant slot."),
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena and invalidates all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }

    /// Returns an iterator over the live objects in slot order, paired with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(value) => Some((Handle(index), value)),
                Slot::Vacant(_) => None,
            })
    }

    /// Returns the number of slots, live or vacant. Every handle indexes below this bound.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Handle {
    /// Returns the slot index of the handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
