//! Typed append-only arena.
//!
//! Node trees and geometry trees are built once and then only read, so slots
//! are never freed. Handles are plain indices tagged with the element type,
//! which keeps a `NodeId` from being used to index the box arena.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A handle to a value stored in an [`Arena<T>`].
pub struct Idx<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Idx<T> {
    /// Build a handle from a raw slot number.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw, _marker: PhantomData }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.raw
    }
}

// Manual impls: deriving would put bounds on `T`.
impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Idx<T> {}

impl<T> Hash for Idx<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.raw)
    }
}

/// Append-only storage addressed by [`Idx<T>`].
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { items: Vec::with_capacity(cap) }
    }

    /// Store `value` and return its handle.
    pub fn alloc(&mut self, value: T) -> Idx<T> {
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(value);
        idx
    }

    pub fn get(&self, id: Idx<T>) -> Option<&T> {
        self.items.get(id.raw as usize)
    }

    pub fn get_mut(&mut self, id: Idx<T>) -> Option<&mut T> {
        self.items.get_mut(id.raw as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (Idx<T>, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, v)| (Idx::from_raw(i as u32), v))
    }
}

impl<T> std::ops::Index<Idx<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: Idx<T>) -> &T {
        &self.items[id.raw as usize]
    }
}

impl<T> std::ops::IndexMut<Idx<T>> for Arena<T> {
    fn index_mut(&mut self, id: Idx<T>) -> &mut T {
        &mut self.items[id.raw as usize]
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
