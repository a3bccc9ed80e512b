//! Utilities for treating the backing storage for trees generically.
//!
//! The storage of a tree is the allocator its nodes are created through: every non-root node lives in a slot of the storage, and the tree only ever refers to it by key. This module is home for the following items:
//! - [`Storage`], the main trait for the backing storages for trees
//! - [`ListStorage`], a trait used for implementing `Storage` for list-like collections
//! - [`SparseStorage`], a wrapper around `ListStorage`s which turns them into slot allocators with stable keys
//! - [`DefaultStorage`], a type definition for the default backing storage used by trees unless a different one is specified
//!
//! [`Storage`]: trait.Storage.html " "
//! [`ListStorage`]: trait.ListStorage.html " "
//! [`SparseStorage`]: struct.SparseStorage.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "

mod list;
pub use list::*;

#[cfg(feature = "slotmap")]
mod slotmap_impl;

use core::fmt::Debug;

/// Trait for various kinds of containers which can be the backing storage for trees.
///
/// There's a number of invariants which have to be followed by the container, and tree structures rely on them for the correctness of their links:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - the key returned by `add`/`try_add` must keep identifying the same element until that element is removed, no matter how many other elements are added or removed in the meantime;
/// - `try_add` must leave the storage untouched when it fails, handing the element back;
/// - calling `remove` if `contains_key` on the same key returned `true` should *never* panic;
/// - if an element is added at a key, it must be retrieveable in the exact same state as it was inserted until it is removed or modified using a method which explicitly does so.
pub trait Storage: Sized {
    /// The type used for element naming.
    type Key: Clone + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Adds an element to the collection with an unspecified key, returning that key, or gives the element back if there is no room for it.
    ///
    /// # Errors
    /// Fails if the storage has a fixed capacity which is exhausted, or if the memory allocator refused to provide more memory.
    fn try_add(&mut self, element: Self::Element) -> Result<Self::Key, Self::Element>;
    /// Removes and returns the element identified by `key` within the storage.
    ///
    /// # Panics
    /// Required to panic if the specified key does not exist.
    fn remove(&mut self, key: &Self::Key) -> Self::Element;
    /// Returns the number of elements in the storage, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Creates an empty storage with the specified capacity.
    ///
    /// # Panics
    /// Storages with a fixed capacity should panic if the specified capacity does not match their actual one, and are recommended to override the `new` method to use the correct capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns a reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get(&self, key: &Self::Key) -> Option<&Self::Element>;
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the key is not present in the storage.
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element>;

    /// Adds an element to the collection with an unspecified key, returning that key.
    ///
    /// # Panics
    /// Panics if the element cannot be stored. Use [`try_add`] to handle that case.
    ///
    /// [`try_add`]: #tymethod.try_add " "
    #[inline]
    #[track_caller]
    fn add(&mut self, element: Self::Element) -> Self::Key {
        self.try_add(element)
            .unwrap_or_else(|_| panic!("the storage could not allocate room for another element"))
    }
    /// Returns `true` if the specified key is present in the storage, `false` otherwise.
    #[inline]
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }
    /// Creates a new empty storage. Dynamically-allocated storages created this way do not allocate memory.
    ///
    /// Storages with fixed capacity should override this method to use the correct capacity, as the default implementation calls `Self::with_capacity(0)`.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Returns `true` if the storage contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the amount of elements the storage can hold without requiring a memory allocation.
    ///
    /// For storages which have a fixed capacity, this should be equal to that capacity; the default implementation returns the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
    /// Reserves capacity for at least additional more elements to be inserted in the given storage. Does nothing if capacity is already sufficient.
    ///
    /// For storages which have a fixed capacity, this should panic if the request cannot be satisfied; the default implementation does exactly that.
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        if self.len() + additional > self.capacity() {
            unimplemented!("this storage type does not support reallocation")
        }
    }
    /// Shrinks the capacity of the storage as much as possible.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn shrink_to_fit(&mut self) {}
}

/// The default storage type used by the tree types when a storage type is not provided.
///
/// This is chosen according to the following strategy:
/// - If the `alloc` feature flag is enabled, [`SparseVec`] is used, i.e. a `Vec` wrapped in [`SparseStorage`] so that released nodes leave reusable holes instead of shifting their neighbors around
/// - If `alloc` is disabled but `arrayvec` is enabled, a [*sparse*][`SparseStorage`] [`ArrayVec`] *with zero-sized backing storage* is used, which is only useful for trees consisting of a single root node
/// No other storage types are ever used as defaults.
///
/// [`SparseVec`]: type.SparseVec.html " "
/// [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
/// [`SparseStorage`]: struct.SparseStorage.html " "
pub type DefaultStorage<T> = _DefaultStorage<T>;

#[cfg(feature = "alloc")]
type _DefaultStorage<T> = SparseVec<T>;

#[cfg(all(
    feature = "arrayvec",
    not(feature = "alloc"),
))]
type _DefaultStorage<T> = SparseStorage<T, arrayvec::ArrayVec<[SparseStorageSlot<T>; 0]>>;

#[cfg(all(
    not(feature = "alloc"),
    not(feature = "arrayvec"),
))]
compile_error!("no default storage available, please enable the alloc or arrayvec feature flags");
