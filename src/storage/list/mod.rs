#[cfg(feature = "alloc")]
mod alloc_impl;
#[cfg(feature = "arrayvec")]
mod arrayvec_impl;
#[cfg(feature = "smallvec")]
mod smallvec_impl;

mod sparse;
pub use sparse::{SparseStorage, Slot as SparseStorageSlot};
#[cfg(feature = "alloc")]
pub use sparse::{Vec as SparseVec, VecDeque as SparseVecDeque};

/// Trait for list-like containers which can be the backing storage for trees.
///
/// List storages shift their elements around on insertion and removal, which would invalidate the keys tree nodes use to refer to each other; they are therefore never used as tree storages directly, but rather wrapped in a [`SparseStorage`], which only ever appends to the list and reuses removed slots in place.
///
/// There's a number of invariants which have to be followed by the container:
/// - `new` and `with_capacity` ***must*** return empty storages, i.e. those which have `len() == 0` and `is_empty() == true`;
/// - `try_push` must either append the element at index `len()` or leave the collection untouched and hand the element back;
/// - if an element is added at a position, it must be retrieveable in the exact same state as it was inserted until it is removed or modified using a method which explicitly does so.
///
/// [`SparseStorage`]: struct.SparseStorage.html " "
pub trait ListStorage: Sized {
    /// The type of values in the container.
    type Element;

    /// Creates an empty collection with the specified capacity.
    ///
    /// # Panics
    /// Collections with a fixed capacity should panic if the specified capacity does not match their actual one, and are recommended to override the `new` method to use the correct capacity.
    fn with_capacity(capacity: usize) -> Self;
    /// Appends an element to the back of the collection, or gives it back if the collection cannot grow to fit it.
    ///
    /// # Errors
    /// Fails if the collection has a fixed capacity which is exhausted, or if the memory allocator refused to provide more memory.
    fn try_push(&mut self, element: Self::Element) -> Result<(), Self::Element>;
    /// Returns the number of elements in the collection, also referred to as its 'length'.
    fn len(&self) -> usize;
    /// Returns a reference to the specified element in the collection, or `None` if the index is out of bounds.
    fn get(&self, index: usize) -> Option<&Self::Element>;
    /// Returns a *mutable* reference to the specified element in the collection, or `None` if the index is out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Element>;

    /// Creates a new empty collection. Dynamically-allocated collections created this way do not allocate memory.
    ///
    /// Collections with fixed capacity should override this method to use the correct capacity, as the default implementation calls `Self::with_capacity(0)`.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns `true` if the collection contains no elements, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the amount of elements the collection can hold without requiring a memory allocation.
    ///
    /// For collections which have a fixed capacity, this should be equal to that capacity; the default implementation returns the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
    /// Reserves capacity for at least additional more elements to be inserted in the given collection. Does nothing if capacity is already sufficient.
    ///
    /// For collections which have a fixed capacity, this should panic if the request cannot be satisfied; the default implementation does exactly that.
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        if self.len() + additional > self.capacity() {
            unimplemented!("this storage type does not support reallocation")
        }
    }
    /// Shrinks the capacity of the collection as much as possible.
    ///
    /// The default implementation does nothing.
    #[inline(always)]
    fn shrink_to_fit(&mut self) {}
    /// Shortens the collection, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater than the collection's current length, this has no effect.
    fn truncate(&mut self, len: usize);
}
