use core::{
    marker::PhantomData,
    mem,
    num::NonZeroUsize,
};
use crate::storage::Storage;
use super::ListStorage;

/// A `Vec` wrapped in [`SparseStorage`].
///
/// [`SparseStorage`]: struct.SparseStorage.html " "
#[cfg(feature = "alloc")]
pub type Vec<T> = SparseStorage<T, alloc::vec::Vec<Slot<T>>>;
/// A `VecDeque` wrapped in [`SparseStorage`].
///
/// [`SparseStorage`]: struct.SparseStorage.html " "
#[cfg(feature = "alloc")]
pub type VecDeque<T> = SparseStorage<T, alloc::collections::VecDeque<Slot<T>>>;

/// A wrapper around a list-like storage type which turns it into a slot allocator with stable keys.
///
/// Sparse storage with element type `E` wraps a normal storage which stores `Slot<E>`, which is a tagged union storing either an element or a "hole". Removing an element does not shift anything: the slot is replaced with a hole, so that the indices of all other elements stay valid. Holes are threaded into a free list and are reused by subsequent additions before the underlying list is grown again.
///
/// Fetching a hole through `get`/`get_mut` returns `None`, exactly like an index which is out of bounds.
#[derive(Clone, Debug, Default)]
pub struct SparseStorage<E, S>
where S: ListStorage<Element = Slot<E>> {
    storage: S,
    /// Length, most recently punched hole
    hole_list: Option<(NonZeroUsize, usize)>,
    _phantom: PhantomData<E>,
}
impl<E, S> SparseStorage<E, S>
where S: ListStorage<Element = Slot<E>> {
    /// Consumes the sparse storage and returns its inner storage.
    #[inline(always)]
    pub fn into_inner(self) -> S {
        self.storage
    }
    /// Returns the number of holes in the storage. This operation returns immediately instead of looping through the entire storage, since the sparse storage automatically tracks the number of holes it creates and destroys.
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.hole_list.map_or(0, |x| x.0.get())
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise. This operation returns immediately instead of looping through the entire storage, since the sparse storage automatically tracks the number of holes it creates and destroys.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.num_holes() == 0
    }
    /// Rebuilds the hole list from scratch by scanning the whole list, so that the most recent hole is the one with the highest index.
    fn relink_holes(&mut self) {
        let mut hole_list: Option<(NonZeroUsize, usize)> = None;
        for index in 0..self.storage.len() {
            let slot = self
                .storage
                .get_mut(index)
                .expect("index within the length is out of bounds");
            if slot.is_element() {
                continue;
            }
            slot.0 = SlotInner::Hole(hole_list.map(|(_, previous)| previous));
            let count = hole_list.map_or(0, |(count, _)| count.get()) + 1;
            hole_list = NonZeroUsize::new(count).map(|count| (count, index));
        }
        self.hole_list = hole_list;
    }
    /// Returns the number of slots in the underlying storage, counting both elements and holes.
    #[inline(always)]
    pub fn num_slots(&self) -> usize {
        self.storage.len()
    }
}
static HOLE_PANIC_MSG: &str = "\
the element at the specified index was a hole in the sparse storage";
impl<E, S> Storage for SparseStorage<E, S>
where S: ListStorage<Element = Slot<E>> {
    type Key = usize;
    type Element = E;

    fn try_add(&mut self, element: Self::Element) -> Result<usize, Self::Element> {
        let (hole_count, used_hole_index) = if let Some(hole_info) = self.hole_list {
            hole_info
        } else {
            return match self.storage.try_push(Slot::new_element(element)) {
                Ok(()) => Ok(self.storage.len() - 1),
                Err(slot) => Err(slot.unwrap()),
            };
        };
        let hole = self
            .storage
            .get_mut(used_hole_index)
            .expect("the hole list points out of bounds");
        let next_hole = match hole.0 {
            SlotInner::Hole(link) => link,
            SlotInner::Element(..) => panic!("the hole list points to an occupied slot"),
        };
        *hole = Slot::new_element(element);
        self.hole_list = NonZeroUsize::new(hole_count.get() - 1).map(|new_hole_count| {
            (
                new_hole_count,
                next_hole.expect("the hole list ended before the hole count did"),
            )
        });
        Ok(used_hole_index)
    }
    #[track_caller]
    fn remove(&mut self, index: &usize) -> Self::Element {
        let previous_hole = self.hole_list.map(|(_, first)| first);
        let element = self
            .storage
            .get_mut(*index)
            .unwrap_or_else(|| panic!("index {} is out of bounds", index))
            .punch_hole(previous_hole)
            .unwrap_or_else(|| panic!("{}", HOLE_PANIC_MSG));
        let hole_count = NonZeroUsize::new(self.num_holes() + 1)
            .expect("unexpected integer overflow");
        self.hole_list = Some((hole_count, *index));
        element
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.storage.len() - self.num_holes()
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            hole_list: None,
            _phantom: PhantomData,
        }
    }
    #[inline]
    fn get(&self, index: &usize) -> Option<&Self::Element> {
        self.storage.get(*index).and_then(Slot::element)
    }
    #[inline]
    fn get_mut(&mut self, index: &usize) -> Option<&mut Self::Element> {
        self.storage.get_mut(*index).and_then(Slot::element_mut)
    }

    #[inline(always)]
    fn new() -> Self {
        Self {
            storage: S::new(),
            hole_list: None,
            _phantom: PhantomData,
        }
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.storage.capacity()
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        // Holes are reused before the list grows
        let additional = additional.saturating_sub(self.num_holes());
        self.storage.reserve(additional)
    }
    /// Drops the holes at the end of the underlying list before shrinking it. Keys of live elements are unaffected; the remaining holes are relinked in ascending order.
    fn shrink_to_fit(&mut self) {
        let num_slots = (0..self.storage.len())
            .rev()
            .find(|&index| self.storage.get(index).map_or(false, Slot::is_element))
            .map_or(0, |last| last + 1);
        if num_slots < self.storage.len() {
            self.storage.truncate(num_slots);
            self.relink_holes();
        }
        self.storage.shrink_to_fit()
    }
}

/// A slot inside a sparse storage.
///
/// This is an opaque structure, only used for the purpose of a `SparseStorage` being validly declarable, because leaking private types through generic argument defaults is impossible, and it'd be impossible to declare the type of the backing storage if it was explicitly different.
#[repr(transparent)]
#[derive(Clone, Debug)]
pub struct Slot<T>(SlotInner<T>);
impl<T> Slot<T> {
    #[inline(always)]
    const fn new_element(val: T) -> Self {
        Self(SlotInner::Element(val))
    }
    #[inline]
    fn is_element(&self) -> bool {
        matches!(self.0, SlotInner::Element(..))
    }
    #[inline]
    fn element(&self) -> Option<&T> {
        match &self.0 {
            SlotInner::Element(x) => Some(x),
            SlotInner::Hole(..) => None,
        }
    }
    #[inline]
    fn element_mut(&mut self) -> Option<&mut T> {
        match &mut self.0 {
            SlotInner::Element(x) => Some(x),
            SlotInner::Hole(..) => None,
        }
    }
    #[inline]
    #[track_caller]
    fn unwrap(self) -> T {
        match self.0 {
            SlotInner::Element(x) => x,
            SlotInner::Hole(..) => panic!("{}", HOLE_PANIC_MSG),
        }
    }
    /// Turns the slot into a hole linking to `next`, returning the element or `None` if it already was a hole.
    fn punch_hole(&mut self, next: Option<usize>) -> Option<T> {
        if let SlotInner::Hole(..) = self.0 {
            return None;
        }
        match mem::replace(&mut self.0, SlotInner::Hole(next)) {
            SlotInner::Element(val) => Some(val),
            SlotInner::Hole(..) => None,
        }
    }
}

#[derive(Clone, Debug)]
enum SlotInner<T> {
    /// A value in the slot.
    Element(T),
    /// A hole, with an index to the next one.
    Hole(Option<usize>),
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use alloc::vec::Vec as StdVec;

    type Sparse = SparseStorage<&'static str, StdVec<Slot<&'static str>>>;

    #[test]
    fn holes_are_reused_before_growing() {
        let mut storage = Sparse::new();
        let a = storage.add("a");
        let b = storage.add("b");
        let c = storage.add("c");
        assert_eq!((a, b, c), (0, 1, 2));

        assert_eq!(storage.remove(&b), "b");
        assert_eq!(storage.remove(&a), "a");
        assert_eq!(storage.num_holes(), 2);
        assert_eq!(storage.len(), 1);
        assert!(!storage.contains_key(&a));
        assert!(storage.get(&b).is_none());

        // Most recently punched hole is handed out first
        assert_eq!(storage.add("d"), a);
        assert_eq!(storage.add("e"), b);
        assert!(storage.is_dense());
        assert_eq!(storage.add("f"), 3);
        assert_eq!(storage.num_slots(), 4);
        assert_eq!(storage.get(&c), Some(&"c"));
        assert_eq!(storage.get(&a), Some(&"d"));
    }

    #[test]
    fn shrinking_drops_trailing_holes() {
        let mut storage = Sparse::new();
        let keys = (0..5).map(|_| storage.add("x")).collect::<StdVec<_>>();
        storage.remove(&keys[1]);
        storage.remove(&keys[4]);
        storage.remove(&keys[3]);
        assert_eq!(storage.num_holes(), 3);

        storage.shrink_to_fit();
        assert_eq!(storage.num_slots(), 3);
        assert_eq!(storage.num_holes(), 1);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get(&keys[2]), Some(&"x"));

        // The interior hole is still reused before the list grows
        assert_eq!(storage.add("y"), keys[1]);
        assert_eq!(storage.add("z"), 3);
        assert!(storage.is_dense());
    }

    #[test]
    fn shrinking_an_all_hole_storage_empties_it() {
        let mut storage = Sparse::new();
        let a = storage.add("a");
        let b = storage.add("b");
        storage.remove(&a);
        storage.remove(&b);
        storage.shrink_to_fit();
        assert_eq!(storage.num_slots(), 0);
        assert!(storage.is_dense());
        assert_eq!(storage.add("c"), 0);
    }

    #[test]
    #[should_panic(expected = "hole in the sparse storage")]
    fn double_remove_panics() {
        let mut storage = Sparse::new();
        let key = storage.add("only");
        storage.remove(&key);
        storage.remove(&key);
    }

    #[cfg(feature = "arrayvec")]
    #[test]
    fn fixed_capacity_hands_the_element_back() {
        use arrayvec::ArrayVec;
        let mut storage = SparseStorage::<u32, ArrayVec<[Slot<u32>; 2]>>::new();
        assert_eq!(storage.try_add(1), Ok(0));
        assert_eq!(storage.try_add(2), Ok(1));
        assert_eq!(storage.try_add(3), Err(3));
        assert_eq!(storage.len(), 2);

        storage.remove(&0);
        assert_eq!(storage.try_add(4), Ok(0));
        assert_eq!(storage.capacity(), 2);
    }
}
