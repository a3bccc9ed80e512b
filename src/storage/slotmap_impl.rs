use core::fmt::Debug;
use slotmap::{SlotMap, HopSlotMap, DenseSlotMap, Key};
use super::Storage;

macro_rules! impl_storage_for_slotmap {
    ($($map:ident),+ $(,)?) => {$(
        impl<K, V> Storage for $map<K, V>
        where
            K: Key + Debug + Eq,
        {
            type Key = K;
            type Element = V;
            // Slot map keys are Copy
            #[inline(always)]
            fn try_add(&mut self, element: Self::Element) -> Result<Self::Key, Self::Element> {
                // Slot maps only fail by running out of address space, which panics on its own
                Ok(self.insert(element))
            }
            #[inline(always)]
            #[track_caller]
            fn remove(&mut self, key: &Self::Key) -> Self::Element {
                self.remove(*key)
                    .expect("the value with this key has already been removed")
            }
            #[inline(always)]
            fn len(&self) -> usize {
                self.len()
            }
            #[inline(always)]
            fn with_capacity(capacity: usize) -> Self {
                Self::with_capacity_and_key(capacity)
            }
            #[inline(always)]
            fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
                self.get(*key)
            }
            #[inline(always)]
            fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
                self.get_mut(*key)
            }

            #[inline(always)]
            fn contains_key(&self, key: &Self::Key) -> bool {
                self.contains_key(*key)
            }
            #[inline(always)]
            fn new() -> Self {
                Self::with_key()
            }
            #[inline(always)]
            fn capacity(&self) -> usize {
                self.capacity()
            }
            #[inline(always)]
            fn reserve(&mut self, additional: usize) {
                self.reserve(additional)
            }
        }
    )+};
}

impl_storage_for_slotmap!(SlotMap, HopSlotMap, DenseSlotMap);
