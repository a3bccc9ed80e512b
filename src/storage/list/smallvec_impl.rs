use smallvec::{SmallVec, Array};
use super::ListStorage;

impl<A> ListStorage for SmallVec<A>
where A: Array,
{
    type Element = A::Item;

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity(capacity)
    }
    #[inline]
    fn try_push(&mut self, element: Self::Element) -> Result<(), Self::Element> {
        // Spilling onto the heap is the only way a SmallVec can fail to grow
        if self.try_reserve(1).is_err() {
            return Err(element);
        }
        self.push(element);
        Ok(())
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline(always)]
    fn get(&self, index: usize) -> Option<&Self::Element> {
        (**self).get(index)
    }
    #[inline(always)]
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Element> {
        (**self).get_mut(index)
    }

    #[inline(always)]
    fn new() -> Self {
        Self::new()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity()
    }
    #[inline(always)]
    fn reserve(&mut self, additional: usize) {
        self.reserve(additional)
    }
    #[inline(always)]
    fn shrink_to_fit(&mut self) {
        self.shrink_to_fit()
    }
    #[inline(always)]
    fn truncate(&mut self, len: usize) {
        self.truncate(len)
    }
}
