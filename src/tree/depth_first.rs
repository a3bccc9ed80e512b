use core::{fmt::Debug, iter::FusedIterator};
use crate::{storage::{Storage, DefaultStorage}, util::corrupted_tree};
use super::{Tree, Node, NodeKey, NodeRef};

/// The direction a depth-first traversal is about to move in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalState {
    /// The current node has not been descended into yet. The traversal follows leftmost-child links until it reaches a leaf.
    GoDeeper,
    /// The current node and all of its descendants have been visited. The traversal moves on to the next sibling, or climbs to the parent if there is none.
    GoBroader,
}

/// A post-order traversal position which is not tied to a borrow of the tree.
///
/// The cursor only stores the key of the node it's at and a [`TraversalState`], reading every link it follows straight from the nodes of the tree it is stepped with, so it needs neither a stack nor recursion. Since it doesn't hold a borrow, the tree may be mutated between steps, as long as the node the cursor is at and the links it is yet to follow stay intact. [`Tree::destroy_subtree`] relies on this to release nodes while walking over them.
///
/// Stepping a cursor with a tree it was not created for is a logic error: the traversal may panic or produce an arbitrary sequence of keys, but won't cause undefined behavior.
///
/// [`TraversalState`]: enum.TraversalState.html " "
/// [`Tree::destroy_subtree`]: struct.Tree.html#method.destroy_subtree " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DepthFirstCursor<K> {
    start: NodeKey<K>,
    current: Option<NodeKey<K>>,
    state: TraversalState,
}
impl<K> DepthFirstCursor<K>
where
    K: Clone + Debug + Eq,
{
    /// Creates a cursor which walks the subtree rooted at the specified node. The first step descends to the leftmost leaf of that subtree.
    #[inline]
    pub fn new(start: NodeKey<K>) -> Self {
        Self {
            current: Some(start.clone()),
            start,
            state: TraversalState::GoDeeper,
        }
    }
    /// Rewinds the cursor to the start of the traversal.
    #[inline]
    pub fn reset(&mut self) {
        self.current = Some(self.start.clone());
        self.state = TraversalState::GoDeeper;
    }
    /// Returns the key of the node the traversal started from, which is also the last one it visits.
    #[inline(always)]
    pub fn start(&self) -> &NodeKey<K> {
        &self.start
    }
    /// Returns the key of the node the cursor is currently at, or `None` if the traversal is finished.
    #[inline(always)]
    pub fn current(&self) -> Option<&NodeKey<K>> {
        self.current.as_ref()
    }
    /// Returns the direction the cursor will move in on the next step.
    #[inline(always)]
    pub fn state(&self) -> TraversalState {
        self.state
    }
    /// Returns `true` if the whole subtree has been visited, `false` otherwise.
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }
    /// Advances the traversal to the next node in post-order and returns its key, or `None` if the traversal is finished.
    ///
    /// # Panics
    /// Panics if the cursor is at a node which is not alive in the specified tree.
    #[track_caller]
    pub fn step<T, S>(&mut self, tree: &Tree<T, K, S>) -> Option<NodeKey<K>>
    where
        S: Storage<Element = Node<T, K>, Key = K>,
    {
        loop {
            let current = self.current.clone()?;
            let node = tree.get(&current);
            match self.state {
                TraversalState::GoDeeper => {
                    if let Some(child) = &node.first_child {
                        self.current = Some(child.clone());
                    } else {
                        self.state = TraversalState::GoBroader;
                        return Some(self.visit(current));
                    }
                }
                TraversalState::GoBroader => {
                    if let Some(sibling) = &node.next_sibling {
                        self.current = Some(sibling.clone());
                        self.state = TraversalState::GoDeeper;
                    } else {
                        let parent = node.parent.clone().unwrap_or_else(|| {
                            corrupted_tree("a visited non-starting node has no parent")
                        });
                        self.current = Some(parent.clone());
                        return Some(self.visit(parent));
                    }
                }
            }
        }
    }

    /// Finishes the traversal once the starting node itself is visited, so that its siblings and parent are never looked at.
    fn visit(&mut self, key: NodeKey<K>) -> NodeKey<K> {
        if key == self.start {
            self.current = None;
        }
        key
    }
}

/// A post-order iterator over a subtree, yielding every node after all of its descendants.
///
/// Created by [`Tree::depth_first`], [`Tree::depth_first_from`] and [`NodeRef::depth_first`].
///
/// [`Tree::depth_first`]: struct.Tree.html#method.depth_first " "
/// [`Tree::depth_first_from`]: struct.Tree.html#method.depth_first_from " "
/// [`NodeRef::depth_first`]: struct.NodeRef.html#method.depth_first " "
#[derive(Debug)]
pub struct DepthFirstIter<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree: &'a Tree<T, K, S>,
    cursor: DepthFirstCursor<K>,
}
impl<'a, T, K, S> DepthFirstIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[inline]
    pub(super) fn new(tree: &'a Tree<T, K, S>, start: NodeKey<K>) -> Self {
        Self {
            tree,
            cursor: DepthFirstCursor::new(start),
        }
    }
    /// Rewinds the iterator, so that it visits the whole subtree again.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new('a');
    /// let root = tree.root_key();
    /// let child = tree.create_node('b').unwrap();
    /// tree.insert(child, root);
    ///
    /// let mut iter = tree.depth_first();
    /// let first = iter.by_ref().map(|node| *node.value()).collect::<String>();
    /// assert!(iter.next().is_none());
    ///
    /// iter.reset();
    /// let second = iter.map(|node| *node.value()).collect::<String>();
    /// assert_eq!(first, "ba");
    /// assert_eq!(first, second);
    /// ```
    #[inline]
    pub fn reset(&mut self) {
        self.cursor.reset()
    }
    /// Returns the traversal position of the iterator.
    #[inline(always)]
    pub fn cursor(&self) -> &DepthFirstCursor<K> {
        &self.cursor
    }
    /// Detaches the traversal position from the borrow of the tree, allowing it to be stepped manually with [`DepthFirstCursor::step`].
    ///
    /// [`DepthFirstCursor::step`]: struct.DepthFirstCursor.html#method.step " "
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_cursor(self) -> DepthFirstCursor<K> {
        self.cursor
    }
}
impl<T, K, S> Clone for DepthFirstIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            cursor: self.cursor.clone(),
        }
    }
}
impl<'a, T, K, S> Iterator for DepthFirstIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.cursor.step(tree).map(|key| NodeRef { tree, key })
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_finished() {
            (0, Some(0))
        } else {
            (1, Some(self.tree.len()))
        }
    }
}
impl<T, K, S> FusedIterator for DepthFirstIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
