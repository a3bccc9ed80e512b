//! Arbitrary-arity trees in left-child/right-sibling encoding.
//!
//! Every node stores exactly three links besides its value: its parent, its leftmost child and its right sibling. The children of a node are therefore a singly linked list threaded through the children themselves, which allows any number of children per node without a per-node collection of child keys.
//!
//! The root node is stored by value inside the [`Tree`]; every other node is created through the tree's storage, which plays the role of the allocator for nodes. Creating a node does not attach it to anything: nodes become part of the tree only once [`insert`]ed, and can later be detached again with [`prune`] (together with their whole subtree) or [`remove`] (alone, promoting their children in place). Detaching a node never frees it; that's what [`destroy_node`] and [`destroy_subtree`] are for.
//!
//! # Example
//! ```rust
//! use sibling_tree::Tree;
//!
//! // Create the tree. The only thing we need for that is the value for the root node. The
//! // turbofish there is needed to state that we are using the default storage method instead of
//! // asking the compiler to infer it, which would be impossible.
//! let mut tree = Tree::<_>::new(1);
//! let root = tree.root_key();
//!
//! // Allocate a few nodes and hang them off the root.
//! let two = tree.create_node(2).unwrap(); // You can replace this with proper error handling
//! let three = tree.create_node(3).unwrap();
//! tree.insert(two, root);
//! tree.insert(three, root);
//!
//! // New children always become the leftmost child, so the most recently inserted one goes first:
//! let children = tree
//!     .root()
//!     .children()
//!     .map(|child| *child.value())
//!     .collect::<Vec<_>>();
//! assert_eq!(children, [3, 2]);
//!
//! // The depth-first iterator visits every node after all of its descendants.
//! let post_order = tree.depth_first().map(|node| *node.value()).collect::<Vec<_>>();
//! assert_eq!(post_order, [3, 2, 1]);
//!
//! // Detaching a node does not free it, so it can be freed or reinserted afterwards.
//! tree.prune(two);
//! assert!(!tree.contains_node(two));
//! assert_eq!(tree.destroy_node(two), 2);
//! ```
//!
//! [`Tree`]: struct.Tree.html " "
//! [`insert`]: struct.Tree.html#method.insert " "
//! [`prune`]: struct.Tree.html#method.prune " "
//! [`remove`]: struct.Tree.html#method.remove " "
//! [`destroy_node`]: struct.Tree.html#method.destroy_node " "
//! [`destroy_subtree`]: struct.Tree.html#method.destroy_subtree " "

use core::fmt::Debug;
use crate::{
    storage::{Storage, ListStorage, DefaultStorage, SparseStorage, SparseStorageSlot},
    AllocationError,
};

mod node;
mod node_ref;
mod structure;
mod depth_first;
#[cfg(all(test, feature = "std"))]
mod tests;

pub use node::{Node, NodeKey};
pub use node_ref::{
    NodeRef,
    NodeSiblingsIter,
    NodeSiblingKeysIter,
    NodeChildrenIter,
    NodeChildKeysIter,
};
pub use depth_first::{DepthFirstCursor, DepthFirstIter, TraversalState};

/// An arbitrary-arity tree in left-child/right-sibling encoding.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone, Debug)]
pub struct Tree<T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: S,
    root: Node<T, K>,
}
impl<T, K, S> Tree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a tree with the specified value for the root node.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// // The only way to create a tree...
    /// let tree = Tree::<_>::new(87);
    /// // ...is to simply create the root node and storage. The turbofish there is needed to
    /// // state that we are using the default storage method instead of asking the compiler to
    /// // infer it, which would be impossible.
    ///
    /// // No other nodes have been created yet:
    /// assert!(tree.root().is_leaf());
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline(always)]
    pub fn new(root: T) -> Self {
        Self {
            storage: S::new(),
            root: Node::unlinked(root),
        }
    }
    /// Creates a tree with the specified capacity for the storage, i.e. the number of non-root nodes which can be created before the storage has to allocate memory.
    ///
    /// # Panics
    /// The storage may panic if it has fixed capacity and the specified value does not match it.
    #[inline(always)]
    pub fn with_capacity(capacity: usize, root: T) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            root: Node::unlinked(root),
        }
    }
    /// Creates a tree which allocates its nodes in the specified storage.
    ///
    /// # Panics
    /// Panics if the storage is not empty.
    #[track_caller]
    pub fn with_storage(storage: S, root: T) -> Self {
        assert!(
            storage.is_empty(),
            "the storage for a new tree must not contain any nodes",
        );
        Self {
            storage,
            root: Node::unlinked(root),
        }
    }

    /// Returns a reference to the root node of the tree.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// // A tree always has a root node:
    /// let tree = Tree::<_>::new("Root");
    ///
    /// assert_eq!(*tree.root().value(), "Root");
    /// assert!(tree.root().is_root());
    /// ```
    #[inline(always)]
    pub fn root(&self) -> NodeRef<'_, T, K, S> {
        NodeRef {
            tree: self,
            key: NodeKey::Root,
        }
    }
    /// Returns the key of the root node of the tree.
    #[inline(always)]
    pub const fn root_key(&self) -> NodeKey<K> {
        NodeKey::Root
    }
    /// Returns a reference to the node with the specified key, or `None` if the key does not refer to a live node.
    ///
    /// Nodes which were created but never inserted, as well as pruned ones, are live until destroyed.
    #[inline]
    pub fn node(&self, key: NodeKey<K>) -> Option<NodeRef<'_, T, K, S>> {
        NodeRef::new_raw(self, key)
    }
    /// Returns a reference to the value of the node with the specified key, or `None` if the key does not refer to a live node.
    #[inline]
    pub fn value(&self, key: &NodeKey<K>) -> Option<&T> {
        self.node_data(key).map(|node| &node.value)
    }
    /// Returns a *mutable* reference to the value of the node with the specified key, or `None` if the key does not refer to a live node.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new(String::from("Welcome"));
    /// let root = tree.root_key();
    ///
    /// if let Some(value) = tree.value_mut(&root) {
    ///     value.push_str(" home");
    /// }
    /// assert_eq!(tree.root().value(), "Welcome home");
    /// ```
    #[inline]
    pub fn value_mut(&mut self, key: &NodeKey<K>) -> Option<&mut T> {
        self.node_data_mut(key).map(|node| &mut node.value)
    }
    /// Returns the number of live nodes, counting the root node and all nodes which were created and not yet destroyed, no matter whether they are reachable from the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len() + 1
    }
    /// Returns the number of non-root nodes the storage can hold without requiring a memory allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
    /// Returns a reference to the storage the non-root nodes are allocated in.
    #[inline(always)]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
    /// Consumes the tree and returns the value of its root node, dropping all other nodes.
    #[inline]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_root_value(self) -> T {
        self.root.value
    }

    /// Allocates a new node with the specified value in the tree's storage.
    ///
    /// The node is not linked to anything yet: it is not a member of the tree until it's passed to [`insert`].
    ///
    /// # Errors
    /// Fails if the storage cannot provide room for the node. The value is handed back inside the error, and the tree is left untouched.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new(0);
    /// let node = tree.create_node(1).unwrap(); // You can replace this with proper error handling
    ///
    /// // The node exists, but it's not a member of the tree yet:
    /// assert_eq!(tree.value(&node), Some(&1));
    /// assert!(!tree.contains_node(node));
    /// ```
    ///
    /// [`insert`]: #method.insert " "
    pub fn create_node(&mut self, value: T) -> Result<NodeKey<K>, AllocationError<T>> {
        self.storage
            .try_add(Node::unlinked(value))
            .map(NodeKey::Slot)
            .map_err(|node| AllocationError { value: node.value })
    }
    /// Releases the storage of a node, returning its value.
    ///
    /// The node must not be linked to a parent or a sibling, i.e. it was either never inserted, has been removed with [`remove`], or is the root of a subtree detached with [`prune`]. Its children, if any, are unlinked from it and each becomes the root of a detached subtree of its own, which can then be reinserted elsewhere or released. To release a whole detached subtree in one go, use [`destroy_subtree`].
    ///
    /// Takes time proportional to the number of children of the node, plus the size of the tree in debug builds.
    ///
    /// # Panics
    /// Panics if the key refers to the root node or to a node which has already been destroyed. In debug builds, also panics if the node still has a parent or a sibling, or is reachable from the root.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new(0);
    /// let root = tree.root_key();
    /// let branch = tree.create_node(1).unwrap();
    /// let leaf = tree.create_node(2).unwrap();
    /// tree.insert(branch, root);
    /// tree.insert(leaf, branch);
    ///
    /// tree.prune(branch);
    /// assert_eq!(tree.destroy_node(branch), 1);
    /// // The orphaned child can go back into the tree:
    /// assert!(tree.node(leaf).unwrap().is_detached());
    /// tree.insert(leaf, root);
    /// assert!(tree.contains_node(leaf));
    /// ```
    ///
    /// [`prune`]: #method.prune " "
    /// [`remove`]: #method.remove " "
    /// [`destroy_subtree`]: #method.destroy_subtree " "
    #[track_caller]
    pub fn destroy_node(&mut self, node: NodeKey<K>) -> T {
        debug_assert!(
            self.get(&node).is_detached(),
            "tried to destroy node {:?} which is still linked to a parent or sibling",
            &node,
        );
        debug_assert!(
            !self.contains_node(node.clone()),
            "tried to destroy node {:?} which is still reachable from the root",
            &node,
        );
        if node.is_root() {
            return self.release(node);
        }
        let mut child = self.get_mut(&node).first_child.take();
        while let Some(key) = child {
            let child_data = self.get_mut(&key);
            child_data.parent = None;
            child = child_data.next_sibling.take();
        }
        self.release(node)
    }
    /// Returns `true` if the node is reachable from the root, i.e. it is a member of the tree; `false` otherwise.
    ///
    /// This walks the tree with a fresh [`DepthFirstIter`] and compares node keys, never values, so it takes time proportional to the size of the tree.
    ///
    /// [`DepthFirstIter`]: struct.DepthFirstIter.html " "
    pub fn contains_node(&self, node: NodeKey<K>) -> bool {
        self.depth_first().any(|member| member.key == node)
    }
    /// Returns a post-order iterator over all nodes reachable from the root, ending with the root itself.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new("root");
    /// let root = tree.root_key();
    /// let left = tree.create_node("left").unwrap();
    /// let right = tree.create_node("right").unwrap();
    /// let leaf = tree.create_node("leaf").unwrap();
    /// tree.insert(right, root);
    /// tree.insert(left, root);
    /// tree.insert(leaf, left);
    ///
    /// let order = tree.depth_first().map(|node| *node.value()).collect::<Vec<_>>();
    /// assert_eq!(order, ["leaf", "left", "right", "root"]);
    /// ```
    #[inline]
    pub fn depth_first(&self) -> DepthFirstIter<'_, T, K, S> {
        DepthFirstIter::new(self, NodeKey::Root)
    }
    /// Returns a post-order iterator over the subtree rooted at the specified node, ending with that node.
    ///
    /// Works both for nodes which are members of the tree and for the roots of pruned subtrees.
    ///
    /// # Panics
    /// Panics if the key does not refer to a live node.
    #[inline]
    #[track_caller]
    pub fn depth_first_from(&self, node: NodeKey<K>) -> DepthFirstIter<'_, T, K, S> {
        self.get(&node);
        DepthFirstIter::new(self, node)
    }

    pub(crate) fn node_data(&self, key: &NodeKey<K>) -> Option<&Node<T, K>> {
        match key {
            NodeKey::Root => Some(&self.root),
            NodeKey::Slot(key) => self.storage.get(key),
        }
    }
    pub(crate) fn node_data_mut(&mut self, key: &NodeKey<K>) -> Option<&mut Node<T, K>> {
        match key {
            NodeKey::Root => Some(&mut self.root),
            NodeKey::Slot(key) => self.storage.get_mut(key),
        }
    }
    #[track_caller]
    fn get(&self, key: &NodeKey<K>) -> &Node<T, K> {
        self.node_data(key)
            .unwrap_or_else(|| panic!("invalid node key: {:?}", key))
    }
    #[track_caller]
    fn get_mut(&mut self, key: &NodeKey<K>) -> &mut Node<T, K> {
        match key {
            NodeKey::Root => &mut self.root,
            NodeKey::Slot(slot) => self
                .storage
                .get_mut(slot)
                .unwrap_or_else(|| panic!("invalid node key: {:?}", key)),
        }
    }
    #[track_caller]
    fn release(&mut self, node: NodeKey<K>) -> T {
        match node {
            NodeKey::Root => panic!("the root node is owned by the tree and cannot be destroyed"),
            NodeKey::Slot(key) => self.storage.remove(&key).value,
        }
    }
}
impl<T, S> Tree<T, usize, SparseStorage<Node<T, usize>, S>>
where
    S: ListStorage<Element = SparseStorageSlot<Node<T, usize>>>,
{
    /// Returns the number of holes left behind in the sparse storage by destroyed nodes. Holes are reused by subsequently created nodes before the storage grows.
    ///
    /// # Example
    /// ```rust
    /// use sibling_tree::tree::SparseVecTree;
    ///
    /// let mut tree = SparseVecTree::new(0);
    /// let node = tree.create_node(1).unwrap();
    /// tree.destroy_node(node);
    /// assert_eq!(tree.num_holes(), 1);
    ///
    /// // The next node takes the place of the destroyed one:
    /// let reused = tree.create_node(2).unwrap();
    /// assert_eq!(reused, node);
    /// assert!(tree.is_dense());
    /// ```
    #[inline(always)]
    pub fn num_holes(&self) -> usize {
        self.storage.num_holes()
    }
    /// Returns `true` if there are no holes in the storage, `false` otherwise.
    #[inline(always)]
    pub fn is_dense(&self) -> bool {
        self.storage.is_dense()
    }
}

/// A tree which uses a *sparse* `Vec` as backing storage.
///
/// The default `Tree` type already uses this, so this is only provided for explicitness and consistency.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
#[allow(unused_qualifications)]
pub type SparseVecTree<T> = Tree<T, usize, crate::storage::SparseVec<Node<T, usize>>>;
/// A tree which uses a *sparse* `ArrayVec` as backing storage, i.e. has a fixed upper limit on the number of non-root nodes and never allocates memory.
///
/// `A` is the backing array type, for example `[SparseStorageSlot<Node<T, usize>>; 16]`. Creating a node when all slots are occupied fails with an [`AllocationError`].
///
/// [`AllocationError`]: ../struct.AllocationError.html " "
#[cfg(feature = "arrayvec")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "arrayvec")))]
pub type ArrayVecTree<T, A> = Tree<T, usize, SparseStorage<Node<T, usize>, arrayvec::ArrayVec<A>>>;
