use core::{fmt::Debug, iter::FusedIterator};
use crate::storage::{Storage, DefaultStorage};
use super::{Tree, Node, NodeKey, DepthFirstIter};

/// A reference to a node in a tree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node, it can be used to traverse the tree.
#[derive(Debug)]
pub struct NodeRef<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) tree: &'a Tree<T, K, S>,
    pub(super) key: NodeKey<K>,
}
impl<'a, T, K, S> NodeRef<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates a new `NodeRef` pointing to the specified key, or `None` if no such node exists in the tree's storage.
    pub fn new_raw(tree: &'a Tree<T, K, S>, key: NodeKey<K>) -> Option<Self> {
        if tree.node_data(&key).is_some() {
            Some(Self { tree, key })
        } else {
            None
        }
    }
    /// Returns a reference to the key of the node.
    pub fn key(&self) -> &NodeKey<K> {
        &self.key
    }
    /// Consumes the reference and returns the key of the node.
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_key(self) -> NodeKey<K> {
        self.key
    }
    /// Returns a reference to the parent node of the pointee, or `None` if it's the root node or the root of a pruned subtree.
    pub fn parent(&self) -> Option<Self> {
        self.neighbor(self.node().parent.as_ref())
    }
    /// Returns a reference to the leftmost child of the node, or `None` if it's a leaf node.
    pub fn first_child(&self) -> Option<Self> {
        self.neighbor(self.node().first_child.as_ref())
    }
    /// Returns a reference to the sibling of the pointee which comes after it in order, or `None` if it's the last child of its parent.
    pub fn next_sibling(&self) -> Option<Self> {
        self.neighbor(self.node().next_sibling.as_ref())
    }
    /// Returns `true` if the node is the root node of the tree, `false` otherwise.
    ///
    /// The root of a pruned subtree does not count as a root node, even though it does not have a parent.
    pub fn is_root(&self) -> bool {
        self.key.is_root()
    }
    /// Returns `true` if the node is a *leaf*, i.e. does not have child nodes; `false` otherwise.
    pub fn is_leaf(&self) -> bool {
        self.node().first_child.is_none()
    }
    /// Returns `true` if the node is a *branch*, i.e. has one or more child nodes; `false` otherwise.
    pub fn is_branch(&self) -> bool {
        !self.is_leaf()
    }
    /// Returns `true` if the node is not the root node and does not have a parent, i.e. it was never inserted or it's the root of a pruned subtree.
    ///
    /// This is a constant-time check of the node's own links; the descendants of a detached node are reported as attached, since they still have a parent.
    pub fn is_detached(&self) -> bool {
        !self.is_root() && self.node().parent.is_none()
    }
    /// Returns a reference to the data stored in the node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }
    /// Returns an iterator over references to the children of the node, from leftmost to rightmost. Empty for leaf nodes.
    pub fn children(&self) -> NodeChildrenIter<'a, T, K, S> {
        NodeSiblingsIter(self.children_keys())
    }
    /// Returns an iterator over the keys of the children of the node, from leftmost to rightmost. Empty for leaf nodes.
    pub fn children_keys(&self) -> NodeChildKeysIter<'a, T, K, S> {
        NodeSiblingKeysIter {
            tree: self.tree,
            key: self.node().first_child.clone(),
        }
    }
    /// Returns an iterator over references to the siblings of the node. Does not include siblings which come before the current node. The first element yielded is always `self`.
    pub fn siblings(self) -> NodeSiblingsIter<'a, T, K, S> {
        NodeSiblingsIter(self.sibling_keys())
    }
    /// Returns an iterator over the keys of the siblings of the node. Does not include siblings which come before the current node. The first element yielded is always `self`'s key.
    pub fn sibling_keys(self) -> NodeSiblingKeysIter<'a, T, K, S> {
        NodeSiblingKeysIter {
            tree: self.tree,
            key: Some(self.key),
        }
    }
    /// Returns a post-order iterator over the subtree rooted at the node, ending with the node itself.
    pub fn depth_first(self) -> DepthFirstIter<'a, T, K, S> {
        DepthFirstIter::new(self.tree, self.key)
    }

    #[track_caller]
    pub(super) fn node(&self) -> &'a Node<T, K> {
        self.tree.get(&self.key)
    }
    fn neighbor(&self, key: Option<&NodeKey<K>>) -> Option<Self> {
        key.map(|key| Self {
            tree: self.tree,
            key: key.clone(),
        })
    }
}
impl<T, K, S> Copy for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<T, K, S> Clone for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            key: self.key.clone(),
        }
    }
}
impl<T, K, S> PartialEq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Compares node identity, i.e. whether both references point to the same node of the same tree. The values of the nodes are not compared.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}
impl<T, K, S> Eq for NodeRef<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}

/// An iterator over keys of the siblings of a tree node.
#[derive(Debug)]
pub struct NodeSiblingKeysIter<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) tree: &'a Tree<T, K, S>,
    pub(super) key: Option<NodeKey<K>>,
}
/// An iterator over keys of the children of a tree node.
pub type NodeChildKeysIter<'a, T, K = usize, S = DefaultStorage<Node<T, K>>> =
    NodeSiblingKeysIter<'a, T, K, S>;
impl<T, K, S> Clone for NodeSiblingKeysIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            key: self.key.clone(),
        }
    }
}
impl<'a, T, K, S> Iterator for NodeSiblingKeysIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeKey<K>;
    fn next(&mut self) -> Option<Self::Item> {
        let current_key = self.key.take()?;
        self.key = self.tree.get(&current_key).next_sibling.clone();
        Some(current_key)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.key.is_some() {
            (1, None)
        } else {
            (0, Some(0))
        }
    }
}
impl<T, K, S> FusedIterator for NodeSiblingKeysIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}

/// An iterator over references to the siblings of a tree node.
#[derive(Debug)]
pub struct NodeSiblingsIter<'a, T, K = usize, S = DefaultStorage<Node<T, K>>>(
    pub(super) NodeSiblingKeysIter<'a, T, K, S>,
)
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq;
/// An iterator over references to the children of a tree node.
pub type NodeChildrenIter<'a, T, K = usize, S = DefaultStorage<Node<T, K>>> =
    NodeSiblingsIter<'a, T, K, S>;
impl<T, K, S> Clone for NodeSiblingsIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
impl<'a, T, K, S> Iterator for NodeSiblingsIter<'a, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Item = NodeRef<'a, T, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.0.tree;
        self.0.next().map(|key| NodeRef { tree, key })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<T, K, S> FusedIterator for NodeSiblingsIter<'_, T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
