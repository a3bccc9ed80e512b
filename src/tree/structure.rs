//! Structural mutators which relink nodes without allocating or freeing anything, plus bulk destruction of detached subtrees.

use core::{fmt::Debug, mem};
use crate::{storage::Storage, util::corrupted_tree};
use super::{Tree, Node, NodeKey, DepthFirstCursor};

impl<T, K, S> Tree<T, K, S>
where
    S: Storage<Element = Node<T, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Attaches a node as the new *leftmost* child of the specified parent. The previous leftmost child, if any, becomes its right sibling.
    ///
    /// Since every insertion prepends, the children of a node are ordered from the most recently inserted to the least recently inserted one. To get chronological order, insert in reverse.
    ///
    /// If the node is the root of a pruned subtree, the whole subtree comes along with it. Runs in constant time.
    ///
    /// # Panics
    /// Panics if either key does not refer to a live node. In debug builds, also panics if the node is the root or is already linked to something, or if the parent is not a member of the tree: linking a node which is already linked corrupts the tree.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new("P");
    /// let root = tree.root_key();
    /// for value in ["A", "B", "C"].iter().copied() {
    ///     let node = tree.create_node(value).unwrap();
    ///     tree.insert(node, root);
    /// }
    /// let order = tree.root().children().map(|node| *node.value()).collect::<Vec<_>>();
    /// assert_eq!(order, ["C", "B", "A"]);
    /// ```
    #[track_caller]
    pub fn insert(&mut self, node: NodeKey<K>, parent: NodeKey<K>) {
        debug_assert!(!node.is_root(), "the root node cannot be inserted anywhere");
        debug_assert!(
            self.get(&node).is_detached(),
            "node {:?} is already linked into a tree",
            &node,
        );
        debug_assert!(
            self.contains_node(parent.clone()),
            "parent {:?} is not a member of the tree",
            &parent,
        );
        let old_first_child = self.get(&parent).first_child.clone();
        let node_data = self.get_mut(&node);
        node_data.parent = Some(parent.clone());
        node_data.next_sibling = old_first_child;
        self.get_mut(&parent).first_child = Some(node);
    }
    /// Detaches a node, together with its entire subtree, from its parent.
    ///
    /// The shape of the subtree is left untouched: the node becomes the root of a freestanding subtree which is no longer reachable from the root of the tree, but can still be traversed with [`depth_first_from`], reinserted with [`insert`] or released with [`destroy_subtree`]. No memory is freed.
    ///
    /// Does nothing if the node is the root. Takes time proportional to the number of siblings which precede the node.
    ///
    /// # Panics
    /// Panics if the key does not refer to a live node. In debug builds, also panics if the node is not a member of the tree.
    ///
    /// [`depth_first_from`]: #method.depth_first_from " "
    /// [`insert`]: #method.insert " "
    /// [`destroy_subtree`]: #method.destroy_subtree " "
    #[track_caller]
    pub fn prune(&mut self, node: NodeKey<K>) {
        if node.is_root() {
            return;
        }
        debug_assert!(
            self.contains_node(node.clone()),
            "node {:?} is not a member of the tree",
            &node,
        );
        let node_data = self.get_mut(&node);
        let parent = match node_data.parent.take() {
            Some(parent) => parent,
            None => return,
        };
        let next_sibling = node_data.next_sibling.take();
        self.relink(&parent, &node, next_sibling);
    }
    /// Detaches a single node, moving its children into its former place among its siblings.
    ///
    /// The promoted children keep their relative order and are reparented to the node's former parent. The node itself ends up fully unlinked, so it can be destroyed with [`destroy_node`] or inserted elsewhere as a leaf.
    ///
    /// Does nothing if the node is the root. Takes time proportional to the number of siblings which precede the node plus the number of its children.
    ///
    /// # Panics
    /// Panics if the key does not refer to a live node. In debug builds, also panics if the node is not a member of the tree.
    ///
    /// # Example
    /// ```rust
    /// # use sibling_tree::Tree;
    /// let mut tree = Tree::<_>::new(0);
    /// let root = tree.root_key();
    /// let middle = tree.create_node(1).unwrap();
    /// let leaf = tree.create_node(2).unwrap();
    /// tree.insert(middle, root);
    /// tree.insert(leaf, middle);
    ///
    /// tree.remove(middle);
    /// assert_eq!(tree.node(leaf).unwrap().parent().unwrap().key(), &root);
    /// assert!(!tree.contains_node(middle));
    /// assert_eq!(tree.destroy_node(middle), 1);
    /// ```
    ///
    /// [`destroy_node`]: #method.destroy_node " "
    #[track_caller]
    pub fn remove(&mut self, node: NodeKey<K>) {
        if node.is_root() {
            return;
        }
        debug_assert!(
            self.contains_node(node.clone()),
            "node {:?} is not a member of the tree",
            &node,
        );
        let node_data = self.get_mut(&node);
        let parent = match node_data.parent.clone() {
            Some(parent) => parent,
            None => return,
        };
        let first_child = node_data.first_child.clone();
        let next_sibling = node_data.next_sibling.clone();
        node_data.unlink();

        let replacement = if let Some(first_child) = first_child {
            let mut last_child = first_child.clone();
            loop {
                let child = self.get_mut(&last_child);
                child.parent = Some(parent.clone());
                match child.next_sibling.clone() {
                    Some(next) => last_child = next,
                    None => {
                        child.next_sibling = next_sibling;
                        break;
                    }
                }
            }
            Some(first_child)
        } else {
            next_sibling
        };
        self.relink(&parent, &node, replacement);
    }

    /// Releases the storage of every node in a detached subtree, returning the number of nodes released.
    ///
    /// The subtree must be unreachable from the root, i.e. `node` was either never inserted or has been detached with [`prune`] or [`remove`]. Nodes are released in post-order and their values are dropped.
    ///
    /// # Panics
    /// Panics if the node is the root or does not refer to a live node. In debug builds, also panics if the node is still reachable from the root.
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
    /// assert_eq!(tree.destroy_subtree(branch), 2);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// [`prune`]: #method.prune " "
    /// [`remove`]: #method.remove " "
    #[track_caller]
    pub fn destroy_subtree(&mut self, node: NodeKey<K>) -> usize {
        let mut released = 0;
        self.destroy_subtree_with(node, |_| released += 1);
        released
    }
    /// Releases the storage of every node in a detached subtree, feeding the values of the nodes to the specified closure in post-order.
    ///
    /// See [`destroy_subtree`] for the requirements on `node`.
    ///
    /// [`destroy_subtree`]: #method.destroy_subtree " "
    #[track_caller]
    pub fn destroy_subtree_with(&mut self, node: NodeKey<K>, mut f: impl FnMut(T)) {
        assert!(
            !node.is_root(),
            "the root node is owned by the tree and cannot be destroyed",
        );
        debug_assert!(
            self.get(&node).parent.is_none() && !self.contains_node(node.clone()),
            "tried to destroy subtree {:?} which is still linked to a parent",
            &node,
        );
        // The cursor reads the links of the node it has last visited on its next step, so
        // that node is only released once the cursor has moved past it.
        let mut cursor = DepthFirstCursor::new(node);
        let mut pending = None;
        while let Some(key) = cursor.step(&*self) {
            if let Some(visited) = mem::replace(&mut pending, Some(key)) {
                f(self.release(visited));
            }
        }
        if let Some(visited) = pending {
            f(self.release(visited));
        }
    }

    /// Redirects the link in the parent's child chain which points to `target` so that it points to `replacement` instead.
    #[track_caller]
    fn relink(
        &mut self,
        parent: &NodeKey<K>,
        target: &NodeKey<K>,
        replacement: Option<NodeKey<K>>,
    ) {
        let parent_data = self.get_mut(parent);
        if parent_data.first_child.as_ref() == Some(target) {
            parent_data.first_child = replacement;
            return;
        }
        let mut previous = parent_data
            .first_child
            .clone()
            .unwrap_or_else(|| corrupted_tree("a child node's parent has no children"));
        loop {
            let previous_data = self.get_mut(&previous);
            match previous_data.next_sibling.clone() {
                Some(next) if &next == target => {
                    previous_data.next_sibling = replacement;
                    return;
                }
                Some(next) => previous = next,
                None => corrupted_tree("a child node is missing from its parent's child chain"),
            }
        }
    }
}
