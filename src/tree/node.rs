use core::fmt::Debug;

/// The key of a node inside a [`Tree`].
///
/// The root node is stored by value inside the tree itself and is therefore addressed by the dedicated `Root` variant; all other nodes live in the tree's storage and are addressed by their storage key.
///
/// Keys compare by identity: two distinct nodes never share a key for as long as both are alive, regardless of the values they carry. A key whose node has been destroyed may be handed out again by the storage for a newly created node.
///
/// [`Tree`]: struct.Tree.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey<K> {
    /// The root node of the tree.
    Root,
    /// A node allocated in the tree's storage.
    Slot(K),
}
impl<K> NodeKey<K> {
    /// Returns `true` if the key refers to the root node, `false` otherwise.
    #[inline(always)]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
    /// Returns the storage key of the node, or `None` for the root node.
    #[inline]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_slot(self) -> Option<K> {
        match self {
            Self::Root => None,
            Self::Slot(key) => Some(key),
        }
    }
}

/// A node of a tree.
///
/// Created by the tree internally and only publicly exposed so that tree storages' generic arguments could be specified.
#[derive(Copy, Clone, Debug, Hash)]
pub struct Node<T, K>
where
    K: Clone + Debug + Eq,
{
    pub(super) value: T,
    pub(super) parent: Option<NodeKey<K>>,
    pub(super) first_child: Option<NodeKey<K>>,
    pub(super) next_sibling: Option<NodeKey<K>>,
}

impl<T, K> Node<T, K>
where
    K: Clone + Debug + Eq,
{
    /// Creates a node which is not linked to anything yet, which is the state both of the root node and of freshly allocated nodes.
    #[inline(always)]
    pub(super) const fn unlinked(value: T) -> Self {
        Self {
            value,
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }
    /// Returns `true` if the node has neither a parent nor a sibling, i.e. it can be inserted somewhere.
    #[inline]
    pub(super) fn is_detached(&self) -> bool {
        self.parent.is_none() && self.next_sibling.is_none()
    }
    /// Drops every link of the node, keeping only the value.
    #[inline]
    pub(super) fn unlink(&mut self) {
        self.parent = None;
        self.first_child = None;
        self.next_sibling = None;
    }
}
