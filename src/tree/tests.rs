use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

type Key = NodeKey<usize>;

/// Builds the tree `1 -> (4, 3, 2 -> (6, 5))` by inserting 2, 3, 4 under the root and 5, 6 under 2. The returned keys are indexed by node value; index 0 is unused.
fn sample_tree() -> (Tree<u32>, Vec<Key>) {
    let mut tree: Tree<u32> = Tree::new(1);
    let mut keys = vec![NodeKey::Root, tree.root_key()];
    for value in 2..=6 {
        keys.push(tree.create_node(value).expect("failed to create a node"));
    }
    for &value in &[2, 3, 4] {
        tree.insert(keys[value], keys[1]);
    }
    for &value in &[5, 6] {
        tree.insert(keys[value], keys[2]);
    }
    (tree, keys)
}

fn values<'a>(nodes: impl Iterator<Item = NodeRef<'a, u32>>) -> Vec<u32> {
    nodes.map(|node| *node.value()).collect()
}

/// Value, parent value and child values of every reachable node, in post-order.
fn shape(tree: &Tree<u32>) -> Vec<(u32, Option<u32>, Vec<u32>)> {
    tree.depth_first()
        .map(|node| {
            (
                *node.value(),
                node.parent().map(|parent| *parent.value()),
                values(node.children()),
            )
        })
        .collect()
}

fn count_reachable(node: NodeRef<'_, u32>) -> usize {
    1 + node.children().map(count_reachable).sum::<usize>()
}

/// Checks the links of every reachable node and returns the number of reachable nodes.
fn check_links(tree: &Tree<u32>) -> usize {
    let order: Vec<Key> = tree.depth_first().map(NodeRef::into_key).collect();
    assert_eq!(order.last(), Some(&NodeKey::Root));
    assert!(tree.root().parent().is_none());
    assert!(tree.root().next_sibling().is_none());

    let unique = order.iter().copied().collect::<HashSet<_>>();
    assert_eq!(unique.len(), order.len(), "a node was visited twice");
    assert_eq!(count_reachable(tree.root()), order.len());

    for (position, key) in order.iter().enumerate() {
        let node = tree.node(*key).expect("visited a destroyed node");
        for child in node.children() {
            assert_eq!(child.parent().map(NodeRef::into_key), Some(*key));
            let child_position = order
                .iter()
                .position(|visited| visited == child.key())
                .expect("a child was never visited");
            assert!(child_position < position, "a child was visited after its parent");
        }
    }
    order.len()
}

#[test]
fn insert_prepends() {
    let mut tree: Tree<&str> = Tree::new("P");
    let root = tree.root_key();
    let a = tree.create_node("A").expect("failed to create a node");
    let b = tree.create_node("B").expect("failed to create a node");
    let c = tree.create_node("C").expect("failed to create a node");
    tree.insert(a, root);
    tree.insert(b, root);
    tree.insert(c, root);

    assert_eq!(tree.root().first_child().map(NodeRef::into_key), Some(c));
    let order = tree
        .root()
        .children()
        .map(|node| *node.value())
        .collect::<Vec<_>>();
    assert_eq!(order, ["C", "B", "A"]);
    for child in tree.root().children() {
        assert_eq!(child.parent().map(NodeRef::into_key), Some(root));
    }
}

#[test]
fn post_order() {
    let (tree, _) = sample_tree();
    assert_eq!(values(tree.depth_first()), [4, 3, 6, 5, 2, 1]);
    assert_eq!(check_links(&tree), 6);
}

#[test]
fn traversal_from_inner_node_stays_inside_subtree() {
    let (tree, keys) = sample_tree();
    assert_eq!(values(tree.depth_first_from(keys[2])), [6, 5, 2]);
    assert_eq!(values(tree.depth_first_from(keys[4])), [4]);
    let node = tree.node(keys[2]).expect("node 2 is alive");
    assert_eq!(values(node.depth_first()), [6, 5, 2]);
}

#[test]
fn single_root() {
    let tree: Tree<u32> = Tree::new(7);
    let mut iter = tree.depth_first();
    assert_eq!(iter.next().map(|node| *node.value()), Some(7));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    assert!(iter.cursor().is_finished());
}

#[test]
fn prune_isolates_subtree() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[2]);

    assert!(!tree.contains_node(keys[2]));
    assert!(!tree.contains_node(keys[5]));
    assert!(!tree.contains_node(keys[6]));
    assert!(tree.contains_node(keys[3]));
    assert!(tree.contains_node(keys[4]));

    let pruned = tree.node(keys[2]).expect("pruning must not free nodes");
    assert!(pruned.parent().is_none());
    assert!(pruned.next_sibling().is_none());
    assert!(pruned.is_detached());
    assert_eq!(values(pruned.children()), [6, 5]);
    assert_eq!(values(tree.depth_first_from(keys[2])), [6, 5, 2]);

    assert_eq!(values(tree.root().children()), [4, 3]);
    assert_eq!(values(tree.depth_first()), [4, 3, 1]);
    assert_eq!(check_links(&tree), 3);
    assert_eq!(tree.len(), 6);
}

#[test]
fn prune_first_and_last_child() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[4]);
    assert_eq!(values(tree.root().children()), [3, 2]);
    tree.prune(keys[2]);
    assert_eq!(values(tree.root().children()), [3]);
    tree.prune(keys[3]);
    assert!(tree.root().is_leaf());
    assert_eq!(values(tree.depth_first()), [1]);
}

#[test]
fn remove_promotes_children() {
    let (mut tree, keys) = sample_tree();
    tree.remove(keys[2]);

    assert!(tree.contains_node(keys[3]));
    assert!(tree.contains_node(keys[4]));
    assert!(!tree.contains_node(keys[2]));
    assert_eq!(values(tree.root().children()), [4, 3, 6, 5]);
    for &value in &[5, 6] {
        let promoted = tree.node(keys[value]).expect("node is alive");
        assert_eq!(promoted.parent().map(NodeRef::into_key), Some(keys[1]));
    }

    let removed = tree.node(keys[2]).expect("removing must not free nodes");
    assert!(removed.parent().is_none());
    assert!(removed.first_child().is_none());
    assert!(removed.next_sibling().is_none());
    assert_eq!(check_links(&tree), 5);
}

#[test]
fn remove_leaf_and_first_child() {
    let (mut tree, keys) = sample_tree();
    // Leaf in the middle of the chain
    tree.remove(keys[3]);
    assert_eq!(values(tree.root().children()), [4, 2]);
    // Leftmost child
    tree.remove(keys[4]);
    assert_eq!(values(tree.root().children()), [2]);
    // Only child, with children of its own
    tree.remove(keys[2]);
    assert_eq!(values(tree.root().children()), [6, 5]);
    assert_eq!(values(tree.depth_first()), [6, 5, 1]);
    assert_eq!(check_links(&tree), 3);
}

#[test]
fn root_is_unaffected() {
    let (mut tree, _) = sample_tree();
    let before = shape(&tree);
    let root = tree.root_key();
    tree.prune(root);
    assert_eq!(shape(&tree), before);
    tree.remove(root);
    assert_eq!(shape(&tree), before);
}

#[test]
fn contains_node_membership() {
    let (mut tree, keys) = sample_tree();
    let loose = tree.create_node(10).expect("failed to create a node");
    assert!(!tree.contains_node(loose));
    assert!(tree.node(loose).expect("node is alive").is_detached());
    for key in &keys[1..] {
        assert!(tree.contains_node(*key));
    }
    assert!(tree.contains_node(tree.root_key()));

    tree.insert(loose, keys[5]);
    assert!(tree.contains_node(loose));
    assert_eq!(values(tree.depth_first()), [4, 3, 6, 10, 5, 2, 1]);
}

#[test]
fn reset_is_idempotent() {
    let (tree, _) = sample_tree();
    let mut iter = tree.depth_first();
    iter.next();
    iter.next();
    iter.reset();
    let first = values(iter.by_ref());
    assert!(iter.next().is_none());
    iter.reset();
    let second = values(iter.by_ref());
    assert_eq!(first, [4, 3, 6, 5, 2, 1]);
    assert_eq!(first, second);
}

#[test]
fn cursor_steps_without_borrowing() {
    let (mut tree, keys) = sample_tree();
    let mut cursor = DepthFirstCursor::new(tree.root_key());
    assert_eq!(cursor.step(&tree), Some(keys[4]));
    assert_eq!(cursor.state(), TraversalState::GoBroader);
    // Values are not links, so changing them mid-walk is fine
    *tree.value_mut(&keys[4]).expect("node is alive") = 40;
    assert_eq!(cursor.step(&tree), Some(keys[3]));
    assert_eq!(cursor.current(), Some(&keys[3]));

    let mut rest = Vec::new();
    while let Some(key) = cursor.step(&tree) {
        rest.push(key);
    }
    assert_eq!(rest, [keys[6], keys[5], keys[2], keys[1]]);
    assert!(cursor.is_finished());
    assert_eq!(tree.value(&keys[4]), Some(&40));
}

#[test]
fn reinsert_pruned_subtree() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[2]);
    tree.insert(keys[2], keys[3]);
    assert_eq!(values(tree.depth_first()), [4, 6, 5, 2, 3, 1]);
    assert_eq!(check_links(&tree), 6);
}

#[test]
fn destroy_node_releases_storage() {
    let (mut tree, keys) = sample_tree();
    tree.remove(keys[3]);
    assert_eq!(tree.destroy_node(keys[3]), 3);
    assert_eq!(tree.len(), 5);
    assert!(tree.node(keys[3]).is_none());
    assert!(tree.value(&keys[3]).is_none());
    assert_eq!(tree.num_holes(), 1);

    // The released slot is handed out again
    let reused = tree.create_node(7).expect("failed to create a node");
    assert_eq!(reused, keys[3]);
    assert!(tree.is_dense());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "still linked to a parent or sibling")]
fn destroying_a_child_of_a_pruned_node_is_caught() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[2]);
    // Unreachable from the root, but still hanging off node 2
    tree.destroy_node(keys[6]);
}

#[test]
fn destroy_node_orphans_children() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[2]);
    assert_eq!(tree.destroy_node(keys[2]), 2);

    for &value in &[5, 6] {
        let orphan = tree.node(keys[value]).expect("children are not released");
        assert!(orphan.is_detached());
        assert!(orphan.next_sibling().is_none());
    }
    tree.insert(keys[5], keys[1]);
    assert_eq!(values(tree.root().children()), [5, 4, 3]);
    assert_eq!(check_links(&tree), 4);

    assert_eq!(tree.destroy_node(keys[6]), 6);
    assert_eq!(tree.len(), 4);
}

#[test]
fn destroy_subtree_releases_every_node() {
    let (mut tree, keys) = sample_tree();
    tree.prune(keys[2]);
    let mut released = Vec::new();
    tree.destroy_subtree_with(keys[2], |value| released.push(value));
    assert_eq!(released, [6, 5, 2]);
    assert_eq!(tree.len(), 3);
    for &value in &[2, 5, 6] {
        assert!(tree.node(keys[value]).is_none());
    }
    assert_eq!(check_links(&tree), 3);

    tree.prune(keys[4]);
    assert_eq!(tree.destroy_subtree(keys[4]), 1);
    assert_eq!(values(tree.depth_first()), [3, 1]);
}

#[test]
#[should_panic(expected = "invalid node key")]
fn destroyed_key_panics() {
    let mut tree: Tree<u32> = Tree::new(0);
    let node = tree.create_node(1).expect("failed to create a node");
    tree.destroy_node(node);
    tree.depth_first_from(node);
}

#[test]
#[should_panic(expected = "cannot be destroyed")]
fn root_cannot_be_destroyed() {
    let mut tree: Tree<u32> = Tree::new(0);
    let root = tree.root_key();
    tree.destroy_subtree(root);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "already linked")]
fn double_insert_is_caught() {
    let (mut tree, keys) = sample_tree();
    tree.insert(keys[5], keys[1]);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "not a member of the tree")]
fn prune_outside_the_tree_is_caught() {
    let mut tree: Tree<u32> = Tree::new(0);
    let loose = tree.create_node(1).expect("failed to create a node");
    tree.prune(loose);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "still linked to a parent or sibling")]
fn destroying_a_member_is_caught() {
    let (mut tree, keys) = sample_tree();
    tree.destroy_node(keys[4]);
}

#[test]
fn with_storage_and_accessors() {
    let mut tree = SparseVecTree::with_storage(crate::storage::SparseVec::new(), String::from("root"));
    assert_eq!(tree.len(), 1);
    assert!(tree.root().is_root());
    assert!(!tree.root().is_detached());
    let child = tree.create_node(String::from("child")).expect("failed to create a node");
    let root = tree.root_key();
    tree.insert(child, root);
    assert!(tree.root().is_branch());
    tree.value_mut(&child).expect("node is alive").push('!');
    let siblings = tree
        .node(child)
        .expect("node is alive")
        .siblings()
        .map(|node| node.value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(siblings, ["child!"]);
    assert_eq!(tree.into_root_value(), "root");
}

#[test]
#[should_panic(expected = "must not contain any nodes")]
fn with_storage_rejects_used_storage() {
    let mut storage: crate::storage::SparseVec<Node<u32, usize>> = Storage::new();
    storage.add(Node::unlinked(1_u32));
    let _tree: Tree<u32> = Tree::with_storage(storage, 0);
}

#[cfg(feature = "arrayvec")]
#[test]
fn fixed_capacity_hands_the_value_back() {
    use crate::storage::SparseStorageSlot;
    let mut tree: ArrayVecTree<u32, [SparseStorageSlot<Node<u32, usize>>; 2]> = Tree::new(0);
    let root = tree.root_key();
    assert_eq!(tree.capacity(), 2);
    let first = tree.create_node(1).expect("failed to create a node");
    let second = tree.create_node(2).expect("failed to create a node");
    tree.insert(first, root);
    tree.insert(second, root);

    let error = tree.create_node(3).expect_err("the storage should be full");
    assert_eq!(error.into_value(), 3);
    assert_eq!(tree.len(), 3);
    assert_eq!(values_any(&tree), [2, 1, 0]);

    tree.prune(second);
    tree.destroy_node(second);
    let third = tree.create_node(3).expect("a slot was released");
    tree.insert(third, first);
    assert_eq!(values_any(&tree), [3, 1, 0]);
}

#[cfg(feature = "arrayvec")]
fn values_any<K, S>(tree: &Tree<u32, K, S>) -> Vec<u32>
where
    S: Storage<Element = Node<u32, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    tree.depth_first().map(|node| *node.value()).collect()
}

#[cfg(feature = "slotmap")]
#[test]
fn slotmap_storage() {
    use slotmap::{DefaultKey, SlotMap};
    let mut tree: Tree<&str, DefaultKey, SlotMap<DefaultKey, Node<&str, DefaultKey>>> =
        Tree::new("root");
    let root = tree.root_key();
    let a = tree.create_node("a").expect("failed to create a node");
    let b = tree.create_node("b").expect("failed to create a node");
    tree.insert(a, root);
    tree.insert(b, a);
    tree.remove(a);
    assert_eq!(tree.destroy_node(a), "a");
    let order = tree.depth_first().map(|node| *node.value()).collect::<Vec<_>>();
    assert_eq!(order, ["b", "root"]);
}

#[derive(Clone, Debug)]
enum Operation {
    Insert(usize),
    Prune(usize),
    Remove(usize),
    Reinsert(usize, usize),
    Destroy(usize),
    DestroyNode(usize),
}

fn strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        8 => any::<usize>().prop_map(Operation::Insert),
        2 => any::<usize>().prop_map(Operation::Prune),
        2 => any::<usize>().prop_map(Operation::Remove),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(which, parent)| Operation::Reinsert(which, parent)),
        1 => any::<usize>().prop_map(Operation::Destroy),
        1 => any::<usize>().prop_map(Operation::DestroyNode),
    ]
}

proptest! {
    #[test]
    fn links_stay_consistent(operations in prop::collection::vec(strategy(), 0..128)) {
        let mut tree: Tree<u32> = Tree::new(0);
        let mut detached: Vec<Key> = Vec::new();
        let mut next_value = 1;

        for operation in operations {
            // Post-order, so the root always comes last
            let members: Vec<Key> = tree.depth_first().map(NodeRef::into_key).collect();
            let non_root = &members[..members.len() - 1];
            match operation {
                Operation::Insert(parent) => {
                    let node = tree.create_node(next_value).expect("failed to create a node");
                    next_value += 1;
                    tree.insert(node, members[parent % members.len()]);
                    prop_assert!(tree.contains_node(node));
                }
                Operation::Prune(which) => {
                    if non_root.is_empty() {
                        continue;
                    }
                    let node = non_root[which % non_root.len()];
                    let subtree_size = tree.depth_first_from(node).count();
                    tree.prune(node);
                    prop_assert!(!tree.contains_node(node));
                    prop_assert_eq!(tree.depth_first_from(node).count(), subtree_size);
                    detached.push(node);
                }
                Operation::Remove(which) => {
                    if non_root.is_empty() {
                        continue;
                    }
                    let node = non_root[which % non_root.len()];
                    let reachable_before = members.len();
                    tree.remove(node);
                    prop_assert!(!tree.contains_node(node));
                    prop_assert!(tree.node(node).expect("node is alive").is_leaf());
                    prop_assert_eq!(tree.depth_first().count(), reachable_before - 1);
                    detached.push(node);
                }
                Operation::Reinsert(which, parent) => {
                    if detached.is_empty() {
                        continue;
                    }
                    let node = detached.swap_remove(which % detached.len());
                    tree.insert(node, members[parent % members.len()]);
                }
                Operation::Destroy(which) => {
                    if detached.is_empty() {
                        continue;
                    }
                    let node = detached.swap_remove(which % detached.len());
                    let subtree_size = tree.depth_first_from(node).count();
                    prop_assert_eq!(tree.destroy_subtree(node), subtree_size);
                }
                Operation::DestroyNode(which) => {
                    if detached.is_empty() {
                        continue;
                    }
                    let node = detached.swap_remove(which % detached.len());
                    let children: Vec<Key> = tree
                        .node(node)
                        .expect("node is alive")
                        .children_keys()
                        .collect();
                    tree.destroy_node(node);
                    prop_assert!(tree.node(node).is_none());
                    detached.extend(children);
                }
            }

            let reachable = check_links(&tree);
            let unreachable = detached
                .iter()
                .map(|&node| tree.depth_first_from(node).count())
                .sum::<usize>();
            prop_assert_eq!(tree.len(), reachable + unreachable);
            for &node in &detached {
                prop_assert!(tree.node(node).expect("node is alive").is_detached());
            }
        }
    }
}
