//! Implements arena-allocated k-ary trees in left-child/right-sibling encoding and interfaces to work with them.
//!
//! # Overview
//! A tree stores an arbitrary number of children per node without any per-node collection: every node carries exactly three links besides its value, namely its parent, its leftmost child and its right sibling. The children of a node thus form a singly linked list threaded through the children themselves.
//!
//! The trees use the technique of ["arena-allocated trees"][arena tree blog post], described by Ben Lovy: the nodes live in some sort of backing storage, typically a [`Vec`] (or its variants, like [`SmallVec`] or [`ArrayVec`]), and instead of using pointers to link nodes together, keys into the storage are used. The storage doubles as the allocator for nodes — creating a node reserves a slot in it, destroying a node releases the slot, and everything in between is pure relinking which neither allocates nor frees.
//!
//! The following operations are provided:
//! - **Lifecycle** — [`create_node`] and [`destroy_node`], plus [`destroy_subtree`] for whole detached subtrees
//! - **Structure** — [`insert`] attaches a node as the new leftmost child of another one, [`prune`] detaches a node together with its subtree, [`remove`] detaches a single node and promotes its children into its place
//! - **Traversal** — [`depth_first`] walks the tree in post-order using nothing but the links of the nodes, without a stack or recursion; [`contains_node`] is built on top of it
//!
//! # Storage
//! The trait used for defining the "arena" type used is `Storage`. Implementing it directly isn't the only way to get your type to be supported by the tree — `ListStorage` is a trait which allows you to define an arena storage in terms of a list-like collection.
//!
//! Several types from both the standard library and external crates already implement `Storage` and `ListStorage` out of the box:
//! - [`Vec`], [`SmallVec`] and [`ArrayVec`] — `ListStorage`
//! - [`VecDeque`] — `ListStorage`, does not use `VecDeque` semantics and is simply provided for convenience
//! - [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`] — `Storage`
//!
//! You can opt out of one or multiple of those implementations using feature flags as described by the *Feature flags* section.
//!
//! ## Sparse storage
//! List storages are wrapped in `SparseStorage`, which turns them into slot allocators with stable keys: a destroyed node leaves a hole behind instead of shifting the nodes after it, and holes are reused by subsequently created nodes before the list grows again.
//!
//! ## Running out of room
//! Creating a node is fallible: if the storage cannot provide room for the node, which happens when an [`ArrayVec`]-backed tree is full or when the memory allocator refuses to grow a [`Vec`], [`create_node`] returns an [`AllocationError`] which hands the value back, and the tree is left untouched.
//!
//! # Contract violations
//! Structural operations have preconditions, such as "the node is a member of the tree" for [`prune`] and [`remove`] or "the node is not linked to anything" for [`insert`]. Violating them is a bug in the calling code rather than a recoverable condition, so they are checked with debug assertions, which walk the whole tree in the case of membership checks. Release builds skip the checks and never walk the tree implicitly; violating a precondition there leaves the links of the tree in an unspecified (but memory-safe) state. Keys are not generational: a key whose node has been destroyed either panics when used or, once its slot is handed out again, refers to the newly created node.
//!
//! # Feature flags
//! - `std` (**enabled by default**) - enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for some types.
//! - `unwind_safety` (**enabled by default**) — exits the process instead of unwinding when a corrupted tree is detected, so that no destructor gets to observe the broken links. Requires `std`.
//! - `alloc` (**enabled by default**) — adds `ListStorage` trait implementations for standard library containers. *This does not require standard library support and will only panic at runtime in `no_std` environments without an allocator.*
//! - `arrayvec` (**enabled by default**) — adds a `ListStorage` trait implementation for [`ArrayVec`], which makes a tree with a fixed number of nodes and no memory allocations possible. One of `alloc` and `arrayvec` is required.
//! - `smallvec` — adds a `ListStorage` trait implementation for [`SmallVec`].
//! - `slotmap` — adds `Storage` trait implementations for [`SlotMap`], [`HopSlotMap`] and [`DenseSlotMap`].
//!
//! # Public dependencies
//! - `arrayvec` (*optional*) — `^0.5`
//! - `smallvec` (*optional*) — `^1.4`
//! - `slotmap` (*optional*) — `^1.0`
//!
//! [`create_node`]: tree/struct.Tree.html#method.create_node " "
//! [`destroy_node`]: tree/struct.Tree.html#method.destroy_node " "
//! [`destroy_subtree`]: tree/struct.Tree.html#method.destroy_subtree " "
//! [`insert`]: tree/struct.Tree.html#method.insert " "
//! [`prune`]: tree/struct.Tree.html#method.prune " "
//! [`remove`]: tree/struct.Tree.html#method.remove " "
//! [`depth_first`]: tree/struct.Tree.html#method.depth_first " "
//! [`contains_node`]: tree/struct.Tree.html#method.contains_node " "
//! [`AllocationError`]: struct.AllocationError.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`HopSlotMap`]: https://docs.rs/slotmap/*/slotmap/hop/struct.HopSlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::fn_params_excessive_bools,
    clippy::implicit_hasher,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wild_err_arm,
    clippy::match_wildcard_for_single_variants,
    // sick of this stupid lint, disabling
    // clippy::module_name_repetitions,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unicode_not_nfc,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, ListStorage, DefaultStorage};

pub mod tree;
#[doc(no_inline)]
pub use tree::{
    Tree,
    Node,
    NodeKey,
    NodeRef,
    DepthFirstIter,
    DepthFirstCursor,
    TraversalState,
};

/// A prelude for using the crate, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        SparseStorage as SparseTreeStorage,
        DefaultStorage as DefaultTreeStorage,
    };
    #[doc(no_inline)]
    pub use crate::tree::{
        Tree,
        NodeKey as TreeNodeKey,
        NodeRef as TreeNodeRef,
        DepthFirstIter as TreeDepthFirstIter,
    };
    #[doc(no_inline)]
    pub use crate::AllocationError as TreeAllocationError;
}

pub(crate) mod util;

use core::fmt::{self, Formatter, Display};

/// The error type returned when the storage of a tree cannot provide room for another node, which happens when a fixed-capacity storage is full or when the memory allocator fails.
///
/// The value which was supposed to be stored in the node is handed back, so that it doesn't get dropped if it could instead be reused in the event of a failure.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct AllocationError<T> {
    /// The value of the node which could not be created.
    pub value: T,
}
impl<T> AllocationError<T> {
    /// Consumes the error and returns the value of the node which could not be created.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_value(self) -> T {
        self.value
    }
}
impl<T> Display for AllocationError<T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("the storage could not allocate room for another node")
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<T: fmt::Debug> std::error::Error for AllocationError<T> {}
