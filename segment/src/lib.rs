//! Copy-on-write leaf storage for persistent vectors.
//!
//! A persistent vector (a "bitmapped vector trie") stores its elements in
//! fixed-width leaves, and shares every leaf that an update doesn't touch
//! between the old and the new version of the tree. [`Segment`] is such a
//! leaf: an immutable sequence whose clones are cheap, and whose "mutating"
//! operations ([`Segment::set`], [`Segment::push`], ...) all return a new
//! segment and leave the original alone.
//!
//! The tree itself isn't part of this crate. What the tree needs from its
//! leaves is here: element access, copy-on-write updates, folds and maps, and
//! the bulk helpers used when (re)building a tree from a flat sequence
//! ([`Segment::initialize_from_iter`], [`leaves`], [`Segment::append_bounded`]).

pub mod error;
pub mod leaves;
pub mod segment;

/// The leaf width that trees built on [`Segment`] usually pick.
///
/// Nothing in this crate enforces a width: it's always passed explicitly.
pub const DEFAULT_LEAF_WIDTH: usize = 32;

pub use error::{Error, Result};
pub use leaves::{leaves, Leaves};
pub use segment::Segment;
