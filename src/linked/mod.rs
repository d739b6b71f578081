//! Insertion-ordered set storage and its set algebra.
//!
//! - [`LinkedHashSet`]: the set itself, with single-element operations
//! - set algebra (`union_with`, `intersect_with`, ...) implemented on top of
//!   the same type in a separate module
//!
//! The node arena and the hash index that back the set are internal.

mod algebra;
mod arena;
mod hash_set;
mod index;

pub use hash_set::IntoIter;
pub use hash_set::Iter;
pub use hash_set::LinkedHashSet;
