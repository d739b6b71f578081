//! # linkset
//!
//! An insertion-ordered hash set with an order-preserving set algebra.
//!
//! ## Overview
//!
//! [`LinkedHashSet`] stores each distinct element once and iterates in the
//! order elements were first added. On top of the usual single-element
//! operations it provides in-place set algebra whose effect on ordering is
//! fully specified:
//!
//! - **Union** appends new elements in the order `other` first yields them
//! - **Intersection** and **difference** keep the surviving elements where
//!   they were
//! - **Symmetric difference** removes shared elements and appends the rest
//!   of `other`
//!
//! Identity is decided by an [`Equivalence`] strategy, so a set can treat
//! `"Rust"` and `"rust"` as the same element without wrapping its values.
//!
//! Two wrappers reuse the same store:
//!
//! - [`ReadOnlySet`]: a borrowed view that rejects every mutation
//! - [`SynchronizedSet`]: a cloneable handle that guards each call with a lock
//!
//! All three implement [`SetCollection`].
//!
//! ## Feature Flags
//!
//! - `read-only`: [`ReadOnlySet`] (default)
//! - `synchronized`: [`SynchronizedSet`] (default)
//! - `serde`: `Serialize` and `Deserialize` for [`LinkedHashSet`]
//! - `fxhash`: hash with `rustc-hash`'s `FxBuildHasher` by default
//! - `ahash`: hash with `ahash::RandomState` by default
//! - `full`: `read-only`, `synchronized` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use linkset::prelude::*;
//!
//! let mut set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
//! set.union_with([10, 30, 15]);
//! set.except_with([1]);
//!
//! assert_eq!(set.to_string(), "{10, 5, 30, 15}");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the set types, the shared trait, and the strategy types.
///
/// # Usage
///
/// ```rust
/// use linkset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::SetCollection;
    pub use crate::equivalence::{Equivalence, KeyEquivalence, NaturalEquivalence};
    pub use crate::error::{SetError, SetResult};
    pub use crate::linked::LinkedHashSet;

    #[cfg(feature = "read-only")]
    pub use crate::wrapper::ReadOnlySet;

    #[cfg(feature = "synchronized")]
    pub use crate::wrapper::SynchronizedSet;
}

pub mod collection;
pub mod equivalence;
pub mod error;
pub mod linked;

#[cfg(any(feature = "read-only", feature = "synchronized"))]
pub mod wrapper;

pub use collection::SetCollection;
pub use equivalence::{DefaultHashBuilder, Equivalence, KeyEquivalence, NaturalEquivalence};
pub use error::{SetError, SetResult};
pub use linked::{IntoIter, Iter, LinkedHashSet};

#[cfg(feature = "read-only")]
pub use wrapper::ReadOnlySet;

#[cfg(feature = "synchronized")]
pub use wrapper::SynchronizedSet;
