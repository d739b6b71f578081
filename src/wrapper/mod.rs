//! Wrappers that change how a [`LinkedHashSet`](crate::LinkedHashSet) may be
//! used without changing what it stores.
//!
//! - [`ReadOnlySet`]: a borrowed view that rejects every mutation
//! - [`SynchronizedSet`]: a shared handle that serializes each call on a lock
//!
//! Both implement [`SetCollection`](crate::SetCollection), so generic code
//! can accept either one or the plain set.

#[cfg(feature = "read-only")]
mod read_only;

#[cfg(feature = "synchronized")]
mod synchronized;

#[cfg(feature = "read-only")]
pub use read_only::ReadOnlySet;

#[cfg(feature = "synchronized")]
pub use synchronized::SynchronizedSet;
