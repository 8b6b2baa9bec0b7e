//! Collection types shared across primitives.
//!
//! # Status
//!
//! `groundwork-collections` is **ALPHA** software and is not yet recommended for
//! production use. Developers should expect breaking changes and occasional
//! instability.

mod deque;
pub use deque::Deque;
mod path;
pub use path::PathName;
