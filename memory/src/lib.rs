//! Cursor buffers, a bounded buffer pool, and chunked traversal.
//!
//! # Status
//!
//! `groundwork-memory` is **ALPHA** software and is not yet recommended for
//! production use. Developers should expect breaking changes and occasional
//! instability.

mod buffer;
pub use buffer::Buffer;
mod chunker;
pub use chunker::{BufferChunker, Chunks};
mod pool;
pub use pool::{BufferPool, PooledBuffer};
