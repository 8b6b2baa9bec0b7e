//! A bounded pool of reusable fixed-size buffers.
//!
//! Provides cursor [`Buffer`]s that are recycled instead of freed, reducing
//! allocation churn on hot paths that consume many short-lived buffers of one
//! size. A buffer checked out with [`BufferPool::acquire`] is handed back to
//! the pool automatically when its last owner drops it; the pool then keeps
//! it for reuse or deallocates it, depending on the retention limit in effect
//! at that moment.
//!
//! # Thread Safety
//!
//! [`BufferPool`] is `Send + Sync` and can be safely shared across threads.
//! The idle list, the retention limit, and all counters form one unit of
//! mutation behind a single mutex, so readers never observe a partially
//! applied transition (e.g. a high-water mark bumped before the buffer is
//! actually present in the idle list).
//!
//! # Pool Lifecycle
//!
//! Checked-out buffers hold a weak reference to the pool, so:
//! - If a buffer is released after every pool handle is dropped, it is
//!   deallocated directly instead of being returned to the idle list.
//! - The pool can be dropped while buffers are still in use; those buffers
//!   remain valid and are deallocated when they are dropped.
//!
//! # Retention
//!
//! The retention limit bounds how many idle buffers are kept, decided at
//! release time only. Raising the limit takes effect for subsequent releases
//! immediately. Lowering it evicts nothing: idle buffers over the new limit
//! stay until [`BufferPool::drain`] reclaims them.

use crate::Buffer;
use groundwork_collections::Deque;
use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, trace};

/// State guarded as a single unit: the idle list and every counter that must
/// stay consistent with it.
struct State {
    /// Maximum number of idle buffers retained at release time.
    limit: usize,
    /// Idle buffers, newest at the head.
    idle: Deque<Buffer>,
    /// Number of buffers ever freshly allocated by this pool.
    total_instances: u64,
    /// Number of acquisitions satisfied by reuse.
    cache_hits: u64,
    /// High-water mark of the idle list.
    largest_idle: usize,
}

struct Shared {
    /// Capacity of every buffer this pool produces. Fixed at construction.
    buffer_size: usize,
    state: Mutex<State>,
}

impl Shared {
    /// Disposal policy for a terminal release: keep the buffer if the idle
    /// list is under the limit in effect right now, otherwise let it drop.
    fn release(&self, buffer: Buffer) {
        let mut state = self.state.lock().unwrap();
        if state.idle.len() < state.limit {
            state.idle.prepend(buffer);
            if state.idle.len() > state.largest_idle {
                state.largest_idle = state.idle.len();
            }
            trace!(idle = state.idle.len(), "buffer returned to pool");
        } else {
            trace!(idle = state.idle.len(), "idle list full, buffer dropped");
        }
        // A rejected buffer deallocates here, after the lock guard: the pool
        // never runs buffer code while holding its lock.
    }
}

/// A bounded cache of reusable fixed-size buffers.
///
/// Every buffer the pool produces has the same capacity, chosen at
/// construction. [`BufferPool::acquire`] pops the most recently released idle
/// buffer (better cache locality) or allocates a fresh one when the idle list
/// is empty. Handles are cheap to clone; all clones address the same pool.
///
/// ```
/// use groundwork_memory::BufferPool;
///
/// let pool = BufferPool::new(3, 1024);
/// let mut buffer = pool.acquire();
/// buffer.put_slice(b"payload");
/// drop(buffer); // returned to the pool, not freed
/// assert_eq!(pool.cache_hits(), 0);
/// let _again = pool.acquire();
/// assert_eq!(pool.cache_hits(), 1);
/// ```
#[derive(Clone)]
pub struct BufferPool {
    shared: Arc<Shared>,
}

impl BufferPool {
    /// Create an empty pool.
    ///
    /// `limit` is the maximum number of idle buffers retained; `buffer_size`
    /// is the capacity of every buffer the pool allocates. A pool with
    /// `limit == 0` caches nothing: every acquisition allocates and every
    /// release deallocates.
    pub fn new(limit: usize, buffer_size: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                buffer_size,
                state: Mutex::new(State {
                    limit,
                    idle: Deque::new(),
                    total_instances: 0,
                    cache_hits: 0,
                    largest_idle: 0,
                }),
            }),
        }
    }

    /// Obtain a buffer, reusing an idle one when possible.
    ///
    /// The returned buffer always has capacity [`BufferPool::buffer_size`]
    /// and cleared cursors, whether fresh or reused; no content semantics
    /// leak across reuse. It returns to the pool when dropped.
    pub fn acquire(&self) -> PooledBuffer {
        let mut state = self.shared.state.lock().unwrap();
        let buffer = match state.idle.remove_first() {
            Some(mut buffer) => {
                state.cache_hits += 1;
                buffer.clear();
                buffer
            }
            None => {
                state.total_instances += 1;
                Buffer::allocate(self.shared.buffer_size)
            }
        };
        drop(state);

        PooledBuffer {
            buffer: ManuallyDrop::new(buffer),
            pool: Arc::downgrade(&self.shared),
        }
    }

    /// Set the retention limit, returning the previous one.
    ///
    /// Takes effect for releases from this moment on. Lowering the limit
    /// does not evict: the idle list may legitimately exceed the new limit
    /// until [`BufferPool::drain`] is called.
    pub fn set_limit(&self, limit: usize) -> usize {
        let mut state = self.shared.state.lock().unwrap();
        let previous = state.limit;
        state.limit = limit;
        debug!(previous, limit, idle = state.idle.len(), "limit changed");
        previous
    }

    /// Deallocate idle buffers until the idle list is within the limit,
    /// returning how many were destroyed.
    ///
    /// Idempotent: with no intervening releases, a second drain returns 0.
    pub fn drain(&self) -> usize {
        let mut state = self.shared.state.lock().unwrap();
        let mut drained = 0;
        while state.idle.len() > state.limit {
            state.idle.remove_first();
            drained += 1;
        }
        if drained > 0 {
            debug!(drained, idle = state.idle.len(), "drained idle buffers");
        }
        drained
    }

    /// Returns the capacity of every buffer this pool produces.
    pub fn buffer_size(&self) -> usize {
        self.shared.buffer_size
    }

    /// Returns the current retention limit.
    pub fn limit(&self) -> usize {
        self.shared.state.lock().unwrap().limit
    }

    /// Returns the number of buffers currently idle in the pool.
    pub fn current_idle(&self) -> usize {
        self.shared.state.lock().unwrap().idle.len()
    }

    /// Returns the largest number of idle buffers ever observed.
    pub fn largest_idle(&self) -> usize {
        self.shared.state.lock().unwrap().largest_idle
    }

    /// Returns the number of buffers ever freshly allocated by this pool.
    ///
    /// Reuse does not affect this count.
    pub fn total_instances(&self) -> u64 {
        self.shared.state.lock().unwrap().total_instances
    }

    /// Returns the number of acquisitions satisfied by reuse.
    pub fn cache_hits(&self) -> u64 {
        self.shared.state.lock().unwrap().cache_hits
    }
}

impl fmt::Display for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock().unwrap();
        write!(
            f,
            "BufferPool limit={} buffer_size={} idle={} largest_idle={} total_instances={} cache_hits={}",
            state.limit,
            self.shared.buffer_size,
            state.idle.len(),
            state.largest_idle,
            state.total_instances,
            state.cache_hits,
        )
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock().unwrap();
        f.debug_struct("BufferPool")
            .field("limit", &state.limit)
            .field("buffer_size", &self.shared.buffer_size)
            .field("idle", &state.idle.len())
            .field("largest_idle", &state.largest_idle)
            .field("total_instances", &state.total_instances)
            .field("cache_hits", &state.cache_hits)
            .finish()
    }
}

/// A buffer checked out from a [`BufferPool`].
///
/// Dereferences to [`Buffer`]; holders use it like any owned buffer. The
/// back-reference to the issuing pool is installed at acquisition and never
/// changes, so a buffer cannot be returned to a pool other than its origin.
/// Dropping the last owner hands the buffer to the pool's disposal policy
/// exactly once.
pub struct PooledBuffer {
    buffer: ManuallyDrop<Buffer>,
    /// Reference to the issuing pool.
    pool: Weak<Shared>,
}

impl PooledBuffer {
    /// Detach the buffer from its pool.
    ///
    /// The returned [`Buffer`] will be deallocated normally instead of
    /// returning to the pool.
    pub fn into_inner(self) -> Buffer {
        // Wrap self in ManuallyDrop so the Drop impl does not also run.
        let mut me = ManuallyDrop::new(self);
        // SAFETY: me is wrapped in ManuallyDrop so its Drop impl won't run.
        // ManuallyDrop::take moves the buffer out, leaving the wrapper empty.
        let buffer = unsafe { ManuallyDrop::take(&mut me.buffer) };
        drop(std::mem::take(&mut me.pool));
        buffer
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        // SAFETY: Drop is only called once. into_inner() wraps self in
        // ManuallyDrop to prevent this Drop impl from running after
        // ownership is transferred.
        let buffer = unsafe { ManuallyDrop::take(&mut self.buffer) };
        if let Some(pool) = self.pool.upgrade() {
            pool.release(buffer);
        }
        // else: buffer is dropped here, which deallocates it
    }
}

impl Deref for PooledBuffer {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }
}

impl AsRef<[u8]> for PooledBuffer {
    fn as_ref(&self) -> &[u8] {
        self.buffer.as_slice()
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("buffer", &*self.buffer)
            .finish()
    }
}
