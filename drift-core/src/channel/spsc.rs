//! Wait-free single-producer/single-consumer ring buffer
//!
//! ## Layout
//!
//! ```text
//!            head (consumer-owned)          tail (producer-owned)
//!                 │                               │
//!                 ▼                               ▼
//!   ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!   │     │     │  A  │  B  │  C  │  D  │  E  │     │     │   N slots
//!   └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!                 └──────── live items ───────┘
//! ```
//!
//! - empty ⟺ `head == tail`
//! - full  ⟺ `(tail + 1) % N == head`
//!
//! One slot is always left unused so the two cursors alone can tell full from
//! empty; usable capacity is `N - 1`.
//!
//! ## Memory ordering
//!
//! Each side loads its own cursor `Relaxed` (nobody else writes it) and the
//! other side's cursor with `Acquire`, and publishes its own cursor with
//! `Release`:
//!
//! - producer: write slot `tail`, then `tail.store(next, Release)`. A consumer
//!   that `Acquire`-loads the new `tail` sees the fully written payload.
//! - consumer: read slot `head`, then `head.store(next, Release)`. A producer
//!   that `Acquire`-loads the new `head` may overwrite that slot.
//!
//! Weakening either cross-thread load/store to `Relaxed` is a data race on
//! slot contents.
//!
//! The two halves returned by [`channel`] are not `Clone`, so there is exactly
//! one producer and one consumer for the lifetime of the ring.

use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared ring state. Cursors sit on separate cache lines so producer and
/// consumer stores do not false-share.
struct Ring<T, const N: usize> {
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// SAFETY: a slot is only ever accessed by the producer (while it lies outside
// [head, tail)) or by the consumer (while inside), and ownership of a slot is
// handed over through the Release/Acquire pair on the cursors.
unsafe impl<T: Send, const N: usize> Send for Ring<T, N> {}
unsafe impl<T: Send, const N: usize> Sync for Ring<T, N> {}

impl<T, const N: usize> Ring<T, N> {
    const MIN_SLOTS: () = assert!(N >= 2, "SPSC ring needs at least two slots");

    fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::MIN_SLOTS;

        let slots = (0..N)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            head: CachePadded::new(AtomicUsize::new(0)),
            tail: CachePadded::new(AtomicUsize::new(0)),
            slots,
        }
    }

    #[inline(always)]
    const fn next(index: usize) -> usize {
        if index + 1 == N {
            0
        } else {
            index + 1
        }
    }

    /// Items currently in flight. Exact for the calling side's own cursor,
    /// a snapshot for the other.
    #[inline]
    fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        if tail >= head {
            tail - head
        } else {
            N - head + tail
        }
    }
}

impl<T, const N: usize> Drop for Ring<T, N> {
    fn drop(&mut self) {
        // Both halves are gone, so plain access to the cursors is exclusive.
        let mut head = *self.head.get_mut();
        let tail = *self.tail.get_mut();

        while head != tail {
            // SAFETY: slots in [head, tail) hold initialized, unread items.
            unsafe { self.slots[head].get_mut().assume_init_drop() };
            head = Self::next(head);
        }
    }
}

/// Create a ring with `N` slots (`N - 1` usable) and split it into its two halves
///
/// # Example
/// ```
/// use drift_core::channel::spsc;
///
/// let (mut tx, mut rx) = spsc::channel::<u64, 4>();
/// assert!(tx.try_push(1).is_ok());
/// assert_eq!(rx.try_pop(), Some(1));
/// assert_eq!(rx.try_pop(), None);
/// ```
pub fn channel<T, const N: usize>() -> (RingSender<T, N>, RingReceiver<T, N>) {
    let ring = Arc::new(Ring::new());
    (
        RingSender {
            ring: Arc::clone(&ring),
        },
        RingReceiver { ring },
    )
}

/// Producer half of the ring
pub struct RingSender<T, const N: usize> {
    ring: Arc<Ring<T, N>>,
}

impl<T, const N: usize> RingSender<T, N> {
    /// Publish `item` if there is room
    ///
    /// Never blocks. When the ring is full the item is handed back in `Err`
    /// and nothing is written.
    #[inline]
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        let next = Ring::<T, N>::next(tail);

        if next == self.ring.head.load(Ordering::Acquire) {
            return Err(item);
        }

        // SAFETY: `tail` is outside [head, tail), so the consumer is not
        // reading it, and only this (unique) sender writes slots.
        unsafe { (*self.ring.slots[tail].get()).write(item) };
        self.ring.tail.store(next, Ordering::Release);
        Ok(())
    }

    /// Usable capacity (`N - 1`)
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    /// True when the next `try_push` would fail (until the consumer pops)
    pub fn is_full(&self) -> bool {
        let tail = self.ring.tail.load(Ordering::Relaxed);
        Ring::<T, N>::next(tail) == self.ring.head.load(Ordering::Acquire)
    }
}

impl<T, const N: usize> fmt::Debug for RingSender<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingSender")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Consumer half of the ring
pub struct RingReceiver<T, const N: usize> {
    ring: Arc<Ring<T, N>>,
}

impl<T, const N: usize> RingReceiver<T, N> {
    /// Take the oldest unread item, if any
    ///
    /// Never blocks; returns `None` when the ring is empty.
    #[inline]
    pub fn try_pop(&mut self) -> Option<T> {
        let head = self.ring.head.load(Ordering::Relaxed);

        if head == self.ring.tail.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: `head` is inside [head, tail), so the producer finished
        // writing it (Acquire above) and will not touch it until we release.
        let item = unsafe { (*self.ring.slots[head].get()).assume_init_read() };
        self.ring
            .head
            .store(Ring::<T, N>::next(head), Ordering::Release);
        Some(item)
    }

    /// Pop until the ring is observed empty
    pub fn try_iter(&mut self) -> impl Iterator<Item = T> + '_ {
        std::iter::from_fn(move || self.try_pop())
    }

    /// Usable capacity (`N - 1`)
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        let head = self.ring.head.load(Ordering::Relaxed);
        head == self.ring.tail.load(Ordering::Acquire)
    }

    pub fn is_full(&self) -> bool {
        let head = self.ring.head.load(Ordering::Relaxed);
        Ring::<T, N>::next(self.ring.tail.load(Ordering::Acquire)) == head
    }
}

impl<T, const N: usize> fmt::Debug for RingReceiver<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingReceiver")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}
