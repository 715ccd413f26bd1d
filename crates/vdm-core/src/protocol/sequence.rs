//! Per-connection frame sequence numbering.
//!
//! # What is a sequence number? (for beginners)
//!
//! Every frame sent to the remote device carries a monotonically increasing
//! integer in its header, the *sequence number*.  The receiver uses it to:
//!
//! - **Detect missing frames** – receiving frames 7, 8 and 10 means frame 9
//!   never arrived (for example, the sender dropped it after an encode error).
//! - **Detect duplicates** – a frame whose number was already seen can be
//!   discarded.
//! - **Group touch frames** – the pointers of one multi-touch sample are sent
//!   as consecutive frames, so their numbers are adjacent.
//!
//! # Thread safety
//!
//! Several input threads may hand events to the same connection at once, so
//! the counter is an `AtomicU64`.  `fetch_add` reads and increments in one
//! indivisible step, so two threads calling [`SequenceCounter::next`] at the
//! same time never receive the same number.
//!
//! Note that a unique number is not the same as an ordered queue: if taking
//! the number and queueing the frame are two separate steps, two threads can
//! swap places between them.  The client's transport sink therefore holds its
//! queue lock across both.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing frame sequence counter.
///
/// Sequence numbers start at 0 and increment by 1 with each call to
/// [`next`](Self::next).  The counter wraps around at `u64::MAX` back to 0
/// without panicking; at one frame per microsecond that takes over half a
/// million years, so receivers may treat the numbers as never repeating.
///
/// # Examples
///
/// ```rust
/// use vdm_core::protocol::SequenceCounter;
///
/// let counter = SequenceCounter::new();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a new counter starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number and atomically increments the counter.
    ///
    /// `Relaxed` is enough: the value only labels frames, it does not publish
    /// any other memory.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of frames labelled so far (modulo wrap-around).
    ///
    /// This is also the number the next call to [`next`](Self::next) will
    /// return, but reading it and then calling `next` is not atomic.
    pub fn issued(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_wraps_at_u64_max() {
        // Arrange
        let counter = SequenceCounter {
            inner: AtomicU64::new(u64::MAX),
        };

        // Act / Assert
        assert_eq!(counter.next(), u64::MAX);
        assert_eq!(counter.next(), 0, "counter must wrap to 0 after u64::MAX");
    }

    #[test]
    fn test_issued_counts_without_advancing() {
        let counter = SequenceCounter::new();
        counter.next();
        counter.next();
        assert_eq!(counter.issued(), 2);
        assert_eq!(counter.next(), 2);
    }

    #[test]
    fn test_concurrent_callers_never_share_a_number() {
        // Arrange
        let counter = Arc::new(SequenceCounter::new());

        // Act
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = Arc::clone(&counter);
                thread::spawn(move || (0..500).map(|_| c.next()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread panicked"))
            .collect();

        // Assert
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 2000);
    }
}
