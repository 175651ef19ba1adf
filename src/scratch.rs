//! Per-thread scratch buffers and last-error state.
//!
//! The engine's recursive identifier packing needs short-lived string
//! buffers; borrowing them from a small per-thread pool keeps the hot path
//! free of repeated allocations. The pool is native thread-local storage:
//! a fixed number of reusable `String` buffers handed out round-robin,
//! grown on demand and never shrunk, plus the thread's last error kind.
//!
//! Each thread's state is created lazily on first use and torn down by the
//! thread-local destructor when the thread exits.
//!
//! ## Examples
//!
//! ```rust
//! use parampack::{clear_last_error, last_error, unpack_element, ErrorKind, PackOptions};
//!
//! clear_last_error();
//! let _ = unpack_element("???", &PackOptions::default());
//! assert_eq!(last_error(), Some(ErrorKind::InvalidParam));
//! clear_last_error();
//! assert_eq!(last_error(), None);
//! ```

use crate::error::{ErrorKind, Result};
use std::cell::RefCell;

const POOL_SIZE: usize = 4;

struct ThreadState {
    buffers: Vec<Option<String>>,
    next: usize,
    last_error: Option<ErrorKind>,
}

impl ThreadState {
    fn new() -> Self {
        ThreadState {
            buffers: (0..POOL_SIZE).map(|_| Some(String::new())).collect(),
            next: 0,
            last_error: None,
        }
    }
}

thread_local! {
    static STATE: RefCell<ThreadState> = RefCell::new(ThreadState::new());
}

/// Runs `f` with a cleared scratch buffer borrowed from the calling
/// thread's pool. Buffers rotate round-robin; capacity is kept across
/// uses. Reentrant borrows fall back to a fresh buffer when the pool slot
/// is already out on loan.
pub(crate) fn with_scratch<R>(f: impl FnOnce(&mut String) -> R) -> R {
    let (slot, buf) = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let slot = state.next;
        state.next = (state.next + 1) % POOL_SIZE;
        (slot, state.buffers[slot].take())
    });
    let mut buf = buf.unwrap_or_default();
    buf.clear();
    let result = f(&mut buf);
    STATE.with(|state| {
        state.borrow_mut().buffers[slot] = Some(buf);
    });
    result
}

/// Records the error kind in the calling thread's last-error cell.
pub(crate) fn record_error(kind: ErrorKind) {
    STATE.with(|state| state.borrow_mut().last_error = Some(kind));
}

/// Passes `result` through, recording the error kind on failure. Every
/// public operation funnels its result through here.
pub(crate) fn note<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        record_error(err.kind());
    }
    result
}

/// Returns the calling thread's last recorded error kind, if any.
#[must_use]
pub fn last_error() -> Option<ErrorKind> {
    STATE.with(|state| state.borrow().last_error)
}

/// Clears the calling thread's last-error cell.
pub fn clear_last_error() {
    STATE.with(|state| state.borrow_mut().last_error = None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_scratch_reuse_keeps_capacity() {
        with_scratch(|buf| {
            buf.push_str("warm up the buffer capacity");
        });
        // Walk the pool back around to the same slot.
        for _ in 0..POOL_SIZE - 1 {
            with_scratch(|_| {});
        }
        with_scratch(|buf| {
            assert!(buf.is_empty());
            assert!(buf.capacity() >= "warm up the buffer capacity".len());
        });
    }

    #[test]
    fn test_nested_borrows() {
        let out = with_scratch(|a| {
            a.push_str("outer");
            with_scratch(|b| {
                b.push_str("inner");
                b.len()
            }) + a.len()
        });
        assert_eq!(out, 10);
    }

    #[test]
    fn test_note_records_kind() {
        clear_last_error();
        assert_eq!(last_error(), None);
        let _ = note::<()>(Err(Error::BadTag(300)));
        assert_eq!(last_error(), Some(ErrorKind::InvalidParam));
        assert_eq!(note(Ok(7)), Ok(7));
        // Success does not clear the cell; only an explicit clear does.
        assert_eq!(last_error(), Some(ErrorKind::InvalidParam));
        clear_last_error();
    }
}
