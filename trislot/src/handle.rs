//! Writer and reader handles

use crate::exchange::Exchange;
use std::sync::Arc;

/// Writer side of an exchange.
///
/// Not `Clone`, and `publish` takes `&mut self`: exactly one thread can
/// publish at a time.
pub struct Publisher<T: Copy> {
    shared: Arc<Exchange<T>>,
    published: u64,
    superseded: u64,
}

/// Reader side of an exchange.
///
/// Not `Clone`, and `try_consume` takes `&mut self`: exactly one thread can
/// consume at a time.
pub struct Consumer<T: Copy> {
    shared: Arc<Exchange<T>>,
    consumed: u64,
}

/// Create a fresh exchange and split it into its two handles
pub fn channel<T: Copy + Send>() -> (Publisher<T>, Consumer<T>) {
    Exchange::new().split()
}

impl<T: Copy> Publisher<T> {
    pub(crate) fn new(shared: Arc<Exchange<T>>) -> Self {
        Self {
            shared,
            published: 0,
            superseded: 0,
        }
    }

    /// Publish `value` as the newest one. Never blocks and never fails.
    ///
    /// If the reader has not picked up the previous value yet, that value is
    /// dropped.
    #[inline]
    pub fn publish(&mut self, value: T) {
        // SAFETY: `&mut self` on the only publisher serialises writers.
        let superseded = unsafe { self.shared.publish(value) };
        self.published += 1;
        if superseded {
            self.superseded += 1;
        }
    }

    /// Number of `publish` calls made through this handle
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Number of published values dropped before the reader saw them
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Underlying exchange, for diagnostics
    pub fn exchange(&self) -> &Exchange<T> {
        &self.shared
    }
}

impl<T: Copy> Consumer<T> {
    pub(crate) fn new(shared: Arc<Exchange<T>>) -> Self {
        Self {
            shared,
            consumed: 0,
        }
    }

    /// Take the freshest unconsumed value.
    ///
    /// Returns `None` when nothing new was published since the last
    /// successful call. That is the normal outcome for a reader polling
    /// faster than the writer, not an error.
    #[inline]
    pub fn try_consume(&mut self) -> Option<T> {
        // SAFETY: `&mut self` on the only consumer serialises readers.
        let value = unsafe { self.shared.try_consume() };
        if value.is_some() {
            self.consumed += 1;
        }
        value
    }

    /// Check whether a value is waiting without claiming it
    pub fn has_pending(&self) -> bool {
        self.shared.has_pending()
    }

    /// Number of values taken through this handle
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Underlying exchange, for diagnostics
    pub fn exchange(&self) -> &Exchange<T> {
        &self.shared
    }
}
