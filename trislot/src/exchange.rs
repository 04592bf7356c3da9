//! Three-slot latest-value exchange.
//!
//! The exchange owns three cache-line aligned slots and a round-robin hint of
//! the slot the last publish landed in. All coordination goes through the
//! per-slot [`SlotStatus`] tag:
//!
//! - **Writer**: claims a non-`Busy` slot starting after the last written one,
//!   copies the value in, retires the previously published slot if the reader
//!   never picked it up, then stores `Full` with `Release` ordering.
//! - **Reader**: claims the first `Full` slot with an `Acquire` CAS, copies the
//!   value out, then stores `Empty` with `Release` ordering.
//!
//! Outside an in-flight publish at most one slot is `Full`, so the reader can
//! never pick up a value older than one it has already seen.

use crate::handle::{Consumer, Publisher};
use crate::status::SlotStatus;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::trace;

/// Number of slots in every exchange.
///
/// Three is the minimum that lets the writer always find a free slot: the
/// single reader holds at most one slot `Busy`, leaving two candidates.
pub const SLOT_COUNT: usize = 3;

/// One payload cell guarded by its status tag.
///
/// Aligned to a cache line so writer and reader traffic on neighbouring slots
/// does not false-share.
#[repr(C, align(64))]
struct Slot<T: Copy> {
    status: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T: Copy> Slot<T> {
    const fn new() -> Self {
        Self {
            status: AtomicU8::new(SlotStatus::Empty as u8),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    #[inline]
    fn status(&self) -> SlotStatus {
        let tag = self.status.load(Ordering::Acquire);
        SlotStatus::from_u8(tag).unwrap_or_else(|| unreachable!("slot holds unknown tag {tag}"))
    }

    /// Writer claim: any non-`Busy` slot becomes `Busy`.
    ///
    /// Returns the status the slot held before the claim. `Acquire` on success
    /// pairs with the reader's `Release` store of `Empty`, so the reader's copy
    /// has finished before we overwrite the payload.
    #[inline]
    fn claim_for_write(&self) -> Option<SlotStatus> {
        let current = self.status.load(Ordering::Relaxed);
        if current == SlotStatus::Busy as u8 {
            return None;
        }
        self.status
            .compare_exchange(
                current,
                SlotStatus::Busy as u8,
                Ordering::Acquire,
                Ordering::Relaxed,
            )
            .ok()
            .and_then(SlotStatus::from_u8)
    }

    /// Reader claim: `Full` becomes `Busy`.
    ///
    /// `Acquire` on success pairs with the writer's `Release` store of `Full`.
    #[inline]
    fn claim_for_read(&self) -> bool {
        self.status
            .compare_exchange(
                SlotStatus::Full as u8,
                SlotStatus::Busy as u8,
                Ordering::Acquire,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// Writer retire: drop a value nobody consumed. The payload is not touched.
    #[inline]
    fn retire(&self) -> bool {
        self.status
            .compare_exchange(
                SlotStatus::Full as u8,
                SlotStatus::Empty as u8,
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// Hand the slot over with `Release` ordering.
    #[inline]
    fn release(&self, to: SlotStatus) {
        self.status.store(to as u8, Ordering::Release);
    }
}

/// Single-producer, single-consumer latest-value exchange.
///
/// Created once with every slot `Empty` and driven exclusively through the
/// [`Publisher`] / [`Consumer`] pair returned by [`Exchange::split`].
///
/// # Type Parameter
/// - `T`: Payload type. Must be `Copy`: values are moved in and out by plain
///   bitwise copies under the `Busy` claim and never dropped in place.
pub struct Exchange<T: Copy> {
    slots: [Slot<T>; SLOT_COUNT],
    last_written: AtomicU8,
}

// SAFETY: payload cells are only accessed by the side that moved the slot
// into `Busy`, and the handle types guarantee one writer and one reader.
unsafe impl<T: Copy + Send> Sync for Exchange<T> {}

impl<T: Copy> Exchange<T> {
    /// Create an exchange with every slot `Empty`.
    pub const fn new() -> Self {
        Self {
            slots: [Slot::new(), Slot::new(), Slot::new()],
            last_written: AtomicU8::new(0),
        }
    }

    /// Split into the writer and reader handles.
    ///
    /// This is the only way to drive the exchange, which makes the
    /// single-writer/single-reader contract a property of the types.
    pub fn split(self) -> (Publisher<T>, Consumer<T>)
    where
        T: Send,
    {
        let shared = Arc::new(self);
        (Publisher::new(Arc::clone(&shared)), Consumer::new(shared))
    }

    /// Snapshot of all slot states. Diagnostic only: the states may change
    /// immediately after they are read.
    pub fn statuses(&self) -> [SlotStatus; SLOT_COUNT] {
        [
            self.slots[0].status(),
            self.slots[1].status(),
            self.slots[2].status(),
        ]
    }

    /// Index of the slot the most recent publish landed in.
    ///
    /// Before the first publish this is the initial cursor, 0, and no slot
    /// holds a value.
    pub fn last_written(&self) -> usize {
        self.last_written.load(Ordering::Acquire) as usize
    }

    /// True if some slot currently holds an unconsumed value.
    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(|slot| slot.status() == SlotStatus::Full)
    }

    /// Store `value` as the newest one.
    ///
    /// Returns `true` if an unconsumed value was dropped to make room.
    ///
    /// # Safety
    /// Only one thread may call `publish` at a time.
    pub(crate) unsafe fn publish(&self, value: T) -> bool {
        let last = self.last_written.load(Ordering::Relaxed) as usize;

        // One pass always succeeds while there is a single reader; the outer
        // loop only guards the claim against that reader racing us.
        let (index, previous) = loop {
            if let Some(claimed) = self.claim_for_write(last) {
                break claimed;
            }
            std::hint::spin_loop();
        };

        let slot = &self.slots[index];
        // SAFETY: the slot is `Busy` and owned by the writer.
        unsafe {
            (*slot.value.get()).write(value);
        }

        let mut superseded = previous == SlotStatus::Full;
        if index != last && self.slots[last].retire() {
            trace!(slot = last, "retired unconsumed value");
            superseded = true;
        }

        slot.release(SlotStatus::Full);
        self.last_written.store(index as u8, Ordering::Release);
        superseded
    }

    /// Round-robin scan from the slot after `last`.
    fn claim_for_write(&self, last: usize) -> Option<(usize, SlotStatus)> {
        (1..=SLOT_COUNT)
            .map(|step| (last + step) % SLOT_COUNT)
            .find_map(|index| match self.slots[index].claim_for_write() {
                Some(previous) => Some((index, previous)),
                None => {
                    trace!(slot = index, "slot busy, trying next");
                    None
                }
            })
    }

    /// Take the newest unconsumed value, if any.
    ///
    /// # Safety
    /// Only one thread may call `try_consume` at a time.
    pub(crate) unsafe fn try_consume(&self) -> Option<T> {
        for slot in &self.slots {
            if !slot.claim_for_read() {
                continue;
            }
            // SAFETY: a `Full` slot was written before its `Release` store,
            // and our `Acquire` claim makes that write visible.
            let value = unsafe { (*slot.value.get()).assume_init_read() };
            slot.release(SlotStatus::Empty);
            return Some(value);
        }
        None
    }
}

impl<T: Copy> Default for Exchange<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> fmt::Debug for Exchange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("statuses", &self.statuses())
            .field("last_written", &self.last_written())
            .finish()
    }
}
