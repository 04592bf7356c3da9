//! Per-slot ownership tag.
//!
//! Each slot carries one of three states. The tag doubles as a non-blocking
//! claim token: whichever side moves a slot into `Busy` owns its payload until
//! it moves the slot out again.
//!
//! ```text
//! ┌──────────────┬──────────────┬────────────────────────────────┐
//! │ From         │ To           │ Actor                          │
//! ├──────────────┼──────────────┼────────────────────────────────┤
//! │ Empty        │ Busy         │ writer claim                   │
//! │ Full         │ Busy         │ writer overwrite / reader claim│
//! │ Busy         │ Full         │ writer publish (Release)       │
//! │ Busy         │ Empty        │ reader release (Release)       │
//! │ Full         │ Empty        │ writer retire (superseded)     │
//! └──────────────┴──────────────┴────────────────────────────────┘
//! ```

use crate::error::{StatusError, StatusResult};
use static_assertions::const_assert_eq;

/// Ownership state of one exchange slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SlotStatus {
    /// No valid value. The writer may claim it.
    Empty = 0,
    /// Holds an unconsumed value. The reader may claim it, the writer may
    /// overwrite or retire it.
    Full = 1,
    /// Payload is being copied by whichever side claimed the slot.
    Busy = 2,
}

const_assert_eq!(core::mem::size_of::<SlotStatus>(), 1);

impl SlotStatus {
    /// Raw tag value stored in the slot's atomic.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Convert from raw `u8` value. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Empty),
            1 => Some(Self::Full),
            2 => Some(Self::Busy),
            _ => None,
        }
    }
}

impl TryFrom<u8> for SlotStatus {
    type Error = StatusError;

    fn try_from(tag: u8) -> StatusResult<Self> {
        Self::from_u8(tag).ok_or(StatusError::Unknown { tag })
    }
}

impl From<SlotStatus> for u8 {
    fn from(status: SlotStatus) -> Self {
        status.as_u8()
    }
}
