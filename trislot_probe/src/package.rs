//! Probe payload.

use static_assertions::const_assert_eq;

/// Fixed-size package pushed through the exchange.
///
/// The ballast is filled from the id so the reader can spot a torn copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Package {
    /// Sequence number assigned by the writer.
    pub id: u32,
    /// Ballast derived from `id`.
    pub heavy_data: [u32; 10],
}

const_assert_eq!(core::mem::size_of::<Package>(), 44);

impl Package {
    /// Build the package for sequence number `id`.
    pub fn new(id: u32) -> Self {
        let mut heavy_data = [0u32; 10];
        for (i, word) in heavy_data.iter_mut().enumerate() {
            *word = id.rotate_left(i as u32) ^ 0xA5A5_A5A5;
        }
        Self { id, heavy_data }
    }

    /// True if the ballast matches the id.
    pub fn is_intact(&self) -> bool {
        *self == Self::new(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_package_is_intact() {
        assert!(Package::new(0).is_intact());
        assert!(Package::new(u32::MAX).is_intact());
    }

    #[test]
    fn mixed_package_is_detected() {
        let mut torn = Package::new(7);
        torn.heavy_data[5] = Package::new(8).heavy_data[5];
        assert!(!torn.is_intact());
    }
}
