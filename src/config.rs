//! Compile-time-validated (layer, part) configuration.
//!
//! The engine is generic over the number of layers `L` and parts per layer
//! `P`, but every shape still has to fit in a single `u64` (§6 of the
//! design doc). Rather than threading a global constant through the crate,
//! [`Config`] is a small `Copy` value passed explicitly to every operation
//! that needs it, the same way [`Board`]-taking methods in the reference
//! implementation never reach for ambient state.

use std::fmt;

/// The two bits of storage used per cell.
pub const CELL_BITS: u32 = 2;

/// A validated (layers, parts) pair. Only the pairs this system has been
/// checked against can be constructed; see [`Config::new`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    pub layers: u8,
    pub parts: u8,
}

/// Error returned by [`Config::new`] for an unsupported (layers, parts) pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnsupportedConfig {
    pub layers: u8,
    pub parts: u8,
}

impl fmt::Display for UnsupportedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported (layers={}, parts={}); only (4,4) and (5,4) are validated",
            self.layers, self.parts
        )
    }
}

impl std::error::Error for UnsupportedConfig {}

impl Config {
    /// Construct a validated configuration.
    ///
    /// Production only validates `(4, 4)` and `(5, 4)`. Other pairs are
    /// accepted as long as they fit a `u64` (`2 * layers * parts <= 64`),
    /// but the half pre-seeder (§4.5) degrades to seeding only the empty
    /// half whenever `parts != 4`.
    pub fn new(layers: u8, parts: u8) -> Result<Config, UnsupportedConfig> {
        let bits = CELL_BITS as usize * layers as usize * parts as usize;
        if layers == 0 || parts == 0 || bits > 64 {
            return Err(UnsupportedConfig { layers, parts });
        }
        Ok(Config { layers, parts })
    }

    /// The four configurations that appear as worked examples in this
    /// repository's documentation and tests: `(4,4)` and `(5,4)`.
    pub const PRODUCTION: [(u8, u8); 2] = [(4, 4), (5, 4)];

    #[inline]
    pub fn total_bits(self) -> u32 {
        CELL_BITS * self.layers as u32 * self.parts as u32
    }

    #[inline]
    pub fn half_parts(self) -> u8 {
        self.parts / 2
    }

    /// Bitmask selecting every cell in the west half, parts `[0, P/2)`.
    #[inline]
    pub fn west_mask(self) -> u64 {
        let half = self.half_parts();
        let mut mask = 0u64;
        for layer in 0..self.layers {
            for part in 0..half {
                mask |= 0b11 << (CELL_BITS * (layer as u32 * self.parts as u32 + part as u32));
            }
        }
        mask
    }

    /// Bitmask selecting every cell in part 0 (a quarter).
    #[inline]
    pub fn part0_mask(self) -> u64 {
        let mut mask = 0u64;
        for layer in 0..self.layers {
            mask |= 0b11 << (CELL_BITS * (layer as u32 * self.parts as u32));
        }
        mask
    }

    /// Bitmask selecting every valid cell in the configuration.
    #[inline]
    pub fn full_mask(self) -> u64 {
        if self.total_bits() == 64 {
            u64::MAX
        } else {
            (1u64 << self.total_bits()) - 1
        }
    }
}
