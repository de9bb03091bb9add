//! Zero-allocation value types carried through the pipeline
//!
//! All types in this module are designed for:
//! - Zero heap allocations
//! - Copy semantics (a tick is copied by value into the channel)
//! - Minimal memory footprint

use super::errors::SymbolError;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SYMBOL_CAPACITY: usize = 31;

/// Inline, fixed-capacity instrument symbol
///
/// Stores up to [`Symbol::MAX_LEN`] bytes of UTF-8 without touching the heap,
/// so a [`Tick`] stays `Copy` and publishing it never allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    len: u8,
    bytes: [u8; SYMBOL_CAPACITY],
}

impl Symbol {
    /// Maximum symbol length in bytes
    pub const MAX_LEN: usize = SYMBOL_CAPACITY;

    /// Create a symbol from text
    pub fn new(text: &str) -> Result<Self, SymbolError> {
        if text.is_empty() {
            return Err(SymbolError::Empty);
        }
        if text.len() > Self::MAX_LEN {
            return Err(SymbolError::TooLong {
                len: text.len(),
                max: Self::MAX_LEN,
            });
        }

        let mut bytes = [0u8; Self::MAX_LEN];
        bytes[..text.len()].copy_from_slice(text.as_bytes());

        Ok(Self {
            len: text.len() as u8,
            bytes,
        })
    }

    /// View the symbol as a string slice
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        // Bytes were copied from a &str and never split, so this cannot fail.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl TryFrom<&str> for Symbol {
    type Error = SymbolError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

/// One timestamped price observation for a symbol
///
/// Produced once by the feed, copied into the channel, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub symbol: Symbol,
    pub price: f64,
    /// Seconds since the Unix epoch, microsecond resolution
    pub timestamp: f64,
}

impl Tick {
    #[inline(always)]
    pub const fn new(symbol: Symbol, price: f64, timestamp: f64) -> Self {
        Self {
            symbol,
            price,
            timestamp,
        }
    }
}

/// Directional stance of the strategy
///
/// Single byte enum for minimal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PositionState {
    #[default]
    Flat = 0,
    Long = 1,
    Short = 2,
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionState::Flat => write!(f, "FLAT"),
            PositionState::Long => write!(f, "LONG"),
            PositionState::Short => write!(f, "SHORT"),
        }
    }
}

/// Current wall-clock time as seconds since the Unix epoch
///
/// Truncated to whole microseconds, matching the resolution of log lines.
#[inline]
pub fn unix_timestamp() -> f64 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_micros();
    micros as f64 / 1e6
}
