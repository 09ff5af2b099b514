// src/core/bits.rs

use super::error::{QlogicError, Result};
use std::fmt;

/// A fixed-width string of classical bits.
///
/// Position `i` of the string corresponds to qubit `i`, so a `BitString` can
/// label both the basis state a program is prepared in and the bits read
/// back from a measurement. The three-bit case (a *bit-triple*) is what the
/// majority and unmajority-add truth tables are written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    bits: Vec<u8>,
}

impl BitString {
    /// Builds a bit string from a slice of 0/1 values.
    ///
    /// # Errors
    /// Returns `QlogicError::InvalidBit` if any value is not 0 or 1.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        if let Some((position, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(QlogicError::InvalidBit { position, value });
        }
        Ok(Self { bits: bits.to_vec() })
    }

    /// Builds the bit-triple `(a, b, c)`.
    pub fn triple(a: u8, b: u8, c: u8) -> Result<Self> {
        Self::from_bits(&[a, b, c])
    }

    /// Number of distinct `width`-bit strings, or `None` if that does not
    /// fit in a `usize`.
    pub fn space_size(width: usize) -> Option<usize> {
        u32::try_from(width).ok().and_then(|w| 1usize.checked_shl(w))
    }

    /// Builds the `width`-bit string whose position `i` holds bit `i` of `value`.
    /// Positions past the width of `usize` are 0.
    pub fn from_index(value: usize, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| {
                let shifted = u32::try_from(i).ok().and_then(|i| value.checked_shr(i)).unwrap_or(0);
                (shifted & 1) as u8
            })
            .collect();
        Self { bits }
    }

    /// Inverse of [`BitString::from_index`].
    pub fn to_index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, b)| acc | ((*b as usize) << i))
    }

    /// Iterates over every bit string of the given width, in ascending
    /// index order. Widths beyond [`BitString::space_size`] stop after
    /// `usize::MAX` strings.
    pub fn all(width: usize) -> impl Iterator<Item = BitString> {
        let count = Self::space_size(width).unwrap_or(usize::MAX);
        (0..count).map(move |value| BitString::from_index(value, width))
    }

    /// Number of bits.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// The bit at `position`, if in range.
    pub fn get(&self, position: usize) -> Option<u8> {
        self.bits.get(position).copied()
    }

    /// The bits in position order.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Positions holding a 1.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == 1)
            .map(|(i, _)| i)
    }

    /// Returns a copy of the bits in `range` as a new string.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<Self> {
        self.bits
            .get(range.clone())
            .map(|bits| Self { bits: bits.to_vec() })
            .ok_or(QlogicError::WidthMismatch { expected: range.end, actual: self.width() })
    }
}

impl TryFrom<(u8, u8, u8)> for BitString {
    type Error = QlogicError;

    fn try_from((a, b, c): (u8, u8, u8)) -> Result<Self> {
        Self::triple(a, b, c)
    }
}

impl TryFrom<Vec<u8>> for BitString {
    type Error = QlogicError;

    fn try_from(bits: Vec<u8>) -> Result<Self> {
        Self::from_bits(&bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, b) in self.bits.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, b)?;
        }
        write!(f, ")")
    }
}
