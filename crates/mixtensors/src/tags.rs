//! Packed element-kind tags, four per byte.

use smallvec::SmallVec;

use crate::error::Error;
use crate::kind::{Kind, KindSet};

/// Number of bytes needed to hold `count` packed tags.
#[inline]
pub fn packed_len(count: usize) -> usize {
    count.div_ceil(4)
}

/// A packed array of 2-bit kind tags.
///
/// Tag `i` lives in byte `i / 4`; within a byte, indices 0, 1, 2, 3 mod 4
/// occupy bits 7-6, 5-4, 3-2 and 1-0 respectively. Slots past the declared
/// element count stay [`Kind::Empty`] and are never observable through
/// [`TagArray::decode`].
///
/// Containers of up to 16 elements keep their tag bytes inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagArray {
    bytes: SmallVec<[u8; 4]>,
    len: usize,
}

impl TagArray {
    /// Tag array for `len` elements, every slot [`Kind::Empty`].
    pub fn new(len: usize) -> Self {
        let mut bytes = SmallVec::new();
        bytes.resize(packed_len(len), 0);
        Self { bytes, len }
    }

    /// Tag array built from a sequence of kinds, one per element.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = Kind>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = kinds.into_iter();
        let mut tags = Self::new(iter.len());
        for (index, kind) in iter.enumerate() {
            tags.encode(index, kind)
                .expect("index within freshly sized tag array");
        }
        tags
    }

    /// Number of element slots (not bytes).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array describes zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn shift(index: usize) -> u32 {
        (6 - 2 * (index % 4)) as u32
    }

    /// Write the 2-bit tag for `index`, fully overwriting the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is at or beyond the
    /// declared element count.
    pub fn encode(&mut self, index: usize, kind: Kind) -> Result<(), Error> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                extent: self.len,
            });
        }
        let shift = Self::shift(index);
        let byte = &mut self.bytes[index / 4];
        *byte = (*byte & !(0b11 << shift)) | (kind.bits() << shift);
        Ok(())
    }

    /// Read back the 2-bit tag for `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is at or beyond the
    /// declared element count.
    pub fn decode(&self, index: usize) -> Result<Kind, Error> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange {
                index,
                extent: self.len,
            });
        }
        Ok(Kind::from_bits(self.bytes[index / 4] >> Self::shift(index)))
    }

    /// Iterate the occupied tag slots in index order.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        (0..self.len).map(move |i| Kind::from_bits(self.bytes[i / 4] >> Self::shift(i)))
    }

    /// Recompute the container summary from the occupied slots.
    pub fn summary(&self) -> KindSet {
        self.kinds().collect()
    }

    /// The packed backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(4), 1);
        assert_eq!(packed_len(5), 2);
        assert_eq!(packed_len(9), 3);
    }

    #[test]
    fn test_round_trip_every_index_and_kind() {
        for kind in [Kind::Empty, Kind::Number, Kind::Vector, Kind::Matrix] {
            let mut tags = TagArray::new(9);
            for index in 0..9 {
                tags.encode(index, kind).unwrap();
                assert_eq!(tags.decode(index).unwrap(), kind);
            }
        }
    }

    #[test]
    fn test_encode_overwrites_previous_tag() {
        let mut tags = TagArray::new(4);
        tags.encode(2, Kind::Matrix).unwrap();
        tags.encode(2, Kind::Number).unwrap();
        assert_eq!(tags.decode(2).unwrap(), Kind::Number);
    }

    #[test]
    fn test_bit_layout_big_endian_within_byte() {
        let tags = TagArray::from_kinds([Kind::Number, Kind::Vector, Kind::Matrix, Kind::Number]);
        assert_eq!(tags.as_bytes(), &[0b0110_1101]);
    }

    #[test]
    fn test_padding_slots_stay_empty() {
        let tags = TagArray::from_kinds(vec![Kind::Matrix; 5]);
        assert_eq!(tags.as_bytes().len(), 2);
        // index 4 sits in bits 7-6 of the second byte, the rest is padding
        assert_eq!(tags.as_bytes()[1], 0b1100_0000);
    }

    #[test]
    fn test_out_of_range() {
        let mut tags = TagArray::new(3);
        assert!(matches!(
            tags.encode(3, Kind::Number),
            Err(Error::IndexOutOfRange { index: 3, extent: 3 })
        ));
        assert!(tags.decode(7).is_err());

        let mut empty = TagArray::new(0);
        assert!(empty.encode(0, Kind::Number).is_err());
    }

    #[test]
    fn test_summary_matches_contents() {
        let tags = TagArray::from_kinds([Kind::Number, Kind::Matrix, Kind::Number]);
        let summary = tags.summary();
        assert!(summary.contains(Kind::Number));
        assert!(summary.contains(Kind::Matrix));
        assert!(!summary.contains(Kind::Vector));
    }
}
