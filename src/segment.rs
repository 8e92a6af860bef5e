//! Data segments and character modes.
//!
//! A segment is an immutable `(mode, character count, payload bits)` triple.
//! The mode indicator and character count field are not part of the payload;
//! they are emitted during final bit assembly because the count field width
//! depends on the version chosen there.

use crate::bits::BitBuffer;
use crate::error::Error;
use crate::qrcode::Version;

/// The 45-character alphanumeric set, in index order.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// A segment of character data, binary data, or control information.
///
/// Instances are immutable and own a defensive copy of their payload bits,
/// so mutating the buffer a segment was built from cannot alter it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSegment {
    mode: QrSegmentMode,
    numchars: usize,
    data: BitBuffer,
}

impl QrSegment {
    /// Creates a segment from already-encoded payload bits.
    ///
    /// `numchars` is the pre-encoding length: digits for numeric, characters
    /// for alphanumeric and kanji, bytes for byte mode, zero for ECI. The
    /// payload is deep-copied.
    pub fn new(mode: QrSegmentMode, numchars: usize, data: &BitBuffer) -> Self {
        Self {
            mode,
            numchars,
            data: data.clone(),
        }
    }

    /// Creates a segment representing the given binary data in byte mode.
    pub fn make_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut bb = BitBuffer::new();
        for &b in data {
            bb.append_bits(b.into(), 8)?;
        }
        Ok(Self {
            mode: QrSegmentMode::Byte,
            numchars: data.len(),
            data: bb,
        })
    }

    /// Creates a segment representing a string of decimal digits in numeric
    /// mode.
    ///
    /// Digits are consumed in groups of up to three; a group of `n` digits
    /// is emitted in `3n + 1` bits. Fails with [`Error::InvalidCharacter`]
    /// if `text` contains anything but `0`-`9`.
    pub fn make_numeric(text: &str) -> Result<Self, Error> {
        let mut bb = BitBuffer::new();
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            if !b.is_ascii_digit() {
                return Err(Error::InvalidCharacter("numeric"));
            }
            accumdata = accumdata * 10 + u32::from(b - b'0');
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10)?;
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, accumcount * 3 + 1)?;
        }
        Ok(Self {
            mode: QrSegmentMode::Numeric,
            numchars: text.len(),
            data: bb,
        })
    }

    /// Creates a segment representing text in alphanumeric mode.
    ///
    /// Allowed characters are `0`-`9`, `A`-`Z` (uppercase only), space,
    /// `$`, `%`, `*`, `+`, `-`, `.`, `/`, `:`. Pairs pack into 11 bits, a
    /// trailing single character into 6.
    pub fn make_alphanumeric(text: &str) -> Result<Self, Error> {
        let mut bb = BitBuffer::new();
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for c in text.chars() {
            let i = ALPHANUMERIC_CHARSET
                .find(c)
                .ok_or(Error::InvalidCharacter("alphanumeric"))?;
            accumdata = accumdata * 45 + u32::try_from(i).unwrap();
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11)?;
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            bb.append_bits(accumdata, 6)?;
        }
        Ok(Self {
            mode: QrSegmentMode::Alphanumeric,
            numchars: text.len(),
            data: bb,
        })
    }

    /// Creates a segment representing an Extended Channel Interpretation
    /// designator with the given assignment value.
    ///
    /// Fails with [`Error::ValueOutOfRange`] for values of one million or
    /// more.
    pub fn make_eci(assignval: u32) -> Result<Self, Error> {
        let mut bb = BitBuffer::new();
        if assignval < 1 << 7 {
            bb.append_bits(assignval, 8)?;
        } else if assignval < 1 << 14 {
            bb.append_bits(0b10, 2)?;
            bb.append_bits(assignval, 14)?;
        } else if assignval < 1_000_000 {
            bb.append_bits(0b110, 3)?;
            bb.append_bits(assignval, 21)?;
        } else {
            return Err(Error::ValueOutOfRange("ECI assignment value"));
        }
        Ok(Self {
            mode: QrSegmentMode::Eci,
            numchars: 0,
            data: bb,
        })
    }

    /// Splits a text string into the shortest list of segments this crate
    /// produces: empty input gives no segments, otherwise a single segment
    /// in the first applicable of numeric, alphanumeric, or byte (UTF-8)
    /// mode.
    ///
    /// There is no mode-switching optimizer; one mode covers the whole
    /// string.
    pub fn make_segments(text: &str) -> Result<Vec<Self>, Error> {
        if text.is_empty() {
            Ok(Vec::new())
        } else if Self::is_numeric(text) {
            Ok(vec![Self::make_numeric(text)?])
        } else if Self::is_alphanumeric(text) {
            Ok(vec![Self::make_alphanumeric(text)?])
        } else {
            Ok(vec![Self::make_bytes(text.as_bytes())?])
        }
    }

    /// Tests whether a string can be encoded in numeric mode.
    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    /// Tests whether a string can be encoded in alphanumeric mode.
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }

    /// Returns this segment's mode.
    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    /// Returns this segment's pre-encoding character count.
    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    /// Returns this segment's payload bits.
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Sums `4 + count_field_width + payload_length` over the segments at
    /// the given version.
    ///
    /// Returns `None` when a segment's character count does not fit its
    /// count field, or the sum leaves 31-bit range.
    pub fn get_total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let ccbits = seg.mode.num_char_count_bits(version);
            if seg.numchars >= 1 << ccbits {
                return None;
            }
            result = result.checked_add(4 + usize::from(ccbits))?;
            result = result.checked_add(seg.data.len())?;
            if result > i32::MAX as usize {
                return None;
            }
        }
        Some(result)
    }
}

/// The character mode of a segment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QrSegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
    Eci,
}

impl QrSegmentMode {
    /// The 4-bit mode indicator emitted ahead of each segment.
    pub(crate) fn mode_bits(self) -> u32 {
        use QrSegmentMode::*;
        match self {
            Numeric => 0x1,
            Alphanumeric => 0x2,
            Byte => 0x4,
            Kanji => 0x8,
            Eci => 0x7,
        }
    }

    /// The character count field width at the given version, selected by
    /// version band (1-9, 10-26, 27-40).
    pub(crate) fn num_char_count_bits(self, ver: Version) -> u8 {
        use QrSegmentMode::*;
        (match self {
            Numeric => [10, 12, 14],
            Alphanumeric => [9, 11, 13],
            Byte => [8, 16, 16],
            Kanji => [8, 10, 12],
            Eci => [0, 0, 0],
        })[usize::from((ver.value() + 7) / 17)]
    }
}
