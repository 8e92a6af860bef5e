//! QR Code Model 2 encoding.
//!
//! This module holds the encoder pipeline and grid builder: version
//! fitting with optional ECC boosting, bit assembly and padding,
//! Reed-Solomon block interleaving, function pattern rendering, zig-zag
//! data placement, and penalty-driven mask selection. The result is an
//! immutable square grid of dark/light modules together with a
//! per-module classification that external renderers can use to style
//! data and function modules differently.

use crate::bits::BitBuffer;
use crate::error::{DataTooLong, Error};
use crate::reed_solomon::ReedSolomonGenerator;
use crate::segment::QrSegment;
use crate::tables;

/// A QR Code symbol: a square grid of dark and light modules plus the
/// classification of every module.
///
/// Supports QR Code Model 2, versions 1 to 40, all four error correction
/// levels, and the numeric, alphanumeric, byte, and ECI segment modes.
/// Instances are immutable after construction and freely shareable.
///
/// # Creation
///
/// - High level: [`QrCode::encode_text`] or [`QrCode::encode_binary`].
/// - Mid level: [`QrCode::encode_segments`].
/// - Low level: [`QrCode::new`] from raw data codewords.
///
/// # Example
///
/// ```rust
/// use qrgrid::{QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("Hello, World!", QrCodeEcc::Medium)?;
/// for y in 0..qr.size() {
///     for x in 0..qr.size() {
///         let dark = qr.module(x, y)?;
///         let kind = qr.module_type(x, y)?;
///         // hand (dark, kind) to a renderer
///         let _ = (dark, kind);
///     }
/// }
/// # Ok::<(), qrgrid::Error>(())
/// ```
pub struct QrCode {
    /// The version number, in the range [1, 40].
    version: Version,

    /// The width and height in modules, always `version * 4 + 17`.
    size: i32,

    /// The error correction level actually used (may exceed the requested
    /// level when boosting was enabled).
    ecl: QrCodeEcc,

    /// The mask pattern applied to the data modules, in the range [0, 7].
    mask: Mask,

    /// Module colors in row-major order; `true` is dark.
    modules: Vec<bool>,

    /// What each module was drawn as, in row-major order.
    module_types: Vec<ModuleType>,

    /// Construction-time shadow grid protecting function modules from
    /// masking and data placement. Retained for debugging; not part of
    /// the equality semantics.
    isfunction: Vec<bool>,
}

impl QrCode {
    /// Encodes a text string into a QR code.
    ///
    /// Picks the tightest applicable segment mode for the whole string,
    /// the smallest version from 1 to 40 that fits, an automatically
    /// selected mask, and boosts the error correction level as far as the
    /// chosen version allows.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self, Error> {
        let segs = QrSegment::make_segments(text)?;
        Self::encode_segments(&segs, ecl, Version::MIN, Version::MAX, None, true)
    }

    /// Encodes binary data into a QR code in byte mode.
    ///
    /// `mask` may be `None` for automatic selection (slower; tries all
    /// eight patterns) or a fixed pattern. If `boostecl` is `true` the
    /// error correction level may be raised whenever that does not grow
    /// the version.
    pub fn encode_binary(
        data: &[u8],
        ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
        boostecl: bool,
    ) -> Result<Self, Error> {
        let seg = QrSegment::make_bytes(data)?;
        Self::encode_segments(&[seg], ecl, minversion, maxversion, mask, boostecl)
    }

    /// Encodes the given segments with full control over the parameters.
    ///
    /// The smallest version in `[minversion, maxversion]` whose data
    /// capacity holds the segments is chosen; if none does, the call fails
    /// with [`Error::DataTooLong`] carrying the used and available bit
    /// counts. `minversion > maxversion` fails with [`Error::InvalidValue`].
    pub fn encode_segments(
        segs: &[QrSegment],
        mut ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
        boostecl: bool,
    ) -> Result<Self, Error> {
        if minversion > maxversion {
            return Err(Error::InvalidValue("minversion exceeds maxversion"));
        }

        // Find the minimal version number to use.
        let mut version = minversion;
        let datausedbits: usize = loop {
            let datacapacitybits: usize = tables::num_data_codewords(version, ecl) * 8;
            let dataused = QrSegment::get_total_bits(segs, version);
            match dataused {
                Some(n) if n <= datacapacitybits => break n,
                _ if version >= maxversion => {
                    return Err(match dataused {
                        None => DataTooLong::SegmentTooLong.into(),
                        Some(n) => DataTooLong::DataOverCapacity(n, datacapacitybits).into(),
                    });
                }
                _ => version = Version::new(version.value() + 1),
            }
        };

        // Increase the error correction level while the data still fits.
        for &newecl in &[QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
            if boostecl && datausedbits <= tables::num_data_codewords(version, newecl) * 8 {
                ecl = newecl;
            }
        }

        // Concatenate all segments to create the data bit string.
        let datacapacitybits: usize = tables::num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::new();
        for seg in segs {
            bb.append_bits(seg.mode().mode_bits(), 4)?;
            bb.append_bits(
                u32::try_from(seg.num_chars()).unwrap(),
                seg.mode().num_char_count_bits(version),
            )?;
            bb.append_buffer(seg.data())?;
        }
        debug_assert_eq!(bb.len(), datausedbits);

        // Add terminator and pad up to a byte if applicable.
        let numzerobits = std::cmp::min(4, datacapacitybits - bb.len());
        bb.append_bits(0, u8::try_from(numzerobits).unwrap())?;
        let numzerobits = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, u8::try_from(numzerobits).unwrap())?;
        debug_assert_eq!(bb.len() % 8, 0);

        // Pad with alternating bytes until the data capacity is reached.
        for &padbyte in [0xEC, 0x11].iter().cycle() {
            if bb.len() >= datacapacitybits {
                break;
            }
            bb.append_bits(padbyte, 8)?;
        }

        Ok(Self::new(version, ecl, &bb.to_bytes(), mask))
    }

    /// Creates a new QR Code with the given version number, error
    /// correction level, data codeword bytes, and mask.
    ///
    /// This is the low-level constructor that most users should not call
    /// directly.
    ///
    /// # Panics
    ///
    /// Panics unless `datacodewords.len()` equals
    /// [`tables::num_data_codewords`]`(version, ecl)`; handing over a
    /// wrong count is an implementation bug, not bad input.
    pub fn new(version: Version, ecl: QrCodeEcc, datacodewords: &[u8], mask: Option<Mask>) -> Self {
        assert_eq!(
            datacodewords.len(),
            tables::num_data_codewords(version, ecl),
            "illegal data codeword count"
        );
        let size = i32::from(version.value()) * 4 + 17;
        let numcells = (size * size) as usize;
        let mut result = Self {
            version,
            size,
            ecl,
            mask: Mask::new(0), // dummy; replaced below
            modules: vec![false; numcells],
            module_types: vec![ModuleType::Data; numcells],
            isfunction: vec![false; numcells],
        };

        // Compute ECC and draw modules.
        result.draw_function_patterns();
        let allcodewords = result.add_ecc_and_interleave(datacodewords);
        result.draw_codewords(&allcodewords);

        // Do masking.
        let mut msk = mask;
        if msk.is_none() {
            // Automatically choose the best mask.
            let mut minpenalty = i32::MAX;
            for i in 0u8..8 {
                let i = Mask::new(i);
                result.apply_mask(i);
                result.draw_format_bits(i);
                let penalty = result.get_penalty_score();
                if penalty < minpenalty {
                    msk = Some(i);
                    minpenalty = penalty;
                }
                result.apply_mask(i); // Undoes the mask due to XOR
            }
        }
        let msk = msk.unwrap();
        result.mask = msk;
        result.apply_mask(msk); // Apply the final choice of mask
        result.draw_format_bits(msk); // Overwrite old format bits
        result
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns the mask that was applied, in the range [0, 7]. A code
    /// constructed with automatic selection reports the chosen mask.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates; `true`
    /// is dark. Fails with [`Error::IndexOutOfRange`] outside the grid.
    pub fn module(&self, x: i32, y: i32) -> Result<bool, Error> {
        if self.in_bounds(x, y) {
            Ok(self.modules[self.index(x, y)])
        } else {
            Err(Error::IndexOutOfRange)
        }
    }

    /// Returns what the module at the given coordinates was drawn as.
    /// Fails with [`Error::IndexOutOfRange`] outside the grid.
    ///
    /// Masking never changes a module's type: a data module stays
    /// [`ModuleType::Data`] whether or not the mask inverted it.
    pub fn module_type(&self, x: i32, y: i32) -> Result<ModuleType, Error> {
        if self.in_bounds(x, y) {
            Ok(self.module_types[self.index(x, y)])
        } else {
            Err(Error::IndexOutOfRange)
        }
    }

    /// Returns the color of the module at the given coordinates, treating
    /// everything outside the grid as light.
    ///
    /// Renderers padding a quiet zone can sweep a larger coordinate range
    /// without bounds handling.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.modules[self.index(x, y)]
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.size + x) as usize
    }

    /*---- Function pattern drawing ----*/

    fn draw_function_patterns(&mut self) {
        let size = self.size;

        // Timing patterns; later patterns overwrite the shared cells.
        for i in 0..size {
            self.set_function_module(i, 6, i % 2 == 0, ModuleType::HorizontalTiming);
            self.set_function_module(6, i, i % 2 == 0, ModuleType::VerticalTiming);
        }

        // Finder patterns with their separator rings.
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        // Alignment patterns everywhere except the three finder corners.
        let alignpatpos = tables::alignment_pattern_positions(self.version);
        let numalign = alignpatpos.len();
        for i in 0..numalign {
            for j in 0..numalign {
                if (i == 0 && j == 0)
                    || (i == 0 && j == numalign - 1)
                    || (i == numalign - 1 && j == 0)
                {
                    continue;
                }
                self.draw_alignment_pattern(alignpatpos[i], alignpatpos[j]);
            }
        }

        // Dummy mask value; the real format bits overwrite these cells
        // once the mask is decided.
        self.draw_format_bits(Mask::new(0));
        self.draw_version();
    }

    /// Draws the 9x9 finder region centered at `(cx, cy)`: the 7x7
    /// concentric pattern plus the light separator ring, clipped at the
    /// symbol edge.
    fn draw_finder_pattern(&mut self, cx: i32, cy: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (x, y) = (cx + dx, cy + dy);
                if self.in_bounds(x, y) {
                    let dist: i32 = dx.abs().max(dy.abs());
                    self.set_function_module(
                        x,
                        y,
                        dist != 2 && dist != 4,
                        ModuleType::FinderPattern,
                    );
                }
            }
        }
    }

    /// Draws the 5x5 alignment pattern centered at `(cx, cy)`.
    fn draw_alignment_pattern(&mut self, cx: i32, cy: i32) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let dist: i32 = dx.abs().max(dy.abs());
                self.set_function_module(cx + dx, cy + dy, dist != 1, ModuleType::AlignmentPattern);
            }
        }
    }

    /// Draws both copies of the format bits for the given mask, plus the
    /// always-dark module.
    fn draw_format_bits(&mut self, mask: Mask) {
        // BCH(15,5) remainder, then the fixed XOR mask.
        let bits: u32 = {
            let data = u32::from((self.ecl.format_bits() << 3) | mask.value());
            let mut rem: u32 = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            ((data << 10) | rem) ^ 0x5412
        };
        debug_assert_eq!(bits >> 15, 0);

        // First copy, around the top-left finder.
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i as u8), ModuleType::Format);
        }
        self.set_function_module(8, 7, get_bit(bits, 6), ModuleType::Format);
        self.set_function_module(8, 8, get_bit(bits, 7), ModuleType::Format);
        self.set_function_module(7, 8, get_bit(bits, 8), ModuleType::Format);
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i as u8), ModuleType::Format);
        }

        // Second copy, split between the other two finders.
        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i as u8), ModuleType::Format);
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i as u8), ModuleType::Format);
        }
        self.set_function_module(8, size - 8, true, ModuleType::Format); // Always dark
    }

    /// Draws the two 18-bit version information blocks for versions 7 and
    /// up.
    fn draw_version(&mut self) {
        let ver = u32::from(self.version.value());
        if ver < 7 {
            return;
        }
        let bits: u32 = {
            let mut rem: u32 = ver;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            (ver << 12) | rem
        };
        debug_assert_eq!(bits >> 18, 0);
        for i in 0u8..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i32::from(i % 3);
            let b = i32::from(i / 3);
            self.set_function_module(a, b, bit, ModuleType::Version);
            self.set_function_module(b, a, bit, ModuleType::Version);
        }
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool, kind: ModuleType) {
        let idx = self.index(x, y);
        self.modules[idx] = isdark;
        self.module_types[idx] = kind;
        self.isfunction[idx] = true;
    }

    /*---- Codeword handling ----*/

    /// Splits the data codewords into ECC blocks, appends each block's
    /// Reed-Solomon remainder, and interleaves the blocks column by
    /// column into the final codeword stream.
    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        let (ver, ecl) = (self.version, self.ecl);
        assert_eq!(
            data.len(),
            tables::num_data_codewords(ver, ecl),
            "illegal argument"
        );

        let numblocks = tables::num_error_correction_blocks(ver, ecl);
        let blockecclen = tables::ecc_codewords_per_block(ver, ecl);
        let rawcodewords = tables::num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        // Split the data and pad short blocks to a uniform length so the
        // interleave below can treat every block alike.
        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
        let mut k: usize = 0;
        for i in 0..numblocks {
            let datlen = shortblocklen - blockecclen + usize::from(i >= numshortblocks);
            let mut block = data[k..k + datlen].to_vec();
            k += datlen;
            let ecc = rs.compute_remainder(&block);
            if i < numshortblocks {
                block.push(0);
            }
            block.extend_from_slice(&ecc);
            blocks.push(block);
        }
        debug_assert_eq!(k, data.len());

        // Interleave; the padding byte of each short block is skipped.
        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..blocks[0].len() {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        debug_assert_eq!(result.len(), rawcodewords);
        result
    }

    /// Places the codeword bits into the grid in the zig-zag order,
    /// skipping function modules. The handful of remainder cells past the
    /// last codeword stay light.
    fn draw_codewords(&mut self, data: &[u8]) {
        assert_eq!(
            data.len(),
            tables::num_raw_data_modules(self.version) / 8,
            "illegal argument"
        );
        let size = self.size;
        let mut i: usize = 0; // Bit index into the data
        let mut right = size - 1;
        while right >= 1 {
            // Sweep column pairs from the right edge; column 6 holds the
            // vertical timing pattern and is stepped over.
            if right == 6 {
                right = 5;
            }
            for vert in 0..size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { size - 1 - vert } else { vert };
                    let idx = self.index(x, y);
                    if !self.isfunction[idx] && i < data.len() * 8 {
                        self.modules[idx] = get_bit(data[i >> 3].into(), 7 - ((i & 7) as u8));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    /*---- Masking ----*/

    /// XORs the given mask pattern onto every non-function module.
    /// Applying the same mask twice restores the grid.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let idx = self.index(x, y);
                if self.isfunction[idx] {
                    continue;
                }
                let invert = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => (x * y) % 2 + (x * y) % 3 == 0,
                    6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
                    7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
                    _ => unreachable!(),
                };
                self.modules[idx] ^= invert;
            }
        }
    }

    /// Computes the penalty score of the current grid state. Lower is
    /// better for scanners.
    fn get_penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size = self.size;

        // Adjacent same-color runs and finder-like patterns, row-wise.
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.modules[self.index(x, y)] == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.modules[self.index(x, y)];
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        // And column-wise.
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.modules[self.index(x, y)] == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.modules[self.index(x, y)];
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // 2x2 blocks of identical color; overlapping windows all count.
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.modules[self.index(x, y)];
                if color == self.modules[self.index(x + 1, y)]
                    && color == self.modules[self.index(x, y + 1)]
                    && color == self.modules[self.index(x + 1, y + 1)]
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Dark module balance, in steps of 5% deviation from half.
        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!((0..=9).contains(&k));
        result += k * PENALTY_N4;
        result
    }
}

impl std::fmt::Debug for QrCode {
    /// The module grids are elided; they are far too large to be useful
    /// in assertion output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrCode")
            .field("version", &self.version)
            .field("size", &self.size)
            .field("ecl", &self.ecl)
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

impl PartialEq for QrCode {
    /// The function-module shadow grid is deliberately ignored.
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.ecl == other.ecl
            && self.mask == other.mask
            && self.modules == other.modules
            && self.module_types == other.module_types
    }
}

impl Eq for QrCode {}

/*---- Penalty scoring helpers ----*/

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// Sliding window over the last seven run lengths of a line, used to spot
/// 1:1:3:1:1 finder-like patterns. A synthetic light run of the symbol
/// size is pushed at both ends of each line so boundary patterns count.
struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self {
            qr_size: size,
            run_history: [0; 7],
        }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size; // Leading light border
        }
        let len = self.run_history.len();
        self.run_history.copy_within(0..len - 1, 1);
        self.run_history[0] = currentrunlength;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        i32::from(
            n > 0
                && rh[2] == n
                && rh[3] == n * 3
                && rh[4] == n
                && rh[5] == n
                && (rh[0] >= n * 4 || rh[6] >= n * 4),
        )
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            // Terminate dark run
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size; // Trailing light border
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

/*---- Public parameter types ----*/

/// The error correction level in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates about 7% erroneous codewords.
    Low,
    /// Tolerates about 15% erroneous codewords.
    Medium,
    /// Tolerates about 25% erroneous codewords.
    Quartile,
    /// Tolerates about 30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Row index into the capacity tables.
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// The 2-bit value placed in the format information.
    fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }
}

/// A QR Code version number (1-40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported by the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported by the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "version number out of range"
        );
        Self(ver)
    }

    /// Creates a version object from an untrusted number, failing with
    /// [`Error::ValueOutOfRange`] outside [1, 40].
    pub fn try_new(ver: u8) -> Result<Self, Error> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(Error::ValueOutOfRange("version number"))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// A mask pattern number (0-7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "mask value out of range");
        Self(mask)
    }

    /// Creates a mask object from an untrusted number, failing with
    /// [`Error::ValueOutOfRange`] above 7.
    pub fn try_new(mask: u8) -> Result<Self, Error> {
        if mask <= 7 {
            Ok(Self(mask))
        } else {
            Err(Error::ValueOutOfRange("mask value"))
        }
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// What a module was drawn as.
///
/// Everything except [`ModuleType::Data`] is a function module: it is
/// never masked and never carries codeword bits. External renderers use
/// this to style the two populations differently.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ModuleType {
    /// Codeword or remainder bit, subject to masking.
    Data,
    /// One of the three corner finder patterns or its separator ring.
    FinderPattern,
    /// A 5x5 alignment pattern (versions 2 and up).
    AlignmentPattern,
    /// The alternating pattern along row 6.
    HorizontalTiming,
    /// The alternating pattern along column 6.
    VerticalTiming,
    /// Format information, including the always-dark module.
    Format,
    /// Version information blocks (versions 7 and up).
    Version,
}

impl ModuleType {
    /// Returns `true` for every kind except [`ModuleType::Data`].
    pub fn is_function(self) -> bool {
        self != ModuleType::Data
    }
}

fn get_bit(x: u32, i: u8) -> bool {
    (x >> i) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    fn sample_codewords(ver: Version, ecl: QrCodeEcc) -> Vec<u8> {
        (0..tables::num_data_codewords(ver, ecl))
            .map(|i| (i * 37 + 11) as u8)
            .collect()
    }

    #[test]
    fn size_follows_version() {
        for v in (1..=40).step_by(13) {
            let ver = Version::new(v);
            let qr = QrCode::new(
                ver,
                QrCodeEcc::Low,
                &vec![0u8; tables::num_data_codewords(ver, QrCodeEcc::Low)],
                Some(Mask::new(0)),
            );
            assert_eq!(qr.size(), i32::from(v) * 4 + 17);
            assert_eq!(qr.size() % 2, 1);
            assert!(qr.size() <= 177);
        }
    }

    #[test]
    fn function_pattern_layout() {
        let qr = QrCode::new(
            Version::new(1),
            QrCodeEcc::Low,
            &[0u8; 19],
            Some(Mask::new(0)),
        );
        // Finder centers and outer ring corners are dark.
        assert_eq!(qr.module(3, 3), Ok(true));
        assert_eq!(qr.module(0, 0), Ok(true));
        assert_eq!(qr.module(20, 0), Ok(true));
        assert_eq!(qr.module(0, 20), Ok(true));
        // The light ring at chebyshev distance 2 from the center.
        assert_eq!(qr.module(3, 1), Ok(false));
        // Separator is light and classified as part of the finder region.
        assert_eq!(qr.module(7, 7), Ok(false));
        assert_eq!(qr.module_type(7, 7), Ok(ModuleType::FinderPattern));
        // Timing alternates starting dark, between the finders.
        for i in 8..13 {
            assert_eq!(qr.module(i, 6), Ok(i % 2 == 0));
            assert_eq!(qr.module_type(i, 6), Ok(ModuleType::HorizontalTiming));
            assert_eq!(qr.module(6, i), Ok(i % 2 == 0));
            assert_eq!(qr.module_type(6, i), Ok(ModuleType::VerticalTiming));
        }
        // The always-dark module.
        assert_eq!(qr.module(8, qr.size() - 8), Ok(true));
        assert_eq!(qr.module_type(8, qr.size() - 8), Ok(ModuleType::Format));
        // Out-of-bounds reads fail; the renderer helper maps them to light.
        assert!(qr.module(-1, 0).is_err());
        assert!(qr.module_type(0, 21).is_err());
        assert!(!qr.get_module(-1, 0));
    }

    #[test]
    fn module_type_census() {
        // Data cells are exactly the raw data modules; format cells are
        // two 15-bit copies plus the dark module.
        for v in [1u8, 2, 7, 32, 40] {
            let ver = Version::new(v);
            let qr = QrCode::new(
                ver,
                QrCodeEcc::Low,
                &vec![0u8; tables::num_data_codewords(ver, QrCodeEcc::Low)],
                Some(Mask::new(3)),
            );
            let mut counts = std::collections::HashMap::new();
            for y in 0..qr.size() {
                for x in 0..qr.size() {
                    *counts
                        .entry(qr.module_type(x, y).unwrap())
                        .or_insert(0usize) += 1;
                }
            }
            assert_eq!(
                counts[&ModuleType::Data],
                tables::num_raw_data_modules(ver),
                "version {v}"
            );
            assert_eq!(counts[&ModuleType::Format], 31);
            assert_eq!(
                counts.get(&ModuleType::Version).copied().unwrap_or(0),
                if v >= 7 { 36 } else { 0 }
            );
            assert_eq!(counts[&ModuleType::FinderPattern], 3 * 64);
        }
    }

    #[test]
    fn mask_is_an_involution() {
        let data = sample_codewords(Version::new(2), QrCodeEcc::Medium);
        let mut qr = QrCode::new(Version::new(2), QrCodeEcc::Medium, &data, Some(Mask::new(0)));
        let before = qr.modules.clone();
        for m in 0..8 {
            qr.apply_mask(Mask::new(m));
            qr.apply_mask(Mask::new(m));
            assert_eq!(qr.modules, before, "mask {m}");
        }
    }

    #[test]
    fn auto_mask_minimizes_penalty() {
        let data = sample_codewords(Version::new(1), QrCodeEcc::Low);
        let auto = QrCode::new(Version::new(1), QrCodeEcc::Low, &data, None);
        let penalties: Vec<i32> = (0..8)
            .map(|m| {
                QrCode::new(Version::new(1), QrCodeEcc::Low, &data, Some(Mask::new(m)))
                    .get_penalty_score()
            })
            .collect();
        let best = *penalties.iter().min().unwrap();
        assert_eq!(auto.get_penalty_score(), best);
        // Ties break toward the lowest index.
        let first_best = penalties.iter().position(|&p| p == best).unwrap();
        assert_eq!(usize::from(auto.mask().value()), first_best);
    }

    #[test]
    fn construction_is_deterministic() {
        let data = sample_codewords(Version::new(3), QrCodeEcc::Quartile);
        let a = QrCode::new(Version::new(3), QrCodeEcc::Quartile, &data, None);
        let b = QrCode::new(Version::new(3), QrCodeEcc::Quartile, &data, None);
        assert_eq!(a, b);
        assert_eq!(a.mask(), b.mask());
    }

    #[test]
    fn rejects_inverted_version_range() {
        let segs = QrSegment::make_segments("X").unwrap();
        let result = QrCode::encode_segments(
            &segs,
            QrCodeEcc::Low,
            Version::new(5),
            Version::new(2),
            None,
            true,
        );
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn boost_raises_but_never_grows_version() {
        // 74 data bits fit version 1 up to Quartile (104 bits) but not
        // High (72 bits).
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version(), Version::new(1));
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Quartile);
    }

    #[test]
    fn fixed_ecl_without_boost_is_respected() {
        let segs = QrSegment::make_segments("HELLO WORLD").unwrap();
        let qr = QrCode::encode_segments(
            &segs,
            QrCodeEcc::Low,
            Version::MIN,
            Version::MAX,
            None,
            false,
        )
        .unwrap();
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Low);
    }
}
