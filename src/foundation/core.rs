use crate::foundation::error::{BlitError, BlitResult};

/// Bits per pixel, stored as its base-2 logarithm.
///
/// Only powers of two from 1 to 32 bits are representable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u32", try_from = "u32")]
pub struct Depth(u8);

impl Depth {
    /// Every legal depth, indexed by its logarithm.
    pub const ALL: [Depth; 6] = [Depth(0), Depth(1), Depth(2), Depth(3), Depth(4), Depth(5)];

    /// 1 bit per pixel.
    pub const D1: Depth = Depth(0);
    /// 2 bits per pixel.
    pub const D2: Depth = Depth(1);
    /// 4 bits per pixel.
    pub const D4: Depth = Depth(2);
    /// 8 bits per pixel.
    pub const D8: Depth = Depth(3);
    /// 16 bits per pixel.
    pub const D16: Depth = Depth(4);
    /// 32 bits per pixel.
    pub const D32: Depth = Depth(5);

    /// Build from a logarithm in `0..=5`.
    pub fn from_log2(log2: u32) -> BlitResult<Self> {
        Self::ALL
            .get(log2 as usize)
            .copied()
            .ok_or_else(|| BlitError::config(format!("bad colour depth: log2 {log2} out of range")))
    }

    /// Build from a bit count; must be a power of two in `1..=32`.
    pub fn from_bits(bits: u32) -> BlitResult<Self> {
        if !(1..=32).contains(&bits) || !bits.is_power_of_two() {
            return Err(BlitError::config(format!("bad colour depth: {bits}")));
        }
        Ok(Self(bits.trailing_zeros() as u8))
    }

    /// Base-2 logarithm of the bit count.
    pub const fn log2(self) -> u32 {
        self.0 as u32
    }

    /// Bits per pixel.
    pub const fn bits(self) -> u32 {
        1 << self.0
    }

    /// Mask covering one pixel value.
    pub const fn pixel_mask(self) -> u32 {
        if self.0 == 5 {
            u32::MAX
        } else {
            (1 << self.bits()) - 1
        }
    }

    /// Number of pixels packed into one 32-bit word.
    pub const fn pixels_per_word(self) -> u32 {
        32 >> self.0
    }
}

impl From<Depth> for u32 {
    fn from(d: Depth) -> u32 {
        d.bits()
    }
}

impl TryFrom<u32> for Depth {
    type Error = BlitError;

    fn try_from(bits: u32) -> BlitResult<Self> {
        Self::from_bits(bits)
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Row stride in bytes for `width` pixels: whole bits rounded up to a 4-byte multiple.
pub fn pitch_for(width: usize, depth: Depth) -> usize {
    ((width * depth.bits() as usize + 31) >> 3) & !3
}

/// One operand of an engine call: the layout of a packed word buffer plus the origin
/// of the operation rectangle inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SurfaceDesc {
    /// Bits per pixel.
    pub depth: Depth,
    /// Bytes between the starts of consecutive rows (multiple of 4).
    pub pitch: usize,
    /// `true` when the first pixel of a word sits in its most significant bits.
    pub msb: bool,
    /// Rectangle origin, in pixels.
    pub x: usize,
    /// Rectangle origin, in rows.
    pub y: usize,
}

impl SurfaceDesc {
    /// Validated constructor; the origin starts at `(0, 0)`.
    pub fn new(depth: Depth, pitch: usize, msb: bool) -> BlitResult<Self> {
        if !pitch.is_multiple_of(4) {
            return Err(BlitError::geometry(format!(
                "pitch {pitch} is not a multiple of 4 bytes"
            )));
        }
        Ok(Self {
            depth,
            pitch,
            msb,
            x: 0,
            y: 0,
        })
    }

    /// Tightly packed rows of `width` pixels.
    pub fn packed(width: usize, depth: Depth, msb: bool) -> Self {
        Self {
            depth,
            pitch: pitch_for(width, depth),
            msb,
            x: 0,
            y: 0,
        }
    }

    /// Same layout with a different rectangle origin.
    pub fn at(self, x: usize, y: usize) -> Self {
        Self { x, y, ..self }
    }

    /// Words per row.
    pub fn words_per_row(&self) -> usize {
        self.pitch / 4
    }

    /// Number of pixels that fit in one row.
    pub fn row_capacity(&self) -> usize {
        self.pitch * 8 / self.depth.bits() as usize
    }

    /// Check that a `width` × `height` rectangle at this origin fits inside `words`.
    pub fn check_rect(&self, width: usize, height: usize, words: usize) -> BlitResult<()> {
        if width == 0 || height == 0 {
            return Err(BlitError::geometry("empty operation rectangle"));
        }
        if self.x + width > self.row_capacity() {
            return Err(BlitError::geometry(format!(
                "{} pixels from x={} exceed a {}-byte row at {} bpp",
                width, self.x, self.pitch, self.depth
            )));
        }
        let rows = self.y + height;
        if rows * self.words_per_row() > words {
            return Err(BlitError::geometry(format!(
                "{rows} rows of {} bytes exceed a {words}-word buffer",
                self.pitch
            )));
        }
        Ok(())
    }

    fn locate(&self, x: usize, y: usize) -> (usize, u32) {
        let bits = self.depth.bits();
        let bit = x * bits as usize;
        let index = y * self.words_per_row() + bit / 32;
        let within = (bit % 32) as u32;
        let shift = if self.msb { 32 - bits - within } else { within };
        (index, shift)
    }
}

/// Read the pixel at absolute position `(x, y)`.
pub fn read_pixel(words: &[u32], surface: &SurfaceDesc, x: usize, y: usize) -> u32 {
    let (index, shift) = surface.locate(x, y);
    (words[index] >> shift) & surface.depth.pixel_mask()
}

/// Overwrite the pixel at absolute position `(x, y)`; excess bits of `value` are dropped.
pub fn write_pixel(words: &mut [u32], surface: &SurfaceDesc, x: usize, y: usize, value: u32) {
    let (index, shift) = surface.locate(x, y);
    let mask = surface.depth.pixel_mask() << shift;
    words[index] = (words[index] & !mask) | ((value << shift) & mask);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
