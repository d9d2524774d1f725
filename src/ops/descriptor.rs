//! Immutable per-iteration operation descriptors.

use std::fmt;

use crate::foundation::core::SurfaceDesc;
use crate::ops::colormap::ColorMap;
use crate::ops::rules::{CombinationRule, MatchRule};

/// The repeating halftone rows an operation may reference (a prefix of 1..=12 of them).
pub const HALFTONE_PATTERN: [u32; 12] = [
    0x5555_5555,
    0x3333_3333,
    0x0F0F_0F0F,
    0x00FF_00FF,
    0x0000_FFFF,
    0xFFFF_FFFF,
    0x0000_0000,
    0xFFFF_0000,
    0xFF00_FF00,
    0xF0F0_F0F0,
    0xCCCC_CCCC,
    0xAAAA_AAAA,
];

/// A halftone made of the first `height` rows of [`HALFTONE_PATTERN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Halftone {
    /// Rows in the pattern, `1..=12`.
    pub height: usize,
}

impl Halftone {
    /// The pattern rows.
    pub fn words(&self) -> &'static [u32] {
        &HALFTONE_PATTERN[..self.height]
    }

    /// Mask word for destination row `row`.
    pub fn word_for_row(&self, row: usize) -> u32 {
        HALFTONE_PATTERN[row % self.height]
    }
}

/// Rule-specific payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum RuleOptions {
    /// The rule takes no options.
    #[default]
    None,
    /// Constant source alpha for `alphaBlendConst` / `alphaPaintConst`.
    SourceAlpha(u8),
    /// Component-alpha settings for `rgbComponentAlpha`.
    ComponentAlpha {
        /// Fixed colour, `0xRRGGBB`.
        color: u32,
        /// Fixed alpha.
        alpha: u8,
        /// Whether the gamma/ungamma tables are supplied.
        gamma: bool,
    },
}

/// One fully specified combination operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CombineOp {
    /// Combination rule.
    pub rule: CombinationRule,
    /// Ignore the source operand.
    pub no_source: bool,
    /// Source layout and origin.
    pub src: SurfaceDesc,
    /// Destination layout and origin.
    pub dest: SurfaceDesc,
    /// Rectangle width in pixels.
    pub width: usize,
    /// Rectangle height in rows.
    pub height: usize,
    /// Source-to-destination colour mapping.
    pub color_map: ColorMap,
    /// Halftone, if enabled.
    pub halftone: Option<Halftone>,
    /// Rule-specific payload.
    pub options: RuleOptions,
}

/// One fully specified comparison operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CompareOp {
    /// Match rule.
    pub rule: MatchRule,
    /// Count every match instead of stopping at the first.
    pub tally: bool,
    /// First operand.
    pub a: SurfaceDesc,
    /// Second operand.
    pub b: SurfaceDesc,
    /// Rectangle width in pixels.
    pub width: usize,
    /// Rectangle height in rows.
    pub height: usize,
    /// Colour compared against operand A.
    pub color_a: u32,
    /// Colour compared against operand B.
    pub color_b: u32,
}

/// Width and height of a synthesized buffer, in pixels and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Extent {
    /// Pixels per row.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

/// A combination operation plus the extents of the buffers it was drawn against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CombineCase {
    /// The operation.
    pub op: CombineOp,
    /// Source buffer extent.
    pub src_extent: Extent,
    /// Destination buffer extent.
    pub dest_extent: Extent,
}

impl CombineCase {
    /// Bytes of destination the digest covers: every row of the destination extent.
    pub fn dest_region_bytes(&self) -> usize {
        self.dest_extent.height * self.op.dest.pitch
    }
}

/// A comparison operation plus the extents of its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CompareCase {
    /// The operation.
    pub op: CompareOp,
    /// Operand A extent.
    pub a_extent: Extent,
    /// Operand B extent.
    pub b_extent: Extent,
}

fn endian_letter(s: &SurfaceDesc) -> char {
    if s.msb { 'B' } else { 'L' }
}

impl fmt::Display for CombineCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = &self.op;
        writeln!(
            f,
            "combinationRule = {} ({}), noSource = {}",
            op.rule.id(),
            op.rule,
            u8::from(op.no_source)
        )?;
        writeln!(
            f,
            "source      {:2} bpp {}E, {:4} x {}",
            op.src.depth.bits(),
            endian_letter(&op.src),
            self.src_extent.width,
            self.src_extent.height
        )?;
        writeln!(
            f,
            "destination {:2} bpp {}E, {:4} x {}",
            op.dest.depth.bits(),
            endian_letter(&op.dest),
            self.dest_extent.width,
            self.dest_extent.height
        )?;
        writeln!(
            f,
            "{},{} -> {},{}, size {} x {}",
            op.src.x, op.src.y, op.dest.x, op.dest.y, op.width, op.height
        )?;
        writeln!(
            f,
            "ColorMapFixed = {}, ColorMapIndexed = {}, cmMask = 0x{:X}",
            u8::from(op.color_map.fixed.is_some()),
            u8::from(op.color_map.indexed.is_some()),
            op.color_map.index_mask()
        )?;
        writeln!(
            f,
            "noHalftone = {}, halftoneHeight = {}",
            u8::from(op.halftone.is_none()),
            op.halftone.map_or(0, |h| h.height)
        )?;
        match op.options {
            RuleOptions::None => {}
            RuleOptions::SourceAlpha(alpha) => writeln!(f, "sourceAlpha = 0x{alpha:02X}")?,
            RuleOptions::ComponentAlpha {
                color,
                alpha,
                gamma,
            } => writeln!(
                f,
                "fixed colour = 0x{color:06X}, fixed alpha = 0x{alpha:02X}, gamma tables = {}",
                u8::from(gamma)
            )?,
        }
        Ok(())
    }
}

impl fmt::Display for CompareCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = &self.op;
        writeln!(
            f,
            "matchRule = {} ({}), tally = {}",
            op.rule.id(),
            op.rule,
            u8::from(op.tally)
        )?;
        writeln!(
            f,
            "source A    {:2} bpp {}E, {:4} x {}",
            op.a.depth.bits(),
            endian_letter(&op.a),
            self.a_extent.width,
            self.a_extent.height
        )?;
        writeln!(
            f,
            "source B    {:2} bpp {}E, {:4} x {}",
            op.b.depth.bits(),
            endian_letter(&op.b),
            self.b_extent.width,
            self.b_extent.height
        )?;
        writeln!(
            f,
            "offsets {},{} and {},{}, size {} x {}",
            op.a.x, op.a.y, op.b.x, op.b.y, op.width, op.height
        )?;
        writeln!(f, "colours {:08X}, {:08X}", op.color_a, op.color_b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/descriptor.rs"]
mod tests;
