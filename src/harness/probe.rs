//! One-shot operations on fixed full-screen buffers, for poking at a single rule and depth
//! pair without the random harness.

use crate::engine::{CombinationEngine, CombineSurfaces, ComparisonEngine};
use crate::foundation::core::{Depth, SurfaceDesc};
use crate::ops::colormap::{ColorMap, IndexedPart, LookupTables, MAP_5_8, MAP_8_5};
use crate::ops::descriptor::{CombineOp, CompareOp, Halftone, RuleOptions};
use crate::ops::rules::{CombinationRule, MatchRule};
use crate::oracle::crc::region_digest;

/// Default probe width, in pixels.
pub const SCREEN_WIDTH: usize = 1920;
/// Default probe height, in rows.
pub const SCREEN_HEIGHT: usize = 1080;

const SRC_FILL: u32 = 0x5A5A_5A5A;
const DEST_FILL: u32 = 0xA5A5_A5A5;

/// Colour mapping for a probe between two depths.
pub fn probe_color_map(src: Depth, dest: Depth) -> ColorMap {
    if src == dest {
        return ColorMap::NONE;
    }
    let indexed = |mask| {
        Some(IndexedPart {
            mask,
            table: dest,
        })
    };
    match (src, dest) {
        (Depth::D16, Depth::D32) => ColorMap {
            fixed: Some(&MAP_5_8),
            indexed: None,
        },
        (Depth::D32, Depth::D16) => ColorMap {
            fixed: Some(&MAP_8_5),
            indexed: None,
        },
        (Depth::D32, _) => ColorMap {
            fixed: Some(&MAP_8_5),
            indexed: indexed(0x7FFF),
        },
        (Depth::D16, _) => ColorMap {
            fixed: None,
            indexed: indexed(0x7FFF),
        },
        _ => ColorMap {
            fixed: None,
            indexed: indexed(src.pixel_mask()),
        },
    }
}

/// A combination probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombineProbe {
    /// Rule to run.
    pub rule: CombinationRule,
    /// Run without a source; forced for rules that never read it.
    pub no_source: bool,
    /// Mask the source with a single `0x55555555` halftone row.
    pub halftone: bool,
    /// Source depth (equal to the destination depth when there is no source).
    pub src_depth: Depth,
    /// Destination depth.
    pub dest_depth: Depth,
    /// Rectangle width.
    pub width: usize,
    /// Rectangle height.
    pub height: usize,
}

impl CombineProbe {
    /// Full-screen probe; rules that ignore the source get `no_source` set.
    pub fn new(rule: CombinationRule, src_depth: Depth, dest_depth: Depth) -> Self {
        Self {
            rule,
            no_source: rule.ignores_source(),
            halftone: false,
            src_depth,
            dest_depth,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }

    /// The operation this probe issues.
    pub fn op(&self) -> CombineOp {
        CombineOp {
            rule: self.rule,
            no_source: self.no_source,
            src: SurfaceDesc::packed(self.width, self.src_depth, true),
            dest: SurfaceDesc::packed(self.width, self.dest_depth, true),
            width: self.width,
            height: self.height,
            color_map: probe_color_map(self.src_depth, self.dest_depth),
            halftone: self.halftone.then_some(Halftone { height: 1 }),
            options: RuleOptions::None,
        }
    }

    /// Run once and digest the whole destination.
    #[tracing::instrument(skip(engine), fields(engine = engine.name()))]
    pub fn run<E: CombinationEngine + ?Sized>(&self, engine: &mut E) -> ProbeOutcome {
        let op = self.op();
        let src = vec![SRC_FILL; op.src.words_per_row() * self.height];
        let mut dest = vec![DEST_FILL; op.dest.words_per_row() * self.height];
        let mut tables = LookupTables::zeroed();
        let declined = !engine.supports(&op);
        if !declined {
            let mut table = op.color_map.indexed.map(|ix| tables.scoped(ix.table));
            engine.copy_bits(
                &op,
                CombineSurfaces {
                    src: &src,
                    dest: &mut dest,
                    lookup: table.as_deref_mut(),
                    gamma: None,
                },
            );
        }
        ProbeOutcome {
            value: region_digest(&dest, self.height * op.dest.pitch),
            declined,
        }
    }
}

/// Result of a probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ProbeOutcome {
    /// Destination CRC for combination probes, engine return value for match probes.
    pub value: u32,
    /// The engine declined the operation; `value` is the untouched destination's CRC.
    pub declined: bool,
}

/// Colours that make each match rule meaningful on blank buffers.
pub fn probe_match_colors(rule: MatchRule) -> (u32, u32) {
    match rule {
        MatchRule::PixelMatch => (u32::MAX, u32::MAX),
        MatchRule::NotANotB => (0, 0),
        MatchRule::NotAMatchB => (0, u32::MAX),
    }
}

/// A comparison probe over two blank full-screen buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchProbe {
    /// Rule to run.
    pub rule: MatchRule,
    /// Count every match instead of stopping at the first.
    pub tally: bool,
    /// Depth of operand A.
    pub a_depth: Depth,
    /// Depth of operand B.
    pub b_depth: Depth,
    /// Rectangle width.
    pub width: usize,
    /// Rectangle height.
    pub height: usize,
}

impl MatchProbe {
    /// Full-screen tallying probe.
    pub fn new(rule: MatchRule, a_depth: Depth, b_depth: Depth) -> Self {
        Self {
            rule,
            tally: true,
            a_depth,
            b_depth,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }

    /// The operation this probe issues.
    pub fn op(&self) -> CompareOp {
        let (color_a, color_b) = probe_match_colors(self.rule);
        CompareOp {
            rule: self.rule,
            tally: self.tally,
            a: SurfaceDesc::packed(self.width, self.a_depth, true),
            b: SurfaceDesc::packed(self.width, self.b_depth, true),
            width: self.width,
            height: self.height,
            color_a: color_a & self.a_depth.pixel_mask(),
            color_b: color_b & self.b_depth.pixel_mask(),
        }
    }

    /// Run once and return the engine's answer.
    #[tracing::instrument(skip(engine), fields(engine = engine.name()))]
    pub fn run<E: ComparisonEngine + ?Sized>(&self, engine: &mut E) -> ProbeOutcome {
        let op = self.op();
        let a = vec![0; op.a.words_per_row() * self.height];
        let b = vec![0; op.b.words_per_row() * self.height];
        ProbeOutcome {
            value: engine.compare_colors(&op, &a, &b),
            declined: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/harness/probe.rs"]
mod tests;
