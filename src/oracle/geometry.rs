//! Closed-form check of a comparison engine, independent of any digest table.
//!
//! Two equal boxes of set pixels sit on a transparent background in buffers of different
//! sizes. Sliding one operand origin over the larger buffer changes how much of its box falls
//! inside the compared rectangle, and the match count for every rule must equal the area of
//! the overlap.

use std::fmt;

use crate::engine::ComparisonEngine;
use crate::foundation::core::{Depth, SurfaceDesc, write_pixel};
use crate::ops::descriptor::CompareOp;
use crate::ops::rules::MatchRule;

/// Edge length of each box, in pixels.
pub const BOX_SIZE: usize = 5;

/// Expected count when the large buffer's origin is at `(x, y)`.
pub fn expected_overlap(x: usize, y: usize) -> u32 {
    let span = |offset: usize| BOX_SIZE.saturating_sub(offset.abs_diff(BOX_SIZE)) as u32;
    span(x) * span(y)
}

/// One operand: a buffer with a box drawn in it.
#[derive(Clone, Debug)]
pub struct BoxImage {
    /// Layout, origin at `(0, 0)`.
    pub desc: SurfaceDesc,
    /// Pixels.
    pub words: Vec<u32>,
}

impl BoxImage {
    /// A `side` × `side` transparent image with a box of all-ones pixels at `(corner, corner)`.
    pub fn new(side: usize, corner: usize, depth: Depth, msb: bool) -> Self {
        let desc = SurfaceDesc::packed(side, depth, msb);
        let mut words = vec![0; desc.words_per_row() * side];
        for y in corner..corner + BOX_SIZE {
            for x in corner..corner + BOX_SIZE {
                write_pixel(&mut words, &desc, x, y, depth.pixel_mask());
            }
        }
        Self { desc, words }
    }
}

/// The large and small operands for one depth and endianness.
#[derive(Clone, Debug)]
pub struct BoxFixture {
    /// 25 × 25 pixels, box at `(10, 10)`; its origin is swept.
    pub large: BoxImage,
    /// 15 × 15 pixels, box at `(5, 5)`; its origin stays at `(0, 0)`.
    pub small: BoxImage,
}

impl BoxFixture {
    /// Build both operands.
    pub fn new(depth: Depth, msb: bool) -> Self {
        Self {
            large: BoxImage::new(BOX_SIZE * 5, BOX_SIZE * 2, depth, msb),
            small: BoxImage::new(BOX_SIZE * 3, BOX_SIZE, depth, msb),
        }
    }

    /// Depth of both operands.
    pub fn depth(&self) -> Depth {
        self.large.desc.depth
    }
}

/// Colours that turn each rule into "both pixels are inside a box".
fn rule_colors(rule: MatchRule, depth: Depth) -> (u32, u32) {
    let set = depth.pixel_mask();
    match rule {
        MatchRule::PixelMatch => (set, set),
        MatchRule::NotANotB => (0, 0),
        MatchRule::NotAMatchB => (0, set),
    }
}

/// A configuration where the engine disagreed with the overlap area.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BoxMismatch {
    /// The operation as issued, including both operand origins.
    pub op: CompareOp,
    /// Engine result.
    pub actual: u32,
    /// Overlap area.
    pub expected: u32,
}

fn describe(f: &mut fmt::Formatter<'_>, label: &str, s: &SurfaceDesc) -> fmt::Result {
    writeln!(
        f,
        "{label}: {} bpp, {}-endian, stride {}, x {}, y {}",
        s.depth,
        if s.msb { "big" } else { "little" },
        s.pitch,
        s.x,
        s.y
    )
}

impl fmt::Display for BoxMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rule {}, width {}, height {}",
            self.op.rule, self.op.width, self.op.height
        )?;
        describe(f, "A", &self.op.a)?;
        describe(f, "B", &self.op.b)?;
        writeln!(f, "Result = {}, should be {}", self.actual, self.expected)
    }
}

/// Outcome of a full sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BoxSweep {
    /// Engine calls made.
    pub cases: usize,
    /// Calls whose result differed from the overlap area.
    pub mismatches: Vec<BoxMismatch>,
}

impl BoxSweep {
    /// `true` when every call matched.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Sweep the large operand's origin over `0..=10` in both axes, for every match rule, with the
/// operands in both orders.
#[tracing::instrument(skip_all, fields(engine = engine.name(), depth = %fixture.depth()))]
pub fn sweep_boxes<E: ComparisonEngine + ?Sized>(engine: &mut E, fixture: &BoxFixture) -> BoxSweep {
    let mut sweep = BoxSweep::default();
    let small = fixture.small.desc;
    for y in 0..=BOX_SIZE * 2 {
        for x in 0..=BOX_SIZE * 2 {
            let large = fixture.large.desc.at(x, y);
            let expected = expected_overlap(x, y);
            for &rule in MatchRule::ALL {
                let (color_a, color_b) = rule_colors(rule, fixture.depth());
                let orders = [
                    (large, &fixture.large.words, small, &fixture.small.words),
                    (small, &fixture.small.words, large, &fixture.large.words),
                ];
                for (a, a_words, b, b_words) in orders {
                    let op = CompareOp {
                        rule,
                        tally: true,
                        a,
                        b,
                        width: BOX_SIZE * 3,
                        height: BOX_SIZE * 3,
                        color_a,
                        color_b,
                    };
                    let actual = engine.compare_colors(&op, a_words, b_words);
                    sweep.cases += 1;
                    if actual != expected {
                        tracing::warn!(rule = %rule, x, y, actual, expected, "box overlap mismatch");
                        sweep.mismatches.push(BoxMismatch {
                            op,
                            actual,
                            expected,
                        });
                    }
                }
            }
        }
    }
    sweep
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/geometry.rs"]
mod tests;
