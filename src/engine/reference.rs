//! Pixel-at-a-time software engine.
//!
//! It is slow and deliberately simple: every pixel is read, mapped and written individually, so
//! it serves as a readable reference for the boolean rules and for all match rules. Arithmetic
//! and alpha rules are declined.

use crate::engine::{CombinationEngine, CombineSurfaces, ComparisonEngine};
use crate::foundation::core::{SurfaceDesc, read_pixel, write_pixel};
use crate::ops::descriptor::{CombineOp, CompareOp};
use crate::ops::rules::MatchRule;

/// The built-in reference engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceEngine;

/// Apply a 4-bit truth table bitwise; bit `(s << 1) | d` selects the output.
fn merge(table: u8, s: u32, d: u32) -> u32 {
    let mut out = 0;
    if table & 0b0001 != 0 {
        out |= !s & !d;
    }
    if table & 0b0010 != 0 {
        out |= !s & d;
    }
    if table & 0b0100 != 0 {
        out |= s & !d;
    }
    if table & 0b1000 != 0 {
        out |= s & d;
    }
    out
}

/// The bits of halftone word `word` that line up with destination pixel `x`.
fn halftone_bits(word: u32, dest: &SurfaceDesc, x: usize) -> u32 {
    let one_word = SurfaceDesc {
        pitch: 4,
        x: 0,
        y: 0,
        ..*dest
    };
    read_pixel(&[word], &one_word, x % dest.depth.pixels_per_word() as usize, 0)
}

impl CombinationEngine for ReferenceEngine {
    fn name(&self) -> &str {
        "reference"
    }

    fn supports(&self, op: &CombineOp) -> bool {
        op.rule.truth_table().is_some()
    }

    fn copy_bits(&mut self, op: &CombineOp, surfaces: CombineSurfaces<'_>) {
        let Some(table) = op.rule.truth_table() else {
            return;
        };
        let CombineSurfaces {
            src, dest, lookup, ..
        } = surfaces;
        let lookup = lookup.as_deref();
        let dest_mask = op.dest.depth.pixel_mask();

        for row in 0..op.height {
            let dy = op.dest.y + row;
            let halftone = op.halftone.map(|h| h.word_for_row(dy));
            for col in 0..op.width {
                let dx = op.dest.x + col;
                let mut s = if op.no_source {
                    dest_mask
                } else {
                    let raw = read_pixel(src, &op.src, op.src.x + col, op.src.y + row);
                    op.color_map.map(raw, lookup) & dest_mask
                };
                if let Some(word) = halftone {
                    s &= halftone_bits(word, &op.dest, dx);
                }
                let d = read_pixel(dest, &op.dest, dx, dy);
                write_pixel(dest, &op.dest, dx, dy, merge(table, s, d));
            }
        }
    }
}

impl ComparisonEngine for ReferenceEngine {
    fn name(&self) -> &str {
        "reference"
    }

    fn compare_colors(&mut self, op: &CompareOp, a: &[u32], b: &[u32]) -> u32 {
        let mut count = 0;
        for row in 0..op.height {
            for col in 0..op.width {
                let pa = read_pixel(a, &op.a, op.a.x + col, op.a.y + row);
                let pb = read_pixel(b, &op.b, op.b.x + col, op.b.y + row);
                let hit = match op.rule {
                    MatchRule::PixelMatch => pa == op.color_a && pb == op.color_b,
                    MatchRule::NotANotB => pa != op.color_a && pb != op.color_b,
                    MatchRule::NotAMatchB => pa != op.color_a && pb == op.color_b,
                };
                if hit {
                    if !op.tally {
                        return 1;
                    }
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/reference.rs"]
mod tests;
