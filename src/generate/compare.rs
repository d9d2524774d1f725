//! Operation and buffer synthesis for the comparison harness.
//!
//! Unlike the combination harness, operand buffers are refilled every iteration, part-way
//! through the draw sequence, so generation owns the buffers.

use crate::foundation::core::{Depth, SurfaceDesc};
use crate::generate::combine::draw_endianness;
use crate::ops::descriptor::{CompareCase, CompareOp, Extent};
use crate::ops::rules::MatchRule;
use crate::random::fill::{FillProfile, fill_biased};
use crate::random::sequencer::Sequencer;

/// Largest operand width drawn, in pixels.
pub const MAX_WIDTH: usize = 1920;
/// Largest operand height drawn, in rows.
pub const MAX_HEIGHT: usize = 16;
/// Words in each operand buffer.
pub const BUFFER_WORDS: usize = MAX_WIDTH * MAX_HEIGHT;

/// The two operand buffers, reused across iterations.
#[derive(Clone, Debug)]
pub struct CompareBuffers {
    /// Operand A.
    pub a: Vec<u32>,
    /// Operand B.
    pub b: Vec<u32>,
}

impl Default for CompareBuffers {
    fn default() -> Self {
        Self {
            a: vec![0; BUFFER_WORDS],
            b: vec![0; BUFFER_WORDS],
        }
    }
}

fn draw_extent(seq: &mut Sequencer) -> Extent {
    let width = seq.below(MAX_WIDTH as u32) as usize + 1;
    let height = seq.below(MAX_HEIGHT as u32) as usize + 1;
    Extent { width, height }
}

/// 8, 16 or 32 bpp three times in four; otherwise one of 1, 2 or 4 bpp.
fn draw_depth(seq: &mut Sequencer) -> Depth {
    let mut log2 = seq.below(4) + 2;
    if log2 == 2 {
        log2 = seq.below(3);
    }
    Depth::ALL[log2 as usize]
}

/// Zero, a random value or all ones, masked to `depth`.
fn draw_color(seq: &mut Sequencer, depth: Depth) -> u32 {
    let color = match seq.below(3) {
        0 => 0,
        1 => {
            let low = seq.next();
            low ^ (seq.next() << 16)
        }
        _ => u32::MAX,
    };
    color & depth.pixel_mask()
}

/// Draw one comparison case and refill the operand regions it covers.
pub fn generate_compare_case(seq: &mut Sequencer, buffers: &mut CompareBuffers) -> CompareCase {
    let a_extent = draw_extent(seq);
    let b_extent = draw_extent(seq);

    let rule = MatchRule::ALL[seq.below(MatchRule::ALL.len() as u32) as usize];
    let tally = seq.coin();
    let a_depth = draw_depth(seq);
    let b_depth = draw_depth(seq);

    let (a_msb, b_msb) = draw_endianness(seq);
    let mut a = SurfaceDesc::packed(a_extent.width, a_depth, a_msb);
    let mut b = SurfaceDesc::packed(b_extent.width, b_depth, b_msb);

    a.x = seq.below(a_extent.width as u32) as usize;
    b.x = seq.below(b_extent.width as u32) as usize;
    a.y = seq.below(a_extent.height as u32) as usize;
    b.y = seq.below(b_extent.height as u32) as usize;

    let a_words = a_extent.height * a.words_per_row();
    let b_words = b_extent.height * b.words_per_row();
    fill_biased(&mut buffers.a[..a_words], FillProfile::Uniform64, seq);
    fill_biased(&mut buffers.b[..b_words], FillProfile::Uniform64, seq);

    let columns = (a_extent.width - a.x).min(b_extent.width - b.x);
    let width = seq.below(columns as u32) as usize + 1;
    let rows = (a_extent.height - a.y).min(b_extent.height - b.y);
    let height = seq.below(rows as u32) as usize + 1;

    let color_a = draw_color(seq, a_depth);
    let color_b = draw_color(seq, b_depth);

    CompareCase {
        op: CompareOp {
            rule,
            tally,
            a,
            b,
            width,
            height,
            color_a,
            color_b,
        },
        a_extent,
        b_extent,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/compare.rs"]
mod tests;
