//! Operation synthesis for the combination harness.
//!
//! Everything here is a pure function of the draw stream. Every draw listed in the function
//! bodies is load-bearing: adding, removing or reordering one changes every golden digest.

use crate::foundation::core::{Depth, SurfaceDesc};
use crate::ops::catalogue::{CATALOGUE, CatalogueEntry};
use crate::ops::colormap::{
    ColorMap, GammaTables, IndexedPart, LookupTables, MAP_5_3, MAP_5_4, MAP_5_8, MAP_8_3, MAP_8_4,
    MAP_8_5,
};
use crate::ops::descriptor::{CombineCase, CombineOp, Extent, Halftone, RuleOptions};
use crate::ops::rules::CombinationRule;
use crate::random::fill::{FillProfile, fill_biased};
use crate::random::sequencer::Sequencer;

/// Largest buffer width drawn, in pixels.
pub const MAX_WIDTH: usize = 3840;
/// Largest buffer height drawn, in rows.
pub const MAX_HEIGHT: usize = 16;
/// Words in each combination buffer: enough for the widest 32 bpp row at full height.
pub const BUFFER_WORDS: usize = MAX_WIDTH * MAX_HEIGHT;

/// Depth logarithms weighted toward 8, 16 and 32 bpp.
const DEPTH_WEIGHTS: [u32; 10] = [0, 1, 2, 3, 3, 4, 4, 5, 5, 5];

/// State shared by every iteration of a combination run, all drawn once from `seed(0)`.
#[derive(Clone, Debug)]
pub struct CombineFixture {
    /// Source pixels.
    pub src: Vec<u32>,
    /// Pristine destination; each iteration starts from a copy of it.
    pub dest_init: Vec<u32>,
    /// Per-depth indexed colour-map tables.
    pub lookup: LookupTables,
    /// Component-alpha gamma tables.
    pub gamma: GammaTables,
}

impl CombineFixture {
    /// Draw the lookup tables, then the gamma tables, then the source and destination buffers,
    /// in that order from one stream.
    pub fn generate() -> Self {
        let mut seq = Sequencer::new(0);
        let lookup = LookupTables::generate(&mut seq);
        let gamma = GammaTables::generate(&mut seq);
        let mut src = vec![0; BUFFER_WORDS];
        let mut dest_init = vec![0; BUFFER_WORDS];
        fill_biased(&mut src, FillProfile::Exponential, &mut seq);
        fill_biased(&mut dest_init, FillProfile::Exponential, &mut seq);
        Self {
            src,
            dest_init,
            lookup,
            gamma,
        }
    }
}

fn draw_extent(seq: &mut Sequencer) -> Extent {
    let width = seq.below(MAX_WIDTH as u32) as usize + 1;
    let height = seq.below(MAX_HEIGHT as u32) as usize + 1;
    Extent { width, height }
}

/// A weighted depth, redrawn until it lies in the entry's range.
fn draw_depth(seq: &mut Sequencer, entry: &CatalogueEntry) -> Depth {
    loop {
        let depth = Depth::ALL[DEPTH_WEIGHTS[seq.below(10) as usize] as usize];
        if entry.allows(depth) {
            return depth;
        }
    }
}

fn draw_color_map(seq: &mut Sequencer, use_lookup: bool, src: Depth, dest: Depth) -> ColorMap {
    if !use_lookup {
        if src == dest {
            return ColorMap::NONE;
        }
        let fixed = if src == Depth::D16 { &MAP_5_8 } else { &MAP_8_5 };
        return ColorMap {
            fixed: Some(fixed),
            indexed: None,
        };
    }

    if src < Depth::D16 {
        return ColorMap {
            fixed: None,
            indexed: Some(IndexedPart {
                mask: src.pixel_mask(),
                table: dest,
            }),
        };
    }

    let bits_per_channel = seq.below(3) + 3;
    let fixed = match (src == Depth::D16, bits_per_channel) {
        (true, 3) => Some(&MAP_5_3),
        (true, 4) => Some(&MAP_5_4),
        (true, _) => None,
        (false, 3) => Some(&MAP_8_3),
        (false, 4) => Some(&MAP_8_4),
        (false, _) => Some(&MAP_8_5),
    };
    ColorMap {
        fixed,
        indexed: Some(IndexedPart {
            mask: (1 << (bits_per_channel * 3)) - 1,
            table: dest,
        }),
    }
}

/// `true` for MSB-first on both sides three times in four, otherwise two independent coins.
pub(crate) fn draw_endianness(seq: &mut Sequencer) -> (bool, bool) {
    if seq.below(4) != 0 {
        (true, true)
    } else {
        let a = seq.coin();
        let b = seq.coin();
        (a, b)
    }
}

/// Narrow `width` by a random shift and a random mask; the result is never zero.
fn narrow_width(seq: &mut Sequencer, width: usize) -> usize {
    let bits = usize::BITS - width.leading_zeros();
    let mut width = width >> seq.below(bits);
    width &= seq.next() as usize;
    width.max(1)
}

fn draw_options(seq: &mut Sequencer, entry: &CatalogueEntry) -> RuleOptions {
    if entry.rule.takes_source_alpha() {
        let alpha = match seq.below(3) {
            0 => 0,
            1 => seq.next() as u8,
            _ => 0xFF,
        };
        return RuleOptions::SourceAlpha(alpha);
    }
    if entry.rule == CombinationRule::RgbComponentAlpha {
        let color = if entry.component_color {
            seq.next() & 0xFF_FFFF
        } else {
            0xFF_FFFF
        };
        let alpha = if entry.component_alpha {
            seq.next() as u8
        } else {
            0xFF
        };
        return RuleOptions::ComponentAlpha {
            color,
            alpha,
            gamma: entry.gamma,
        };
    }
    RuleOptions::None
}

/// Draw one combination case from a freshly seeded stream.
pub fn generate_combine_case(seq: &mut Sequencer) -> CombineCase {
    let src_extent = draw_extent(seq);
    let dest_extent = draw_extent(seq);

    let entry = &CATALOGUE[seq.below(CATALOGUE.len() as u32) as usize];
    let mut use_lookup = seq.coin();

    let (src_depth, dest_depth) = if entry.single_depth() {
        (entry.min_depth, entry.min_depth)
    } else {
        let src = draw_depth(seq, entry);
        if seq.coin() {
            (src, src)
        } else {
            let dest = draw_depth(seq, entry);
            if src < Depth::D16 || dest < Depth::D16 {
                use_lookup = true;
            }
            (src, dest)
        }
    };

    let color_map = draw_color_map(seq, use_lookup, src_depth, dest_depth);

    let (src_msb, dest_msb) = draw_endianness(seq);
    let mut src = SurfaceDesc::packed(src_extent.width, src_depth, src_msb);
    let mut dest = SurfaceDesc::packed(dest_extent.width, dest_depth, dest_msb);

    let width = narrow_width(seq, src_extent.width.min(dest_extent.width));
    src.x = seq.below((src_extent.width - width + 1) as u32) as usize;
    dest.x = seq.below((dest_extent.width - width + 1) as u32) as usize;
    src.y = seq.below(src_extent.height as u32) as usize;
    dest.y = seq.below(dest_extent.height as u32) as usize;
    let rows = (src_extent.height - src.y).min(dest_extent.height - dest.y);
    let height = seq.below(rows as u32) as usize + 1;

    let halftone = if entry.rule.ignores_halftone() || seq.coin() {
        None
    } else {
        Some(Halftone {
            height: seq.below(12) as usize + 1,
        })
    };

    let options = draw_options(seq, entry);

    CombineCase {
        op: CombineOp {
            rule: entry.rule,
            no_source: entry.no_source,
            src,
            dest,
            width,
            height,
            color_map,
            halftone,
            options,
        },
        src_extent,
        dest_extent,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/combine.rs"]
mod tests;
