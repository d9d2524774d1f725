//! The fixed set of legal rule/depth/feature combinations the combination harness draws from.
//!
//! Order matters: the generator picks an entry by index, so reordering the table changes every
//! golden digest.

use crate::foundation::core::Depth;
use crate::ops::rules::CombinationRule;

/// One legal operation shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CatalogueEntry {
    /// Rule under test.
    pub rule: CombinationRule,
    /// Run without a source operand.
    pub no_source: bool,
    /// Smallest permitted depth.
    pub min_depth: Depth,
    /// Largest permitted depth.
    pub max_depth: Depth,
    /// Draw a fixed component-alpha colour instead of using white.
    pub component_color: bool,
    /// Draw a fixed component-alpha alpha instead of using opaque.
    pub component_alpha: bool,
    /// Pass the gamma/ungamma tables.
    pub gamma: bool,
}

impl CatalogueEntry {
    /// `true` when only one depth is legal, so no depth draws are made.
    pub fn single_depth(&self) -> bool {
        self.min_depth == self.max_depth
    }

    /// `true` when `depth` lies in the entry's range.
    pub fn allows(&self, depth: Depth) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }
}

const fn any(rule: CombinationRule, no_source: bool) -> CatalogueEntry {
    CatalogueEntry {
        rule,
        no_source,
        min_depth: Depth::D1,
        max_depth: Depth::D32,
        component_color: false,
        component_alpha: false,
        gamma: false,
    }
}

const fn only32(rule: CombinationRule, no_source: bool) -> CatalogueEntry {
    CatalogueEntry {
        min_depth: Depth::D32,
        ..any(rule, no_source)
    }
}

const fn component(no_source: bool, color: bool, alpha: bool, gamma: bool) -> CatalogueEntry {
    CatalogueEntry {
        component_color: color,
        component_alpha: alpha,
        gamma,
        ..any(CombinationRule::RgbComponentAlpha, no_source)
    }
}

use CombinationRule as R;

/// The 77-entry catalogue, in draw order.
pub static CATALOGUE: [CatalogueEntry; 77] = [
    any(R::ClearWord, true),
    any(R::BitAnd, false),
    any(R::BitAnd, true),
    any(R::BitAndInvert, false),
    any(R::BitAndInvert, true),
    any(R::SourceWord, false),
    any(R::SourceWord, true),
    any(R::BitInvertAnd, false),
    any(R::BitInvertAnd, true),
    any(R::DestinationWord, true),
    any(R::BitXor, false),
    any(R::BitXor, true),
    any(R::BitOr, false),
    any(R::BitOr, true),
    any(R::BitInvertAndInvert, false),
    any(R::BitInvertAndInvert, true),
    any(R::BitInvertXor, false),
    any(R::BitInvertXor, true),
    any(R::BitInvertDestination, true),
    any(R::BitOrInvert, false),
    any(R::BitOrInvert, true),
    any(R::BitInvertSource, false),
    any(R::BitInvertSource, true),
    any(R::BitInvertOr, false),
    any(R::BitInvertOr, true),
    any(R::BitInvertOrInvert, false),
    any(R::BitInvertOrInvert, true),
    any(R::AddWord, false),
    any(R::AddWord, true),
    any(R::SubWord, false),
    any(R::SubWord, true),
    any(R::RgbAdd, false),
    any(R::RgbAdd, true),
    any(R::RgbSub, false),
    any(R::RgbSub, true),
    any(R::OldRgbDiff, false),
    any(R::OldRgbDiff, true),
    any(R::OldTallyIntoMap, false),
    any(R::OldTallyIntoMap, true),
    only32(R::AlphaBlend, false),
    only32(R::AlphaBlend, true),
    any(R::PixPaint, false),
    any(R::PixPaint, true),
    any(R::PixMask, false),
    any(R::PixMask, true),
    any(R::RgbMax, false),
    any(R::RgbMax, true),
    any(R::RgbMin, false),
    any(R::RgbMin, true),
    any(R::RgbMinInvert, false),
    any(R::RgbMinInvert, true),
    any(R::AlphaBlendConst, false),
    any(R::AlphaBlendConst, true),
    any(R::AlphaPaintConst, false),
    any(R::AlphaPaintConst, true),
    any(R::RgbDiff, false),
    any(R::RgbDiff, true),
    any(R::TallyIntoMap, false),
    any(R::TallyIntoMap, true),
    only32(R::AlphaBlendScaled, false),
    only32(R::AlphaBlendScaled, true),
    any(R::RgbMul, false),
    any(R::RgbMul, true),
    any(R::PixSwap, false),
    any(R::PixSwap, true),
    any(R::PixClear, false),
    any(R::PixClear, true),
    any(R::FixAlpha, false),
    any(R::FixAlpha, true),
    any(R::RgbComponentAlpha, false),
    any(R::RgbComponentAlpha, true),
    component(false, true, false, false),
    component(true, true, false, false),
    component(false, true, true, false),
    component(true, true, true, false),
    component(false, true, true, true),
    component(true, true, true, true),
];

#[cfg(test)]
#[path = "../../tests/unit/ops/catalogue.rs"]
mod tests;
