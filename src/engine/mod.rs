//! Call contracts of the engines under test.
//!
//! The harness never combines or compares pixels itself; it synthesizes an operation, hands it to
//! an engine through these traits, and digests whatever the engine leaves behind.

use crate::ops::colormap::GammaTables;
use crate::ops::descriptor::{CombineOp, CompareOp};

pub mod reference;

/// Buffers one combination call may touch.
pub struct CombineSurfaces<'a> {
    /// Source words (read-only).
    pub src: &'a [u32],
    /// Destination words, mutated in place.
    pub dest: &'a mut [u32],
    /// The indexed colour-map table for the destination depth, when the operation has an
    /// indexed part. Some rules write through it; the harness restores it afterwards.
    pub lookup: Option<&'a mut [u32]>,
    /// Gamma tables, when the operation asks for them.
    pub gamma: Option<&'a GammaTables>,
}

/// A bit-blit combination engine.
pub trait CombinationEngine {
    /// Short engine name for reports.
    fn name(&self) -> &str;

    /// Whether the engine implements `op`. Declined operations are skipped (the destination is
    /// digested untouched) and counted in the run report.
    fn supports(&self, op: &CombineOp) -> bool {
        let _ = op;
        true
    }

    /// Combine source into destination over exactly `op.height` rows of `op.width` pixels
    /// starting at the destination origin.
    fn copy_bits(&mut self, op: &CombineOp, surfaces: CombineSurfaces<'_>);
}

/// A region comparison engine.
pub trait ComparisonEngine {
    /// Short engine name for reports.
    fn name(&self) -> &str;

    /// Count pixel positions satisfying `op.rule`; without `op.tally` the result is `0` or `1`.
    fn compare_colors(&mut self, op: &CompareOp, a: &[u32], b: &[u32]) -> u32;
}

impl<E: CombinationEngine + ?Sized> CombinationEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, op: &CombineOp) -> bool {
        (**self).supports(op)
    }

    fn copy_bits(&mut self, op: &CombineOp, surfaces: CombineSurfaces<'_>) {
        (**self).copy_bits(op, surfaces)
    }
}

impl<E: ComparisonEngine + ?Sized> ComparisonEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compare_colors(&mut self, op: &CompareOp, a: &[u32], b: &[u32]) -> u32 {
        (**self).compare_colors(op, a, b)
    }
}
