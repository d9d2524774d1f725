//! blitcheck is a deterministic randomized regression harness for packed-pixel bit-blit
//! engines.
//!
//! It drives two kinds of external engine through fixed call contracts:
//!
//! - a **combination engine** ([`CombinationEngine`]) that merges a source buffer into a
//!   destination under one of 42 named rules, with optional halftoning, alpha options and
//!   colour-map conversion;
//! - a **comparison engine** ([`ComparisonEngine`]) that counts pixel positions satisfying
//!   one of 3 match rules between two buffers.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: every iteration reseeds a [`Sequencer`] with `i ^ (i << 16)`.
//! 2. **Generate**: a case descriptor (and, for comparisons, operand buffers) is drawn in a
//!    fixed order from that stream.
//! 3. **Invoke**: the engine runs once; any indexed lookup table it may write is snapshotted
//!    and restored around the call.
//! 4. **Digest**: the destination region (or the return value) is folded into a running
//!    CRC-32 digest and compared with compiled-in golden values after `2^k` iterations.
//!
//! The order and number of draws are part of the contract; so is the generator algorithm
//! itself. [`ReferenceEngine`] is a slow pixel-at-a-time engine covering the boolean
//! combination rules and every match rule, and [`sweep_boxes`] checks any comparison engine
//! against closed-form overlap counts.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod foundation;
mod generate;
mod harness;
mod ops;
mod oracle;
mod random;

pub use engine::reference::ReferenceEngine;
pub use engine::{CombinationEngine, CombineSurfaces, ComparisonEngine};
pub use foundation::core::{Depth, SurfaceDesc, pitch_for, read_pixel, write_pixel};
pub use foundation::error::{BlitError, BlitResult};
pub use generate::combine::{CombineFixture, generate_combine_case};
pub use generate::compare::{CompareBuffers, generate_compare_case};
pub use harness::driver::{
    CombineHarness, CompareHarness, Console, HarnessConfig, HarnessKind, RunMode,
};
pub use harness::dump::dump_buffer;
pub use harness::probe::{
    CombineProbe, MatchProbe, ProbeOutcome, SCREEN_HEIGHT, SCREEN_WIDTH, probe_color_map,
    probe_match_colors,
};
pub use harness::report::RunReport;
pub use ops::catalogue::{CATALOGUE, CatalogueEntry};
pub use ops::colormap::{
    ColorMap, FixedPart, GammaTables, IndexedPart, LOOKUP_ENTRIES, LookupTables, ScopedTable,
};
pub use ops::descriptor::{
    CombineCase, CombineOp, CompareCase, CompareOp, Extent, HALFTONE_PATTERN, Halftone,
    RuleOptions,
};
pub use ops::rules::{CombinationRule, MatchRule};
pub use oracle::crc::{Crc32, crc32, region_digest};
pub use oracle::geometry::{
    BOX_SIZE, BoxFixture, BoxImage, BoxMismatch, BoxSweep, expected_overlap, sweep_boxes,
};
pub use oracle::golden::{
    Accumulator, COMBINE_GOLDEN, COMPARE_GOLDEN, CheckpointMismatch, CheckpointTracker,
    is_checkpoint,
};
pub use random::fill::{FillProfile, fill_biased};
pub use random::sequencer::{RAND_MAX, Sequencer, iteration_seed};
