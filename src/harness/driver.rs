//! Iteration loop shared by both harnesses.
//!
//! Each iteration reseeds the stream, synthesizes one case, prints whatever the verbosity asks
//! for, calls the engine, and digests the result. Printing happens strictly around generation,
//! so verbosity never changes a draw.

use std::io::Write;
use std::ops::Range;

use anyhow::Context as _;

use crate::engine::{CombinationEngine, CombineSurfaces, ComparisonEngine};
use crate::foundation::core::SurfaceDesc;
use crate::foundation::error::{BlitError, BlitResult};
use crate::generate::combine::{CombineFixture, generate_combine_case};
use crate::generate::compare::{CompareBuffers, generate_compare_case};
use crate::harness::dump::dump_buffer;
use crate::harness::report::RunReport;
use crate::ops::colormap::GammaTables;
use crate::ops::descriptor::{CombineCase, RuleOptions};
use crate::oracle::crc::region_digest;
use crate::oracle::golden::{Accumulator, COMBINE_GOLDEN, COMPARE_GOLDEN, CheckpointTracker};
use crate::random::sequencer::Sequencer;

/// Which harness a configuration or report belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HarnessKind {
    /// Combination engine, destination digests XOR-accumulated.
    Combine,
    /// Comparison engine, return values chained through CRC-32.
    Compare,
}

impl HarnessKind {
    /// Default iteration bound: one past the last golden checkpoint.
    pub fn default_bound(self) -> usize {
        match self {
            Self::Combine => 1 << 20,
            Self::Compare => 1 << 19,
        }
    }

    fn tracker(self) -> CheckpointTracker {
        match self {
            Self::Combine => CheckpointTracker::new(&COMBINE_GOLDEN, Accumulator::Xor),
            Self::Compare => CheckpointTracker::new(&COMPARE_GOLDEN, Accumulator::Crc),
        }
    }
}

/// Run parameters, as collected from the command line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HarnessConfig {
    /// Iterations `0..max_iterations` are run in checked mode.
    pub max_iterations: usize,
    /// 0 silent, 1 per-iteration digests, 2 descriptors and results, 3 buffer dumps too.
    pub verbosity: u8,
    /// Run only this iteration, unchecked.
    pub single_iteration: Option<usize>,
}

impl HarnessConfig {
    /// Checked run over the harness's full golden range.
    pub fn new(kind: HarnessKind) -> Self {
        Self {
            max_iterations: kind.default_bound(),
            verbosity: 0,
            single_iteration: None,
        }
    }

    /// The mode this configuration selects.
    pub fn mode(&self) -> RunMode {
        match self.single_iteration {
            Some(iteration) => RunMode::Single { iteration },
            None => RunMode::Checked {
                bound: self.max_iterations,
            },
        }
    }

    /// Reject configurations that select no iterations to replay.
    pub fn validate(&self) -> BlitResult<()> {
        if self.single_iteration == Some(usize::MAX) {
            return Err(BlitError::config(format!(
                "iteration must be below {}",
                usize::MAX
            )));
        }
        Ok(())
    }

    /// Verbosity actually used; single-iteration runs always show the case.
    pub fn effective_verbosity(&self) -> u8 {
        match self.mode() {
            RunMode::Single { .. } => self.verbosity.max(2),
            RunMode::Checked { .. } => self.verbosity,
        }
    }
}

/// How a run walks the iteration space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RunMode {
    /// Iterations `0..bound`, each checkpoint compared with the golden table.
    Checked {
        /// Exclusive upper bound.
        bound: usize,
    },
    /// One iteration, no digest comparison.
    Single {
        /// The iteration to replay.
        iteration: usize,
    },
}

impl RunMode {
    /// Iterations to run, in order.
    pub fn iterations(self) -> Range<usize> {
        match self {
            Self::Checked { bound } => 0..bound,
            Self::Single { iteration } => iteration..iteration.saturating_add(1),
        }
    }

    /// `true` when digests are compared.
    pub fn is_checked(self) -> bool {
        matches!(self, Self::Checked { .. })
    }
}

/// Where harness output goes: the report stream and the diagnostics stream.
pub struct Console<'a> {
    /// Descriptors, dumps, per-iteration results and the final verdict.
    pub out: &'a mut dyn Write,
    /// Checkpoint mismatch lines.
    pub err: &'a mut dyn Write,
}

fn dump_surface(
    out: &mut dyn Write,
    words: &[u32],
    surface: &SurfaceDesc,
    rows: usize,
) -> std::io::Result<()> {
    dump_buffer(
        out,
        words,
        surface.words_per_row(),
        rows,
        surface.depth,
        surface.msb,
    )
}

struct Iteration {
    value: u32,
    declined: bool,
}

trait Iterate {
    const KIND: HarnessKind;

    fn engine_name(&self) -> &str;

    fn iterate(
        &mut self,
        iteration: usize,
        verbosity: u8,
        out: &mut dyn Write,
    ) -> anyhow::Result<Iteration>;
}

fn drive<H: Iterate>(
    harness: &mut H,
    config: &HarnessConfig,
    console: &mut Console<'_>,
) -> BlitResult<RunReport> {
    config.validate()?;
    let mode = config.mode();
    let verbosity = config.effective_verbosity();
    let mut tracker = H::KIND.tracker();
    let mut iterations_run = 0;
    let mut declined = 0;

    tracing::info!(harness = ?H::KIND, mode = ?mode, verbosity, "starting run");
    for iteration in mode.iterations() {
        let step = harness.iterate(iteration, verbosity, console.out)?;
        iterations_run += 1;
        declined += usize::from(step.declined);
        if mode.is_checked()
            && let Some(mismatch) = tracker.record(iteration, step.value)
        {
            writeln!(console.err, "{mismatch}").context("write mismatch")?;
        }
    }
    if mode.is_checked() && tracker.passed() {
        writeln!(console.out, "Passes checks OK").context("write verdict")?;
    }
    console.out.flush().context("flush output")?;

    Ok(RunReport {
        harness: H::KIND,
        engine: harness.engine_name().to_string(),
        mode,
        iterations_run,
        checkpoints_checked: tracker.checked(),
        mismatches: tracker.mismatches().to_vec(),
        declined,
        final_digest: tracker.running(),
    })
}

/// Drives a [`CombinationEngine`] through the combination harness.
pub struct CombineHarness<E> {
    engine: E,
    fixture: CombineFixture,
    dest: Vec<u32>,
}

impl<E: CombinationEngine> CombineHarness<E> {
    /// Build the shared fixture and wrap `engine`.
    pub fn new(engine: E) -> Self {
        Self::with_fixture(engine, CombineFixture::generate())
    }

    /// Wrap `engine` around an existing fixture.
    pub fn with_fixture(engine: E, fixture: CombineFixture) -> Self {
        let dest = fixture.dest_init.clone();
        Self {
            engine,
            fixture,
            dest,
        }
    }

    /// The engine under test.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The shared fixture; lookup tables read here are always in their pristine state between
    /// iterations.
    pub fn fixture(&self) -> &CombineFixture {
        &self.fixture
    }

    /// Destination buffer as left by the most recent iteration.
    pub fn dest(&self) -> &[u32] {
        &self.dest
    }

    /// Replay one iteration silently and return its case and destination digest.
    pub fn replay(&mut self, iteration: usize) -> (CombineCase, u32) {
        let case = generate_combine_case(&mut Sequencer::for_iteration(iteration));
        let (digest, _) = self.execute(&case);
        (case, digest)
    }

    /// Run according to `config`.
    #[tracing::instrument(skip_all, fields(engine = self.engine.name()))]
    pub fn run(
        &mut self,
        config: &HarnessConfig,
        console: &mut Console<'_>,
    ) -> BlitResult<RunReport> {
        drive(self, config, console)
    }

    /// Restore the destination, call the engine with the lookup table scoped, digest.
    fn execute(&mut self, case: &CombineCase) -> (u32, bool) {
        let op = &case.op;
        self.dest.copy_from_slice(&self.fixture.dest_init);

        let supported = self.engine.supports(op);
        let CombineFixture {
            src, lookup, gamma, ..
        } = &mut self.fixture;
        let gamma: Option<&GammaTables> = match op.options {
            RuleOptions::ComponentAlpha { gamma: true, .. } => Some(&*gamma),
            _ => None,
        };
        // Writes through the table are undone when the guard drops, after the digest.
        let mut table = op.color_map.indexed.map(|ix| lookup.scoped(ix.table));
        if supported {
            self.engine.copy_bits(
                op,
                CombineSurfaces {
                    src: src.as_slice(),
                    dest: &mut self.dest,
                    lookup: table.as_deref_mut(),
                    gamma,
                },
            );
        } else {
            tracing::debug!(
                rule = %op.rule,
                writes_table = op.rule.writes_lookup_table(),
                "operation declined"
            );
        }
        let digest = region_digest(&self.dest, case.dest_region_bytes());
        drop(table);
        (digest, !supported)
    }
}

impl<E: CombinationEngine> Iterate for CombineHarness<E> {
    const KIND: HarnessKind = HarnessKind::Combine;

    fn engine_name(&self) -> &str {
        self.engine.name()
    }

    fn iterate(
        &mut self,
        iteration: usize,
        verbosity: u8,
        out: &mut dyn Write,
    ) -> anyhow::Result<Iteration> {
        let case = generate_combine_case(&mut Sequencer::for_iteration(iteration));
        let op = &case.op;

        if verbosity >= 2 {
            writeln!(out, "Test #{iteration}")?;
            write!(out, "{case}")?;
            if verbosity >= 3 {
                writeln!(out, "Source:")?;
                dump_surface(out, &self.fixture.src, &op.src, case.src_extent.height)?;
                writeln!(out, "Destination:")?;
                dump_surface(out, &self.fixture.dest_init, &op.dest, case.dest_extent.height)?;
            }
        }

        let (digest, declined) = self.execute(&case);

        if verbosity == 1 {
            writeln!(out, "{iteration}:{digest:08X}")?;
        } else if verbosity >= 2 {
            writeln!(out, "Result:")?;
            dump_surface(out, &self.dest, &op.dest, case.dest_extent.height)?;
            writeln!(out, "CRC = 0x{digest:08X}")?;
            writeln!(out)?;
        }

        Ok(Iteration {
            value: digest,
            declined,
        })
    }
}

/// Drives a [`ComparisonEngine`] through the comparison harness.
pub struct CompareHarness<E> {
    engine: E,
    buffers: CompareBuffers,
}

impl<E: ComparisonEngine> CompareHarness<E> {
    /// Wrap `engine` with fresh operand buffers.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            buffers: CompareBuffers::default(),
        }
    }

    /// The engine under test.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run according to `config`.
    #[tracing::instrument(skip_all, fields(engine = self.engine.name()))]
    pub fn run(
        &mut self,
        config: &HarnessConfig,
        console: &mut Console<'_>,
    ) -> BlitResult<RunReport> {
        drive(self, config, console)
    }
}

impl<E: ComparisonEngine> Iterate for CompareHarness<E> {
    const KIND: HarnessKind = HarnessKind::Compare;

    fn engine_name(&self) -> &str {
        self.engine.name()
    }

    fn iterate(
        &mut self,
        iteration: usize,
        verbosity: u8,
        out: &mut dyn Write,
    ) -> anyhow::Result<Iteration> {
        let mut seq = Sequencer::for_iteration(iteration);
        let case = generate_compare_case(&mut seq, &mut self.buffers);
        let op = &case.op;

        if verbosity >= 2 {
            writeln!(out, "Test #{iteration}")?;
            write!(out, "{case}")?;
            if verbosity >= 3 {
                writeln!(out, "Source A:")?;
                dump_surface(out, &self.buffers.a, &op.a, case.a_extent.height)?;
                writeln!(out, "Source B:")?;
                dump_surface(out, &self.buffers.b, &op.b, case.b_extent.height)?;
            }
        }

        let result = self.engine.compare_colors(op, &self.buffers.a, &self.buffers.b);

        if verbosity == 1 {
            writeln!(out, "{iteration}:{result:08X}")?;
        } else if verbosity >= 2 {
            writeln!(out, "Result:\n0x{result:08X}\n")?;
        }

        Ok(Iteration {
            value: result,
            declined: false,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/harness/driver.rs"]
mod tests;
