use std::io::{BufWriter, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use blitcheck::{
    BlitError, BoxFixture, CombinationEngine, CombinationRule, CombineHarness, CombineProbe,
    CompareHarness, ComparisonEngine, Console, Depth, HarnessConfig, HarnessKind, MatchProbe,
    MatchRule, ReferenceEngine, sweep_boxes,
};

#[derive(Parser, Debug)]
#[command(
    name = "blitcheck",
    version,
    about = "Randomized regression harness for bit-blit engines"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the combination-engine harness against the golden digests.
    Fuzz(HarnessArgs),
    /// Run the comparison-engine harness against the golden digests.
    Collide(HarnessArgs),
    /// Check a comparison engine against exact box-overlap counts.
    Boxes(BoxesArgs),
    /// Run one full-screen combination and print the destination CRC.
    Probe(ProbeArgs),
    /// Run one full-screen comparison and print the result.
    ProbeMatch(ProbeMatchArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineChoice {
    /// Built-in pixel-at-a-time engine.
    Reference,
}

#[derive(Args, Debug)]
struct HarnessArgs {
    /// Number of iterations to run in checked mode.
    #[arg(short = 'm', long = "max-iterations")]
    max_iterations: Option<usize>,

    /// Increase verbosity (repeatable, up to three times).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write a JSON run report here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Engine under test.
    #[arg(long, value_enum, default_value_t = EngineChoice::Reference)]
    engine: EngineChoice,

    /// Run only this iteration, verbosely and without checking.
    iteration: Option<usize>,
}

#[derive(Args, Debug)]
struct BoxesArgs {
    /// Pixel depth of both operands.
    #[arg(long, default_value_t = 8)]
    depth: u32,

    /// Pack pixels least-significant-bit first.
    #[arg(long)]
    lsb: bool,

    /// Engine under test.
    #[arg(long, value_enum, default_value_t = EngineChoice::Reference)]
    engine: EngineChoice,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Run without a source operand.
    #[arg(short = 'n', long)]
    no_source: bool,

    /// Mask the source with a one-row halftone.
    #[arg(short = 's', long)]
    halftone: bool,

    /// Rectangle width in pixels.
    #[arg(long, default_value_t = blitcheck::SCREEN_WIDTH)]
    width: usize,

    /// Rectangle height in rows.
    #[arg(long, default_value_t = blitcheck::SCREEN_HEIGHT)]
    height: usize,

    /// Engine under test.
    #[arg(long, value_enum, default_value_t = EngineChoice::Reference)]
    engine: EngineChoice,

    /// Combination rule name.
    rule: String,

    /// `[SRC_DEPTH] DEST_DEPTH`; the source depth is omitted without a source.
    #[arg(num_args = 1..=2, required = true)]
    depths: Vec<u32>,
}

#[derive(Args, Debug)]
struct ProbeMatchArgs {
    /// Tally flag: 1 counts every match, 0 stops at the first.
    #[arg(short = 't', long, default_value_t = 1)]
    tally: u8,

    /// Rectangle width in pixels.
    #[arg(long, default_value_t = blitcheck::SCREEN_WIDTH)]
    width: usize,

    /// Rectangle height in rows.
    #[arg(long, default_value_t = blitcheck::SCREEN_HEIGHT)]
    height: usize,

    /// Engine under test.
    #[arg(long, value_enum, default_value_t = EngineChoice::Reference)]
    engine: EngineChoice,

    /// Match rule name.
    rule: String,

    /// Depth of operand A.
    depth_a: u32,

    /// Depth of operand B.
    depth_b: u32,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.cmd {
        Command::Fuzz(args) => cmd_harness(HarnessKind::Combine, args),
        Command::Collide(args) => cmd_harness(HarnessKind::Compare, args),
        Command::Boxes(args) => cmd_boxes(args),
        Command::Probe(args) => cmd_probe(args),
        Command::ProbeMatch(args) => cmd_probe_match(args),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("blitcheck: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn combination_engine(choice: EngineChoice) -> Box<dyn CombinationEngine> {
    match choice {
        EngineChoice::Reference => Box::new(ReferenceEngine),
    }
}

fn comparison_engine(choice: EngineChoice) -> Box<dyn ComparisonEngine> {
    match choice {
        EngineChoice::Reference => Box::new(ReferenceEngine),
    }
}

fn cmd_harness(kind: HarnessKind, args: HarnessArgs) -> anyhow::Result<bool> {
    let config = HarnessConfig {
        max_iterations: args.max_iterations.unwrap_or(kind.default_bound()),
        verbosity: args.verbose,
        single_iteration: args.iteration,
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut err = std::io::stderr();
    let mut console = Console {
        out: &mut out,
        err: &mut err,
    };

    let report = match kind {
        HarnessKind::Combine => {
            CombineHarness::new(combination_engine(args.engine)).run(&config, &mut console)?
        }
        HarnessKind::Compare => {
            CompareHarness::new(comparison_engine(args.engine)).run(&config, &mut console)?
        }
    };
    out.flush().context("flush stdout")?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
    }
    Ok(report.passed())
}

fn cmd_boxes(args: BoxesArgs) -> anyhow::Result<bool> {
    let fixture = BoxFixture::new(Depth::from_bits(args.depth)?, !args.lsb);
    let sweep = sweep_boxes(comparison_engine(args.engine).as_mut(), &fixture);
    for mismatch in &sweep.mismatches {
        println!("{mismatch}");
    }
    if sweep.passed() {
        println!("Passes tests OK");
    }
    Ok(sweep.passed())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<bool> {
    let rule: CombinationRule = args.rule.parse()?;
    let no_source = args.no_source || rule.ignores_source();
    let (src_bits, dest_bits) = match (no_source, args.depths.as_slice()) {
        (true, &[dest]) => (dest, dest),
        (false, &[src, dest]) => (src, dest),
        (true, _) => {
            let msg = "expected only a destination depth without a source";
            return Err(BlitError::config(msg).into());
        }
        (false, _) => {
            let msg = "expected a source depth and a destination depth";
            return Err(BlitError::config(msg).into());
        }
    };

    let src_depth = Depth::from_bits(src_bits)?;
    let dest_depth = Depth::from_bits(dest_bits)?;
    let mut probe = CombineProbe::new(rule, src_depth, dest_depth);
    probe.no_source = no_source;
    probe.halftone = args.halftone;
    probe.width = args.width;
    probe.height = args.height;
    probe.op().dest.check_rect(probe.width, probe.height, usize::MAX)?;

    let outcome = probe.run(combination_engine(args.engine).as_mut());
    if outcome.declined {
        println!("{rule}: declined by engine");
    }
    println!("CRC = 0x{:08X}", outcome.value);
    Ok(true)
}

fn cmd_probe_match(args: ProbeMatchArgs) -> anyhow::Result<bool> {
    let rule: MatchRule = args.rule.parse()?;
    let mut probe = MatchProbe::new(
        rule,
        Depth::from_bits(args.depth_a)?,
        Depth::from_bits(args.depth_b)?,
    );
    probe.tally = args.tally != 0;
    probe.width = args.width;
    probe.height = args.height;
    probe.op().a.check_rect(probe.width, probe.height, usize::MAX)?;

    let outcome = probe.run(comparison_engine(args.engine).as_mut());
    println!("Result = {}", outcome.value);
    Ok(true)
}
