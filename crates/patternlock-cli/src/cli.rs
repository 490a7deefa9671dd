use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use patternlock::codec::{decode, encode, from_ids, hash};
use patternlock::{DEFAULT_GRID_SIZE, Grid, HashAlgorithm, PatternGenerator, TrackerConfig};
use tracing::debug;

use crate::error::Result;
use crate::logging;
use crate::replay::{ReplayScript, load_config, replay, write_records};

#[derive(Debug, Parser)]
#[command(
    name = "patternlock",
    about = "Generate, serialize, hash, and replay PatternLock patterns",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a random, easy-to-redraw pattern in string form.
    Generate(GenerateArgs),

    /// Turn dot ids into the string form.
    Encode(EncodeArgs),

    /// Turn the string form into a JSON array of dot ids.
    Decode(DecodeArgs),

    /// Print the hex digest of a pattern given in string form.
    Hash(HashArgs),

    /// Feed a scripted gesture through a tracker and print its events.
    Replay(ReplayArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Dots per side.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    pub size: u16,
}

impl GridArgs {
    fn grid(&self) -> Result<Grid> {
        Ok(Grid::new(self.size)?)
    }
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Number of dots.
    #[arg(long)]
    pub length: usize,

    /// Seed for a reproducible pattern.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Dot ids in draw order.
    pub ids: Vec<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    /// Pattern in string form.
    pub pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Sha1,
    Md5,
    Sha256,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sha1 => Self::Sha1,
            AlgorithmArg::Md5 => Self::Md5,
            AlgorithmArg::Sha256 => Self::Sha256,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct HashArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[arg(long, value_enum, default_value_t = AlgorithmArg::Sha1)]
    pub algorithm: AlgorithmArg,

    /// Pattern in string form.
    pub pattern: String,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON script with view size and pointer events.
    pub script: PathBuf,

    /// Tracker config (TOML, or JSON with a `.json` extension).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    debug!(command = ?cli.command, "running command");
    match cli.command {
        Commands::Generate(args) => run_generate(args, out),
        Commands::Encode(args) => run_encode(args, out),
        Commands::Decode(args) => run_decode(args, out),
        Commands::Hash(args) => run_hash(args, out),
        Commands::Replay(args) => run_replay(args, out),
    }
}

fn run_generate(args: GenerateArgs, out: &mut dyn Write) -> Result<()> {
    let grid = args.grid.grid()?;
    let mut generator = match args.seed {
        Some(seed) => PatternGenerator::seeded(seed),
        None => PatternGenerator::from_os_rng(),
    };
    let pattern = generator.generate(grid, args.length)?;
    writeln!(out, "{}", encode(&pattern))?;
    Ok(())
}

fn run_encode(args: EncodeArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = from_ids(args.grid.grid()?, args.ids)?;
    writeln!(out, "{}", encode(&pattern))?;
    Ok(())
}

fn run_decode(args: DecodeArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = decode(args.grid.grid()?, &args.pattern)?;
    serde_json::to_writer(&mut *out, &pattern.ids())?;
    writeln!(out)?;
    Ok(())
}

fn run_hash(args: HashArgs, out: &mut dyn Write) -> Result<()> {
    let pattern = decode(args.grid.grid()?, &args.pattern)?;
    writeln!(out, "{}", hash(&pattern, args.algorithm.into()))?;
    Ok(())
}

fn run_replay(args: ReplayArgs, out: &mut dyn Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => TrackerConfig::default(),
    };
    let script = ReplayScript::from_file(&args.script)?;
    let records = replay(&config, &script)?;
    write_records(out, &records)
}
