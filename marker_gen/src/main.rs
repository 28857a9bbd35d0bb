use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use common::serde::{load_from_file, save_to_file};
use constellation::report::check_store;
use constellation::{generate_into_store, GeneratorConfig, Tolerances};

const DEFAULT_STORE: &str = "marker_geometries.csv";
const DEFAULT_REPORT: &str = "marker_geometries_checked.csv";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    #[value(name = "single-face")]
    SingleFace,
    #[value(name = "two-face")]
    TwoFace,
}

impl From<Preset> for GeneratorConfig {
    fn from(value: Preset) -> Self {
        match value {
            Preset::SingleFace => GeneratorConfig::single_face(),
            Preset::TwoFace => GeneratorConfig::two_face(),
        }
    }
}

/// Marker Gen - optical tracking marker constellation generator
#[derive(Parser, Debug)]
#[command(name = "marker_gen", version, about)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate constellations and append them to the store
    Generate(GenerateArgs),
    /// Re-check every stored constellation and write an audit report
    Check(CheckArgs),
    /// Write a preset configuration to a YAML or JSON file for editing
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Run configuration (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Built-in layout used when no config file is given
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,

    /// Number of bodies to generate
    #[arg(long)]
    count: Option<usize>,

    /// Naming prefix of generated constellations
    #[arg(long)]
    base_name: Option<String>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Sampling attempts per face before the region is declared infeasible
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Constellation store to seed from and append to
    #[arg(long, value_name = "FILE", default_value = DEFAULT_STORE)]
    store: PathBuf,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Constellation store to audit
    #[arg(long, value_name = "FILE", default_value = DEFAULT_STORE)]
    store: PathBuf,

    /// Report destination
    #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT)]
    output: PathBuf,

    /// Take tolerances from this run configuration instead of the defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    #[arg(long, value_enum, default_value_t = Preset::TwoFace)]
    preset: Preset,

    /// Destination (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    load_from_file(path).with_context(|| format!("Invalid run configuration '{}'", path.display()))
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => args.preset.unwrap_or(Preset::TwoFace).into(),
    };
    if let Some(count) = args.count {
        config.num_arrays = count;
    }
    if let Some(base_name) = args.base_name {
        config.base_name = base_name;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }

    let generated = generate_into_store(&config, &args.store)
        .with_context(|| format!("Generation into '{}' failed", args.store.display()))?;

    for constellation in &generated {
        let p = constellation.points();
        info!(
            "{}: A {:?} B {:?} C {:?} D {:?}",
            constellation.name(),
            p[0].to_array(),
            p[1].to_array(),
            p[2].to_array(),
            p[3].to_array()
        );
    }
    info!(
        "Appended {} constellations to {}",
        generated.len(),
        args.store.display()
    );
    Ok(())
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let tolerances = match &args.config {
        Some(path) => load_config(path)?.tolerances,
        None => Tolerances::default(),
    };
    let summary = check_store(&args.store, &args.output, tolerances)
        .with_context(|| format!("Checking '{}' failed", args.store.display()))?;

    if summary.passed < summary.rows {
        tracing::warn!(
            "{} of {} constellations failed the check, see {}",
            summary.rows - summary.passed,
            summary.rows,
            args.output.display()
        );
    }
    Ok(())
}

fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    let config: GeneratorConfig = args.preset.into();
    save_to_file(&config, &args.output)?;
    info!("Wrote {:?} preset to {}", args.preset, args.output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    common::log_setup::setup_logging("marker_gen", &cli.log_level)?;

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
        Command::InitConfig(args) => init_config(args),
    }
}
