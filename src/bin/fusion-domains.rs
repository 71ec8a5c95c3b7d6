//! fusion-domains CLI
//!
//! Reads fusion annotation JSON and emits render-ready schematic JSON.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fusion_domains::batch::{build_batch, BatchConfig};
use fusion_domains::color::curated::CuratedTable;
use fusion_domains::color::ColorCache;
use fusion_domains::filter::{ColorMode, DomainFilters};
use fusion_domains::schematic::build_fusion_schematic;
use fusion_domains::{FusionAnnotation, FusionError};

#[derive(Parser)]
#[command(name = "fusion-domains")]
#[command(author, version, about = "Fusion-gene protein schematic builder")]
#[command(
    long_about = "Build render-ready fusion protein schematics from annotation JSON.

Examples:
  fusion-domains schematic -i fusion.json
  cat fusion.json | fusion-domains schematic --pretty
  fusion-domains batch -i fusions.json -o schematics.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schematic for a single fusion
    Schematic {
        /// Input fusion annotation JSON (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Coloring strategy
        #[arg(long, value_enum, default_value_t = ColorModeArg::Domain)]
        color_mode: ColorModeArg,

        /// Restrict to these annotation sources (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Restrict to these data providers (repeatable)
        #[arg(long = "provider")]
        providers: Vec<String>,

        /// Hide these data providers (repeatable)
        #[arg(long = "exclude-provider")]
        exclude_providers: Vec<String>,

        /// Curated color table JSON overriding the built-in one
        #[arg(long)]
        color_table: Option<PathBuf>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Build schematics for a JSON array of fusions with shared coloring
    Batch {
        /// Input JSON array of fusion annotations (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Give each fusion its own color scope instead of one shared cache
        #[arg(long)]
        independent_colors: bool,

        /// Curated color table JSON overriding the built-in one
        #[arg(long)]
        color_table: Option<PathBuf>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ColorModeArg {
    Source,
    Type,
    Domain,
}

impl From<ColorModeArg> for ColorMode {
    fn from(arg: ColorModeArg) -> Self {
        match arg {
            ColorModeArg::Source => ColorMode::Source,
            ColorModeArg::Type => ColorMode::Type,
            ColorModeArg::Domain => ColorMode::Domain,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), FusionError> {
    match command {
        Commands::Schematic {
            input,
            output,
            color_mode,
            sources,
            providers,
            exclude_providers,
            color_table,
            pretty,
        } => {
            let fusion: FusionAnnotation = serde_json::from_str(&read_input(&input)?)?;
            let filters = DomainFilters {
                sources,
                data_providers: providers,
                exclude_data_providers: exclude_providers,
                color_mode: color_mode.into(),
            };
            let cache = make_cache(color_table.as_deref())?;
            let schematic = build_fusion_schematic(&fusion, &filters, &cache);
            write_output(&output, &schematic, pretty)
        }
        Commands::Batch {
            input,
            output,
            independent_colors,
            color_table,
            pretty,
        } => {
            let fusions: Vec<FusionAnnotation> = serde_json::from_str(&read_input(&input)?)?;
            let cache = make_cache(color_table.as_deref())?;
            let config = BatchConfig::new().batch_consistent_colors(!independent_colors);
            let outcome = build_batch(&fusions, &DomainFilters::default(), &cache, &config);
            write_output(&output, &outcome.schematics, pretty)
        }
    }
}

fn make_cache(color_table: Option<&Path>) -> Result<ColorCache, FusionError> {
    Ok(match color_table {
        Some(path) => ColorCache::with_table(CuratedTable::from_path(path)?),
        None => ColorCache::new(),
    })
}

fn read_input(path: &Path) -> Result<String, FusionError> {
    let mut content = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut content)?;
    } else {
        BufReader::new(File::open(path)?).read_to_string(&mut content)?;
    }
    Ok(content)
}

fn write_output<T: serde::Serialize>(
    path: &Path,
    value: &T,
    pretty: bool,
) -> Result<(), FusionError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    if path.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}")?;
    } else {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{json}")?;
    }
    Ok(())
}
