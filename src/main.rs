use anyhow::Context;
use clap::{Parser, Subcommand};
use logconc::config::{VerifyConfig, DEFAULT_PROGRESS_EVERY};
use logconc::verify::Verifier;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "logconc",
    about = "Exact log-concavity checks of stable-partition colouring sequences"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every graph of a graph6 list for log-concavity violations.
    Check {
        /// Number of vertices of every graph in the list
        #[arg(long, short = 'n')]
        order: usize,
        /// graph6 file, one graph per line (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Length of each coefficient sequence (default: order + 2)
        #[arg(long)]
        max_colours: Option<usize>,
        /// Graphs between progress lines
        #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
        progress_every: u64,
        /// Write every graph's histogram as JSON lines to this file
        #[arg(long)]
        histogram_out: Option<PathBuf>,
    },

    /// Write the complement of every graph in a graph6 list.
    Complement {
        /// graph6 file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Keep only the connected graphs of a graph6 list.
    Connected {
        /// graph6 file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Graphs with more vertices are rejected
        #[arg(long, default_value_t = 20)]
        max_order: usize,
    },

    /// Validate the pipeline against bundled known results (fast, deterministic).
    Selftest,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Check {
            order,
            input,
            max_colours,
            progress_every,
            histogram_out,
        } => {
            let mut config = VerifyConfig::new(order);
            if let Some(m) = max_colours {
                config.max_colours = m;
            }
            config.progress_every = progress_every;
            config.histogram_out = histogram_out;

            let mut verifier = Verifier::new(config).context("failed to set up verifier")?;
            let reader = open_input(input.as_deref())?;
            verifier.run(reader, out).context("verification run failed")?;
        }
        Commands::Complement { input } => {
            let reader = open_input(input.as_deref())?;
            logconc::tools::complement_stream(reader, out)?;
        }
        Commands::Connected { input, max_order } => {
            let reader = open_input(input.as_deref())?;
            logconc::tools::connected_stream(reader, out, max_order)?;
        }
        Commands::Selftest => {
            logconc::validate::validate_known_results()
                .map_err(|e| anyhow::anyhow!("Validation FAILED: {e}"))?;
            println!("Validation OK: bundled known results are correct.");
        }
    }
    Ok(())
}

fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
