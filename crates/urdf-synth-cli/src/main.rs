//! urdf-synth command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use urdf_synth::{AssemblySource, ExportConfig, SnapshotFile};

#[derive(Parser)]
#[command(name = "urdf-synth")]
#[command(about = "Generate a URDF robot description from a CAD assembly snapshot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a URDF document from a snapshot file (.ron or .json)
    Export {
        /// Assembly snapshot
        snapshot: PathBuf,
        /// Directory the document is written to
        #[arg(short = 'o', long = "output", default_value = ".")]
        output: PathBuf,
        /// Export configuration (RON)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Override the mesh package name
        #[arg(short = 'p', long = "package")]
        package: Option<String>,
        /// Print the document instead of writing it
        #[arg(long = "stdout")]
        stdout: bool,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        #[arg(default_value = "urdf-synth.ron")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urdf_synth=info,urdf_synth_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Commands::Export {
            snapshot,
            output,
            config,
            package,
            stdout,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ExportConfig::new(),
            };
            if let Some(package) = package {
                config.mesh.package_name = package;
            }

            let source = SnapshotFile::new(snapshot);
            if stdout {
                let snapshot = source.capture()?;
                let document = urdf_synth::synthesize(&snapshot, &config)?;
                print!("{}", document.render());
            } else {
                let path = urdf_synth::export(&source, &config, &output)?;
                tracing::info!("Done: {}", path.display());
            }
        }
        Commands::InitConfig { path } => {
            ExportConfig::new()
                .save(&path)
                .with_context(|| format!("writing config {}", path.display()))?;
        }
    }

    Ok(())
}
