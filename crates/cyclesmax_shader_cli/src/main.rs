// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cycles for Max shader exporter
//!
//! Reads a scene document (the render engine and the selected objects with
//! their materials) and writes the shader node tree of the first selected
//! object with one to a `.shader` file.
//!
//! ## Usage
//!
//! ```text
//! cyclesmax-export export --scene scene.ron --output wood.shader
//! cyclesmax-export kinds
//! ```

use clap::{Parser, Subcommand};
use cyclesmax_shader_cli::{
    ExportOperator, ExportSettings, OperatorError, SceneDocument, SceneError, SettingsError,
};
use cyclesmax_shader_export::{NodeKind, NodeKindRegistry, IMAGE_TEXTURE_TYPE};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cyclesmax-export")]
#[command(about = "Export shader node trees for Cycles for Max")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./cyclesmax_export.ron when present)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the shader of the first selected object with one
    Export {
        /// Scene document (.ron or .json)
        #[arg(short, long)]
        scene: PathBuf,

        /// Output shader file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List supported host node types and their tags
    Kinds,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Operator(#[from] OperatorError),
}

fn init_tracing(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("cyclesmax_shader_cli=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run(cli: Cli, settings: &ExportSettings) -> Result<(), CliError> {
    match cli.command {
        Commands::Export { scene, output } => {
            let document = SceneDocument::load(&scene)?;
            let report = ExportOperator::new(settings).execute(&document, &output)?;
            println!(
                "Exported '{}' of '{}' ({} nodes, {} connections) to {}",
                report.material,
                report.object,
                report.result.nodes.len(),
                report.result.connections.len(),
                report.output_path.display()
            );
        }
        Commands::Kinds => {
            let registry = NodeKindRegistry::global();
            for (type_id, kind) in registry.entries() {
                println!("{type_id:<32} {kind}");
            }
            println!("{IMAGE_TEXTURE_TYPE:<32} {}", NodeKind::MaxTex);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Settings pick the log filter, so load them before logging starts
    let settings = ExportSettings::load_or_default(cli.settings.as_deref());
    let log_filter = settings
        .as_ref()
        .map_or_else(|_| ExportSettings::default().log_filter, |s| s.log_filter.clone());
    init_tracing(&log_filter);

    tracing::debug!("Starting cyclesmax-export v{}", env!("CARGO_PKG_VERSION"));

    let result = settings
        .map_err(CliError::from)
        .and_then(|settings| run(cli, &settings));
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
