//! Golf course OBJ import tool.
//!
//! # Commands
//!
//! - `ogs-import inspect <file.obj>` - Import one file and report each mesh
//! - `ogs-import course <folder>` - Group a course folder and import it all
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`). Reports go
//! to stdout, as text or as JSON with `--json`.

mod config;
mod course;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use course_mesh::io::AxisConvention;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Golf course surface import
#[derive(Parser)]
#[command(name = "ogs-import")]
#[command(about = "Import golf course OBJ surfaces and compute boundary blend weights", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    import: ImportArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single OBJ file and report each mesh
    Inspect {
        /// The OBJ file
        #[arg(name = "FILE")]
        path: PathBuf,
    },

    /// Scan a course folder, group files by prefix and import every group
    Course {
        /// Folder holding `<surface>_<part>.obj` files
        #[arg(name = "FOLDER")]
        dir: PathBuf,

        /// Only list the groups, do not import
        #[arg(long)]
        scan_only: bool,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
struct ImportArgs {
    /// JSON file with import parameters; flags override it
    #[arg(long, global = true, value_name = "PARAMS_JSON")]
    config: Option<PathBuf>,

    /// Axis convention applied while parsing
    #[arg(long, global = true, value_enum)]
    axis: Option<AxisArg>,

    /// Blend radius in mesh units
    #[arg(long, global = true)]
    blend_radius: Option<f64>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// Command-line spelling of [`AxisConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AxisArg {
    /// Keep coordinates as written
    AsAuthored,
    /// Negate Z and reverse winding
    FlipZ,
    /// Negate Y and reverse winding
    FlipY,
}

impl From<AxisArg> for AxisConvention {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::AsAuthored => Self::AsAuthored,
            AxisArg::FlipZ => Self::FlipZ,
            AxisArg::FlipY => Self::FlipY,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let params = config::resolve(&cli.import)?;

    match cli.command {
        Commands::Inspect { path } => inspect::run(&path, &params, cli.import.json),
        Commands::Course { dir, scan_only } => {
            if scan_only {
                course::scan(&dir, cli.import.json)
            } else {
                course::run(&dir, &params, cli.import.json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ogs-import",
            "inspect",
            "green.obj",
            "--axis",
            "flip-z",
            "--blend-radius",
            "0.5",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.import.axis, Some(AxisArg::FlipZ));
        assert_eq!(cli.import.blend_radius, Some(0.5));
        assert!(cli.import.json);
        assert!(matches!(cli.command, Commands::Inspect { .. }));
    }

    #[test]
    fn course_scan_only() {
        let cli = Cli::try_parse_from(["ogs-import", "course", "holes/", "--scan-only"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Course {
                scan_only: true,
                ..
            }
        ));
    }

    #[test]
    fn axis_mapping() {
        assert_eq!(AxisConvention::from(AxisArg::FlipY), AxisConvention::FlipY);
        assert_eq!(
            AxisConvention::from(AxisArg::AsAuthored),
            AxisConvention::AsAuthored
        );
    }
}
