//! plwn-graph CLI
//!
//! Exports plWordNet from its relational database into two graph snapshots
//! (lexical units and synsets) and inspects saved snapshots.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod export;
mod inspect;
mod output;

#[derive(Parser)]
#[command(name = "plwn-graph")]
#[command(author, version, about = "plWordNet relational-to-graph exporter")]
struct Cli {
    /// Log debug detail (overrides RUST_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the lexical-unit and/or synset graph and save them as snapshots.
    ///
    /// Output files are `<prefix>_lu.<ext>` and `<prefix>_syn.<ext>`. Graphs
    /// given with `--in-lu-graph`/`--in-syn-graph` are loaded instead of
    /// rebuilt; the database is contacted only when something must be rebuilt.
    Export(export::ExportArgs),

    /// Print kind, size and relation counts of a saved snapshot.
    Inspect {
        /// Snapshot file (binary or JSON)
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = match (verbose, quiet) {
        (true, _) => EnvFilter::new("debug"),
        (_, true) => EnvFilter::new("error"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Export(args) => export::cmd_export(&args)?,
        Commands::Inspect { input, json } => inspect::cmd_inspect(&input, json)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_defaults() {
        let cli =
            Cli::try_parse_from(["plwn-graph", "export", "--db-config", "db.properties"])
                .unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.graph, output::GraphSelector::Both);
                assert_eq!(args.format, output::FormatArg::Binary);
                assert!(args.out.is_none());
            }
            Commands::Inspect { .. } => panic!("expected export"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["plwn-graph", "-v", "-q", "inspect", "x.plwg"]).is_err());
    }
}
