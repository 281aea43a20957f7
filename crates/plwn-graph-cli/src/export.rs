use crate::output::{artifact_path, FormatArg, GraphSelector};
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use plwn_graph_build::{build_lexical_unit_graph, build_synset_graph, BuildSummary};
use plwn_graph_ingest_sql::{connect, ConnectionConfig, EntityRepository};
use plwn_graph_model::CollectingDiagnostics;
use plwn_graph_store::{load, save, Graph, GraphFormat, GraphKindTag, GraphPayload};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Connection descriptor (`.properties` with User/Password/Url, or YAML)
    #[arg(long = "db-config", value_name = "FILE")]
    pub db_config: Option<PathBuf>,

    /// Output prefix or existing directory; without it graphs are only built and summarized
    #[arg(short, long, value_name = "PREFIX")]
    pub out: Option<PathBuf>,

    /// Which graphs to export
    #[arg(long, value_enum, default_value = "both")]
    pub graph: GraphSelector,

    /// Snapshot format
    #[arg(long, value_enum, default_value = "binary")]
    pub format: FormatArg,

    /// Reuse a saved lexical-unit graph instead of rebuilding it
    #[arg(long = "in-lu-graph", value_name = "FILE")]
    pub in_lu_graph: Option<PathBuf>,

    /// Reuse a saved synset graph instead of rebuilding it
    #[arg(long = "in-syn-graph", value_name = "FILE")]
    pub in_syn_graph: Option<PathBuf>,
}

impl ExportArgs {
    fn reuse_path(&self, kind: GraphKindTag) -> Option<&Path> {
        match kind {
            GraphKindTag::LexicalUnit => self.in_lu_graph.as_deref(),
            GraphKindTag::Synset => self.in_syn_graph.as_deref(),
        }
    }

    fn must_rebuild(&self, kind: GraphKindTag) -> bool {
        self.graph.includes(kind) && self.reuse_path(kind).is_none()
    }
}

pub fn cmd_export(args: &ExportArgs) -> Result<()> {
    println!("{} plWordNet graphs", "Exporting".green().bold());

    let format: GraphFormat = args.format.into();
    let sink = CollectingDiagnostics::new();

    let rebuild_lu = args.must_rebuild(GraphKindTag::LexicalUnit);
    let rebuild_syn = args.must_rebuild(GraphKindTag::Synset);

    // Connect before anything is built so a bad descriptor fails fast.
    let store = if rebuild_lu || rebuild_syn {
        let Some(config_path) = &args.db_config else {
            bail!(
                "--db-config is required unless every requested graph is given with \
                 --in-lu-graph/--in-syn-graph"
            );
        };
        let config = ConnectionConfig::from_path(config_path).with_context(|| {
            format!("cannot load connection descriptor {}", config_path.display())
        })?;
        let store = connect(&config).context("cannot open the plWordNet database")?;
        Some(store)
    } else {
        None
    };

    let repo = store
        .as_deref()
        .map(|store| EntityRepository::new(store, &sink));

    // One lexical-unit fetch serves both builds.
    let lexical_units = match &repo {
        Some(repo) if rebuild_lu && rebuild_syn => Some(repo.fetch_lexical_units()),
        _ => None,
    };

    if args.graph.includes(GraphKindTag::LexicalUnit) {
        let graph = match args.reuse_path(GraphKindTag::LexicalUnit) {
            Some(path) => reuse(path)?,
            None => report_build(build_lexical_unit_graph(
                connected(&repo)?,
                lexical_units.as_ref(),
            )),
        };
        write_artifact(&graph, args.out.as_deref(), format)?;
    }

    if args.graph.includes(GraphKindTag::Synset) {
        let graph = match args.reuse_path(GraphKindTag::Synset) {
            Some(path) => reuse(path)?,
            None => report_build(build_synset_graph(connected(&repo)?, lexical_units.as_ref())),
        };
        write_artifact(&graph, args.out.as_deref(), format)?;
    }

    if sink.is_empty() {
        println!("  {} no data-quality warnings", "✓".green());
    } else {
        let counts = sink
            .counts()
            .into_iter()
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} {} data-quality warnings ({counts})",
            "⚠".yellow(),
            sink.len()
        );
    }

    Ok(())
}

fn connected<'r, 'a>(repo: &'r Option<EntityRepository<'a>>) -> Result<&'r EntityRepository<'a>> {
    repo.as_ref().context("no database connection was opened")
}

fn reuse<P: GraphPayload>(path: &Path) -> Result<Graph<P>> {
    let graph: Graph<P> = load(path)
        .with_context(|| format!("cannot reuse {} graph from {}", P::KIND, path.display()))?;
    let summary = BuildSummary::of(&graph);
    println!(
        "  {} {} graph loaded from {}: {} vertices, {} edges",
        "→".cyan(),
        summary.kind,
        path.display(),
        summary.vertices,
        summary.edges
    );
    Ok(graph)
}

fn report_build<P>((graph, summary): (Graph<P>, BuildSummary)) -> Graph<P> {
    println!(
        "  {} {} graph built: {} vertices, {} edges ({} dropped)",
        "→".cyan(),
        summary.kind,
        summary.vertices,
        summary.edges,
        summary.dropped_edges
    );
    graph
}

fn write_artifact<P: GraphPayload>(
    graph: &Graph<P>,
    out: Option<&Path>,
    format: GraphFormat,
) -> Result<()> {
    let Some(out) = out else {
        return Ok(());
    };
    let path = artifact_path(out, P::KIND, format);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create output directory {}", parent.display()))?;
    }
    save(graph, &path, format).with_context(|| format!("cannot write {} graph", P::KIND))?;
    println!("  {} {}", "→".cyan(), path.display());
    Ok(())
}
