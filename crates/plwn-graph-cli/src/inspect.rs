use anyhow::{Context, Result};
use colored::Colorize;
use plwn_graph_model::{LexicalUnit, RelationCode, Synset};
use plwn_graph_store::{codec, persistence, Graph, GraphFormat, GraphKindTag, GraphPayload};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize)]
struct GraphReport {
    kind: GraphKindTag,
    format: &'static str,
    vertices: usize,
    edges: usize,
    relations: BTreeMap<RelationCode, usize>,
}

impl GraphReport {
    fn of<P: GraphPayload>(graph: &Graph<P>, format: GraphFormat) -> Self {
        Self {
            kind: graph.kind(),
            format: format.extension(),
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            relations: graph.relation_histogram(),
        }
    }
}

pub fn cmd_inspect(path: &Path, json: bool) -> Result<()> {
    let bytes = persistence::read(path)?;
    let format = GraphFormat::detect(&bytes).unwrap_or_default();
    let kind = codec::peek_kind(&bytes)
        .with_context(|| format!("{} is not a plwn-graph snapshot", path.display()))?;

    let report = match kind {
        GraphKindTag::LexicalUnit => {
            GraphReport::of(&codec::decode::<LexicalUnit>(&bytes)?, format)
        }
        GraphKindTag::Synset => GraphReport::of(&codec::decode::<Synset>(&bytes)?, format),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Inspecting".green().bold(), path.display());
    println!("  {} {} graph ({})", "→".cyan(), report.kind, report.format);
    println!(
        "  {} {} vertices, {} edges",
        "→".yellow(),
        report.vertices,
        report.edges
    );
    for (code, count) in &report.relations {
        println!("    relation {code:>4}: {count}");
    }
    Ok(())
}
