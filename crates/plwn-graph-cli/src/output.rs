//! Command-line enums and output file naming.

use clap::ValueEnum;
use plwn_graph_store::{GraphFormat, GraphKindTag};
use std::path::{Path, PathBuf};

/// File stem used when `--out` names a directory.
const DEFAULT_STEM: &str = "plwn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphSelector {
    /// Lexical-unit graph only
    Lexical,
    /// Synset graph only
    Synset,
    /// Both graphs
    Both,
}

impl GraphSelector {
    pub fn includes(self, kind: GraphKindTag) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Lexical, GraphKindTag::LexicalUnit)
                | (Self::Synset, GraphKindTag::Synset)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Compact binary snapshot (.plwg)
    Binary,
    /// Pretty-printed JSON snapshot (.json)
    Json,
}

impl From<FormatArg> for GraphFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Binary => GraphFormat::Binary,
            FormatArg::Json => GraphFormat::Json,
        }
    }
}

/// Where the graph of `kind` is written for `--out <out>`.
///
/// `out` is a file prefix (`exports/plwn-4.2` → `exports/plwn-4.2_lu.plwg`)
/// unless it is an existing directory, in which case the files go inside it
/// as `plwn_lu.plwg` / `plwn_syn.plwg`.
pub fn artifact_path(out: &Path, kind: GraphKindTag, format: GraphFormat) -> PathBuf {
    let file_name =
        |stem: &str| format!("{stem}_{}.{}", kind.file_suffix(), format.extension());

    if out.is_dir() {
        return out.join(file_name(DEFAULT_STEM));
    }
    match out.file_name() {
        Some(stem) => out.with_file_name(file_name(&stem.to_string_lossy())),
        None => out.join(file_name(DEFAULT_STEM)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_naming() {
        let out = Path::new("exports/plwn-4.2");
        assert_eq!(
            artifact_path(out, GraphKindTag::LexicalUnit, GraphFormat::Binary),
            PathBuf::from("exports/plwn-4.2_lu.plwg")
        );
        assert_eq!(
            artifact_path(out, GraphKindTag::Synset, GraphFormat::Json),
            PathBuf::from("exports/plwn-4.2_syn.json")
        );
    }

    #[test]
    fn test_directory_naming() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            artifact_path(dir.path(), GraphKindTag::Synset, GraphFormat::Binary),
            dir.path().join("plwn_syn.plwg")
        );
    }

    #[test]
    fn test_selector() {
        assert!(GraphSelector::Both.includes(GraphKindTag::Synset));
        assert!(GraphSelector::Lexical.includes(GraphKindTag::LexicalUnit));
        assert!(!GraphSelector::Lexical.includes(GraphKindTag::Synset));
        assert!(!GraphSelector::Synset.includes(GraphKindTag::LexicalUnit));
    }
}
