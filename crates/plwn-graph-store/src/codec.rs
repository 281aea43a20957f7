//! Graph snapshot codec.
//!
//! Binary layout (all integers little-endian):
//!
//! ```text
//! b"PLWG" | u32 format version | u8 graph kind | u64 body length | body
//! ```
//!
//! The body is the bincode encoding of `(vertices, edges)`. The JSON form
//! carries the same data as one document with `format_version` and `kind`
//! fields. [`decode`] accepts either and checks that the stored kind matches
//! the requested payload type.

use crate::{Edge, Graph, GraphKindTag, GraphPayload};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Magic number for binary snapshots.
pub const MAGIC: &[u8; 4] = b"PLWG";

/// Current snapshot format version.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 4 + 4 + 1 + 8;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("not a PLWN graph snapshot (neither binary nor JSON)")]
    UnrecognizedFormat,

    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown graph kind tag {0}")]
    UnknownKind(u8),

    #[error("snapshot holds a {found} graph, expected a {expected} graph")]
    KindMismatch {
        expected: GraphKindTag,
        found: GraphKindTag,
    },

    #[error("snapshot is truncated")]
    Truncated,

    #[error("edge #{0} references a vertex outside the snapshot")]
    DanglingEdge(usize),

    #[error("binary body: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// On-disk representation of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    #[default]
    Binary,
    Json,
}

impl GraphFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Binary => "plwg",
            Self::Json => "json",
        }
    }

    /// Guess the format of an encoded snapshot from its first bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(MAGIC) {
            return Some(Self::Binary);
        }
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a, P> {
    format_version: u32,
    kind: GraphKindTag,
    vertices: &'a [P],
    edges: &'a [Edge],
}

#[derive(Deserialize)]
struct Snapshot<P> {
    vertices: Vec<P>,
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    format_version: u32,
    kind: GraphKindTag,
}

/// Encode a graph. Vertex and edge order are preserved.
pub fn encode<P: GraphPayload>(
    graph: &Graph<P>,
    format: GraphFormat,
) -> Result<Vec<u8>, CodecError> {
    match format {
        GraphFormat::Binary => {
            let body = bincode::serialize(&(graph.payloads(), graph.edges()))?;

            let mut out = Vec::with_capacity(HEADER_LEN + body.len());
            out.extend_from_slice(MAGIC);
            out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
            out.push(P::KIND as u8);
            out.extend_from_slice(&(body.len() as u64).to_le_bytes());
            out.extend_from_slice(&body);
            Ok(out)
        }
        GraphFormat::Json => {
            let snapshot = SnapshotRef {
                format_version: FORMAT_VERSION,
                kind: P::KIND,
                vertices: graph.payloads(),
                edges: graph.edges(),
            };
            Ok(serde_json::to_vec_pretty(&snapshot)?)
        }
    }
}

/// Decode a graph of payload type `P` from either format.
pub fn decode<P: GraphPayload>(bytes: &[u8]) -> Result<Graph<P>, CodecError> {
    let (vertices, edges) = match GraphFormat::detect(bytes) {
        Some(GraphFormat::Binary) => {
            let (kind, body) = split_binary(bytes)?;
            expect_kind::<P>(kind)?;
            bincode::deserialize::<(Vec<P>, Vec<Edge>)>(body)?
        }
        Some(GraphFormat::Json) => {
            // Vertex shapes differ per kind, so the header is checked before
            // the payloads are parsed.
            expect_kind::<P>(json_kind(bytes)?)?;
            let snapshot: Snapshot<P> = serde_json::from_slice(bytes)?;
            (snapshot.vertices, snapshot.edges)
        }
        None => return Err(CodecError::UnrecognizedFormat),
    };

    Graph::from_parts(vertices, edges).map_err(CodecError::DanglingEdge)
}

/// Read the graph kind of an encoded snapshot without decoding its payloads.
pub fn peek_kind(bytes: &[u8]) -> Result<GraphKindTag, CodecError> {
    match GraphFormat::detect(bytes) {
        Some(GraphFormat::Binary) => split_binary(bytes).map(|(kind, _)| kind),
        Some(GraphFormat::Json) => json_kind(bytes),
        None => Err(CodecError::UnrecognizedFormat),
    }
}

fn json_kind(bytes: &[u8]) -> Result<GraphKindTag, CodecError> {
    let header: SnapshotHeader = serde_json::from_slice(bytes)?;
    check_version(header.format_version)?;
    Ok(header.kind)
}

fn split_binary(bytes: &[u8]) -> Result<(GraphKindTag, &[u8]), CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated);
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[4..8]);
    check_version(u32::from_le_bytes(version))?;

    let kind = GraphKindTag::from_u8(bytes[8]).ok_or(CodecError::UnknownKind(bytes[8]))?;

    let mut len = [0u8; 8];
    len.copy_from_slice(&bytes[9..HEADER_LEN]);
    let body_len = usize::try_from(u64::from_le_bytes(len)).map_err(|_| CodecError::Truncated)?;

    let body = bytes
        .get(HEADER_LEN..)
        .filter(|rest| rest.len() >= body_len)
        .map(|rest| &rest[..body_len])
        .ok_or(CodecError::Truncated)?;

    Ok((kind, body))
}

fn check_version(version: u32) -> Result<(), CodecError> {
    if version == FORMAT_VERSION {
        Ok(())
    } else {
        Err(CodecError::UnsupportedVersion(version))
    }
}

fn expect_kind<P: GraphPayload>(found: GraphKindTag) -> Result<(), CodecError> {
    if found == P::KIND {
        Ok(())
    } else {
        Err(CodecError::KindMismatch {
            expected: P::KIND,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexicalUnitGraph, SynsetGraph};
    use plwn_graph_model::{LexicalUnit, Synset};

    fn small_graph() -> LexicalUnitGraph {
        let mut graph = LexicalUnitGraph::new();
        let a = graph.add_vertex(LexicalUnit::new(1, "pies", 2, 0, 1));
        let b = graph.add_vertex(LexicalUnit::new(2, "kot", 2, 0, 1));
        graph.add_edge(a, b, 5);
        graph
    }

    #[test]
    fn test_binary_header_layout() {
        let bytes = encode(&small_graph(), GraphFormat::Binary).unwrap();
        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), FORMAT_VERSION);
        assert_eq!(bytes[8], GraphKindTag::LexicalUnit as u8);
        let body_len = u64::from_le_bytes(bytes[9..17].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), HEADER_LEN + body_len);
    }

    #[test]
    fn test_detect_format() {
        let binary = encode(&small_graph(), GraphFormat::Binary).unwrap();
        let json = encode(&small_graph(), GraphFormat::Json).unwrap();
        assert_eq!(GraphFormat::detect(&binary), Some(GraphFormat::Binary));
        assert_eq!(GraphFormat::detect(&json), Some(GraphFormat::Json));
        assert_eq!(GraphFormat::detect(b"  \n{}"), Some(GraphFormat::Json));
        assert_eq!(GraphFormat::detect(b"<graphml/>"), None);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        for format in [GraphFormat::Binary, GraphFormat::Json] {
            let bytes = encode(&small_graph(), format).unwrap();
            let err = decode::<Synset>(&bytes).unwrap_err();
            assert!(
                matches!(
                    err,
                    CodecError::KindMismatch {
                        expected: GraphKindTag::Synset,
                        found: GraphKindTag::LexicalUnit,
                    }
                ),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_truncated_binary_is_rejected() {
        let bytes = encode(&small_graph(), GraphFormat::Binary).unwrap();
        assert!(matches!(
            decode::<LexicalUnit>(&bytes[..bytes.len() - 1]),
            Err(CodecError::Truncated)
        ));
        assert!(matches!(
            decode::<LexicalUnit>(&bytes[..6]),
            Err(CodecError::Truncated)
        ));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let mut bytes = encode(&small_graph(), GraphFormat::Binary).unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            decode::<LexicalUnit>(&bytes),
            Err(CodecError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_future_json_version_is_rejected_before_payloads() {
        let json = br#"{
            "format_version": 2,
            "kind": "lexical_unit",
            "vertices": [{"uid": "1", "text": "pies"}],
            "edges": []
        }"#;
        assert!(matches!(
            decode::<LexicalUnit>(json),
            Err(CodecError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_unknown_kind_tag() {
        let mut bytes = encode(&small_graph(), GraphFormat::Binary).unwrap();
        bytes[8] = 9;
        assert!(matches!(peek_kind(&bytes), Err(CodecError::UnknownKind(9))));
    }

    #[test]
    fn test_peek_kind() {
        let graph = SynsetGraph::new();
        for format in [GraphFormat::Binary, GraphFormat::Json] {
            let bytes = encode(&graph, format).unwrap();
            assert_eq!(peek_kind(&bytes).unwrap(), GraphKindTag::Synset);
        }
    }

    #[test]
    fn test_json_dangling_edge_is_rejected() {
        let json = br#"{
            "format_version": 1,
            "kind": "lexical_unit",
            "vertices": [{"id": 1, "lemma": "pies", "pos": 2, "domain": 0, "variant": 1}],
            "edges": [{"source": 0, "target": 3, "relation": 5}]
        }"#;
        assert!(matches!(
            decode::<LexicalUnit>(json),
            Err(CodecError::DanglingEdge(0))
        ));
    }
}
