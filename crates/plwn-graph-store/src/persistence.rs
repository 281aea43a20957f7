//! File wrappers around the snapshot codec.

use crate::codec::{self, CodecError, GraphFormat};
use crate::{Graph, GraphPayload};
use std::path::Path;

/// Write `graph` to `path` in the given format, replacing any existing file.
pub fn save<P: GraphPayload>(
    graph: &Graph<P>,
    path: &Path,
    format: GraphFormat,
) -> Result<(), CodecError> {
    let bytes = codec::encode(graph, format)?;
    std::fs::write(path, bytes).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a graph previously written by [`save`]. The format is detected from
/// the file contents.
pub fn load<P: GraphPayload>(path: &Path) -> Result<Graph<P>, CodecError> {
    let bytes = read(path)?;
    codec::decode(&bytes)
}

/// Raw snapshot bytes, for callers that need [`codec::peek_kind`] first.
pub fn read(path: &Path) -> Result<Vec<u8>, CodecError> {
    std::fs::read(path).map_err(|source| CodecError::Io {
        path: path.display().to_string(),
        source,
    })
}
