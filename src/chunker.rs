//! The common chunking capability.

use crate::types::{Chunk, ChunkingError};

/// Capability shared by every chunking strategy in this crate.
///
/// Implementations are pure and synchronous: the same document and
/// configuration always produce byte-identical output, and independent
/// documents can be chunked concurrently without coordination. Callers that
/// need to distinguish strategies branch on
/// [`Chunk::chunking_strategy`](crate::types::Chunk::chunking_strategy), not
/// on the implementing type.
pub trait Chunker {
    /// The input snapshot this strategy consumes.
    type Document;

    /// Splits `document` into an ordered chunk sequence.
    ///
    /// # Errors
    ///
    /// [`ChunkingError::InvalidConfiguration`] when the chunker's limits are
    /// out of range; absence of content is never an error.
    fn chunk(&self, document: &Self::Document) -> Result<Vec<Chunk>, ChunkingError>;
}
