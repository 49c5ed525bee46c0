//! Post-condition checks over produced chunk sequences.

use crate::types::{Chunk, ChunkingError};

/// Verifies the invariants every chunker guarantees: `chunk_index` values
/// are contiguous from 0, no chunk is empty, and transcript timing is
/// ordered (`start_ms ≤ end_ms`) when present.
///
/// The chunkers uphold these by construction; callers that persist or
/// forward chunks from other sources can use this as a cheap gate before
/// indexing.
///
/// # Errors
///
/// [`ChunkingError::Validation`] naming the first violated invariant.
pub fn validate_chunks(chunks: &[Chunk]) -> Result<(), ChunkingError> {
    for (position, chunk) in chunks.iter().enumerate() {
        if chunk.chunk_index != position {
            return Err(ChunkingError::Validation(format!(
                "chunk_index {} at position {position} (indexes must be contiguous from 0)",
                chunk.chunk_index
            )));
        }
        if chunk.content.is_empty() {
            return Err(ChunkingError::Validation(format!(
                "chunk {position} has empty content"
            )));
        }
        if let (Some(start_ms), Some(end_ms)) = (chunk.start_ms, chunk.end_ms)
            && start_ms > end_ms
        {
            return Err(ChunkingError::Validation(format!(
                "chunk {position} has start_ms {start_ms} > end_ms {end_ms}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkingStrategy;

    fn chunk(index: usize, content: &str) -> Chunk {
        Chunk {
            content: content.to_string(),
            chunk_index: index,
            chunking_strategy: ChunkingStrategy::TimestampAware,
            start_ms: Some(0),
            end_ms: Some(1_000),
            page_number: None,
            chunk_in_page: None,
            total_chunks_in_page: None,
            owner_id: "lecture_1".into(),
        }
    }

    #[test]
    fn accepts_well_formed_sequences() {
        let chunks = vec![chunk(0, "one"), chunk(1, "two")];
        assert!(validate_chunks(&chunks).is_ok());
        assert!(validate_chunks(&[]).is_ok());
    }

    #[test]
    fn rejects_index_gaps_and_repeats() {
        let gap = vec![chunk(0, "one"), chunk(2, "three")];
        assert!(matches!(
            validate_chunks(&gap),
            Err(ChunkingError::Validation(_))
        ));

        let repeat = vec![chunk(0, "one"), chunk(0, "again")];
        assert!(validate_chunks(&repeat).is_err());
    }

    #[test]
    fn rejects_empty_content() {
        let chunks = vec![chunk(0, "")];
        assert!(validate_chunks(&chunks).is_err());
    }

    #[test]
    fn rejects_inverted_timing() {
        let mut bad = chunk(0, "text");
        bad.start_ms = Some(2_000);
        bad.end_ms = Some(500);
        assert!(validate_chunks(&[bad]).is_err());
    }

    #[test]
    fn timing_check_skips_untimed_chunks() {
        let mut fallback = chunk(0, "text");
        fallback.start_ms = None;
        fallback.end_ms = None;
        assert!(validate_chunks(&[fallback]).is_ok());
    }
}
