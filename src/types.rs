//! Shared output shape and error taxonomy for the chunking engine.
//!
//! Every chunker in this crate emits the same [`Chunk`] record, tagged with a
//! [`ChunkingStrategy`] so downstream consumers branch on the tag rather than
//! on the type that produced it. Chunks are immutable value objects: no chunk
//! references another, relationships are positional (`chunk_index`) and
//! temporal (`start_ms`/`end_ms`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying which chunking path produced a [`Chunk`].
///
/// The serialized form uses the snake_case names that the indexing side
/// stores alongside each chunk (`timestamp_aware`,
/// `timestamp_aware_fallback`, `slide_chunking`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    /// Transcript chunking driven by segment timestamps.
    TimestampAware,
    /// Word-count-only transcript chunking, used when no timing metadata
    /// is available.
    TimestampAwareFallback,
    /// Per-page slide description chunking.
    SlideChunking,
}

impl ChunkingStrategy {
    /// The stable string tag stored with each chunk.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkingStrategy::TimestampAware => "timestamp_aware",
            ChunkingStrategy::TimestampAwareFallback => "timestamp_aware_fallback",
            ChunkingStrategy::SlideChunking => "slide_chunking",
        }
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bounded unit of text extracted from a document, ready for embedding.
///
/// Transcript chunks carry millisecond offsets (`start_ms`/`end_ms`) so
/// agents and UIs can deep-link into the lecture recording; slide chunks
/// carry page coordinates instead. Optional fields that do not apply to a
/// strategy are omitted from the serialized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text. Never empty; both chunkers skip blank input instead of
    /// emitting empty chunks.
    pub content: String,
    /// 0-based position within the chunking call that produced this chunk.
    /// Contiguous across the whole document, never reset per page.
    pub chunk_index: usize,
    /// Which chunking path produced this chunk.
    pub chunking_strategy: ChunkingStrategy,
    /// Millisecond offset of the first segment in the chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ms: Option<u64>,
    /// Millisecond offset of the last segment in the chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ms: Option<u64>,
    /// Source slide page, 1-based. Slide chunks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// 1-based position of this chunk within its page. Slide chunks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_in_page: Option<usize>,
    /// How many chunks the page was split into. Slide chunks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_chunks_in_page: Option<usize>,
    /// Identifier of the lecture (transcripts) or document (slides) this
    /// chunk belongs to; the indexing collaborator keys on it.
    pub owner_id: String,
}

/// Error type for chunking operations.
///
/// The taxonomy is deliberately small: everything is detected synchronously
/// before any chunk is produced, so callers never see partial output.
/// Malformed segment timing (`end_ms < start_ms`) is *not* an error; it is
/// clamped to a zero-duration segment so a single bad timestamp cannot abort
/// an otherwise valid transcript.
#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    /// A caller-supplied limit was out of range (non-positive bound, or
    /// overlap not in `[0, max_duration_ms)`).
    #[error("invalid chunking configuration: {0}")]
    InvalidConfiguration(String),

    /// A produced chunk sequence violated a post-condition. Surfaced by
    /// [`crate::validate::validate_chunks`], never by the chunkers
    /// themselves.
    #[error("chunk validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_tags_serialize_as_snake_case() {
        let tags: Vec<String> = [
            ChunkingStrategy::TimestampAware,
            ChunkingStrategy::TimestampAwareFallback,
            ChunkingStrategy::SlideChunking,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();

        assert_eq!(
            tags,
            vec![
                "\"timestamp_aware\"",
                "\"timestamp_aware_fallback\"",
                "\"slide_chunking\"",
            ]
        );
    }

    #[test]
    fn strategy_display_matches_serialized_tag() {
        for strategy in [
            ChunkingStrategy::TimestampAware,
            ChunkingStrategy::TimestampAwareFallback,
            ChunkingStrategy::SlideChunking,
        ] {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{strategy}\""));
        }
    }

    #[test]
    fn chunk_omits_absent_optional_fields() {
        let chunk = Chunk {
            content: "intro".into(),
            chunk_index: 0,
            chunking_strategy: ChunkingStrategy::TimestampAwareFallback,
            start_ms: None,
            end_ms: None,
            page_number: None,
            chunk_in_page: None,
            total_chunks_in_page: None,
            owner_id: "lecture_1".into(),
        };

        let value = serde_json::to_value(&chunk).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("start_ms"));
        assert!(!object.contains_key("page_number"));
        assert_eq!(object["chunking_strategy"], "timestamp_aware_fallback");
    }
}
