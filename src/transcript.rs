//! Timestamp-aware transcript chunking.
//!
//! Aggregates provider word/phrase segments into passages bounded by both a
//! word budget and a duration budget, carrying a short overlap tail across
//! chunk boundaries so questions that straddle a boundary still retrieve
//! local context. Millisecond offsets are preserved on every chunk so
//! downstream agents and UIs can deep-link into the lecture recording.

use tracing::debug;

use crate::chunker::Chunker;
use crate::documents::{Segment, TranscriptDocument};
use crate::types::{Chunk, ChunkingError, ChunkingStrategy};

/// Reference word budget per chunk.
pub const DEFAULT_MAX_WORDS: usize = 110;
/// Reference duration budget per chunk, in milliseconds.
pub const DEFAULT_MAX_DURATION_MS: u64 = 75_000;
/// Reference overlap window carried across chunk boundaries, in milliseconds.
pub const DEFAULT_OVERLAP_MS: u64 = 12_000;

/// Chunks transcripts that carry timestamped segments.
///
/// A chunk closes as soon as appending the next segment would exceed either
/// `max_words` or `max_duration_ms`; the trailing segments inside the
/// `overlap_ms` window are then replayed at the head of the next chunk.
/// When a document has no usable segments the chunker degrades to a plain
/// word-count split of `full_text` (see [`ChunkingStrategy::TimestampAwareFallback`]).
///
/// The chunker is a pure function of its inputs: no I/O, no shared state,
/// safe to call concurrently on independent documents.
///
/// # Examples
///
/// ```
/// use lecture_chunking::{Segment, TranscriptChunker, TranscriptDocument};
///
/// let document = TranscriptDocument {
///     id: "transcript_1".into(),
///     title: "Concurrency 101".into(),
///     full_text: "Good morning everyone".into(),
///     segments: vec![
///         Segment::new("Good morning", 0, 900),
///         Segment::new("everyone", 900, 1_600),
///     ],
///     owner_id: "lecture_1".into(),
/// };
///
/// let chunks = TranscriptChunker::default().chunk(&document)?;
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].start_ms, Some(0));
/// assert_eq!(chunks[0].end_ms, Some(1_600));
/// # Ok::<(), lecture_chunking::ChunkingError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptChunker {
    /// Maximum whitespace-delimited words per chunk.
    pub max_words: usize,
    /// Maximum chunk span (`end_ms − start_ms`) in milliseconds.
    pub max_duration_ms: u64,
    /// Overlap window replayed into the next chunk, in milliseconds.
    /// Must be strictly less than `max_duration_ms`.
    pub overlap_ms: u64,
}

impl Default for TranscriptChunker {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            max_duration_ms: DEFAULT_MAX_DURATION_MS,
            overlap_ms: DEFAULT_OVERLAP_MS,
        }
    }
}

impl TranscriptChunker {
    /// Creates a chunker with explicit budgets. Limits are validated on the
    /// first [`chunk`](Self::chunk) call, not here.
    #[must_use]
    pub fn new(max_words: usize, max_duration_ms: u64, overlap_ms: u64) -> Self {
        Self {
            max_words,
            max_duration_ms,
            overlap_ms,
        }
    }

    /// Splits `document` into bounded, overlapping chunks.
    ///
    /// Empty input (no usable segments and empty `full_text`) yields an
    /// empty list, not an error.
    ///
    /// # Errors
    ///
    /// [`ChunkingError::InvalidConfiguration`] when `max_words` or
    /// `max_duration_ms` is zero, or `overlap_ms >= max_duration_ms`.
    pub fn chunk(&self, document: &TranscriptDocument) -> Result<Vec<Chunk>, ChunkingError> {
        self.validate()?;

        let mut ordered: Vec<&Segment> = document
            .segments
            .iter()
            .filter(|segment| !segment.text.trim().is_empty())
            .collect();

        if ordered.is_empty() {
            debug!(
                document = %document.id,
                "no usable segments; falling back to word-count chunking"
            );
            return Ok(self.fallback_chunks(document));
        }

        // Providers occasionally return segments out of order; a stable sort
        // keeps ties in their original relative order.
        if !ordered.is_sorted_by_key(|segment| segment.start_ms) {
            ordered.sort_by_key(|segment| segment.start_ms);
        }

        Ok(self.chunk_segments(document, &ordered))
    }

    fn validate(&self) -> Result<(), ChunkingError> {
        if self.max_words == 0 {
            return Err(ChunkingError::InvalidConfiguration(
                "max_words must be positive".into(),
            ));
        }
        if self.max_duration_ms == 0 {
            return Err(ChunkingError::InvalidConfiguration(
                "max_duration_ms must be positive".into(),
            ));
        }
        if self.overlap_ms >= self.max_duration_ms {
            return Err(ChunkingError::InvalidConfiguration(format!(
                "overlap_ms ({}) must be less than max_duration_ms ({})",
                self.overlap_ms, self.max_duration_ms
            )));
        }
        Ok(())
    }

    fn chunk_segments(&self, document: &TranscriptDocument, ordered: &[&Segment]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut acc = Accumulator::new();

        for &segment in ordered {
            let words = segment.text.split_whitespace().count();

            if acc.fresh > 0 && acc.would_exceed(segment, words, self) {
                let chunk = self.finalize(document, &acc, chunks.len());
                let tail = self.overlap_tail(&acc.pending, chunk.end_ms.unwrap_or(0));
                chunks.push(chunk);
                acc.restart_with(tail);
            }

            if acc.fresh == 0 {
                // The buffer holds only carried overlap (if anything) and the
                // incoming segment must land in this chunk. Shed carried
                // segments from the front until it fits; a segment that
                // exceeds a budget on its own still gets a chunk.
                while !acc.pending.is_empty() && acc.would_exceed(segment, words, self) {
                    acc.pop_front();
                }
            }

            acc.push(segment, words);
        }

        if !acc.pending.is_empty() {
            chunks.push(self.finalize(document, &acc, chunks.len()));
        }

        chunks
    }

    fn finalize(&self, document: &TranscriptDocument, acc: &Accumulator<'_>, index: usize) -> Chunk {
        let content = acc
            .pending
            .iter()
            .map(|entry| entry.segment.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let start_ms = acc.pending.first().map(|entry| entry.segment.start_ms);
        let end_ms = acc.pending.last().map(|entry| entry.segment.clamped_end_ms());

        debug!(
            document = %document.id,
            chunk_index = index,
            words = acc.words,
            ?start_ms,
            ?end_ms,
            "flushed transcript chunk"
        );

        Chunk {
            content,
            chunk_index: index,
            chunking_strategy: ChunkingStrategy::TimestampAware,
            start_ms,
            end_ms,
            page_number: None,
            chunk_in_page: None,
            total_chunks_in_page: None,
            owner_id: document.owner_id.clone(),
        }
    }

    /// Trailing segments whose end lies within `overlap_ms` of the closed
    /// chunk's end. Replayed at the head of the next chunk.
    fn overlap_tail<'a>(&self, pending: &[Pending<'a>], chunk_end_ms: u64) -> Vec<Pending<'a>> {
        if self.overlap_ms == 0 {
            return Vec::new();
        }
        let threshold = chunk_end_ms.saturating_sub(self.overlap_ms);
        pending
            .iter()
            .filter(|entry| entry.segment.clamped_end_ms() >= threshold)
            .copied()
            .collect()
    }

    /// Word-count split of `full_text`, used when no timing metadata exists
    /// (degraded provider responses) so ingestion can still proceed.
    fn fallback_chunks(&self, document: &TranscriptDocument) -> Vec<Chunk> {
        let words: Vec<&str> = document.full_text.split_whitespace().collect();
        words
            .chunks(self.max_words)
            .enumerate()
            .map(|(index, group)| Chunk {
                content: group.join(" "),
                chunk_index: index,
                chunking_strategy: ChunkingStrategy::TimestampAwareFallback,
                start_ms: None,
                end_ms: None,
                page_number: None,
                chunk_in_page: None,
                total_chunks_in_page: None,
                owner_id: document.owner_id.clone(),
            })
            .collect()
    }
}

impl Chunker for TranscriptChunker {
    type Document = TranscriptDocument;

    fn chunk(&self, document: &TranscriptDocument) -> Result<Vec<Chunk>, ChunkingError> {
        TranscriptChunker::chunk(self, document)
    }
}

#[derive(Clone, Copy)]
struct Pending<'a> {
    segment: &'a Segment,
    words: usize,
}

/// Explicit accumulator for the segment walk: pending segments plus running
/// counters, reset on every chunk boundary.
struct Accumulator<'a> {
    pending: Vec<Pending<'a>>,
    words: usize,
    /// Segments appended since the last flush; carried overlap is excluded,
    /// so `fresh == 0` means the buffer holds replayed context only.
    fresh: usize,
}

impl<'a> Accumulator<'a> {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            words: 0,
            fresh: 0,
        }
    }

    fn push(&mut self, segment: &'a Segment, words: usize) {
        self.pending.push(Pending { segment, words });
        self.words += words;
        self.fresh += 1;
    }

    fn pop_front(&mut self) {
        let entry = self.pending.remove(0);
        self.words -= entry.words;
    }

    fn restart_with(&mut self, tail: Vec<Pending<'a>>) {
        self.words = tail.iter().map(|entry| entry.words).sum();
        self.pending = tail;
        self.fresh = 0;
    }

    /// Would appending `segment` overrun either budget for the current
    /// window? Always `false` for an empty buffer: the first segment of a
    /// chunk is admitted unconditionally.
    fn would_exceed(&self, segment: &Segment, words: usize, limits: &TranscriptChunker) -> bool {
        let Some(first) = self.pending.first() else {
            return false;
        };
        if self.words + words > limits.max_words {
            return true;
        }
        let span = segment
            .clamped_end_ms()
            .saturating_sub(first.segment.start_ms);
        span > limits.max_duration_ms
    }
}
