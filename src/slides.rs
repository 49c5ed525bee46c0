//! Per-page slide description chunking.
//!
//! Slides are page-bounded units, so chunking stays page-bounded too: one
//! chunk per page, or two when the description outgrows the character
//! budget. No overlap is carried between slide chunks.

use tracing::debug;

use crate::chunker::Chunker;
use crate::documents::{SlideDocument, SlidePage};
use crate::types::{Chunk, ChunkingError, ChunkingStrategy};

/// Reference character budget per slide chunk.
pub const DEFAULT_MAX_CHARS: usize = 2_000;

/// Chunks slide decks one page at a time.
///
/// A page whose description fits in `max_chars` becomes a single chunk; a
/// longer page is split into exactly two chunks at the midpoint, nudged back
/// to the nearest preceding whitespace so no word is cut mid-token. The
/// second half is never re-split, even if it still exceeds the budget on its
/// own (the cap is one split per page, not recursive).
///
/// `chunk_index` increases monotonically across the whole document, so
/// consumers can order all of a deck's chunks without tracking page/position
/// pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideChunker {
    /// Maximum characters per chunk before a page is split in two.
    pub max_chars: usize,
}

impl Default for SlideChunker {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl SlideChunker {
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Splits `document` into one or two chunks per page, in page order.
    ///
    /// Pages with blank descriptions are skipped; an empty deck yields an
    /// empty list, not an error.
    ///
    /// # Errors
    ///
    /// [`ChunkingError::InvalidConfiguration`] when `max_chars` is zero.
    pub fn chunk(&self, document: &SlideDocument) -> Result<Vec<Chunk>, ChunkingError> {
        if self.max_chars == 0 {
            return Err(ChunkingError::InvalidConfiguration(
                "max_chars must be positive".into(),
            ));
        }

        let mut pages: Vec<&SlidePage> = document.pages.iter().collect();
        if !pages.is_sorted_by_key(|page| page.page_number) {
            pages.sort_by_key(|page| page.page_number);
        }

        let mut chunks = Vec::new();
        for page in pages {
            let content = page.description.trim();
            if content.is_empty() {
                continue;
            }

            if content.chars().count() <= self.max_chars {
                chunks.push(self.page_chunk(document, page, content.to_string(), chunks.len(), 1, 1));
                continue;
            }

            let (first, second) = split_near_midpoint(content);
            debug!(
                document = %document.id,
                page = page.page_number,
                chars = content.chars().count(),
                "slide description over budget; splitting page in two"
            );
            let index = chunks.len();
            chunks.push(self.page_chunk(document, page, first, index, 1, 2));
            chunks.push(self.page_chunk(document, page, second, index + 1, 2, 2));
        }

        Ok(chunks)
    }

    fn page_chunk(
        &self,
        document: &SlideDocument,
        page: &SlidePage,
        content: String,
        index: usize,
        chunk_in_page: usize,
        total_chunks_in_page: usize,
    ) -> Chunk {
        Chunk {
            content,
            chunk_index: index,
            chunking_strategy: ChunkingStrategy::SlideChunking,
            start_ms: None,
            end_ms: None,
            page_number: Some(page.page_number),
            chunk_in_page: Some(chunk_in_page),
            total_chunks_in_page: Some(total_chunks_in_page),
            owner_id: document.id.clone(),
        }
    }
}

impl Chunker for SlideChunker {
    type Document = SlideDocument;

    fn chunk(&self, document: &SlideDocument) -> Result<Vec<Chunk>, ChunkingError> {
        SlideChunker::chunk(self, document)
    }
}

/// Splits trimmed text into two non-empty halves near its character
/// midpoint, preferring the nearest whitespace boundary before the midpoint
/// so no word is cut in two. Falls back to the raw midpoint when the first
/// half contains no whitespace.
fn split_near_midpoint(content: &str) -> (String, String) {
    let char_count = content.chars().count();
    let midpoint_byte = content
        .char_indices()
        .nth(char_count / 2)
        .map_or(content.len(), |(byte, _)| byte);

    let split_byte = content[..midpoint_byte]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(midpoint_byte, |(byte, c)| byte + c.len_utf8());

    let first = content[..split_byte].trim_end().to_string();
    let second = content[split_byte..].trim_start().to_string();
    (first, second)
}
