//! Chunking engine for lecture ingestion pipelines.
//!
//! Converts raw transcribed speech and per-page slide descriptions into
//! bounded, semantically coherent chunks ready for embedding and retrieval.
//! The engine is the pure core of a larger ingestion backend: storage,
//! transcription, slide description, and vector indexing are collaborators
//! that sit on either side of it.
//!
//! ```text
//! Transcription provider ──► TranscriptDocument ──► TranscriptChunker ─┐
//!                            (full text + timed                        │
//!                             segments)                                ├──► Vec<Chunk> ──► embedding /
//!                                                                      │                  vector index
//! Slide describer ──► SlideDescription ──► SlideDocument ──► SlideChunker ─┘
//!                     (raw per-page        (rendered pages)
//!                      records)
//! ```
//!
//! Both chunkers emit the same [`Chunk`] record tagged with a
//! [`ChunkingStrategy`], so the indexing side branches on the tag rather
//! than on which chunker ran. Every call is synchronous, allocation-only,
//! and deterministic; chunking independent documents concurrently needs no
//! coordination.
//!
//! # Examples
//!
//! ```
//! use lecture_chunking::{Segment, TranscriptChunker, TranscriptDocument, validate_chunks};
//!
//! let document = TranscriptDocument {
//!     id: "transcript_42".into(),
//!     title: "Memory Models".into(),
//!     full_text: "Today we cover release acquire ordering".into(),
//!     segments: vec![
//!         Segment::new("Today we cover", 0, 1_800),
//!         Segment::new("release acquire ordering", 1_800, 4_200),
//!     ],
//!     owner_id: "lecture_42".into(),
//! };
//!
//! let chunks = TranscriptChunker::default().chunk(&document)?;
//! validate_chunks(&chunks)?;
//! assert_eq!(chunks[0].owner_id, "lecture_42");
//! # Ok::<(), lecture_chunking::ChunkingError>(())
//! ```

pub mod chunker;
pub mod documents;
pub mod slides;
pub mod transcript;
pub mod types;
pub mod validate;

pub use chunker::Chunker;
pub use documents::{Segment, SlideDescription, SlideDocument, SlidePage, TranscriptDocument};
pub use slides::SlideChunker;
pub use transcript::TranscriptChunker;
pub use types::{Chunk, ChunkingError, ChunkingStrategy};
pub use validate::validate_chunks;
