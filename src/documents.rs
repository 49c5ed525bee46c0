//! Input snapshots consumed by the chunkers.
//!
//! These types mirror what the storage layer hands to the chunking engine:
//! a transcript with its timestamped segments, and a slide deck with one
//! rendered description per page. The chunkers treat them as immutable
//! snapshots; assembling them from stored records is the caller's job,
//! except for [`SlideDescription`] rendering which lives here because the
//! rendered layout is part of what gets embedded.

use serde::{Deserialize, Serialize};

/// A timestamped span of transcribed speech.
///
/// Produced by the upstream transcription provider; ordered by `start_ms`
/// ascending. `end_ms < start_ms` is tolerated (a data-quality glitch, not a
/// contract violation) and treated as a zero-duration segment during
/// chunking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Provider confidence in `[0, 1]`, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Diarized speaker label, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Segment {
    /// Creates a segment with no confidence or speaker metadata.
    #[must_use]
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
            confidence: None,
            speaker: None,
        }
    }

    /// End offset with inverted timing clamped to the start offset.
    #[must_use]
    pub(crate) fn clamped_end_ms(&self) -> u64 {
        self.end_ms.max(self.start_ms)
    }
}

/// A full transcript plus its timing metadata, as stored for one lecture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Document identifier (storage key of the transcript record).
    pub id: String,
    pub title: String,
    /// The complete transcript text. Used only by the fallback path when
    /// `segments` is empty.
    pub full_text: String,
    /// Word/phrase segments ordered by `start_ms`. May be empty when the
    /// provider returned text without timing.
    pub segments: Vec<Segment>,
    /// Identifier of the lecture this transcript belongs to; carried onto
    /// every emitted chunk.
    pub owner_id: String,
}

impl TranscriptDocument {
    /// Source kind tag stored alongside transcript documents.
    pub const SOURCE_KIND: &'static str = "transcript";
}

/// One slide page with its rendered description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidePage {
    /// 1-based page number.
    pub page_number: u32,
    /// Rendered description text; the unit the slide chunker splits.
    pub description: String,
    /// Coarse classification from the vision collaborator ("title",
    /// "diagram", "bullet_list", ...).
    pub slide_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A slide deck: ordered per-page descriptions for one document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideDocument {
    /// Document identifier; carried onto every emitted chunk as `owner_id`.
    pub id: String,
    /// Pages ordered by `page_number`.
    pub pages: Vec<SlidePage>,
}

impl SlideDocument {
    /// Assembles a slide document from the raw per-page records produced by
    /// the vision collaborator, rendering each into its description text.
    #[must_use]
    pub fn from_descriptions(id: impl Into<String>, descriptions: Vec<SlideDescription>) -> Self {
        Self {
            id: id.into(),
            pages: descriptions.into_iter().map(SlidePage::from).collect(),
        }
    }
}

/// Raw per-page description record as returned by the slide description
/// collaborator, before rendering into embeddable text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideDescription {
    pub page_number: u32,
    #[serde(default)]
    pub slide_type: String,
    #[serde(default)]
    pub overall_summary: String,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub images_description: String,
    #[serde(default)]
    pub diagrams_description: String,
    #[serde(default)]
    pub figures_description: String,
}

impl SlideDescription {
    /// Renders the record into the labelled description layout that gets
    /// embedded. Sections are always labelled, even when empty, so retrieval
    /// hits line up across pages.
    #[must_use]
    pub fn render(&self) -> String {
        [
            format!("Page {}", self.page_number),
            format!("Slide Type: {}", self.slide_type),
            format!("Summary: {}", self.overall_summary),
            String::new(),
            "Text Content:".to_string(),
            self.text_content.clone(),
            String::new(),
            "Images:".to_string(),
            self.images_description.clone(),
            String::new(),
            "Diagrams:".to_string(),
            self.diagrams_description.clone(),
            String::new(),
            "Figures:".to_string(),
            self.figures_description.clone(),
        ]
        .join("\n")
    }
}

impl From<SlideDescription> for SlidePage {
    fn from(desc: SlideDescription) -> Self {
        let description = desc.render();
        let summary = if desc.overall_summary.is_empty() {
            None
        } else {
            Some(desc.overall_summary)
        };
        Self {
            page_number: desc.page_number,
            description,
            slide_type: desc.slide_type,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_clamps_inverted_timing() {
        let segment = Segment::new("oops", 900, 400);
        assert_eq!(segment.clamped_end_ms(), 900);

        let ok = Segment::new("fine", 400, 900);
        assert_eq!(ok.clamped_end_ms(), 900);
    }

    #[test]
    fn description_renders_labelled_sections() {
        let desc = SlideDescription {
            page_number: 3,
            slide_type: "diagram".into(),
            overall_summary: "Deadlock conditions".into(),
            text_content: "Mutual exclusion, hold and wait".into(),
            diagrams_description: "Resource allocation graph with a cycle".into(),
            ..Default::default()
        };

        let rendered = desc.render();
        assert!(rendered.starts_with("Page 3\nSlide Type: diagram\n"));
        assert!(rendered.contains("Summary: Deadlock conditions"));
        assert!(rendered.contains("Text Content:\nMutual exclusion"));
        assert!(rendered.contains("Diagrams:\nResource allocation graph"));
        // Empty sections keep their labels.
        assert!(rendered.contains("Images:\n"));
        assert!(rendered.contains("Figures:\n"));
    }

    #[test]
    fn document_assembly_orders_and_renders_pages() {
        let doc = SlideDocument::from_descriptions(
            "deck_7",
            vec![
                SlideDescription {
                    page_number: 1,
                    slide_type: "title".into(),
                    overall_summary: "Course intro".into(),
                    ..Default::default()
                },
                SlideDescription {
                    page_number: 2,
                    ..Default::default()
                },
            ],
        );

        assert_eq!(doc.id, "deck_7");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].summary.as_deref(), Some("Course intro"));
        assert_eq!(doc.pages[1].summary, None);
        assert!(doc.pages[0].description.contains("Summary: Course intro"));
    }
}
