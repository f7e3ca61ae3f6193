//! # Media Intelligence Interface
//!
//! Trait-based seam over interchangeable media analyzers:
//!
//! - **Current**: [`MediaIntelligenceService`]: sniffs content, writes
//!   context-aware alt text, places media next to the paragraph it matches.
//! - **Legacy**: [`LegacyMediaIntelligenceService`]: trusts the extension,
//!   emits bare elements, appends media after the last paragraph.
//!
//! The implementation is chosen once, at bootstrap, from an [`AnalyzerKind`]
//! and handed to consumers as `Box<dyn MediaIntelligence>`. Callers never
//! name a concrete type.

use crate::analysis::{AnalyzerKind, MediaAnalysis, MediaInput, Placement};
use crate::current::MediaIntelligenceService;
use crate::error::MediaError;
use crate::legacy::LegacyMediaIntelligenceService;

/// Capability interface every media analyzer provides.
///
/// The trait is object-safe for use with `Box<dyn MediaIntelligence>`.
pub trait MediaIntelligence: Send + Sync {
    /// Classify a payload and derive title, alt text and keywords.
    ///
    /// `context` is surrounding prose (caption, nearby text); it may be empty.
    fn analyze_media_comprehensive(
        &self,
        media: &MediaInput<'_>,
        context: &str,
    ) -> Result<MediaAnalysis, MediaError>;

    /// Render an embeddable HTML snippet for the asset served at `src`.
    fn create_enhanced_media_html(&self, src: &str, analysis: &MediaAnalysis) -> String;

    /// Decide where in `document` the asset should be inserted.
    fn generate_contextual_placement(&self, analysis: &MediaAnalysis, document: &str)
        -> Placement;

    /// Which implementation this is.
    fn kind(&self) -> AnalyzerKind;
}

/// Construct the analyzer selected by configuration.
pub fn build_analyzer(kind: AnalyzerKind) -> Box<dyn MediaIntelligence> {
    tracing::debug!(analyzer = %kind, "building media analyzer");
    match kind {
        AnalyzerKind::Current => Box::new(MediaIntelligenceService::new()),
        AnalyzerKind::Legacy => Box::new(LegacyMediaIntelligenceService::new()),
    }
}
