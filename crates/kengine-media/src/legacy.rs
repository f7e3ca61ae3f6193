//! # Legacy Media Analyzer
//!
//! Kept for deployments whose rendered articles depend on the older embed
//! markup. Classification trusts the file extension, alt text is just the
//! title, and media is always appended after the final paragraph.

use kengine_core::hash_bytes;

use crate::analysis::{
    paragraphs, terms, title_from_filename, AnalyzerKind, MediaAnalysis, MediaInput, MediaKind,
    Placement, PlacementPosition,
};
use crate::error::MediaError;
use crate::html::escape;
use crate::intelligence::MediaIntelligence;

/// Extension-driven analyzer with bare-element output.
#[derive(Debug, Clone, Default)]
pub struct LegacyMediaIntelligenceService {
    _private: (),
}

impl LegacyMediaIntelligenceService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaIntelligence for LegacyMediaIntelligenceService {
    fn analyze_media_comprehensive(
        &self,
        media: &MediaInput<'_>,
        _context: &str,
    ) -> Result<MediaAnalysis, MediaError> {
        media.ensure_non_empty()?;

        let (media_kind, mime_type) = MediaKind::from_extension(media.extension());
        let title = title_from_filename(media.filename);

        Ok(MediaAnalysis {
            analyzer: AnalyzerKind::Legacy,
            media_kind,
            mime_type: mime_type.to_string(),
            size_bytes: media.data.len() as u64,
            hash: hash_bytes(media.data),
            keywords: terms(&title),
            alt_text: title.clone(),
            title,
        })
    }

    fn create_enhanced_media_html(&self, src: &str, analysis: &MediaAnalysis) -> String {
        let src = escape(src);
        let alt = escape(&analysis.alt_text);
        match analysis.media_kind {
            MediaKind::Image => format!(r#"<img src="{src}" alt="{alt}">"#),
            MediaKind::Video => format!(r#"<video src="{src}" controls></video>"#),
            MediaKind::Audio => format!(r#"<audio src="{src}" controls></audio>"#),
            MediaKind::Document | MediaKind::Other => {
                format!(r#"<a href="{src}">{}</a>"#, escape(&analysis.title))
            }
        }
    }

    fn generate_contextual_placement(
        &self,
        _analysis: &MediaAnalysis,
        document: &str,
    ) -> Placement {
        let count = paragraphs(document).len();
        Placement {
            paragraph_index: count.saturating_sub(1),
            position: PlacementPosition::After,
            matched_keywords: 0,
            reason: "appended after the final paragraph".to_string(),
        }
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(filename: &str, data: &[u8]) -> MediaAnalysis {
        LegacyMediaIntelligenceService::new()
            .analyze_media_comprehensive(&MediaInput::new(filename, data), "ignored context")
            .unwrap()
    }

    #[test]
    fn classification_follows_extension_only() {
        // PNG bytes under a .mp3 name are still audio to the legacy analyzer.
        let analysis = analyze("track.mp3", b"\x89PNG\r\n\x1a\n");
        assert_eq!(analysis.media_kind, MediaKind::Audio);
        assert_eq!(analysis.mime_type, "audio/mpeg");
        assert_eq!(analysis.analyzer, AnalyzerKind::Legacy);
    }

    #[test]
    fn alt_text_is_title_and_context_is_ignored() {
        let analysis = analyze("site_map.png", b"x");
        assert_eq!(analysis.alt_text, "site map");
        assert_eq!(analysis.keywords, vec!["site", "map"]);
    }

    #[test]
    fn html_is_bare_element() {
        let service = LegacyMediaIntelligenceService::new();
        let analysis = analyze("site_map.png", b"x");
        assert_eq!(
            service.create_enhanced_media_html("/u/a.png", &analysis),
            r#"<img src="/u/a.png" alt="site map">"#
        );

        let doc = analyze("notes \"draft\".txt", b"x");
        assert_eq!(
            service.create_enhanced_media_html("/u/n.txt", &doc),
            r#"<a href="/u/n.txt">notes &quot;draft&quot;</a>"#
        );
    }

    #[test]
    fn placement_is_always_after_last_paragraph() {
        let service = LegacyMediaIntelligenceService::new();
        let analysis = analyze("site_map.png", b"x");
        let placement =
            service.generate_contextual_placement(&analysis, "The site map.\n\nOther.\n\nEnd.");
        assert_eq!(placement.paragraph_index, 2);
        assert_eq!(placement.position, PlacementPosition::After);

        let empty = service.generate_contextual_placement(&analysis, "");
        assert_eq!(empty.paragraph_index, 0);
    }
}
