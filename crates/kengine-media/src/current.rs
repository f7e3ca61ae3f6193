//! # Current Media Analyzer
//!
//! Classifies payloads by their leading bytes, falling back to the
//! extension only when the signature is unknown (or ambiguous, as with
//! zip-based office formats). Alt text folds in the first sentence of the
//! supplied context, and placement favours the paragraph sharing the most
//! keywords with the asset.

use kengine_core::hash_bytes;

use crate::analysis::{
    paragraphs, terms, title_from_filename, AnalyzerKind, MediaAnalysis, MediaInput, MediaKind,
    Placement, PlacementPosition,
};
use crate::error::MediaError;
use crate::html::escape;
use crate::intelligence::MediaIntelligence;

/// Upper bound on keywords kept per analysis.
const MAX_KEYWORDS: usize = 12;

/// Alt text budget, in characters, for the context sentence.
const MAX_CONTEXT_CHARS: usize = 125;

/// The default analyzer.
#[derive(Debug, Clone, Default)]
pub struct MediaIntelligenceService {
    _private: (),
}

impl MediaIntelligenceService {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Identify a payload from its magic bytes.
fn sniff(data: &[u8]) -> Option<(MediaKind, &'static str)> {
    let riff_form = if data.starts_with(b"RIFF") {
        data.get(8..12)
    } else {
        None
    };

    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some((MediaKind::Image, "image/png"))
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some((MediaKind::Image, "image/jpeg"))
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some((MediaKind::Image, "image/gif"))
    } else if matches!(riff_form, Some(b"WEBP")) {
        Some((MediaKind::Image, "image/webp"))
    } else if matches!(riff_form, Some(b"WAVE")) {
        Some((MediaKind::Audio, "audio/wav"))
    } else if matches!(riff_form, Some(b"AVI ")) {
        Some((MediaKind::Video, "video/x-msvideo"))
    } else if data.starts_with(b"%PDF-") {
        Some((MediaKind::Document, "application/pdf"))
    } else if data.starts_with(b"ID3")
        || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0)
    {
        Some((MediaKind::Audio, "audio/mpeg"))
    } else if data.starts_with(b"OggS") {
        Some((MediaKind::Audio, "audio/ogg"))
    } else if data.starts_with(b"fLaC") {
        Some((MediaKind::Audio, "audio/flac"))
    } else if matches!(data.get(4..8), Some(b"ftyp")) {
        match data.get(8..12) {
            Some(b"M4A ") => Some((MediaKind::Audio, "audio/mp4")),
            Some(b"qt  ") => Some((MediaKind::Video, "video/quicktime")),
            _ => Some((MediaKind::Video, "video/mp4")),
        }
    } else if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        Some((MediaKind::Video, "video/webm"))
    } else if looks_like_svg(data) {
        Some((MediaKind::Image, "image/svg+xml"))
    } else {
        None
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// First sentence of `context`, cut to the alt text budget.
fn lead_sentence(context: &str) -> String {
    let context = context.trim();
    let end = context
        .find(|c: char| c == '\n' || c == '.' || c == '!' || c == '?')
        .unwrap_or(context.len());
    let sentence = context[..end].trim();
    if sentence.chars().count() <= MAX_CONTEXT_CHARS {
        return sentence.to_string();
    }
    let cut: String = sentence.chars().take(MAX_CONTEXT_CHARS).collect();
    match cut.rfind(' ') {
        Some(i) if i > 0 => format!("{}...", &cut[..i]),
        _ => format!("{cut}..."),
    }
}

impl MediaIntelligence for MediaIntelligenceService {
    fn analyze_media_comprehensive(
        &self,
        media: &MediaInput<'_>,
        context: &str,
    ) -> Result<MediaAnalysis, MediaError> {
        media.ensure_non_empty()?;

        let (media_kind, mime_type) = match sniff(media.data) {
            Some(found) => found,
            None => {
                tracing::debug!(
                    filename = media.filename,
                    "no known signature, classifying by extension"
                );
                MediaKind::from_extension(media.extension())
            }
        };

        let title = title_from_filename(media.filename);
        let mut keywords = terms(&title);
        for term in terms(context) {
            if !keywords.contains(&term) {
                keywords.push(term);
            }
        }
        keywords.truncate(MAX_KEYWORDS);

        let lead = lead_sentence(context);
        let alt_text = if lead.is_empty() {
            format!("{}: {title}", media_kind.label())
        } else {
            format!("{}: {title}. {lead}", media_kind.label())
        };

        let analysis = MediaAnalysis {
            analyzer: AnalyzerKind::Current,
            media_kind,
            mime_type: mime_type.to_string(),
            size_bytes: media.data.len() as u64,
            hash: hash_bytes(media.data),
            title,
            alt_text,
            keywords,
        };
        tracing::debug!(
            filename = media.filename,
            kind = %analysis.media_kind,
            mime = %analysis.mime_type,
            keywords = analysis.keywords.len(),
            "analyzed media"
        );
        Ok(analysis)
    }

    fn create_enhanced_media_html(&self, src: &str, analysis: &MediaAnalysis) -> String {
        let src = escape(src);
        let alt = escape(&analysis.alt_text);
        let title = escape(&analysis.title);
        let mime = escape(&analysis.mime_type);

        let body = match analysis.media_kind {
            MediaKind::Image => format!(
                r#"<img src="{src}" alt="{alt}" loading="lazy" decoding="async">"#
            ),
            MediaKind::Video => format!(
                r#"<video controls preload="metadata" src="{src}" title="{alt}"></video>"#
            ),
            MediaKind::Audio => format!(
                r#"<audio controls preload="metadata" src="{src}" title="{alt}"></audio>"#
            ),
            MediaKind::Document | MediaKind::Other => format!(
                r#"<a href="{src}" type="{mime}" title="{alt}" download>{title}</a>"#
            ),
        };

        format!(
            "<figure class=\"kengine-media kengine-media-{kind}\" data-hash=\"{hash}\">\n  {body}\n  <figcaption>{title}</figcaption>\n</figure>",
            kind = analysis.media_kind,
            hash = analysis.hash,
        )
    }

    fn generate_contextual_placement(
        &self,
        analysis: &MediaAnalysis,
        document: &str,
    ) -> Placement {
        let paras = paragraphs(document);
        if paras.is_empty() {
            return Placement {
                paragraph_index: 0,
                position: PlacementPosition::After,
                matched_keywords: 0,
                reason: "document has no paragraphs".to_string(),
            };
        }

        // Earliest paragraph wins ties.
        let mut best: Option<(usize, usize)> = None;
        for (i, para) in paras.iter().enumerate() {
            let words = terms(para);
            let score = analysis
                .keywords
                .iter()
                .filter(|k| words.contains(*k))
                .count();
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        match best {
            Some((i, score)) => Placement {
                paragraph_index: i,
                position: PlacementPosition::After,
                matched_keywords: score,
                reason: format!("{score} keyword(s) shared with paragraph {i}"),
            },
            None => Placement {
                paragraph_index: paras.len() - 1,
                position: PlacementPosition::After,
                matched_keywords: 0,
                reason: "no keyword overlap; placed after the final paragraph".to_string(),
            },
        }
    }

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Current
    }
}
