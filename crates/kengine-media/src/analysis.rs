//! # Analysis Types
//!
//! Inputs and outputs shared by every [`MediaIntelligence`](crate::MediaIntelligence)
//! implementation, plus the text helpers both analyzers build on.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use kengine_core::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::MediaError;

// ---------------------------------------------------------------------------
// Analyzer selection
// ---------------------------------------------------------------------------

/// Which analyzer implementation a process runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Content sniffing, context-aware alt text and placement.
    #[default]
    Current,
    /// Extension-only classification, append-at-end placement.
    Legacy,
}

impl AnalyzerKind {
    /// Returns the configuration identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyzerKind {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            _ => Err(MediaError::UnknownAnalyzer(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Media classification
// ---------------------------------------------------------------------------

/// Broad media category, which decides how an asset is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl MediaKind {
    /// Human-readable label used in generated alt text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio clip",
            Self::Document => "Document",
            Self::Other => "File",
        }
    }

    /// Classify by file extension (with or without the dot, any case).
    pub fn from_extension(ext: &str) -> (Self, &'static str) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => (Self::Image, "image/png"),
            "jpg" | "jpeg" => (Self::Image, "image/jpeg"),
            "gif" => (Self::Image, "image/gif"),
            "webp" => (Self::Image, "image/webp"),
            "svg" => (Self::Image, "image/svg+xml"),
            "bmp" => (Self::Image, "image/bmp"),
            "mp4" | "m4v" => (Self::Video, "video/mp4"),
            "mov" => (Self::Video, "video/quicktime"),
            "webm" => (Self::Video, "video/webm"),
            "avi" => (Self::Video, "video/x-msvideo"),
            "mp3" => (Self::Audio, "audio/mpeg"),
            "wav" => (Self::Audio, "audio/wav"),
            "ogg" => (Self::Audio, "audio/ogg"),
            "m4a" => (Self::Audio, "audio/mp4"),
            "flac" => (Self::Audio, "audio/flac"),
            "pdf" => (Self::Document, "application/pdf"),
            "doc" => (Self::Document, "application/msword"),
            "docx" => (
                Self::Document,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            "pptx" => (
                Self::Document,
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            ),
            "txt" => (Self::Document, "text/plain"),
            "md" => (Self::Document, "text/markdown"),
            "html" | "htm" => (Self::Document, "text/html"),
            _ => (Self::Other, "application/octet-stream"),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// A media payload submitted for analysis.
#[derive(Debug, Clone, Copy)]
pub struct MediaInput<'a> {
    /// Original upload name; supplies the extension and title words.
    pub filename: &'a str,
    /// Raw bytes.
    pub data: &'a [u8],
}

impl<'a> MediaInput<'a> {
    pub fn new(filename: &'a str, data: &'a [u8]) -> Self {
        Self { filename, data }
    }

    /// Extension without the dot, or empty.
    pub fn extension(&self) -> &'a str {
        Path::new(self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }

    /// Error unless the payload has at least one byte.
    pub(crate) fn ensure_non_empty(&self) -> Result<(), MediaError> {
        if self.data.is_empty() {
            return Err(MediaError::EmptyPayload {
                filename: self.filename.to_string(),
            });
        }
        Ok(())
    }
}

/// Result of analyzing one media payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAnalysis {
    /// Implementation that produced this analysis.
    pub analyzer: AnalyzerKind,
    pub media_kind: MediaKind,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Content hash of the payload, matching its stored name.
    pub hash: ContentHash,
    /// Display title derived from the file name.
    pub title: String,
    pub alt_text: String,
    /// Lowercase terms used to match the asset against document text.
    pub keywords: Vec<String>,
}

/// Where a rendered asset goes relative to a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementPosition {
    Before,
    After,
}

/// Suggested insertion point of an asset within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Zero-based index into the document's blank-line-separated paragraphs.
    pub paragraph_index: usize,
    pub position: PlacementPosition,
    /// Number of analysis keywords found in the chosen paragraph.
    pub matched_keywords: usize,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

const STOP_WORDS: &[&str] = &[
    "and", "are", "for", "from", "img", "into", "its", "that", "the", "this", "was", "were",
    "with", "you", "your", "our", "has", "have", "not", "but", "all", "can", "will", "file",
    "final", "copy", "new", "scan", "screenshot",
];

/// Split a document into paragraphs on blank lines.
pub fn paragraphs(document: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in document.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}

/// Lowercase alphanumeric terms of at least three characters, excluding
/// stop words and pure numbers, in first-seen order without duplicates.
pub fn terms(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() < 3 || word.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let word = word.to_lowercase();
        if STOP_WORDS.contains(&word.as_str()) || seen.contains(&word) {
            continue;
        }
        seen.push(word);
    }
    seen
}

/// Title from a file name: the stem with separators turned into spaces.
pub fn title_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let words: Vec<&str> = stem
        .split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        "Untitled".to_string()
    } else {
        words.join(" ")
    }
}
