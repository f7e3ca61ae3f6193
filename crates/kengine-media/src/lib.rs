//! # kengine-media: Media Intelligence
//!
//! A stable interface, [`MediaIntelligence`], over two interchangeable media
//! analyzers:
//!
//! - [`MediaIntelligenceService`] (`current`): signature sniffing,
//!   context-aware alt text, keyword-matched placement, `<figure>` markup.
//! - [`LegacyMediaIntelligenceService`] (`legacy`): extension-only
//!   classification, bare element markup, append-at-end placement.
//!
//! Pick one with [`AnalyzerKind`] and [`build_analyzer`] when the
//! application starts, then pass the boxed analyzer to whatever needs it:
//!
//! ```rust
//! use kengine_media::{build_analyzer, AnalyzerKind, MediaInput};
//!
//! let analyzer = build_analyzer(AnalyzerKind::Current);
//! let media = MediaInput::new("wind_turbine.png", b"\x89PNG\r\n\x1a\n");
//! let analysis = analyzer.analyze_media_comprehensive(&media, "Turbine blades.")?;
//! let html = analyzer.create_enhanced_media_html("/static/uploads/a.png", &analysis);
//! assert!(html.contains("<img"));
//! # Ok::<(), kengine_media::MediaError>(())
//! ```
//!
//! Both analyzers are local heuristics. Neither calls out to a model or
//! remote service.

pub mod analysis;
pub mod current;
pub mod error;
pub mod html;
pub mod intelligence;
pub mod legacy;

pub use analysis::{
    AnalyzerKind, MediaAnalysis, MediaInput, MediaKind, Placement, PlacementPosition,
};
pub use current::MediaIntelligenceService;
pub use error::MediaError;
pub use intelligence::{build_analyzer, MediaIntelligence};
pub use legacy::LegacyMediaIntelligenceService;
