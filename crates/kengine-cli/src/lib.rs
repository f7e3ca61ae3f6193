//! # kengine-cli: Asset Toolkit Command-Line Interface
//!
//! Provides the `kengine` binary:
//!
//! ```bash
//! kengine save upload.tmp --name report.PDF
//! kengine list --ext .pdf
//! kengine read 3e23e8160039594a.PDF > report.pdf
//! kengine info static/uploads/3e23e8160039594a.PDF
//! kengine --analyzer legacy analyze chart.png --document article.txt
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; storage and analysis logic live in
//!   `kengine-store` and `kengine-media`.
//! - Services are built once by [`bootstrap::AppContext::bootstrap`] and
//!   passed to handlers explicitly.

pub mod analyze;
pub mod asset;
pub mod bootstrap;
pub mod config;

pub use bootstrap::AppContext;
pub use config::{ConfigError, KengineConfig};
