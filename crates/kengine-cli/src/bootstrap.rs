//! # Application Bootstrap
//!
//! Builds the long-lived services from a resolved [`KengineConfig`] exactly
//! once and bundles them into an [`AppContext`] that every command handler
//! receives explicitly. Nothing is constructed at module load.

use kengine_media::{build_analyzer, MediaIntelligence};
use kengine_store::AssetStore;

use crate::config::KengineConfig;

/// Services shared by all command handlers.
pub struct AppContext {
    /// Asset store bound to the configured upload directory.
    pub store: AssetStore,
    /// Media analyzer selected by configuration.
    pub media: Box<dyn MediaIntelligence>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .field("media", &self.media.kind())
            .finish()
    }
}

impl AppContext {
    /// Construct the store and analyzer described by `config`.
    pub fn bootstrap(config: &KengineConfig) -> Self {
        tracing::info!(
            upload_dir = %config.upload_dir.display(),
            analyzer = %config.analyzer,
            "bootstrapping asset toolkit"
        );
        Self {
            store: AssetStore::new(&config.upload_dir),
            media: build_analyzer(config.analyzer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kengine_media::AnalyzerKind;

    #[test]
    fn bootstrap_wires_configured_services() {
        let dir = tempfile::tempdir().unwrap();
        let config = KengineConfig {
            upload_dir: dir.path().join("uploads"),
            analyzer: AnalyzerKind::Legacy,
        };

        let ctx = AppContext::bootstrap(&config);
        assert_eq!(ctx.store.base_dir(), config.upload_dir.as_path());
        assert_eq!(ctx.media.kind(), AnalyzerKind::Legacy);
        assert!(format!("{ctx:?}").contains("Legacy"));
    }

    #[test]
    fn separate_contexts_do_not_share_state() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let ctx_a = AppContext::bootstrap(&KengineConfig {
            upload_dir: a.path().to_path_buf(),
            ..KengineConfig::default()
        });
        let ctx_b = AppContext::bootstrap(&KengineConfig {
            upload_dir: b.path().to_path_buf(),
            ..KengineConfig::default()
        });

        ctx_a.store.save_bytes(b"only in a", "a.txt").unwrap();
        assert_eq!(ctx_a.store.list(None).len(), 1);
        assert!(ctx_b.store.list(None).is_empty());
    }
}
