//! Filesystem contract with the external automation engine.
//!
//! The engine is the sole writer of barcode artifacts. We only check for
//! their existence and drop creation requests into its hotfolder; the
//! engine scans that folder on its own cadence (~60 seconds).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::settings::AutomationConfig;
use crate::error::{AppError, AppResult};

/// Which artifact a plate order needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    BoxPdf,
    Label,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::BoxPdf => "box_pdf",
            ArtifactKind::Label => "label",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness and trigger operations against the engine's shared storage.
///
/// Abstracted behind a trait so the polling loop can be exercised without
/// touching a real filesystem share.
pub trait ArtifactStore: Send + Sync {
    /// Whether the barcode artifact for this order already exists.
    fn exists(&self, order_id: i32, kind: ArtifactKind) -> bool;

    /// Ask the engine to create the artifact. Fire-and-forget: a successful
    /// return only means the request was handed off, not that the artifact
    /// exists.
    fn trigger(&self, order_id: i32, kind: ArtifactKind) -> AppResult<()>;
}

/// Request file payload dropped into the engine's hotfolder.
#[derive(Debug, Serialize, Deserialize)]
struct CreationRequest {
    order_id: i32,
    artifact: ArtifactKind,
}

/// Artifact store backed by the shared production filesystem.
pub struct FsArtifactStore {
    artifact_root: PathBuf,
    hotfolder: PathBuf,
}

impl FsArtifactStore {
    pub fn new(config: &AutomationConfig) -> Self {
        Self {
            artifact_root: PathBuf::from(&config.artifact_root),
            hotfolder: PathBuf::from(&config.hotfolder),
        }
    }

    pub fn with_paths<P: AsRef<Path>>(artifact_root: P, hotfolder: P) -> Self {
        Self {
            artifact_root: artifact_root.as_ref().to_path_buf(),
            hotfolder: hotfolder.as_ref().to_path_buf(),
        }
    }

    /// Well-known artifact location for an (order, kind) pair.
    pub fn artifact_path(&self, order_id: i32, kind: ArtifactKind) -> PathBuf {
        self.artifact_root
            .join(order_id.to_string())
            .join(format!("barcode_{}_{}.pdf", kind.as_str(), order_id))
    }

    fn request_path(&self, order_id: i32, kind: ArtifactKind) -> PathBuf {
        self.hotfolder
            .join(format!("{}_{}.req", kind.as_str(), order_id))
    }
}

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, order_id: i32, kind: ArtifactKind) -> bool {
        self.artifact_path(order_id, kind).is_file()
    }

    fn trigger(&self, order_id: i32, kind: ArtifactKind) -> AppResult<()> {
        let request = CreationRequest {
            order_id,
            artifact: kind,
        };
        let payload = serde_json::to_vec(&request).map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

        let path = self.request_path(order_id, kind);
        std::fs::create_dir_all(&self.hotfolder).map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;
        std::fs::write(&path, payload).map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to write creation request {}: {}", path.display(), e),
        })?;

        tracing::debug!(order_id, artifact = %kind, path = %path.display(), "Barcode creation requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_is_keyed_by_order_and_kind() {
        let store = FsArtifactStore::with_paths("/artifacts", "/hot");
        assert_eq!(
            store.artifact_path(42, ArtifactKind::BoxPdf),
            PathBuf::from("/artifacts/42/barcode_box_pdf_42.pdf")
        );
        assert_eq!(
            store.artifact_path(42, ArtifactKind::Label),
            PathBuf::from("/artifacts/42/barcode_label_42.pdf")
        );
    }

    #[test]
    fn exists_reflects_filesystem_state() {
        let root = tempfile::tempdir().unwrap();
        let hot = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::with_paths(root.path(), hot.path());

        assert!(!store.exists(7, ArtifactKind::BoxPdf));

        let path = store.artifact_path(7, ArtifactKind::BoxPdf);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        assert!(store.exists(7, ArtifactKind::BoxPdf));
        assert!(!store.exists(7, ArtifactKind::Label));
    }

    #[test]
    fn trigger_drops_a_request_into_the_hotfolder() {
        let root = tempfile::tempdir().unwrap();
        let hot = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::with_paths(root.path(), hot.path());

        store.trigger(9, ArtifactKind::Label).unwrap();

        let request = hot.path().join("label_9.req");
        assert!(request.is_file());
        let payload: serde_json::Value =
            serde_json::from_slice(&std::fs::read(request).unwrap()).unwrap();
        assert_eq!(payload["order_id"], 9);
        assert_eq!(payload["artifact"], "label");
    }
}
