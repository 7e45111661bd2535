//! Filesystem-backed artifact store. Papers live under the configured
//! uploads root, in one subdirectory per artifact kind, and are served
//! read-only via `/uploads`.

use std::path::{Path, PathBuf};

use slate_core::{
  artifact::{ArtifactKind, ArtifactRef},
  store::ArtifactStore,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("artifact i/o error: {0}")]
pub struct ArtifactError(#[from] std::io::Error);

pub struct FsArtifactStore {
  root: PathBuf,
}

impl FsArtifactStore {
  /// Open the store, creating the per-kind subdirectories if needed.
  pub async fn open(root: impl AsRef<Path>) -> Result<Self, ArtifactError> {
    let root = root.as_ref().to_path_buf();
    for kind in [ArtifactKind::QuestionPaper, ArtifactKind::AnswerPaper] {
      tokio::fs::create_dir_all(root.join(kind.dir())).await?;
    }
    Ok(Self { root })
  }

  fn path_of(&self, artifact: &ArtifactRef) -> PathBuf {
    self.root.join(artifact.relative_path())
  }
}

impl ArtifactStore for FsArtifactStore {
  type Error = ArtifactError;

  async fn save(
    &self,
    artifact: &ArtifactRef,
    data: &[u8],
  ) -> Result<(), ArtifactError> {
    Ok(tokio::fs::write(self.path_of(artifact), data).await?)
  }

  async fn remove(&self, artifact: &ArtifactRef) -> Result<bool, ArtifactError> {
    let path = self.path_of(artifact);
    if !tokio::fs::try_exists(&path).await? {
      return Ok(false);
    }
    tokio::fs::remove_file(&path).await?;
    Ok(true)
  }
}
