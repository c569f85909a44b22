use std::path::{Path, PathBuf};

use crate::generator::artifacts::{ArtifactBundle, ArtifactUnit};

const SOURCE_ROOT: &str = "src/main/java";

/// Writes generated units into an Android module's source tree.
#[derive(Debug, Clone)]
pub struct FileSink {
  root: PathBuf,
}

impl FileSink {
  pub fn new(module_dir: impl Into<PathBuf>) -> Self {
    Self {
      root: module_dir.into().join(SOURCE_ROOT),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn path_of(&self, unit: &ArtifactUnit) -> PathBuf {
    let mut path = self.root.clone();
    path.extend(unit.package().split('.').filter(|segment| !segment.is_empty()));
    path.join(format!("{}.kt", unit.name()))
  }

  /// Writes every unit of the bundle and returns the written paths in bundle order.
  pub async fn write(&self, bundle: &ArtifactBundle) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(bundle.units().len());
    for unit in bundle.units() {
      let path = self.path_of(unit);
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(&path, unit.source()).await?;
      written.push(path);
    }
    Ok(written)
  }
}
