use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use crate::generator::artifacts::ArtifactKind;

pub const DEFAULT_ROOT_ENTITY: &str = "SyncData";
pub const DEFAULT_DATABASE_NAME: &str = "AppDatabase";
pub const DEFAULT_DATABASE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct GeneratorConfig {
  /// Root package of every generated artifact.
  #[builder(into)]
  pub package_name: String,
  #[builder(into, default = DEFAULT_ROOT_ENTITY.to_string())]
  pub root_entity: String,
  /// Package holding generated enums. Defaults to `<package>.model`.
  #[builder(into)]
  pub enum_package: Option<String>,
  #[builder(into, default = DEFAULT_DATABASE_NAME.to_string())]
  pub database_name: String,
  #[builder(default = DEFAULT_DATABASE_VERSION)]
  pub database_version: u32,
  /// Artifact kinds to produce. Empty means every kind that is not opt-in.
  #[builder(default)]
  pub artifacts: BTreeSet<ArtifactKind>,
}

impl GeneratorConfig {
  pub fn enum_package(&self) -> String {
    self
      .enum_package
      .clone()
      .unwrap_or_else(|| format!("{}.model", self.package_name))
  }

  pub fn wants(&self, kind: ArtifactKind) -> bool {
    if self.artifacts.is_empty() {
      !kind.is_opt_in()
    } else {
      self.artifacts.contains(&kind)
    }
  }

  pub fn selected_artifacts(&self) -> Vec<ArtifactKind> {
    ArtifactKind::iter().filter(|kind| self.wants(*kind)).collect()
  }

  pub fn packages(&self) -> Packages {
    Packages::new(&self.package_name, self.enum_package())
  }
}

/// Package layout of the generated data layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packages {
  pub sync_entity: String,
  pub sync: String,
  pub database: String,
  pub database_entity: String,
  pub dao: String,
  pub dao_base: String,
  pub mapper: String,
  pub helper: String,
  pub enums: String,
  pub domain_model: String,
  pub domain_mapper: String,
}

impl Packages {
  pub fn new(root: &str, enums: impl Into<String>) -> Self {
    Self {
      sync_entity: format!("{root}.sync.entity"),
      sync: format!("{root}.sync"),
      database: format!("{root}.database"),
      database_entity: format!("{root}.database.entity"),
      dao: format!("{root}.database.dao"),
      dao_base: format!("{root}.database.dao.base"),
      mapper: format!("{root}.sync.mapper"),
      helper: format!("{root}.sync.mapper.helper"),
      enums: enums.into(),
      domain_model: format!("{root}.domain.model"),
      domain_mapper: format!("{root}.domain.mapper"),
    }
  }
}
