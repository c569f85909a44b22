use std::collections::BTreeMap;

use strum::Display;

use crate::generator::artifacts::{ArtifactBundle, ArtifactKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub definitions_total: usize,
  pub entities_resolved: usize,
  pub enums_collected: usize,
  pub links_synthesized: usize,
  pub persisted_entities: usize,
  pub foreign_keys: usize,
  pub units_by_kind: BTreeMap<ArtifactKind, usize>,
  pub triggers_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_bundle(&mut self, bundle: &ArtifactBundle) {
    for unit in bundle.units() {
      *self.units_by_kind.entry(unit.kind).or_insert(0) += 1;
    }
    self.triggers_generated += bundle.triggers().map_or(0, |script| script.triggers.len());
  }

  pub fn units_generated(&self) -> usize {
    self.units_by_kind.values().sum()
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Property '{entity}.{property}' has an unsupported shape: {reason}")]
  UnsupportedProperty {
    entity: String,
    property: String,
    reason: String,
  },
  #[strum(to_string = "Field '{entity}.{field}' looks like a foreign key but '{target}' is not a persisted entity")]
  ForeignKeyTargetMissing {
    entity: String,
    field: String,
    target: String,
  },
  #[strum(to_string = "Property '{entity}.{property}' maps to the same column as '{existing}' and is not persisted")]
  FieldCollision {
    entity: String,
    property: String,
    existing: String,
  },
  #[strum(to_string = "Entity '{entity}' skipped: {reason}")]
  EntitySkipped { entity: String, reason: String },
  #[strum(to_string = "Enum '{enum_name}' declared with differing values; domains merged")]
  EnumDomainMerged { enum_name: String },
  #[strum(to_string = "{message}")]
  TrackedError { message: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::EntitySkipped { .. } | Self::UnsupportedProperty { .. } | Self::FieldCollision { .. }
    )
  }
}
