mod enums;
mod types;

use indexmap::IndexMap;

pub use enums::EnumRegistry;
pub use types::{EntityOrigin, EnumEntity, ModelEntity, ObjectEntity, Prop, PropKind};

/// The resolved, normalized model. Immutable once built.
///
/// Two views are exposed: the pure view holds schema-derived entities only, the
/// with-links view additionally holds synthesized link entities. Generators receive
/// a shared reference and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedModel {
  root: String,
  entities: IndexMap<String, ModelEntity>,
  links: IndexMap<String, ObjectEntity>,
  enums: EnumRegistry,
}

impl ResolvedModel {
  pub fn new(
    root: impl Into<String>,
    entities: IndexMap<String, ModelEntity>,
    links: IndexMap<String, ObjectEntity>,
    enums: EnumRegistry,
  ) -> Self {
    Self {
      root: root.into(),
      entities,
      links,
      enums,
    }
  }

  pub fn empty(root: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      ..Self::default()
    }
  }

  pub fn root(&self) -> &str {
    &self.root
  }

  /// Every resolved entity, objects and enums, in discovery order.
  pub fn entities(&self) -> impl Iterator<Item = &ModelEntity> {
    self.entities.values()
  }

  /// Schema-derived object entities.
  pub fn pure(&self) -> impl Iterator<Item = &ObjectEntity> {
    self.entities.values().filter_map(ModelEntity::as_object)
  }

  /// Schema-derived object entities followed by synthesized links.
  pub fn with_links(&self) -> impl Iterator<Item = &ObjectEntity> {
    self.pure().chain(self.links.values())
  }

  pub fn links(&self) -> impl Iterator<Item = &ObjectEntity> {
    self.links.values()
  }

  pub fn enums(&self) -> &EnumRegistry {
    &self.enums
  }
}

#[cfg(test)]
mod tests;
