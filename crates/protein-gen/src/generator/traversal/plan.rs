use crate::generator::{
  model::{ObjectEntity, Prop},
  naming::identifiers::snake,
};

/// Relation from a field to the primary key of another persisted entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ForeignKey {
  pub target: String,
  pub target_table: String,
  pub parent_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldRole {
  PrimaryKey,
  ForeignKey(ForeignKey),
  Capability { interface: &'static str },
  Base,
  Plain,
}

/// How one property of an entity surfaces in every artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldPlan<'m> {
  pub prop: &'m Prop,
  /// Kotlin property name in the sync DTO.
  pub dto_name: String,
  /// Kotlin property name in the persistence entity. Object references are id-prefixed.
  pub persisted_name: String,
  /// Column name, `None` when the property is not persisted.
  pub column: Option<String>,
  pub role: FieldRole,
  /// Whether the persistence property overrides a member of the entity's supertype.
  pub overrides: bool,
}

impl FieldPlan<'_> {
  pub(crate) fn is_persisted(&self) -> bool {
    self.column.is_some()
  }

  pub(crate) fn is_primary_key(&self) -> bool {
    matches!(self.role, FieldRole::PrimaryKey)
  }

  pub(crate) fn foreign_key(&self) -> Option<&ForeignKey> {
    match &self.role {
      FieldRole::ForeignKey(foreign_key) => Some(foreign_key),
      _ => None,
    }
  }

  pub(crate) fn is_capability(&self) -> bool {
    matches!(self.role, FieldRole::Capability { .. })
  }
}

/// Supertype family of a persistence entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub(crate) enum EntityCapability {
  #[strum(to_string = "link")]
  Link,
  #[strum(to_string = "deletable")]
  Deletable,
  #[strum(to_string = "timestamped")]
  Timestamped,
  #[strum(to_string = "id")]
  IdOnly,
  #[strum(to_string = "plain")]
  Bare,
}

impl EntityCapability {
  pub(crate) fn supertype(self) -> Option<&'static str> {
    match self {
      Self::Deletable => Some("DeletableEntity"),
      Self::Timestamped => Some("BaseEntity"),
      Self::IdOnly => Some("IdEntity"),
      Self::Link | Self::Bare => None,
    }
  }

  pub(crate) fn overrides_id(self) -> bool {
    matches!(self, Self::Deletable | Self::Timestamped | Self::IdOnly)
  }

  pub(crate) fn overrides_base_field(self, field: &str) -> bool {
    match field {
      "isDeleted" => self == Self::Deletable,
      _ => matches!(self, Self::Deletable | Self::Timestamped),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntityPlan<'m> {
  pub entity: &'m ObjectEntity,
  pub table: String,
  pub capability: EntityCapability,
  /// Capability interfaces beyond the supertype, in field order.
  pub interfaces: Vec<&'static str>,
  pub fields: Vec<FieldPlan<'m>>,
  pub sync_only: bool,
}

impl<'m> EntityPlan<'m> {
  pub(crate) fn name(&self) -> &'m str {
    &self.entity.name
  }

  pub(crate) fn is_link(&self) -> bool {
    self.entity.is_link()
  }

  pub(crate) fn is_persisted(&self) -> bool {
    !self.sync_only && self.fields.iter().any(FieldPlan::is_persisted)
  }

  /// Persisted fields paired with their column names, in property order.
  pub(crate) fn columns(&self) -> impl Iterator<Item = (&FieldPlan<'m>, &str)> {
    self
      .fields
      .iter()
      .filter_map(|field| field.column.as_deref().map(|column| (field, column)))
  }

  pub(crate) fn column_names(&self) -> Vec<&str> {
    self.columns().map(|(_, column)| column).collect()
  }

  pub(crate) fn primary_key(&self) -> Option<&FieldPlan<'m>> {
    self.fields.iter().find(|field| field.is_primary_key())
  }

  pub(crate) fn foreign_keys(&self) -> impl Iterator<Item = (&FieldPlan<'m>, &ForeignKey)> {
    self
      .fields
      .iter()
      .filter_map(|field| field.foreign_key().map(|foreign_key| (field, foreign_key)))
  }

  /// Primary key columns. Links use their two key columns, entities without an `id`
  /// property have none.
  pub(crate) fn key_columns(&self) -> Vec<&str> {
    if self.is_link() {
      return self.column_names();
    }
    self
      .primary_key()
      .and_then(|field| field.column.as_deref())
      .into_iter()
      .collect()
  }

  /// Member and group key columns of a link entity.
  pub(crate) fn link_columns(&self) -> Option<(&str, &str)> {
    match self.column_names().as_slice() {
      [member, group] if self.is_link() => Some((*member, *group)),
      _ => None,
    }
  }

  pub(crate) fn has_column(&self, column: &str) -> bool {
    self.columns().any(|(_, name)| name == column)
  }

  pub(crate) fn field(&self, prop_name: &str) -> Option<&FieldPlan<'m>> {
    self.fields.iter().find(|field| field.prop.name == prop_name)
  }
}

pub(crate) fn primary_key_column(entity: &str) -> String {
  snake(&format!("id{entity}"))
}
