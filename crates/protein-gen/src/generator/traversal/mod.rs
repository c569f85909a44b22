//! Per-entity traversal shared by every artifact generator.
//!
//! Field naming, column naming, foreign-key derivation, and supertype selection are
//! decided exactly once here. Generators only read the resulting [`ModelPlan`], which is
//! what keeps table names, column names, and key targets consistent across artifacts.

mod plan;

use std::collections::HashMap;

pub(crate) use plan::{EntityCapability, EntityPlan, FieldPlan, FieldRole, ForeignKey, primary_key_column};

use crate::generator::{
  metrics::GenerationWarning,
  model::{EnumRegistry, ObjectEntity, Prop, PropKind, ResolvedModel},
  naming::{
    NamingResolver,
    identifiers::{has_id_prefix, id_prefixed, property_identifier, snake},
  },
};

#[derive(Debug, Clone)]
pub(crate) struct ModelPlan<'m> {
  model: &'m ResolvedModel,
  entities: Vec<EntityPlan<'m>>,
  warnings: Vec<GenerationWarning>,
}

/// Persistence facts about an entity that other entities' foreign keys are checked against.
struct KeyTarget {
  table: String,
  primary_key: Option<String>,
}

impl<'m> ModelPlan<'m> {
  pub(crate) fn build(model: &'m ResolvedModel, naming: NamingResolver) -> Self {
    let mut warnings = vec![];

    let targets: HashMap<&str, KeyTarget> = model
      .with_links()
      .filter(|entity| !naming.is_sync_only(&entity.name, model.root()))
      .filter(|entity| entity.props.iter().any(|prop| is_persistable(&prop.kind)))
      .map(|entity| {
        let primary_key = has_key_id(entity).then(|| primary_key_column(&entity.name));
        (
          entity.name.as_str(),
          KeyTarget {
            table: snake(&entity.name),
            primary_key,
          },
        )
      })
      .collect();

    let entities = model
      .with_links()
      .map(|entity| plan_entity(entity, model.root(), naming, &targets, &mut warnings))
      .collect::<Vec<_>>();

    for entity in entities.iter().filter(|plan| !plan.sync_only && !plan.is_persisted()) {
      warnings.push(GenerationWarning::EntitySkipped {
        entity: entity.name().to_string(),
        reason: "no persistable columns".to_string(),
      });
    }

    Self {
      model,
      entities,
      warnings,
    }
  }

  pub(crate) fn enums(&self) -> &'m EnumRegistry {
    self.model.enums()
  }

  /// Every planned entity in model order, links last.
  pub(crate) fn entities(&self) -> &[EntityPlan<'m>] {
    &self.entities
  }

  /// Schema-derived entities in the pure view, sync-only ones included.
  pub(crate) fn sync_entities(&self) -> impl Iterator<Item = &EntityPlan<'m>> {
    self.entities.iter().filter(|plan| !plan.is_link())
  }

  /// Entities that get a table, links included.
  pub(crate) fn persisted(&self) -> impl Iterator<Item = &EntityPlan<'m>> {
    self.entities.iter().filter(|plan| plan.is_persisted())
  }

  /// Persisted schema-derived entities, the ones with a DTO counterpart.
  pub(crate) fn mapped(&self) -> impl Iterator<Item = &EntityPlan<'m>> {
    self.persisted().filter(|plan| !plan.is_link())
  }

  #[cfg(test)]
  pub(crate) fn entity(&self, name: &str) -> Option<&EntityPlan<'m>> {
    self.entities.iter().find(|plan| plan.name() == name)
  }

  pub(crate) fn warnings(&self) -> &[GenerationWarning] {
    &self.warnings
  }
}

/// Whether `id` exists and can serve as the `Int` primary key.
fn has_key_id(entity: &ObjectEntity) -> bool {
  entity.prop("id").is_some_and(|prop| prop.kind.is_key_compatible())
}

fn is_persistable(kind: &PropKind) -> bool {
  !matches!(kind, PropKind::Untyped) && !(kind.is_array() && kind.contains_object())
}

fn plan_entity<'m>(
  entity: &'m ObjectEntity,
  root: &str,
  naming: NamingResolver,
  targets: &HashMap<&str, KeyTarget>,
  warnings: &mut Vec<GenerationWarning>,
) -> EntityPlan<'m> {
  let sync_only = naming.is_sync_only(&entity.name, root);
  let capability = capability_of(entity, naming);

  let mut fields: Vec<FieldPlan<'m>> = entity
    .props
    .iter()
    .map(|prop| plan_field(entity, prop, capability, sync_only, naming, targets, warnings))
    .collect();
  drop_colliding_fields(entity, &mut fields, warnings);

  let interfaces = fields
    .iter()
    .filter(|field| field.is_persisted())
    .filter_map(|field| match field.role {
      FieldRole::Capability { interface } => Some(interface),
      _ => None,
    })
    .collect();

  EntityPlan {
    entity,
    table: snake(&entity.name),
    capability,
    interfaces,
    fields,
    sync_only,
  }
}

/// Keeps the first of several properties that land on the same persisted name or column.
fn drop_colliding_fields(entity: &ObjectEntity, fields: &mut [FieldPlan<'_>], warnings: &mut Vec<GenerationWarning>) {
  // (property, persisted name, column) of every field kept so far
  let mut claimed: Vec<(String, String, String)> = vec![];
  for field in fields.iter_mut() {
    let Some(column) = field.column.clone() else {
      continue;
    };

    let existing = claimed
      .iter()
      .find(|(_, name, claimed_column)| *name == field.persisted_name || *claimed_column == column)
      .map(|(property, ..)| property.clone());
    match existing {
      Some(existing) => {
        warnings.push(GenerationWarning::FieldCollision {
          entity: entity.name.clone(),
          property: field.prop.name.clone(),
          existing,
        });
        field.column = None;
        field.role = FieldRole::Plain;
        field.overrides = false;
      }
      None => claimed.push((field.prop.name.clone(), field.persisted_name.clone(), column)),
    }
  }
}

fn capability_of(entity: &ObjectEntity, naming: NamingResolver) -> EntityCapability {
  if entity.is_link() {
    return EntityCapability::Link;
  }

  let has_timestamps = entity
    .props
    .iter()
    .any(|prop| naming.is_base_field(&prop.name) && prop.name != "isDeleted");
  match (entity.has_prop("isDeleted"), has_timestamps, has_key_id(entity)) {
    (true, _, _) => EntityCapability::Deletable,
    (false, true, _) => EntityCapability::Timestamped,
    (false, false, true) => EntityCapability::IdOnly,
    (false, false, false) => EntityCapability::Bare,
  }
}

fn plan_field<'m>(
  entity: &ObjectEntity,
  prop: &'m Prop,
  capability: EntityCapability,
  sync_only: bool,
  naming: NamingResolver,
  targets: &HashMap<&str, KeyTarget>,
  warnings: &mut Vec<GenerationWarning>,
) -> FieldPlan<'m> {
  let dto_name = property_identifier(&prop.name);
  let persisted_name = match prop.kind {
    PropKind::Object { .. } => property_identifier(&id_prefixed(&prop.name)),
    _ => dto_name.clone(),
  };

  let is_primary_key = prop.name == "id" && !entity.is_link() && prop.kind.is_key_compatible();
  let column = if !is_persistable(&prop.kind) {
    None
  } else if is_primary_key {
    Some(primary_key_column(&entity.name))
  } else {
    Some(snake(&persisted_name))
  };

  let long_key = prop.kind == PropKind::Long && (prop.name == "id" || has_id_prefix(&prop.name));
  if long_key && column.is_some() && !sync_only {
    warnings.push(GenerationWarning::UnsupportedProperty {
      entity: entity.name.clone(),
      property: prop.name.clone(),
      reason: "64-bit keys are stored as plain columns".to_string(),
    });
  }

  let (role, overrides) = if is_primary_key {
    (FieldRole::PrimaryKey, capability.overrides_id())
  } else if let Some(capability_field) = naming.capability(&prop.name) {
    (
      FieldRole::Capability {
        interface: capability_field.interface,
      },
      true,
    )
  } else if naming.is_base_field(&prop.name) {
    (FieldRole::Base, capability.overrides_base_field(&prop.name))
  } else if column.is_some() && !sync_only && prop.kind.is_key_compatible() {
    (
      foreign_key_role(entity, &persisted_name, naming, targets, warnings),
      false,
    )
  } else {
    (FieldRole::Plain, false)
  };

  FieldPlan {
    prop,
    dto_name,
    persisted_name,
    column,
    role,
    overrides,
  }
}

fn foreign_key_role(
  entity: &ObjectEntity,
  field: &str,
  naming: NamingResolver,
  targets: &HashMap<&str, KeyTarget>,
  warnings: &mut Vec<GenerationWarning>,
) -> FieldRole {
  let Some(target) = naming.foreign_key_target(field, &entity.name) else {
    return FieldRole::Plain;
  };

  match targets.get(target.as_str()) {
    Some(KeyTarget {
      table,
      primary_key: Some(parent_column),
    }) => FieldRole::ForeignKey(ForeignKey {
      target_table: table.clone(),
      parent_column: parent_column.clone(),
      target,
    }),
    _ => {
      warnings.push(GenerationWarning::ForeignKeyTargetMissing {
        entity: entity.name.clone(),
        field: field.to_string(),
        target,
      });
      FieldRole::Plain
    }
  }
}

#[cfg(test)]
mod tests;
