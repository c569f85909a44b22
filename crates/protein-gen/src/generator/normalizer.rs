use indexmap::IndexMap;

use crate::generator::{
  metrics::GenerationWarning,
  model::{EntityOrigin, EnumEntity, EnumRegistry, ModelEntity, ObjectEntity, Prop, PropKind},
  naming::{
    NamingResolver,
    identifiers::{canonical_entity_name, capitalize},
  },
  resolver::ReachableDefinitions,
  schema::{RawSchema, SchemaLookup},
};

#[derive(Debug, Default)]
pub(crate) struct NormalizedEntities {
  pub entities: IndexMap<String, ModelEntity>,
  pub enums: EnumRegistry,
  pub warnings: Vec<GenerationWarning>,
}

/// Classifies raw schemas into the normalized property lattice.
///
/// Enum domains are collected while classifying, so the registry is complete once
/// normalization finishes and generators never need to rediscover enums.
pub(crate) struct Normalizer<'a, L: SchemaLookup> {
  lookup: &'a L,
  naming: NamingResolver,
  enums: EnumRegistry,
  warnings: Vec<GenerationWarning>,
}

impl<'a, L: SchemaLookup> Normalizer<'a, L> {
  pub(crate) fn new(lookup: &'a L, naming: NamingResolver) -> Self {
    Self {
      lookup,
      naming,
      enums: EnumRegistry::new(),
      warnings: vec![],
    }
  }

  pub(crate) fn normalize(mut self, reachable: &ReachableDefinitions) -> NormalizedEntities {
    let lookup = self.lookup;
    let mut entities = IndexMap::new();

    for (canonical, raw_name) in reachable.iter() {
      let Some(schema) = lookup.definition(raw_name) else {
        continue;
      };

      if schema.is_enum() {
        let values = schema.enum_literals();
        self.record_enum(canonical, &values);
        entities.insert(
          canonical.to_string(),
          ModelEntity::Enum(EnumEntity {
            name: canonical.to_string(),
            values,
          }),
        );
      } else if schema.is_object_like() {
        let entity = self.normalize_object(canonical, raw_name, schema);
        entities.insert(canonical.to_string(), ModelEntity::Object(entity));
      } else if Self::primitive_kind(schema).is_none() && schema.ref_target().is_none() {
        self.warnings.push(GenerationWarning::EntitySkipped {
          entity: canonical.to_string(),
          reason: format!("top-level '{}' schemas are not entities", schema.type_tag().unwrap_or("untyped")),
        });
      }
    }

    NormalizedEntities {
      entities,
      enums: self.enums,
      warnings: self.warnings,
    }
  }

  fn normalize_object(&mut self, name: &str, raw_name: &str, schema: &RawSchema) -> ObjectEntity {
    let props = schema
      .properties
      .iter()
      .map(|(prop_name, prop_schema)| {
        let required = schema.requires(prop_name) && !prop_schema.is_nullable();
        self.normalize_property(name, prop_name, prop_schema, required)
      })
      .collect();

    ObjectEntity {
      name: name.to_string(),
      props,
      origin: EntityOrigin::Schema {
        raw_name: raw_name.to_string(),
      },
    }
  }

  pub(crate) fn normalize_property(&mut self, owner: &str, name: &str, schema: &RawSchema, required: bool) -> Prop {
    let kind = self.classify(owner, name, schema);
    Prop::new(name, kind, required)
  }

  fn classify(&mut self, owner: &str, name: &str, schema: &RawSchema) -> PropKind {
    if let Some(target) = schema.ref_target() {
      return self.classify_reference(owner, name, target);
    }

    match schema.type_tag() {
      Some("string") | None if schema.is_enum() => {
        let enum_name = self.naming.enum_name(&capitalize(name), owner);
        self.record_enum(&enum_name, &schema.enum_literals());
        PropKind::Enum { enum_name }
      }
      Some("array") => match schema.items.as_deref() {
        Some(items) if items.type_tag() == Some("array") => {
          self.unsupported(owner, name, "nested arrays are not modelled")
        }
        Some(items) => PropKind::array_of(self.classify(owner, name, items)),
        None => self.unsupported(owner, name, "array without items"),
      },
      Some("object") => self.unsupported(owner, name, "inline object properties are not modelled"),
      tag => match Self::primitive_kind(schema) {
        Some(kind) => kind,
        None => self.unsupported(owner, name, &format!("type '{}'", tag.unwrap_or("untyped"))),
      },
    }
  }

  /// References to enums become enum properties, references to primitive aliases
  /// degrade to the aliased primitive, and everything else is an object reference.
  fn classify_reference(&mut self, owner: &str, name: &str, target: &str) -> PropKind {
    let lookup = self.lookup;
    let canonical = canonical_entity_name(target);
    let Some(definition) = lookup.definition(target) else {
      return PropKind::Object { object_name: canonical };
    };

    if definition.is_enum() {
      self.record_enum(&canonical, &definition.enum_literals());
      return PropKind::Enum { enum_name: canonical };
    }

    if definition.type_tag() == Some("array") {
      return self.unsupported(owner, name, &format!("reference to array definition '{target}'"));
    }

    match Self::primitive_kind(definition) {
      Some(kind) if !definition.is_object_like() => kind,
      _ => PropKind::Object { object_name: canonical },
    }
  }

  fn primitive_kind(schema: &RawSchema) -> Option<PropKind> {
    match schema.type_tag()? {
      "string" if schema.is_date_time() => Some(PropKind::Date),
      "string" => Some(PropKind::String),
      "integer" if schema.is_int64() => Some(PropKind::Long),
      "integer" => Some(PropKind::Integer),
      "number" => Some(PropKind::Float),
      "boolean" => Some(PropKind::Bool),
      _ => None,
    }
  }

  fn record_enum(&mut self, name: &str, values: &[String]) {
    if let Some(warning) = self.enums.record(name, values) {
      self.warnings.push(warning);
    }
  }

  fn unsupported(&mut self, owner: &str, name: &str, reason: &str) -> PropKind {
    self.warnings.push(GenerationWarning::UnsupportedProperty {
      entity: owner.to_string(),
      property: name.to_string(),
      reason: reason.to_string(),
    });
    PropKind::Untyped
  }
}
