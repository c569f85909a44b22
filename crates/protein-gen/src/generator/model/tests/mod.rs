use indexmap::IndexMap;

use crate::generator::{
  metrics::GenerationWarning,
  model::{EntityOrigin, EnumEntity, EnumRegistry, ModelEntity, ObjectEntity, Prop, PropKind, ResolvedModel},
};

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(ToString::to_string).collect()
}

fn object(name: &str, origin: EntityOrigin) -> ObjectEntity {
  ObjectEntity {
    name: name.to_string(),
    props: vec![Prop::new("id", PropKind::Integer, false)],
    origin,
  }
}

#[test]
fn test_enum_registry_first_recording_is_silent() {
  let mut registry = EnumRegistry::new();
  assert_eq!(registry.record("Status", &strings(&["open", "closed", "open"])), None);
  assert_eq!(registry.get("Status"), Some(strings(&["open", "closed"]).as_slice()));
  assert_eq!(registry.record("Status", &strings(&["closed", "open"])), None);
}

#[test]
fn test_enum_registry_merges_conflicting_domains_once() {
  let mut registry = EnumRegistry::new();
  registry.record("Status", &strings(&["open", "closed"]));

  let warning = registry.record("Status", &strings(&["open", "archived"]));
  assert_eq!(
    warning,
    Some(GenerationWarning::EnumDomainMerged {
      enum_name: "Status".to_string()
    })
  );
  assert_eq!(
    registry.get("Status"),
    Some(strings(&["open", "closed", "archived"]).as_slice())
  );

  assert_eq!(registry.record("Status", &strings(&["draft"])), None);
  assert_eq!(registry.len(), 1);
}

#[test]
fn test_enum_registry_subset_counts_as_conflict() {
  let mut registry = EnumRegistry::new();
  registry.record("Kind", &strings(&["a", "b"]));
  assert!(registry.record("Kind", &strings(&["a"])).is_some());
  assert_eq!(registry.get("Kind"), Some(strings(&["a", "b"]).as_slice()));
}

#[test]
fn test_prop_kind_helpers() {
  let nested = PropKind::array_of(PropKind::array_of(PropKind::Object {
    object_name: "Line".to_string(),
  }));
  assert!(nested.is_array());
  assert!(nested.contains_object());

  assert!(PropKind::Integer.is_key_compatible());
  assert!(!PropKind::Long.is_key_compatible());
  assert!(!PropKind::String.is_key_compatible());
  assert!(!PropKind::array_of(PropKind::Integer).is_key_compatible());
}

#[test]
fn test_resolved_model_views() {
  let mut entities = IndexMap::new();
  entities.insert(
    "ColorGroup".to_string(),
    ModelEntity::Object(object(
      "ColorGroup",
      EntityOrigin::Schema {
        raw_name: "ColorGroupDto".to_string(),
      },
    )),
  );
  entities.insert(
    "Shade".to_string(),
    ModelEntity::Enum(EnumEntity {
      name: "Shade".to_string(),
      values: strings(&["light", "dark"]),
    }),
  );
  let mut links = IndexMap::new();
  links.insert(
    "ColorGroupLink".to_string(),
    object(
      "ColorGroupLink",
      EntityOrigin::Link {
        group: "ColorGroup".to_string(),
        member: "Color".to_string(),
      },
    ),
  );

  let model = ResolvedModel::new("SyncData", entities, links, EnumRegistry::new());

  assert_eq!(model.entities().map(ModelEntity::name).collect::<Vec<_>>(), vec!["ColorGroup", "Shade"]);
  assert_eq!(model.pure().map(|entity| entity.name.as_str()).collect::<Vec<_>>(), vec!["ColorGroup"]);
  assert_eq!(
    model.with_links().map(|entity| entity.name.as_str()).collect::<Vec<_>>(),
    vec!["ColorGroup", "ColorGroupLink"]
  );
  let object = |name: &str| model.with_links().find(|entity| entity.name == name);
  assert!(object("ColorGroupLink").is_some_and(ObjectEntity::is_link));
  assert!(object("Shade").is_none());
  assert!(object("ColorGroup").is_some_and(|entity| entity.has_prop("id")));
}

#[test]
fn test_empty_model_keeps_root() {
  let model = ResolvedModel::empty("SyncData");
  assert_eq!(model.entities().count(), 0);
  assert_eq!(model.root(), "SyncData");
  assert_eq!(model.with_links().count(), 0);
}
