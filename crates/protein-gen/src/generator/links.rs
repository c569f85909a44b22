use indexmap::IndexMap;

use crate::generator::{
  metrics::GenerationWarning,
  model::{EntityOrigin, ModelEntity, ObjectEntity, Prop, PropKind},
  naming::NamingResolver,
};

/// Synthesizes `<Group>Link` join entities for every group-like object entity.
///
/// A link carries two required integer keys: `id<Member>` where the member name is the
/// group name with `Group` removed, and `id<Group>`. Links only ever appear in the
/// with-links view and are never fed back into reference resolution.
pub(crate) fn synthesize_links(
  entities: &IndexMap<String, ModelEntity>,
  naming: NamingResolver,
) -> (IndexMap<String, ObjectEntity>, Vec<GenerationWarning>) {
  let mut links = IndexMap::new();
  let mut warnings = vec![];

  for entity in entities.values().filter_map(ModelEntity::as_object) {
    if !naming.is_link_candidate(&entity.name) {
      continue;
    }

    let link_name = format!("{}Link", entity.name);
    if entities.contains_key(&link_name) {
      warnings.push(GenerationWarning::EntitySkipped {
        entity: link_name,
        reason: "a definition with the link name already exists".to_string(),
      });
      continue;
    }

    let member = entity.name.replace("Group", "");
    if member.is_empty() {
      continue;
    }

    links.insert(
      link_name.clone(),
      ObjectEntity {
        name: link_name,
        props: vec![
          Prop::new(format!("id{member}"), PropKind::Integer, true),
          Prop::new(format!("id{}", entity.name), PropKind::Integer, true),
        ],
        origin: EntityOrigin::Link {
          group: entity.name.clone(),
          member,
        },
      },
    );
  }

  (links, warnings)
}
