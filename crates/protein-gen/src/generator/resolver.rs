use std::collections::HashSet;

use indexmap::IndexMap;

use crate::generator::{
  errors::ResolveError,
  naming::identifiers::canonical_entity_name,
  schema::{RawSchema, SchemaLookup},
};

/// Definitions reachable from the root, keyed by canonical name.
///
/// Each canonical name maps to the first raw definition name discovered for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReachableDefinitions {
  entries: IndexMap<String, String>,
}

impl ReachableDefinitions {
  pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(canonical, raw)| (canonical.as_str(), raw.as_str()))
  }
}

/// Walks the reference graph breadth-first from `root`.
///
/// Each raw name is enqueued once, at the moment it is first seen, and expanded when it
/// is dequeued. Cycles therefore terminate and ordering is first-seen order. A reference
/// whose target has no definition is fatal.
pub(crate) fn resolve_references(
  root: &str,
  lookup: &impl SchemaLookup,
) -> Result<ReachableDefinitions, ResolveError> {
  if lookup.definition(root).is_none() {
    return Err(ResolveError::MissingRoot { name: root.to_string() });
  }

  let mut worklist: Vec<(String, Option<String>)> = vec![(root.to_string(), None)];
  let mut seen: HashSet<String> = HashSet::from([root.to_string()]);
  let mut entries = IndexMap::new();
  let mut cursor = 0;

  while let Some((name, referenced_by)) = worklist.get(cursor).cloned() {
    cursor += 1;

    let schema = definition_for(lookup, &name, referenced_by.as_deref())?;
    entries.entry(canonical_entity_name(&name)).or_insert_with(|| name.clone());

    for target in schema.referenced_names() {
      if seen.insert(target.to_string()) {
        worklist.push((target.to_string(), Some(name.clone())));
      }
    }
  }

  Ok(ReachableDefinitions { entries })
}

fn definition_for<'a>(
  lookup: &'a impl SchemaLookup,
  name: &str,
  referenced_by: Option<&str>,
) -> Result<&'a RawSchema, ResolveError> {
  lookup.definition(name).ok_or_else(|| match referenced_by {
    Some(parent) => ResolveError::MissingDefinition {
      name: name.to_string(),
      referenced_by: parent.to_string(),
    },
    None => ResolveError::MissingRoot { name: name.to_string() },
  })
}
