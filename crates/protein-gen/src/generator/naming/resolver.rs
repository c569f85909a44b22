use super::{
  identifiers::strip_id_prefix,
  tables::{CapabilityField, NamingTable, STANDARD},
};

/// Resolves reference-derived names to canonical entity names.
///
/// Every artifact generator goes through the same resolver, so a name that is rewritten
/// for one artifact is rewritten identically for all of them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NamingResolver {
  table: &'static NamingTable,
}

impl Default for NamingResolver {
  fn default() -> Self {
    Self::new(&STANDARD)
  }
}

impl NamingResolver {
  pub(crate) const fn new(table: &'static NamingTable) -> Self {
    Self { table }
  }

  /// Canonical entity for `raw` when referenced from inside `owner`.
  pub(crate) fn resolve(&self, raw: &str, owner: Option<&str>) -> String {
    if let Some(canonical) = owner.and_then(|owner| self.owner_override(raw, owner)) {
      return canonical.to_string();
    }

    if let Some((_, canonical)) = self.table.exact_aliases.iter().find(|(alias, _)| *alias == raw) {
      return (*canonical).to_string();
    }

    self
      .table
      .prefix_families
      .iter()
      .filter(|(prefix, _)| raw.starts_with(prefix))
      .max_by_key(|(prefix, _)| prefix.len())
      .map_or_else(|| raw.to_string(), |(_, canonical)| (*canonical).to_string())
  }

  /// Enum type of an inline enum property named `raw` on `owner`.
  ///
  /// Only owner overrides apply here. Aliases and prefix families name entities.
  pub(crate) fn enum_name(&self, raw: &str, owner: &str) -> String {
    self.owner_override(raw, owner).unwrap_or(raw).to_string()
  }

  fn owner_override(&self, raw: &str, owner: &str) -> Option<&'static str> {
    self
      .table
      .owner_overrides
      .iter()
      .find(|entry| entry.owner == owner && entry.raw == raw)
      .map(|entry| entry.canonical)
  }

  /// Target entity of an `id<Name>` field declared on `owner`.
  ///
  /// Returns `None` when the field does not carry the `id` prefix.
  pub(crate) fn foreign_key_target(&self, field: &str, owner: &str) -> Option<String> {
    strip_id_prefix(field).map(|stripped| self.resolve(stripped, Some(owner)))
  }

  /// Entities whose name contains `Group` get a synthesized link entity, unless denylisted.
  pub(crate) fn is_link_candidate(&self, entity: &str) -> bool {
    entity.contains("Group") && !self.table.link_denylist.contains(&entity)
  }

  /// Sync-only entities appear in the sync DTO artifact and nowhere else.
  pub(crate) fn is_sync_only(&self, entity: &str, root: &str) -> bool {
    entity == root || self.table.sync_only.contains(&entity)
  }

  pub(crate) fn capability(&self, field: &str) -> Option<&'static CapabilityField> {
    self.table.capability_fields.iter().find(|entry| entry.field == field)
  }

  pub(crate) fn is_base_field(&self, field: &str) -> bool {
    self.table.base_fields.contains(&field)
  }
}
