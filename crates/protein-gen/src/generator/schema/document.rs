use indexmap::IndexMap;

use super::RawSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Dialect {
  #[default]
  #[strum(to_string = "empty")]
  Empty,
  #[strum(to_string = "Swagger 2.0")]
  Swagger2,
  #[strum(to_string = "OpenAPI 3")]
  OpenApi3,
}

/// The parsed input document, reduced to its named schema definitions.
///
/// Definitions keep document order, which every later stage relies on for
/// deterministic output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
  pub title: Option<String>,
  pub version: Option<String>,
  pub dialect: Dialect,
  pub definitions: IndexMap<String, RawSchema>,
}

impl RawDocument {
  /// The substitute used when a document could not be loaded.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.definitions.is_empty()
  }
}

/// Name-to-schema lookup used by the reference resolver.
pub trait SchemaLookup {
  fn definition(&self, name: &str) -> Option<&RawSchema>;
}

impl SchemaLookup for RawDocument {
  fn definition(&self, name: &str) -> Option<&RawSchema> {
    self.definitions.get(name)
  }
}

impl SchemaLookup for IndexMap<String, RawSchema> {
  fn definition(&self, name: &str) -> Option<&RawSchema> {
    self.get(name)
  }
}
