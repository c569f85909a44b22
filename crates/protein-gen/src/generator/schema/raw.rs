use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const REF_PREFIXES: [&str; 2] = ["#/definitions/", "#/components/schemas/"];

/// The `type` keyword, either a single tag or (OpenAPI 3.1) a list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
  Single(String),
  Many(Vec<String>),
}

impl TypeDecl {
  fn primary(&self) -> Option<&str> {
    match self {
      Self::Single(tag) => Some(tag.as_str()),
      Self::Many(tags) => tags.iter().map(String::as_str).find(|tag| *tag != "null"),
    }
  }

  fn includes_null(&self) -> bool {
    match self {
      Self::Single(tag) => tag == "null",
      Self::Many(tags) => tags.iter().any(|tag| tag == "null"),
    }
  }
}

/// A schema node as it appears in the source document.
///
/// Only the subset of keywords that influences generation is retained. Unknown keywords
/// are ignored, and an `items` value that is not a schema object is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSchema {
  #[serde(rename = "type")]
  pub schema_type: Option<TypeDecl>,
  pub format: Option<String>,
  #[serde(rename = "$ref")]
  pub reference: Option<String>,
  #[serde(rename = "enum")]
  pub enum_values: Vec<Value>,
  pub properties: IndexMap<String, RawSchema>,
  #[serde(deserialize_with = "lenient_schema")]
  pub items: Option<Box<RawSchema>>,
  pub required: Vec<String>,
  pub nullable: Option<bool>,
  #[serde(rename = "x-nullable")]
  pub x_nullable: Option<bool>,
  #[serde(rename = "allOf")]
  pub all_of: Vec<RawSchema>,
}

fn lenient_schema<'de, D>(deserializer: D) -> Result<Option<Box<RawSchema>>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(serde_json::from_value::<RawSchema>(value).ok().map(Box::new))
}

impl RawSchema {
  /// First non-null type tag.
  pub fn type_tag(&self) -> Option<&str> {
    self.schema_type.as_ref().and_then(TypeDecl::primary)
  }

  pub fn is_nullable(&self) -> bool {
    self.nullable == Some(true)
      || self.x_nullable == Some(true)
      || self.schema_type.as_ref().is_some_and(TypeDecl::includes_null)
  }

  pub fn is_date_time(&self) -> bool {
    self.format.as_deref() == Some("date-time")
  }

  pub fn is_int64(&self) -> bool {
    self.format.as_deref() == Some("int64")
  }

  /// Name of the local definition this node refers to.
  ///
  /// A single-element `allOf` wrapping a reference counts as a reference, which is how
  /// many documents attach a description or nullability to a `$ref`.
  pub fn ref_target(&self) -> Option<&str> {
    if let Some(reference) = self.reference.as_deref() {
      return ref_name(reference);
    }

    match self.all_of.as_slice() {
      [single] if self.type_tag().is_none() || self.type_tag() == Some("object") => {
        single.reference.as_deref().and_then(ref_name)
      }
      _ => None,
    }
  }

  /// Enum literals as strings. Non-string literals are stringified, nulls dropped.
  pub fn enum_literals(&self) -> Vec<String> {
    self
      .enum_values
      .iter()
      .filter_map(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
      })
      .collect()
  }

  pub fn is_enum(&self) -> bool {
    self.enum_values.iter().any(|value| !value.is_null())
  }

  pub fn is_object_like(&self) -> bool {
    self.type_tag() == Some("object") || (self.type_tag().is_none() && !self.properties.is_empty())
  }

  pub fn requires(&self, property: &str) -> bool {
    self.required.iter().any(|name| name == property)
  }

  /// Definitions referenced directly by this schema's properties or their array items.
  pub fn referenced_names(&self) -> impl Iterator<Item = &str> {
    self.properties.values().filter_map(|prop| {
      prop
        .ref_target()
        .or_else(|| prop.items.as_deref().and_then(RawSchema::ref_target))
    })
  }
}

/// Extracts the definition name from a local reference such as `#/definitions/Foo`.
pub fn ref_name(reference: &str) -> Option<&str> {
  REF_PREFIXES
    .iter()
    .find_map(|prefix| reference.strip_prefix(prefix))
    .filter(|name| !name.is_empty() && !name.contains('/'))
}
